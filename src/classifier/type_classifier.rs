// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    digit_sequence::DigitSequence,
    matcher::{MatchResult, MatcherFunction},
};

/// Runtime classifier for one axis of one calling code.
#[derive(Debug, Clone)]
pub(crate) struct TypeClassifier {
    values: Vec<(String, MatcherFunction)>,
    single_valued: bool,
    value_matcher: bool,
}

impl TypeClassifier {
    pub fn new(values: Vec<(String, MatcherFunction)>, single_valued: bool, value_matcher: bool) -> Self {
        Self { values, single_valued, value_matcher }
    }

    pub fn is_single_valued(&self) -> bool {
        self.single_valued
    }

    pub fn supports_value_matcher(&self) -> bool {
        self.value_matcher
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(value, _)| value.as_str())
    }

    /// Values whose ranges contain `sequence`; at most one for single valued
    /// classifiers.
    pub fn classify(&self, sequence: &DigitSequence) -> Vec<&str> {
        let mut matches = self
            .values
            .iter()
            .filter(|(_, matcher)| matcher.is_match(sequence))
            .map(|(value, _)| value.as_str());
        if self.single_valued {
            matches.next().into_iter().collect()
        } else {
            matches.collect()
        }
    }

    /// The strongest result of matching `sequence` against any of `values`.
    /// Unknown values match nothing.
    pub fn match_values<'a, I>(&self, sequence: &DigitSequence, values: I) -> MatchResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        values
            .into_iter()
            .filter_map(|wanted| self.values.iter().find(|(value, _)| value == wanted))
            .map(|(_, matcher)| matcher.match_sequence(sequence))
            .max()
            .unwrap_or(MatchResult::Invalid)
    }

    /// Values which `prefix` matches or could still match with more digits.
    pub fn get_possible_values(&self, prefix: &DigitSequence) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, matcher)| matcher.match_sequence(prefix) >= MatchResult::PartialMatch)
            .map(|(value, _)| value.as_str())
            .collect()
    }
}
