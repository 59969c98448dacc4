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

use std::sync::Arc;

use regex::Regex;

use super::MatchResult;
use crate::{digit_sequence::DigitSequence, interfaces::MatcherApi};

/// Matcher backed by an anchored regular expression.
///
/// Regular expressions cannot tell whether an input is the prefix of a
/// match, so this matcher never reports [`MatchResult::PartialMatch`].
#[derive(Debug)]
pub(crate) struct RegexMatcher {
    regex: Arc<Regex>,
}

impl RegexMatcher {
    pub fn new(regex: Arc<Regex>) -> Self {
        Self { regex }
    }
}

impl MatcherApi for RegexMatcher {
    fn match_digits(&self, sequence: &DigitSequence) -> MatchResult {
        let digits: String = sequence
            .digits()
            .iter()
            .map(|&d| char::from(b'0' + d))
            .collect();
        if self.regex.is_match(&digits) {
            return MatchResult::Matched;
        }
        // Digits are ASCII, so every byte index is a char boundary.
        if (0..digits.len()).rev().any(|end| self.regex.is_match(&digits[..end])) {
            MatchResult::ExcessDigits
        } else {
            MatchResult::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RegexMatcher;
    use crate::{
        digit_sequence::DigitSequence, interfaces::MatcherApi, matcher::MatchResult,
        regexp_cache::RegexCache,
    };

    #[test]
    fn full_and_excess_matching() {
        let cache = RegexCache::new();
        let matcher = RegexMatcher::new(cache.get_anchored_regex(r"20\d{2}|7[4-9]\d").unwrap());
        let check = |s: &str| matcher.match_digits(&DigitSequence::parse(s).unwrap());
        assert_eq!(check("2012"), MatchResult::Matched);
        assert_eq!(check("741"), MatchResult::Matched);
        assert_eq!(check("74123"), MatchResult::ExcessDigits);
        assert_eq!(check("20"), MatchResult::Invalid);
        assert_eq!(check("7312"), MatchResult::Invalid);
    }
}
