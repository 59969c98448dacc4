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

use crate::{digit_sequence::DigitSequence, range_set::RangeSet};

use super::errors::MetadataError;

/// Maps labels to the ranges they classify, for a single axis.
///
/// Labels keep their insertion order, which is also the order used when a
/// single-valued classifier resolves overlapping ranges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeClassifier {
    entries: Vec<(String, RangeSet)>,
    single_valued: bool,
    classifier_only: bool,
}

#[derive(Debug, Default)]
pub struct RangeClassifierBuilder {
    entries: Vec<(String, RangeSet)>,
    single_valued: bool,
    classifier_only: bool,
}

impl RangeClassifierBuilder {
    pub fn single_valued(mut self, single_valued: bool) -> Self {
        self.single_valued = single_valued;
        self
    }

    /// Marks the classifier as usable for classification only, with no
    /// support for partial matching of its labels.
    pub fn classifier_only(mut self, classifier_only: bool) -> Self {
        self.classifier_only = classifier_only;
        self
    }

    /// Adds a label. Labels with empty ranges are silently ignored.
    pub fn put(mut self, label: impl Into<String>, ranges: RangeSet) -> Result<Self, MetadataError> {
        let label = label.into();
        if self.entries.iter().any(|(existing, _)| *existing == label) {
            return Err(MetadataError::DuplicateLabel(label));
        }
        if !ranges.is_empty() {
            self.entries.push((label, ranges));
        }
        Ok(self)
    }

    pub fn put_all<L, I>(self, entries: I) -> Result<Self, MetadataError>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, RangeSet)>,
    {
        entries
            .into_iter()
            .try_fold(self, |builder, (label, ranges)| builder.put(label, ranges))
    }

    pub fn build(self) -> RangeClassifier {
        RangeClassifier {
            entries: self.entries,
            single_valued: self.single_valued,
            classifier_only: self.classifier_only,
        }
    }
}

impl RangeClassifier {
    pub fn builder() -> RangeClassifierBuilder {
        RangeClassifierBuilder::default()
    }

    pub fn is_single_valued(&self) -> bool {
        self.single_valued
    }

    pub fn is_classifier_only(&self) -> bool {
        self.classifier_only
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &RangeSet)> {
        self.entries.iter().map(|(label, ranges)| (label.as_str(), ranges))
    }

    /// Returns the ranges of `label`, or an empty set for unknown labels.
    pub fn get_ranges(&self, label: &str) -> &RangeSet {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, ranges)| ranges)
            .unwrap_or(RangeSet::empty_ref())
    }

    /// Returns the labels whose ranges contain `sequence`. A single-valued
    /// classifier returns at most the first such label.
    pub fn classify(&self, sequence: &DigitSequence) -> Vec<&str> {
        let mut matches = self
            .entries
            .iter()
            .filter(|(_, ranges)| ranges.contains(sequence))
            .map(|(label, _)| label.as_str());
        if self.single_valued {
            matches.next().into_iter().collect()
        } else {
            matches.collect()
        }
    }

    /// Returns a copy with every label's ranges intersected with `bound`.
    /// Labels left empty are dropped.
    pub fn intersect(&self, bound: &RangeSet) -> RangeClassifier {
        self.map_ranges(|ranges| ranges.intersect(bound))
    }

    /// Returns a copy with `f` applied to every label's ranges, keeping the
    /// label order and flags. Labels left empty are dropped.
    pub fn map_ranges<F: Fn(&RangeSet) -> RangeSet>(&self, f: F) -> RangeClassifier {
        let entries = self
            .entries
            .iter()
            .map(|(label, ranges)| (label.clone(), f(ranges)))
            .filter(|(_, ranges)| !ranges.is_empty())
            .collect();
        RangeClassifier {
            entries,
            single_valued: self.single_valued,
            classifier_only: self.classifier_only,
        }
    }
}
