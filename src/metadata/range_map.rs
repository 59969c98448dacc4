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

use crate::range_set::RangeSet;

use super::{ClassifierType, RangeClassifier, errors::MetadataError};

/// The range data of one calling code: its validity envelope and one
/// classifier per axis.
///
/// Every classifier is bounded by the envelope, so no label is ever reported
/// for a sequence which is not valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMap {
    all_ranges: RangeSet,
    classifiers: Vec<(ClassifierType, RangeClassifier)>,
}

#[derive(Debug, Default)]
pub struct RangeMapBuilder {
    classifiers: Vec<(ClassifierType, RangeClassifier)>,
}

impl RangeMapBuilder {
    pub fn put(
        mut self,
        classifier_type: ClassifierType,
        classifier: RangeClassifier,
    ) -> Result<Self, MetadataError> {
        if self.classifiers.iter().any(|(t, _)| *t == classifier_type) {
            return Err(MetadataError::DuplicateType(classifier_type));
        }
        self.classifiers.push((classifier_type, classifier));
        Ok(self)
    }

    /// Builds the map, bounding every classifier by `all_ranges`.
    pub fn build(self, all_ranges: RangeSet) -> RangeMap {
        let classifiers = self
            .classifiers
            .into_iter()
            .map(|(t, classifier)| {
                let bounded = classifier.intersect(&all_ranges);
                (t, bounded)
            })
            .collect();
        RangeMap { all_ranges, classifiers }
    }
}

impl RangeMap {
    pub fn builder() -> RangeMapBuilder {
        RangeMapBuilder::default()
    }

    pub fn all_ranges(&self) -> &RangeSet {
        &self.all_ranges
    }

    /// The classifier types of this map, in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &ClassifierType> {
        self.classifiers.iter().map(|(t, _)| t)
    }

    pub fn type_list(&self) -> Vec<ClassifierType> {
        self.types().cloned().collect()
    }

    pub fn classifiers(&self) -> impl Iterator<Item = (&ClassifierType, &RangeClassifier)> {
        self.classifiers.iter().map(|(t, c)| (t, c))
    }

    pub fn get_classifier(
        &self,
        classifier_type: &ClassifierType,
    ) -> Result<&RangeClassifier, MetadataError> {
        self.classifiers
            .iter()
            .find(|(t, _)| t == classifier_type)
            .map(|(_, c)| c)
            .ok_or_else(|| MetadataError::NoSuchType(classifier_type.clone()))
    }

    pub fn get_ranges(
        &self,
        classifier_type: &ClassifierType,
        label: &str,
    ) -> Result<&RangeSet, MetadataError> {
        Ok(self.get_classifier(classifier_type)?.get_ranges(label))
    }

    /// Returns a map without the validity classifier, in which the envelope
    /// and every other classifier are restricted to the `VALID` ranges.
    ///
    /// Returns an unchanged copy if there is no validity classifier.
    pub fn trim_valid_ranges(&self) -> RangeMap {
        let Ok(validity) = self.get_classifier(&ClassifierType::Validity) else {
            return self.clone();
        };
        let valid_ranges = validity.get_ranges(ClassifierType::VALID_LABEL).clone();
        let classifiers = self
            .classifiers
            .iter()
            .filter(|(t, _)| *t != ClassifierType::Validity)
            .map(|(t, classifier)| (t.clone(), classifier.intersect(&valid_ranges)))
            .collect();
        RangeMap { all_ranges: valid_ranges, classifiers }
    }

    /// Returns a map restricted to the given types, in the given order.
    pub fn select(&self, types: &[ClassifierType]) -> Result<RangeMap, MetadataError> {
        let classifiers = types
            .iter()
            .map(|t| Ok((t.clone(), self.get_classifier(t)?.clone())))
            .collect::<Result<Vec<_>, MetadataError>>()?;
        Ok(RangeMap { all_ranges: self.all_ranges.clone(), classifiers })
    }
}
