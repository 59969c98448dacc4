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

use crate::{classifier::VersionInfo, digit_sequence::DigitSequence, metadata::ClassifierType};

/// How the ranges of a label are encoded in the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatcherType {
    /// A minimized DFA, supporting all four match results.
    #[default]
    DigitSequence,
    /// A regular expression. Partial matches are never reported, so this
    /// suits classifier-only data.
    Regex,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimplificationConfig {
    /// Digits after this many leading digits are widened to "any digit".
    /// `None` disables simplification.
    pub max_prefix_length: Option<usize>,
}

/// Configuration of one metadata artifact build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    pub version: VersionInfo,
    pub types: Vec<ClassifierType>,
    /// Calling codes to include, or `None` for all of them.
    pub calling_codes: Option<Vec<DigitSequence>>,
    pub simplification: SimplificationConfig,
    pub matcher_type: MatcherType,
    /// Types written without per-label partial matching support.
    pub classifier_only_types: Vec<ClassifierType>,
    /// Keep calling codes which have no valid ranges after trimming.
    pub include_empty_calling_codes: bool,
}

impl MetadataConfig {
    pub fn new(version: VersionInfo) -> Self {
        Self {
            version,
            types: ClassifierType::default_base_types(),
            calling_codes: None,
            simplification: SimplificationConfig::default(),
            matcher_type: MatcherType::default(),
            classifier_only_types: Vec::new(),
            include_empty_calling_codes: false,
        }
    }

    pub fn with_types(mut self, types: Vec<ClassifierType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_calling_codes(mut self, calling_codes: Vec<DigitSequence>) -> Self {
        self.calling_codes = Some(calling_codes);
        self
    }

    pub fn with_max_prefix_length(mut self, max_prefix_length: usize) -> Self {
        self.simplification.max_prefix_length = Some(max_prefix_length);
        self
    }

    pub fn with_matcher_type(mut self, matcher_type: MatcherType) -> Self {
        self.matcher_type = matcher_type;
        self
    }

    pub fn with_classifier_only_types(mut self, types: Vec<ClassifierType>) -> Self {
        self.classifier_only_types = types;
        self
    }

    pub fn with_include_empty_calling_codes(mut self, include: bool) -> Self {
        self.include_empty_calling_codes = include;
        self
    }

    /// The types selected from the source metadata. The validity type is
    /// always kept when present so valid ranges can be trimmed after
    /// simplification.
    pub(crate) fn selected_types(&self, available: &[ClassifierType]) -> Vec<ClassifierType> {
        let mut types = self.types.clone();
        if available.contains(&ClassifierType::Validity) && !types.contains(&ClassifierType::Validity) {
            types.push(ClassifierType::Validity);
        }
        types
    }

    pub(crate) fn is_classifier_only(&self, classifier_type: &ClassifierType) -> bool {
        self.classifier_only_types.contains(classifier_type)
    }
}
