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

use crate::digit_sequence::DigitSequence;

/// Data needed to parse numbers of one calling code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserData {
    regions: Vec<String>,
    national_prefixes: Vec<DigitSequence>,
    national_prefix_optional: bool,
}

impl ParserData {
    /// `regions` must not be empty. Optionality is ignored when there are no
    /// national prefixes.
    pub(crate) fn new(
        regions: Vec<String>,
        national_prefixes: Vec<DigitSequence>,
        national_prefix_optional: bool,
    ) -> Self {
        let national_prefix_optional = national_prefix_optional && !national_prefixes.is_empty();
        Self { regions, national_prefixes, national_prefix_optional }
    }

    /// CLDR region codes; the main region first, the rest alphabetically.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn main_region(&self) -> &str {
        self.regions.first().map(String::as_str).unwrap_or_default()
    }

    /// National prefixes, the preferred prefix for formatting first.
    pub fn national_prefixes(&self) -> &[DigitSequence] {
        &self.national_prefixes
    }

    pub fn is_national_prefix_optional(&self) -> bool {
        self.national_prefix_optional
    }
}
