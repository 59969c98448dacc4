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

use thiserror::Error;

use crate::{
    digit_sequence::{DigitSequence, InvalidDigitSequenceError},
    matcher::errors::MatcherDataError,
};

use super::VersionInfo;

/// Fatal errors while loading a metadata artifact. A classifier is never
/// created from inconsistent data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to decode metadata: {0}")]
    Decode(#[from] protobuf::Error),
    #[error("Metadata has no version information")]
    MissingVersion,
    #[error("Metadata version {actual} does not satisfy the stated version {stated}")]
    IncompatibleVersion { actual: VersionInfo, stated: VersionInfo },
    #[error("Invalid token index {0}")]
    InvalidToken(i32),
    #[error("Invalid calling code {0}")]
    InvalidCallingCode(i32),
    #[error("Duplicate calling code {0}")]
    DuplicateCallingCode(i32),
    #[error("[cc={calling_code}] expected {expected} national number data entries, found {found}")]
    TypeCountMismatch { calling_code: i32, expected: usize, found: usize },
    #[error("[cc={calling_code}] invalid matcher index {index}")]
    InvalidMatcherIndex { calling_code: i32, index: i32 },
    #[error("[cc={calling_code}] invalid region block: {region_count} regions from token {main_region}")]
    InvalidRegions { calling_code: i32, main_region: i32, region_count: i32 },
    #[error("[cc={calling_code}] no matchers")]
    NoMatchers { calling_code: i32 },
    #[error("[cc={calling_code}] invalid matcher data: {source}")]
    InvalidMatcher { calling_code: i32, source: MatcherDataError },
    #[error("[cc={calling_code}] invalid digit sequence: {source}")]
    InvalidDigits { calling_code: i32, source: InvalidDigitSequenceError },
}

/// Recoverable conditions reported by classifier queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("Unsupported calling code: {0}")]
    UnknownCallingCode(DigitSequence),
    #[error("Unknown number type: {0}")]
    UnknownNumberType(String),
    #[error("Number type {0} does not support partial matching of values")]
    UnsupportedValueMatcher(String),
    #[error("Number type {0} is not single valued")]
    NotSingleValued(String),
}
