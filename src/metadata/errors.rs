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

use crate::digit_sequence::DigitSequence;

use super::ClassifierType;

/// Errors raised while building offline metadata. All of these indicate
/// inconsistent source data and are not recoverable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetadataError {
    #[error("Duplicate label {0:?} in range classifier")]
    DuplicateLabel(String),
    #[error("Duplicate classifier type {0}")]
    DuplicateType(ClassifierType),
    #[error("No such classifier type: {0}")]
    NoSuchType(ClassifierType),
    #[error("Metadata must have at least one calling code")]
    EmptyCallingCodes,
    #[error("Duplicate calling code {0}")]
    DuplicateCallingCode(DigitSequence),
    #[error("[cc={calling_code}] classifier types {found:?} do not match expected types {expected:?}")]
    SchemaMismatch {
        calling_code: DigitSequence,
        expected: Vec<ClassifierType>,
        found: Vec<ClassifierType>,
    },
    #[error("No data for calling code {0}")]
    MissingCallingCode(DigitSequence),
}
