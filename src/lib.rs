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

mod interfaces;
mod regexp_cache;

pub mod classifier;
pub mod digit_sequence;
pub mod matcher;
pub mod metadata;
pub mod phone_number;
pub mod range_set;
pub mod tools;

/// This module is automatically generated from /resources/*.proto
pub mod proto_gen {
    include!(concat!(env!("OUT_DIR"), "/proto_gen/mod.rs"));
}

pub use classifier::{ClassifierError, ClassifierRegistry, LoadError, ParserData, RawClassifier, VersionInfo};
pub use digit_sequence::DigitSequence;
pub use matcher::{LengthResult, MatchResult, MatcherFunction};
pub use metadata::{CallingCodeInfo, ClassifierType, Metadata, RangeClassifier, RangeMap};
pub use phone_number::{PhoneNumber, PhoneNumberParseError};
pub use range_set::{RangeSet, RangeSpec};

#[cfg(test)]
mod tests;
