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

use crate::regexp_cache::InvalidRegexError;

/// Errors when encoding or decoding the data of a single compiled matcher.
#[derive(Debug, PartialEq, Error)]
pub enum MatcherDataError {
    #[error("Matcher data is truncated at byte {0}")]
    Truncated(usize),
    #[error("Unsupported matcher data format: {0}")]
    UnsupportedFormat(u8),
    #[error("Matcher data has no states")]
    NoStates,
    #[error("Invalid digit mask {mask:#x} in state {state}")]
    InvalidMask { state: usize, mask: u16 },
    #[error("Overlapping transitions in state {0}")]
    OverlappingEdges(usize),
    #[error("Transition target {target} out of range in state {state}")]
    InvalidTarget { state: usize, target: u16 },
    #[error("Matcher data has {0} unexpected trailing bytes")]
    TrailingBytes(usize),
    #[error("Too many matcher states to encode: {0}")]
    TooManyStates(usize),
    #[error("Matcher data has neither DFA nor regex data")]
    MissingData,
    #[error("Matcher data has both DFA and regex data")]
    AmbiguousData,
    #[error("{0}")]
    InvalidRegex(#[from] InvalidRegexError),
}
