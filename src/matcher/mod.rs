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

pub(crate) mod dfa_matcher;
pub mod errors;
mod regex_matcher;

use std::{fmt, sync::Arc};

use strum::EnumIter;

use crate::{
    digit_sequence::DigitSequence,
    interfaces::MatcherApi,
    proto_gen::classifier_metadata::MatcherDataProto,
    range_set::RangeSet,
    regexp_cache::RegexCache,
};

use self::{dfa_matcher::DigitSequenceMatcher, errors::MatcherDataError, regex_matcher::RegexMatcher};

/// The result of matching a (possibly incomplete) digit sequence against a
/// set of ranges.
///
/// Variants are ordered from the weakest to the strongest result, so the
/// combination of several results is their minimum.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchResult {
    /// No truncation or extension of the sequence is in the set.
    Invalid,
    /// A proper prefix of the sequence is in the set, but the sequence has
    /// trailing digits beyond it.
    ExcessDigits,
    /// The sequence is not in the set, but it is a prefix of something that is.
    PartialMatch,
    /// The sequence is in the set.
    Matched,
}

/// The result of testing only the length of a digit sequence.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthResult {
    /// The length is one of the possible lengths.
    Possible,
    /// The sequence is shorter than every possible length.
    TooShort,
    /// The sequence is longer than every possible length.
    TooLong,
    /// The length falls between possible lengths, or nothing is possible.
    InvalidLength,
}

/// A compiled predicate over digit sequences.
///
/// A matcher is either a single decoded range set or the logical AND of
/// several matchers. Matchers are cheap to clone and safe to share between
/// threads.
#[derive(Clone)]
pub struct MatcherFunction {
    kind: MatcherKind,
}

#[derive(Clone)]
enum MatcherKind {
    Single {
        matcher: Arc<dyn MatcherApi>,
        lengths_mask: u32,
    },
    AllOf(Vec<MatcherFunction>),
}

impl MatcherFunction {
    /// Decodes a matcher from its wire representation. Exactly one of the DFA
    /// or regex encodings must be present.
    pub(crate) fn from_proto(
        data: &MatcherDataProto,
        regex_cache: &RegexCache,
    ) -> Result<Self, MatcherDataError> {
        let matcher: Arc<dyn MatcherApi> = match (data.dfa_data.is_empty(), data.regex.is_empty()) {
            (false, false) => return Err(MatcherDataError::AmbiguousData),
            (true, true) => return Err(MatcherDataError::MissingData),
            (false, true) => Arc::new(DigitSequenceMatcher::decode(&data.dfa_data)?),
            (true, false) => Arc::new(RegexMatcher::new(regex_cache.get_anchored_regex(&data.regex)?)),
        };
        Ok(Self::single(matcher, data.possible_lengths_mask as u32))
    }

    /// Compiles a matcher directly from a range set.
    pub fn from_ranges(ranges: &RangeSet) -> Result<Self, MatcherDataError> {
        let bytes = dfa_matcher::encode_ranges(ranges)?;
        let matcher = DigitSequenceMatcher::decode(&bytes)?;
        Ok(Self::single(Arc::new(matcher), ranges.lengths_mask()))
    }

    fn single(matcher: Arc<dyn MatcherApi>, lengths_mask: u32) -> Self {
        Self { kind: MatcherKind::Single { matcher, lengths_mask } }
    }

    /// Returns the logical AND of the given matchers, or `None` if there are
    /// none to combine.
    pub fn combine(mut matchers: Vec<MatcherFunction>) -> Option<MatcherFunction> {
        match matchers.len() {
            0 => None,
            1 => matchers.pop(),
            _ => Some(Self { kind: MatcherKind::AllOf(matchers) }),
        }
    }

    /// Matches `sequence`, combining the results of AND-ed matchers by taking
    /// the weakest one.
    pub fn match_sequence(&self, sequence: &DigitSequence) -> MatchResult {
        match &self.kind {
            MatcherKind::Single { matcher, .. } => matcher.match_digits(sequence),
            MatcherKind::AllOf(matchers) => {
                let mut combined = MatchResult::Matched;
                for matcher in matchers {
                    combined = combined.min(matcher.match_sequence(sequence));
                    if combined == MatchResult::Invalid {
                        break;
                    }
                }
                combined
            }
        }
    }

    pub fn is_match(&self, sequence: &DigitSequence) -> bool {
        self.match_sequence(sequence) == MatchResult::Matched
    }

    /// Bit mask of the lengths this matcher can accept (bit N for length N).
    pub fn possible_lengths_mask(&self) -> u32 {
        match &self.kind {
            MatcherKind::Single { lengths_mask, .. } => *lengths_mask,
            MatcherKind::AllOf(matchers) => matchers
                .iter()
                .fold(u32::MAX, |acc, m| acc & m.possible_lengths_mask()),
        }
    }

    pub fn test_length(&self, sequence: &DigitSequence) -> LengthResult {
        let mask = self.possible_lengths_mask();
        if mask == 0 {
            return LengthResult::InvalidLength;
        }
        let length = sequence.len() as u32;
        if length < 32 && mask & (1 << length) != 0 {
            LengthResult::Possible
        } else if length < mask.trailing_zeros() {
            LengthResult::TooShort
        } else if length > 31 - mask.leading_zeros() {
            LengthResult::TooLong
        } else {
            LengthResult::InvalidLength
        }
    }
}

impl fmt::Debug for MatcherFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MatcherKind::Single { matcher, lengths_mask } => f
                .debug_struct("MatcherFunction")
                .field("matcher", matcher)
                .field("lengths_mask", &format_args!("{:#b}", lengths_mask))
                .finish(),
            MatcherKind::AllOf(matchers) => f.debug_tuple("AllOf").field(matchers).finish(),
        }
    }
}
