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

use crate::{
    digit_sequence::DigitSequence,
    matcher::MatcherFunction,
    proto_gen::classifier_metadata::CallingCodeProto,
    regexp_cache::RegexCache,
};

use super::{errors::LoadError, parser_data::ParserData, type_classifier::TypeClassifier};

/// Decoded classifier data of one calling code.
#[derive(Debug, Clone)]
pub(crate) struct CallingCodeClassifier {
    validity_matcher: MatcherFunction,
    type_classifiers: Vec<TypeClassifier>,
    parser_data: ParserData,
    example_numbers: Vec<DigitSequence>,
}

const DEFAULT_MATCHER: &[i32] = &[0];

/// Decoding context shared by the matchers of one calling code.
struct Decoder<'a> {
    calling_code: i32,
    matchers: Vec<MatcherFunction>,
    tokens: &'a [String],
}

impl Decoder<'_> {
    fn token(&self, index: i32) -> Result<&str, LoadError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.tokens.get(i))
            .map(String::as_str)
            .ok_or(LoadError::InvalidToken(index))
    }

    /// AND-combines the indexed matchers. No indices means matcher 0.
    fn matcher(&self, indices: &[i32]) -> Result<MatcherFunction, LoadError> {
        let selected = if indices.is_empty() { DEFAULT_MATCHER } else { indices };
        let matchers = selected
            .iter()
            .map(|&index| {
                usize::try_from(index)
                    .ok()
                    .and_then(|i| self.matchers.get(i))
                    .cloned()
                    .ok_or(LoadError::InvalidMatcherIndex { calling_code: self.calling_code, index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        MatcherFunction::combine(matchers).ok_or(LoadError::NoMatchers { calling_code: self.calling_code })
    }

    fn digits(&self, s: &str) -> Result<DigitSequence, LoadError> {
        DigitSequence::parse(s)
            .map_err(|source| LoadError::InvalidDigits { calling_code: self.calling_code, source })
    }
}

impl CallingCodeClassifier {
    pub fn from_proto(
        proto: &CallingCodeProto,
        type_count: usize,
        tokens: &[String],
        regex_cache: &RegexCache,
    ) -> Result<Self, LoadError> {
        let calling_code = proto.calling_code;
        if proto.matcher_data.is_empty() {
            return Err(LoadError::NoMatchers { calling_code });
        }
        let matchers = proto
            .matcher_data
            .iter()
            .map(|data| {
                MatcherFunction::from_proto(data, regex_cache)
                    .map_err(|source| LoadError::InvalidMatcher { calling_code, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let decoder = Decoder { calling_code, matchers, tokens };

        let validity_matcher = decoder.matcher(&proto.validity_matcher_index)?;

        if proto.national_number_data.len() != type_count {
            return Err(LoadError::TypeCountMismatch {
                calling_code,
                expected: type_count,
                found: proto.national_number_data.len(),
            });
        }
        let type_classifiers = proto
            .national_number_data
            .iter()
            .map(|nnd| {
                let values = nnd
                    .value
                    .iter()
                    .map(|v| Ok((decoder.token(v.value)?.to_string(), decoder.matcher(&v.matcher_index)?)))
                    .collect::<Result<Vec<_>, LoadError>>()?;
                Ok(TypeClassifier::new(values, nnd.single_valued, nnd.value_matcher))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        // An unset region count means a single region.
        let region_count = proto.region_count.max(1);
        let regions_end = proto
            .main_region
            .checked_add(region_count)
            .filter(|&end| proto.main_region >= 0 && end as usize <= tokens.len())
            .ok_or(LoadError::InvalidRegions {
                calling_code,
                main_region: proto.main_region,
                region_count,
            })?;
        let regions = (proto.main_region..regions_end)
            .map(|index| decoder.token(index).map(String::from))
            .collect::<Result<Vec<_>, _>>()?;
        let national_prefixes = proto
            .national_prefix
            .iter()
            .map(|&index| decoder.digits(decoder.token(index)?))
            .collect::<Result<Vec<_>, _>>()?;
        let example_numbers = proto
            .example_number
            .iter()
            .map(|s| decoder.digits(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            validity_matcher,
            type_classifiers,
            parser_data: ParserData::new(regions, national_prefixes, proto.national_prefix_optional),
            example_numbers,
        })
    }

    pub fn validity_matcher(&self) -> &MatcherFunction {
        &self.validity_matcher
    }

    pub fn type_classifier(&self, type_index: usize) -> Option<&TypeClassifier> {
        self.type_classifiers.get(type_index)
    }

    pub fn parser_data(&self) -> &ParserData {
        &self.parser_data
    }

    /// Example numbers, the main region's first.
    pub fn example_numbers(&self) -> &[DigitSequence] {
        &self.example_numbers
    }
}
