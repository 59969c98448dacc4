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

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use crate::{
    digit_sequence::DigitSequence,
    matcher::{dfa_matcher, errors::MatcherDataError},
    metadata::{CallingCodeInfo, ClassifierType, Metadata, MetadataError, RangeMap},
    proto_gen::classifier_metadata::{
        CallingCodeProto, MatcherDataProto, MetadataProto, NationalNumberDataProto,
        ValueMatcherProto,
    },
    range_set::RangeSet,
};

use super::config::{MatcherType, MetadataConfig};

/// Calling codes are 1 to 3 digits with no leading zero.
const MAX_CALLING_CODE_DIGITS: usize = 3;

#[derive(Debug, PartialEq, Error)]
pub enum EncodingError {
    #[error("Cannot encode calling code {0:?}")]
    InvalidCallingCode(DigitSequence),
    #[error("The validity type cannot be encoded, trim valid ranges first")]
    UntrimmedValidity,
    #[error("{0}")]
    Matcher(#[from] MatcherDataError),
    #[error("{0}")]
    Metadata(#[from] MetadataError),
}

/// Interns strings into the token table of an artifact.
#[derive(Debug, Default)]
struct TokenTable {
    tokens: Vec<String>,
    indices: HashMap<String, i32>,
}

impl TokenTable {
    fn intern(&mut self, token: &str) -> i32 {
        if let Some(&index) = self.indices.get(token) {
            return index;
        }
        let index = self.tokens.len() as i32;
        self.tokens.push(token.to_string());
        self.indices.insert(token.to_string(), index);
        index
    }

    /// Returns the start of a contiguous block holding `block` in order,
    /// reusing an existing block where possible.
    fn intern_block(&mut self, block: &[String]) -> i32 {
        if block.is_empty() {
            return self.tokens.len() as i32;
        }
        if let Some(start) = self
            .tokens
            .windows(block.len())
            .position(|window| window == block)
        {
            return start as i32;
        }
        let start = self.tokens.len() as i32;
        for token in block {
            self.indices.entry(token.clone()).or_insert(self.tokens.len() as i32);
            self.tokens.push(token.clone());
        }
        start
    }
}

/// Matchers of one calling code, de-duplicated by their encoding.
#[derive(Default)]
struct MatcherTable {
    matchers: Vec<MatcherDataProto>,
}

impl MatcherTable {
    fn add(&mut self, data: MatcherDataProto) -> i32 {
        if let Some(index) = self
            .matchers
            .iter()
            .position(|m| m.dfa_data == data.dfa_data && m.regex == data.regex)
        {
            return index as i32;
        }
        self.matchers.push(data);
        (self.matchers.len() - 1) as i32
    }
}

fn matcher_data(ranges: &RangeSet, matcher_type: MatcherType) -> Result<MatcherDataProto, EncodingError> {
    let mut data = MatcherDataProto::new();
    data.possible_lengths_mask = ranges.lengths_mask() as i32;
    match matcher_type {
        MatcherType::DigitSequence => data.dfa_data = dfa_matcher::encode_ranges(ranges)?,
        MatcherType::Regex => {
            data.regex = ranges
                .specs()
                .iter()
                .map(|spec| spec.to_regex())
                .collect::<Vec<_>>()
                .join("|")
        }
    }
    Ok(data)
}

fn calling_code_value(calling_code: &DigitSequence) -> Result<i32, EncodingError> {
    if calling_code.is_empty()
        || calling_code.len() > MAX_CALLING_CODE_DIGITS
        || calling_code.get(0) == Some(0)
    {
        return Err(EncodingError::InvalidCallingCode(*calling_code));
    }
    Ok(calling_code.digits().iter().fold(0, |acc, &d| acc * 10 + d as i32))
}

/// Main region first, then the other region labels alphabetically.
fn regions_of(info: &CallingCodeInfo, range_map: &RangeMap) -> Vec<String> {
    let mut others: Vec<String> = range_map
        .get_classifier(&ClassifierType::Region)
        .map(|classifier| {
            classifier
                .labels()
                .filter(|label| *label != info.main_region)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    others.sort();
    let mut regions = Vec::with_capacity(others.len() + 1);
    regions.push(info.main_region.clone());
    regions.extend(others);
    regions
}

/// Encodes trimmed metadata as an artifact.
///
/// Matcher 0 of every calling code is its validity envelope, and every label
/// refers to exactly one matcher. Labels are encoded with the configured
/// matcher type; the envelope always uses a DFA so that partial matches can
/// be reported.
pub fn to_metadata_proto(metadata: &Metadata, config: &MetadataConfig) -> Result<MetadataProto, EncodingError> {
    if metadata.types().contains(&ClassifierType::Validity) {
        return Err(EncodingError::UntrimmedValidity);
    }
    let mut tokens = TokenTable::default();
    let mut proto = MetadataProto::new();
    proto.version = config.version.to_proto();
    proto.classifier_type = metadata
        .types()
        .iter()
        .map(|t| tokens.intern(t.id()))
        .collect();

    for calling_code in metadata.calling_codes() {
        let range_map = metadata.get_range_map(calling_code)?;
        let info = metadata.get_info(calling_code)?;
        let mut cc_proto = CallingCodeProto::new();
        cc_proto.calling_code = calling_code_value(calling_code)?;

        let regions = regions_of(info, range_map);
        cc_proto.main_region = tokens.intern_block(&regions);
        cc_proto.region_count = regions.len() as i32;
        cc_proto.national_prefix = info
            .national_prefixes
            .iter()
            .map(|prefix| tokens.intern(&prefix.to_string()))
            .collect();
        cc_proto.national_prefix_optional =
            info.national_prefix_optional && !info.national_prefixes.is_empty();
        cc_proto.example_number = info.example_numbers.iter().map(|n| n.to_string()).collect();

        let mut matchers = MatcherTable::default();
        matchers.add(matcher_data(range_map.all_ranges(), MatcherType::DigitSequence)?);
        for (classifier_type, classifier) in range_map.classifiers() {
            let mut nnd = NationalNumberDataProto::new();
            nnd.single_valued = classifier.is_single_valued();
            nnd.value_matcher = !classifier.is_classifier_only()
                && !config.is_classifier_only(classifier_type)
                && config.matcher_type == MatcherType::DigitSequence;
            for (label, ranges) in classifier.entries() {
                let mut value = ValueMatcherProto::new();
                value.value = tokens.intern(label);
                value.matcher_index = vec![matchers.add(matcher_data(ranges, config.matcher_type)?)];
                nnd.value.push(value);
            }
            trace!(
                "[cc={}] encoded {} labels for type {}",
                calling_code,
                nnd.value.len(),
                classifier_type
            );
            cc_proto.national_number_data.push(nnd);
        }
        debug!("[cc={}] encoded {} matchers", calling_code, matchers.matchers.len());
        cc_proto.matcher_data = matchers.matchers;
        proto.calling_code_data.push(cc_proto);
    }
    proto.token = tokens.tokens;
    Ok(proto)
}
