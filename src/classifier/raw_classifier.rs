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

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{error, info, trace, warn};
use protobuf::Message;

use crate::{
    digit_sequence::DigitSequence,
    matcher::{LengthResult, MatchResult},
    phone_number::{PhoneNumber, PhoneNumberParseError, parse_e164_digits},
    proto_gen::classifier_metadata::MetadataProto,
    regexp_cache::RegexCache,
};

use super::{
    VersionInfo,
    calling_code_classifier::CallingCodeClassifier,
    errors::{ClassifierError, LoadError},
    parser_data::ParserData,
    type_classifier::TypeClassifier,
};

/// Calling codes are at most three digits long.
const MAX_CALLING_CODE_LENGTH: usize = 3;

/// Schema wide properties of one classifier type.
#[derive(Debug, Clone)]
struct TypeInfo {
    id: String,
    single_valued: bool,
    value_matcher: bool,
}

/// Runtime classifier decoded from a metadata artifact.
///
/// Number types are addressed by their string ids (e.g. `"TYPE"`, `"REGION"`)
/// and values are returned as raw strings. A `RawClassifier` is immutable
/// once loaded and can be shared freely between threads.
#[derive(Debug)]
pub struct RawClassifier {
    version: VersionInfo,
    types: Vec<TypeInfo>,
    classifiers: BTreeMap<DigitSequence, CallingCodeClassifier>,
    region_calling_codes: HashMap<String, Vec<DigitSequence>>,
}

impl RawClassifier {
    /// Parses an artifact and checks that its version satisfies `stated`.
    pub fn load(bytes: &[u8], stated: &VersionInfo) -> Result<Self, LoadError> {
        let proto = MetadataProto::parse_from_bytes(bytes)?;
        let classifier = Self::from_proto(&proto)?;
        if !classifier.version.satisfies(stated) {
            error!(
                "Loaded metadata version ({}) does not satisfy the stated version ({})",
                classifier.version, stated
            );
            return Err(LoadError::IncompatibleVersion {
                actual: classifier.version,
                stated: stated.clone(),
            });
        }
        Ok(classifier)
    }

    pub fn from_proto(proto: &MetadataProto) -> Result<Self, LoadError> {
        let version = proto
            .version
            .as_ref()
            .map(VersionInfo::from_proto)
            .ok_or(LoadError::MissingVersion)?;
        let tokens = &proto.token;
        let type_ids = proto
            .classifier_type
            .iter()
            .map(|&index| {
                usize::try_from(index)
                    .ok()
                    .and_then(|i| tokens.get(i))
                    .cloned()
                    .ok_or(LoadError::InvalidToken(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regex_cache = RegexCache::new();
        let mut classifiers = BTreeMap::new();
        for cc_proto in &proto.calling_code_data {
            let calling_code = calling_code_from_int(cc_proto.calling_code)?;
            let classifier =
                CallingCodeClassifier::from_proto(cc_proto, type_ids.len(), tokens, &regex_cache)?;
            if classifiers.insert(calling_code, classifier).is_some() {
                return Err(LoadError::DuplicateCallingCode(cc_proto.calling_code));
            }
        }

        let types = type_ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| {
                let mut type_classifiers = classifiers.values().filter_map(|c| c.type_classifier(index));
                let single_valued = type_classifiers.clone().all(TypeClassifier::is_single_valued);
                let value_matcher = type_classifiers.all(TypeClassifier::supports_value_matcher);
                TypeInfo { id, single_valued, value_matcher }
            })
            .collect();

        let mut region_calling_codes: HashMap<String, Vec<DigitSequence>> = HashMap::new();
        for (calling_code, classifier) in &classifiers {
            for region in classifier.parser_data().regions() {
                region_calling_codes.entry(region.clone()).or_default().push(*calling_code);
            }
        }

        info!(
            "Loaded metadata {} with {} calling codes ({} shared regex matchers)",
            version,
            classifiers.len(),
            regex_cache.len()
        );
        Ok(Self { version, types, classifiers, region_calling_codes })
    }

    pub fn version(&self) -> &VersionInfo {
        &self.version
    }

    /// Ids of the classifier types in this artifact, in schema order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.id.as_str())
    }

    pub fn get_supported_calling_codes(&self) -> impl Iterator<Item = &DigitSequence> {
        self.classifiers.keys()
    }

    pub fn is_supported_calling_code(&self, calling_code: &DigitSequence) -> bool {
        self.classifiers.contains_key(calling_code)
    }

    fn classifier(&self, calling_code: &DigitSequence) -> Result<&CallingCodeClassifier, ClassifierError> {
        self.classifiers.get(calling_code).ok_or_else(|| {
            warn!("Unsupported calling code: {}", calling_code);
            ClassifierError::UnknownCallingCode(*calling_code)
        })
    }

    fn type_index(&self, number_type: &str) -> Result<usize, ClassifierError> {
        self.types.iter().position(|t| t.id == number_type).ok_or_else(|| {
            warn!("Unknown number type: {}", number_type);
            ClassifierError::UnknownNumberType(number_type.to_string())
        })
    }

    fn type_classifier(
        &self,
        calling_code: &DigitSequence,
        number_type: &str,
    ) -> Result<&TypeClassifier, ClassifierError> {
        let index = self.type_index(number_type)?;
        self.classifier(calling_code)?
            .type_classifier(index)
            .ok_or_else(|| ClassifierError::UnknownNumberType(number_type.to_string()))
    }

    fn value_matcher(
        &self,
        calling_code: &DigitSequence,
        number_type: &str,
    ) -> Result<&TypeClassifier, ClassifierError> {
        let classifier = self.type_classifier(calling_code, number_type)?;
        if !classifier.supports_value_matcher() {
            return Err(ClassifierError::UnsupportedValueMatcher(number_type.to_string()));
        }
        Ok(classifier)
    }

    /// Matches a complete or partial national number against the valid
    /// ranges of its calling code.
    pub fn match_number(
        &self,
        calling_code: &DigitSequence,
        national_number: &DigitSequence,
    ) -> Result<MatchResult, ClassifierError> {
        let result = self
            .classifier(calling_code)?
            .validity_matcher()
            .match_sequence(national_number);
        trace!("[cc={}] match {} -> {:?}", calling_code, national_number, result);
        Ok(result)
    }

    /// Tests only the length of a national number against the possible
    /// lengths of valid numbers.
    pub fn test_length(
        &self,
        calling_code: &DigitSequence,
        national_number: &DigitSequence,
    ) -> Result<LengthResult, ClassifierError> {
        Ok(self
            .classifier(calling_code)?
            .validity_matcher()
            .test_length(national_number))
    }

    /// Returns the values of `number_type` for a national number. Single
    /// valued types return at most one value.
    pub fn classify(
        &self,
        calling_code: &DigitSequence,
        national_number: &DigitSequence,
        number_type: &str,
    ) -> Result<HashSet<&str>, ClassifierError> {
        let values: HashSet<&str> = self
            .type_classifier(calling_code, number_type)?
            .classify(national_number)
            .into_iter()
            .collect();
        trace!("[cc={}] classify {} as {}: {:?}", calling_code, national_number, number_type, values);
        Ok(values)
    }

    /// Returns the unique value of a single valued type, if any.
    pub fn classify_uniquely(
        &self,
        calling_code: &DigitSequence,
        national_number: &DigitSequence,
        number_type: &str,
    ) -> Result<Option<&str>, ClassifierError> {
        let classifier = self.type_classifier(calling_code, number_type)?;
        if !classifier.is_single_valued() {
            return Err(ClassifierError::NotSingleValued(number_type.to_string()));
        }
        Ok(classifier.classify(national_number).first().copied())
    }

    /// Returns every value of `number_type` over all calling codes.
    pub fn get_possible_values(&self, number_type: &str) -> Result<HashSet<&str>, ClassifierError> {
        let index = self.type_index(number_type)?;
        Ok(self
            .classifiers
            .values()
            .filter_map(|c| c.type_classifier(index))
            .flat_map(TypeClassifier::values)
            .collect())
    }

    /// Returns the values which a complete or partial national number
    /// matches, or could still match with more digits.
    pub fn get_possible_values_for(
        &self,
        calling_code: &DigitSequence,
        prefix: &DigitSequence,
        number_type: &str,
    ) -> Result<HashSet<&str>, ClassifierError> {
        Ok(self
            .value_matcher(calling_code, number_type)?
            .get_possible_values(prefix)
            .into_iter()
            .collect())
    }

    /// Returns the strongest result of matching a national number against
    /// any of the given values.
    pub fn match_values(
        &self,
        calling_code: &DigitSequence,
        national_number: &DigitSequence,
        number_type: &str,
        values: &[&str],
    ) -> Result<MatchResult, ClassifierError> {
        Ok(self
            .value_matcher(calling_code, number_type)?
            .match_values(national_number, values.iter().copied()))
    }

    pub fn is_single_valued(&self, number_type: &str) -> Result<bool, ClassifierError> {
        Ok(self.types[self.type_index(number_type)?].single_valued)
    }

    pub fn supports_value_matcher(&self, number_type: &str) -> Result<bool, ClassifierError> {
        Ok(self.types[self.type_index(number_type)?].value_matcher)
    }

    pub fn get_parser_data(&self, calling_code: &DigitSequence) -> Result<&ParserData, ClassifierError> {
        Ok(self.classifier(calling_code)?.parser_data())
    }

    /// Returns the example number of the main region of a calling code.
    pub fn get_example_number(
        &self,
        calling_code: &DigitSequence,
    ) -> Result<Option<&DigitSequence>, ClassifierError> {
        Ok(self.classifier(calling_code)?.example_numbers().first())
    }

    /// Returns every example number of a calling code, the main region's first.
    pub fn get_example_numbers(&self, calling_code: &DigitSequence) -> Result<&[DigitSequence], ClassifierError> {
        Ok(self.classifier(calling_code)?.example_numbers())
    }

    /// Returns the calling code of a region, or `None` if the region is
    /// unknown or is shared by several calling codes (e.g. `"001"`).
    pub fn get_calling_code_for_region(&self, region: &str) -> Option<DigitSequence> {
        match self.region_calling_codes.get(region).map(Vec::as_slice) {
            Some([calling_code]) => Some(*calling_code),
            _ => None,
        }
    }

    /// Parses `"+<calling code><national number>"`, splitting off the first
    /// supported calling code.
    pub fn parse_e164(&self, s: &str) -> Result<PhoneNumber, PhoneNumberParseError> {
        let digits = parse_e164_digits(s)?;
        (1..=MAX_CALLING_CODE_LENGTH.min(digits.len()))
            .map(|length| digits.first(length))
            .find(|calling_code| self.is_supported_calling_code(calling_code))
            .map(|calling_code| PhoneNumber::new(calling_code, digits.skip(calling_code.len())))
            .ok_or_else(|| PhoneNumberParseError::UnknownCallingCode(digits.to_string()))
    }
}

fn calling_code_from_int(calling_code: i32) -> Result<DigitSequence, LoadError> {
    if calling_code <= 0 {
        return Err(LoadError::InvalidCallingCode(calling_code));
    }
    let mut buffer = itoa::Buffer::new();
    DigitSequence::parse(buffer.format(calling_code))
        .map_err(|_| LoadError::InvalidCallingCode(calling_code))
}
