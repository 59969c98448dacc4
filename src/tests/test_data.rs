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

//! Small but realistic source metadata for calling codes 41, 44, 882 and 888.

use crate::{
    classifier::{RawClassifier, VersionInfo},
    digit_sequence::DigitSequence,
    metadata::{CallingCodeInfo, ClassifierType, Metadata, RangeClassifier, RangeMap},
    range_set::RangeSet,
    tools::{self, MetadataConfig},
};

pub const SCHEMA_URI: &str = "rphoneclassifier/test";

pub fn seq(s: &str) -> DigitSequence {
    DigitSequence::parse(s).unwrap()
}

pub fn ranges(s: &str) -> RangeSet {
    RangeSet::parse(s).unwrap()
}

fn classifier(classifier_type: &ClassifierType, entries: Vec<(&str, RangeSet)>) -> RangeClassifier {
    RangeClassifier::builder()
        .single_valued(classifier_type.is_single_valued())
        .put_all(entries)
        .unwrap()
        .build()
}

struct SourceData<'a> {
    all: RangeSet,
    types: Vec<(&'a str, RangeSet)>,
    tariffs: Vec<(&'a str, RangeSet)>,
    regions: Vec<(&'a str, RangeSet)>,
    valid: RangeSet,
}

fn range_map(data: SourceData<'_>) -> RangeMap {
    RangeMap::builder()
        .put(ClassifierType::Type, classifier(&ClassifierType::Type, data.types))
        .unwrap()
        .put(ClassifierType::Tariff, classifier(&ClassifierType::Tariff, data.tariffs))
        .unwrap()
        .put(ClassifierType::Region, classifier(&ClassifierType::Region, data.regions))
        .unwrap()
        .put(
            ClassifierType::Validity,
            classifier(&ClassifierType::Validity, vec![(ClassifierType::VALID_LABEL, data.valid)]),
        )
        .unwrap()
        .build(data.all)
}

/// United Kingdom and crown dependencies. Jersey shares the `7700` mobile
/// block with the UK and the whole `7797` block is shared by both.
fn uk() -> RangeMap {
    let fixed_line = ranges("1481xxxxxx, 1624xxxxxx, 20xxxxxxxx");
    let mobile = ranges("7[4-9]xxxxxxxx");
    let all = fixed_line.union(&mobile);
    let gg = ranges("1481xxxxxx");
    let im = ranges("1624xxxxxx");
    let je = ranges("7700[3-9]xxxxx, 7797xxxxxx");
    let gb = all
        .subtract(&gg)
        .subtract(&im)
        .subtract(&ranges("7700[3-9]xxxxx"));
    range_map(SourceData {
        types: vec![("FIXED_LINE", fixed_line), ("MOBILE", mobile)],
        tariffs: vec![("STANDARD_RATE", all.clone())],
        regions: vec![("GB", gb), ("GG", gg), ("IM", im), ("JE", je)],
        // The 2099 block is reserved.
        valid: all.subtract(&ranges("2099xxxxxx")),
        all,
    })
}

fn switzerland() -> RangeMap {
    let fixed_line = ranges("44xxxxxxx");
    let mobile = ranges("7[5-9]xxxxxxx");
    let all = fixed_line.union(&mobile);
    range_map(SourceData {
        types: vec![("FIXED_LINE", fixed_line), ("MOBILE", mobile)],
        tariffs: vec![("STANDARD_RATE", all.clone())],
        regions: vec![("CH", all.clone())],
        valid: all.clone(),
        all,
    })
}

fn non_geographic(label: &str, spec: &str) -> RangeMap {
    let all = ranges(spec);
    range_map(SourceData {
        types: vec![(label, all.clone())],
        tariffs: vec![("PREMIUM_RATE", all.clone())],
        regions: vec![("001", all.clone())],
        valid: all.clone(),
        all,
    })
}

pub fn source_metadata() -> Metadata {
    Metadata::builder()
        .put(
            seq("44"),
            CallingCodeInfo::new("GB")
                .with_national_prefixes(vec![seq("0")], false)
                .with_example_number(seq("7400123456"))
                .with_example_number(seq("1481123456")),
            uk(),
        )
        .put(
            seq("41"),
            CallingCodeInfo::new("CH")
                .with_national_prefixes(vec![seq("0")], false)
                .with_example_number(seq("446681800")),
            switzerland(),
        )
        .put(
            seq("882"),
            CallingCodeInfo::new("001").with_example_number(seq("34123456")),
            non_geographic("SHARED_COST", "[1-9]xxxxxxx"),
        )
        .put(
            seq("888"),
            CallingCodeInfo::new("001").with_example_number(seq("12345678901")),
            non_geographic("UAN", "xxxxxxxxxxx"),
        )
        .build()
        .unwrap()
}

pub fn test_version(minor: u32) -> VersionInfo {
    VersionInfo::new(SCHEMA_URI, 1, minor, 0)
}

pub fn test_config(version: VersionInfo) -> MetadataConfig {
    MetadataConfig::new(version)
        .with_types(vec![ClassifierType::Type, ClassifierType::Tariff, ClassifierType::Region])
        .with_classifier_only_types(vec![ClassifierType::Tariff])
}

pub fn metadata_bytes(config: &MetadataConfig) -> Vec<u8> {
    let proto = tools::generate_metadata(&source_metadata(), config).unwrap();
    let mut bytes = Vec::new();
    tools::write_metadata(&proto, &mut bytes).unwrap();
    bytes
}

pub fn test_classifier() -> RawClassifier {
    let version = test_version(1);
    RawClassifier::load(&metadata_bytes(&test_config(version.clone())), &version).unwrap()
}
