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

use std::collections::HashSet;

use log::{debug, error};
use thiserror::Error;

use crate::{
    digit_sequence::DigitSequence,
    metadata::{ClassifierType, Metadata, MetadataError},
    range_set::RangeSet,
};

/// A simplification which would change the meaning of the original data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimplificationError {
    #[error("[cc={0}] simplified metadata MUST contain every calling code of the original")]
    MissingCallingCode(DigitSequence),
    #[error("[cc={calling_code}] simplified range map MUST contain at least the same ranges as the original: {excess}")]
    NarrowedRanges { calling_code: DigitSequence, excess: RangeSet },
    #[error(
        "[cc={calling_code}] simplified range map MUST contain the same number types as the original:\nsimplified: {simplified:?}\noriginal: {original:?}"
    )]
    ChangedTypes {
        calling_code: DigitSequence,
        simplified: Vec<ClassifierType>,
        original: Vec<ClassifierType>,
    },
    #[error(
        "[cc={calling_code}, type={classifier_type}] simplified range map MUST contain the same keys as the original:\nsimplified: {simplified:?}\noriginal: {original:?}"
    )]
    ChangedLabels {
        calling_code: DigitSequence,
        classifier_type: ClassifierType,
        simplified: Vec<String>,
        original: Vec<String>,
    },
    #[error("[cc={calling_code}, type={classifier_type}, key={label}] simplified ranges MUST not be smaller than the original: {excess}")]
    NarrowedLabel {
        calling_code: DigitSequence,
        classifier_type: ClassifierType,
        label: String,
        excess: RangeSet,
    },
    #[error("[cc={calling_code}, type={classifier_type}, key={label}] simplified ranges MUST not contain original ranges of other keys: {excess}")]
    ChangedClassification {
        calling_code: DigitSequence,
        classifier_type: ClassifierType,
        label: String,
        excess: RangeSet,
    },
    #[error("{0}")]
    Metadata(#[from] MetadataError),
}

/// Checks that `simplified` accepts everything `original` accepts and
/// classifies it identically. For every calling code the envelope and the
/// ranges of each label may only grow, the sets of classifier types and
/// labels must not change, and no label may take in an original sequence
/// which it did not classify.
pub fn validate_no_change_to_original_ranges(
    original: &Metadata,
    simplified: &Metadata,
) -> Result<(), SimplificationError> {
    let result = validate(original, simplified);
    if let Err(err) = &result {
        error!("Simplified metadata rejected: {}", err);
    }
    result
}

fn validate(original: &Metadata, simplified: &Metadata) -> Result<(), SimplificationError> {
    for calling_code in original.calling_codes() {
        let original_map = original.get_range_map(calling_code)?;
        let simplified_map = simplified
            .get_range_map(calling_code)
            .map_err(|_| SimplificationError::MissingCallingCode(*calling_code))?;

        let excess = original_map.all_ranges().subtract(simplified_map.all_ranges());
        if !excess.is_empty() {
            return Err(SimplificationError::NarrowedRanges { calling_code: *calling_code, excess });
        }

        if original_map.types().collect::<HashSet<_>>() != simplified_map.types().collect::<HashSet<_>>() {
            return Err(SimplificationError::ChangedTypes {
                calling_code: *calling_code,
                simplified: simplified_map.type_list(),
                original: original_map.type_list(),
            });
        }

        for (classifier_type, original_classifier) in original_map.classifiers() {
            let simplified_classifier = simplified_map.get_classifier(classifier_type)?;
            if original_classifier.labels().collect::<HashSet<_>>()
                != simplified_classifier.labels().collect::<HashSet<_>>()
            {
                return Err(SimplificationError::ChangedLabels {
                    calling_code: *calling_code,
                    classifier_type: classifier_type.clone(),
                    simplified: simplified_classifier.labels().map(String::from).collect(),
                    original: original_classifier.labels().map(String::from).collect(),
                });
            }
            for (label, ranges) in original_classifier.entries() {
                let simplified_ranges = simplified_classifier.get_ranges(label);
                let excess = ranges.subtract(simplified_ranges);
                if !excess.is_empty() {
                    return Err(SimplificationError::NarrowedLabel {
                        calling_code: *calling_code,
                        classifier_type: classifier_type.clone(),
                        label: label.to_string(),
                        excess,
                    });
                }
                let excess = simplified_ranges.intersect(&original_map.all_ranges().subtract(ranges));
                if !excess.is_empty() {
                    return Err(SimplificationError::ChangedClassification {
                        calling_code: *calling_code,
                        classifier_type: classifier_type.clone(),
                        label: label.to_string(),
                        excess,
                    });
                }
            }
        }
        debug!("[cc={}] simplified ranges validated", calling_code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SimplificationError, validate_no_change_to_original_ranges};
    use crate::{
        digit_sequence::DigitSequence,
        metadata::{CallingCodeInfo, ClassifierType, Metadata, RangeClassifier, RangeMap},
        range_set::RangeSet,
    };

    fn ranges(s: &str) -> RangeSet {
        RangeSet::parse(s).unwrap()
    }

    fn cc() -> DigitSequence {
        DigitSequence::parse("44").unwrap()
    }

    fn metadata(all: &str, labels: &[(&str, &str)]) -> Metadata {
        let classifier = RangeClassifier::builder()
            .single_valued(true)
            .put_all(labels.iter().map(|(label, r)| (*label, ranges(r))))
            .unwrap()
            .build();
        let map = RangeMap::builder()
            .put(ClassifierType::Type, classifier)
            .unwrap()
            .build(ranges(all));
        Metadata::builder()
            .put(cc(), CallingCodeInfo::new("GB"), map)
            .build()
            .unwrap()
    }

    #[test]
    fn accepts_identical_and_widened_metadata() {
        let original = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx"), ("MOBILE", "7xxx")]);
        validate_no_change_to_original_ranges(&original, &original).unwrap();
        let widened = metadata("2xxx, 7xxx", &[("FIXED_LINE", "2xxx"), ("MOBILE", "7xxx")]);
        validate_no_change_to_original_ranges(&original, &widened).unwrap();
    }

    #[test]
    fn rejects_narrowed_envelope() {
        let original = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx")]);
        let narrowed = metadata("20xx", &[("FIXED_LINE", "20xx")]);
        let err = validate_no_change_to_original_ranges(&original, &narrowed).unwrap_err();
        assert_eq!(
            err,
            SimplificationError::NarrowedRanges { calling_code: cc(), excess: ranges("7xxx") }
        );
        assert!(err.to_string().starts_with("[cc=44] simplified range map MUST contain"));
    }

    #[test]
    fn rejects_changed_labels() {
        let original = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx"), ("MOBILE", "7xxx")]);
        let dropped = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx")]);
        let err = validate_no_change_to_original_ranges(&original, &dropped).unwrap_err();
        assert!(matches!(
            err,
            SimplificationError::ChangedLabels { ref original, .. } if original.len() == 2
        ));
    }

    #[test]
    fn rejects_narrowed_label() {
        let original = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx"), ("MOBILE", "7xxx")]);
        let narrowed = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx"), ("MOBILE", "7[0-4]xx")]);
        let err = validate_no_change_to_original_ranges(&original, &narrowed).unwrap_err();
        assert_eq!(
            err,
            SimplificationError::NarrowedLabel {
                calling_code: cc(),
                classifier_type: ClassifierType::Type,
                label: "MOBILE".into(),
                excess: ranges("7[5-9]xx"),
            }
        );
    }

    #[test]
    fn rejects_labels_taking_other_original_ranges() {
        let original = metadata("2012xx, 2019xx", &[("FIXED_LINE", "2012xx"), ("MOBILE", "2019xx")]);
        let leaked = metadata("201xxx", &[("FIXED_LINE", "201xxx"), ("MOBILE", "2019xx")]);
        let err = validate_no_change_to_original_ranges(&original, &leaked).unwrap_err();
        assert_eq!(
            err,
            SimplificationError::ChangedClassification {
                calling_code: cc(),
                classifier_type: ClassifierType::Type,
                label: "FIXED_LINE".into(),
                excess: ranges("2019xx"),
            }
        );
    }

    #[test]
    fn accepts_reordered_labels_and_types() {
        let original = metadata("20xx, 7xxx", &[("FIXED_LINE", "20xx"), ("MOBILE", "7xxx")]);
        let reordered = metadata("20xx, 7xxx", &[("MOBILE", "7xxx"), ("FIXED_LINE", "20xx")]);
        validate_no_change_to_original_ranges(&original, &reordered).unwrap();

        let types = |order: [ClassifierType; 2]| {
            let mut builder = RangeMap::builder();
            for classifier_type in order {
                let classifier = RangeClassifier::builder()
                    .put("STANDARD_RATE", ranges("20xx"))
                    .unwrap()
                    .build();
                builder = builder.put(classifier_type, classifier).unwrap();
            }
            Metadata::builder()
                .put(cc(), CallingCodeInfo::new("GB"), builder.build(ranges("20xx")))
                .build()
                .unwrap()
        };
        validate_no_change_to_original_ranges(
            &types([ClassifierType::Type, ClassifierType::Tariff]),
            &types([ClassifierType::Tariff, ClassifierType::Type]),
        )
        .unwrap();
    }

    #[test]
    fn rejects_changed_types_and_missing_codes() {
        let original = metadata("20xx", &[("FIXED_LINE", "20xx")]);
        let other_type = Metadata::builder()
            .put(
                cc(),
                CallingCodeInfo::new("GB"),
                RangeMap::builder()
                    .put(ClassifierType::Tariff, RangeClassifier::default())
                    .unwrap()
                    .build(ranges("20xx")),
            )
            .build()
            .unwrap();
        assert!(matches!(
            validate_no_change_to_original_ranges(&original, &other_type),
            Err(SimplificationError::ChangedTypes { .. })
        ));

        let other_code = Metadata::builder()
            .put(
                DigitSequence::parse("41").unwrap(),
                CallingCodeInfo::new("CH"),
                RangeMap::builder()
                    .put(ClassifierType::Type, RangeClassifier::default())
                    .unwrap()
                    .build(ranges("20xx")),
            )
            .build()
            .unwrap();
        assert_eq!(
            validate_no_change_to_original_ranges(&original, &other_code),
            Err(SimplificationError::MissingCallingCode(cc()))
        );
    }
}
