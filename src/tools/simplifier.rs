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

use log::debug;

use crate::{
    metadata::{Metadata, MetadataError, RangeClassifier, RangeMap},
    range_set::RangeSet,
};

use super::config::SimplificationConfig;

/// Coarsens range data to shrink the encoded matchers.
///
/// Every range is widened so that digits after the configured prefix length
/// accept any digit. A widened label never takes in an original sequence
/// which it did not classify, and labels of single-valued classifiers gain
/// no new overlaps. The output must still be checked with
/// [`validate_no_change_to_original_ranges`](super::validate_no_change_to_original_ranges)
/// before it is encoded.
pub struct MetadataSimplifier<'a> {
    config: &'a SimplificationConfig,
}

impl<'a> MetadataSimplifier<'a> {
    pub fn new(config: &'a SimplificationConfig) -> Self {
        Self { config }
    }

    pub fn simplify(&self, metadata: &Metadata) -> Result<Metadata, MetadataError> {
        let Some(prefix_length) = self.config.max_prefix_length else {
            return Ok(metadata.clone());
        };
        let widen = |ranges: &RangeSet| ranges.map_specs(|spec| spec.widen_after(prefix_length));
        metadata.transform(|calling_code, range_map| {
            let mut builder = RangeMap::builder();
            for (classifier_type, classifier) in range_map.classifiers() {
                let simplified = simplify_classifier(classifier, range_map.all_ranges(), &widen)?;
                builder = builder.put(classifier_type.clone(), simplified)?;
            }
            let simplified = builder.build(widen(range_map.all_ranges()));
            debug!(
                "[cc={}] simplified {} range specs to {}",
                calling_code,
                range_map.all_ranges().specs().len(),
                simplified.all_ranges().specs().len()
            );
            Ok(simplified)
        })
    }
}

/// Widens every label, minus the original sequences it did not classify.
/// Labels of a single-valued classifier also give up whatever an earlier
/// label already claimed, except their own original sequences.
fn simplify_classifier<F>(
    classifier: &RangeClassifier,
    original_ranges: &RangeSet,
    widen: F,
) -> Result<RangeClassifier, MetadataError>
where
    F: Fn(&RangeSet) -> RangeSet,
{
    let mut builder = RangeClassifier::builder()
        .single_valued(classifier.is_single_valued())
        .classifier_only(classifier.is_classifier_only());
    let mut claimed = RangeSet::empty();
    for (label, ranges) in classifier.entries() {
        let mut simplified = widen(ranges).subtract(&original_ranges.subtract(ranges));
        if classifier.is_single_valued() {
            simplified = simplified.subtract(&claimed.subtract(ranges));
            claimed = claimed.union(&simplified);
        }
        builder = builder.put(label, simplified)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::MetadataSimplifier;
    use crate::{
        digit_sequence::DigitSequence,
        metadata::{CallingCodeInfo, ClassifierType, Metadata, RangeClassifier, RangeMap},
        range_set::RangeSet,
        tools::{config::SimplificationConfig, validate_no_change_to_original_ranges},
    };

    fn ranges(s: &str) -> RangeSet {
        RangeSet::parse(s).unwrap()
    }

    #[test]
    fn widening_keeps_original_ranges() {
        let classifier = RangeClassifier::builder()
            .single_valued(true)
            .put("FIXED_LINE", ranges("201[2-5]xx, 2029xx"))
            .unwrap()
            .put("MOBILE", ranges("7[4-9]1[0-3]xx"))
            .unwrap()
            .build();
        let range_map = RangeMap::builder()
            .put(ClassifierType::Type, classifier)
            .unwrap()
            .build(ranges("201[2-5]xx, 2029xx, 7[4-9]1[0-3]xx"));
        let metadata = Metadata::builder()
            .put(DigitSequence::parse("44").unwrap(), CallingCodeInfo::new("GB"), range_map)
            .build()
            .unwrap();

        let config = SimplificationConfig { max_prefix_length: Some(3) };
        let simplified = MetadataSimplifier::new(&config).simplify(&metadata).unwrap();
        let cc = DigitSequence::parse("44").unwrap();
        let simplified_map = simplified.get_range_map(&cc).unwrap();
        assert_eq!(simplified_map.all_ranges(), &ranges("20[12]xxx, 7[4-9]1xxx"));
        assert_eq!(
            simplified_map.get_ranges(&ClassifierType::Type, "FIXED_LINE").unwrap(),
            &ranges("20[12]xxx")
        );
        validate_no_change_to_original_ranges(&metadata, &simplified).unwrap();

        let unchanged = MetadataSimplifier::new(&SimplificationConfig::default())
            .simplify(&metadata)
            .unwrap();
        assert_eq!(unchanged, metadata);
    }

    #[test]
    fn widening_does_not_reclassify_other_labels() {
        let classifier = RangeClassifier::builder()
            .single_valued(true)
            .put("FIXED_LINE", ranges("2012xx"))
            .unwrap()
            .put("MOBILE", ranges("2019xx"))
            .unwrap()
            .build();
        let range_map = RangeMap::builder()
            .put(ClassifierType::Type, classifier)
            .unwrap()
            .build(ranges("2012xx, 2019xx"));
        let cc = DigitSequence::parse("44").unwrap();
        let metadata = Metadata::builder()
            .put(cc, CallingCodeInfo::new("GB"), range_map)
            .build()
            .unwrap();

        let config = SimplificationConfig { max_prefix_length: Some(3) };
        let simplified = MetadataSimplifier::new(&config).simplify(&metadata).unwrap();
        validate_no_change_to_original_ranges(&metadata, &simplified).unwrap();

        let types = simplified
            .get_range_map(&cc)
            .unwrap()
            .get_classifier(&ClassifierType::Type)
            .unwrap();
        let mobile_number = DigitSequence::parse("201912").unwrap();
        assert_eq!(types.classify(&mobile_number), ["MOBILE"]);
        assert_eq!(types.classify(&DigitSequence::parse("201234").unwrap()), ["FIXED_LINE"]);
        assert!(types.get_ranges("FIXED_LINE").intersect(types.get_ranges("MOBILE")).is_empty());
        assert_eq!(types.get_ranges("FIXED_LINE"), &ranges("201[0-8]xx"));
    }
}
