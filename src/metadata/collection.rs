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

use std::collections::BTreeMap;

use log::debug;

use crate::digit_sequence::DigitSequence;

use super::{ClassifierType, RangeMap, errors::MetadataError};

/// Per calling code data from the root table which is not range based.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallingCodeInfo {
    /// CLDR code of the main region, e.g. `"US"` for calling code 1.
    pub main_region: String,
    /// National prefixes, preferred prefix first.
    pub national_prefixes: Vec<DigitSequence>,
    pub national_prefix_optional: bool,
    /// Example national numbers, the main region's example first.
    pub example_numbers: Vec<DigitSequence>,
}

impl CallingCodeInfo {
    pub fn new(main_region: impl Into<String>) -> Self {
        Self { main_region: main_region.into(), ..Default::default() }
    }

    pub fn with_national_prefixes(mut self, prefixes: Vec<DigitSequence>, optional: bool) -> Self {
        self.national_prefixes = prefixes;
        self.national_prefix_optional = optional;
        self
    }

    /// Adds an example number after any already present.
    pub fn with_example_number(mut self, example_number: DigitSequence) -> Self {
        self.example_numbers.push(example_number);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CallingCodeData {
    info: CallingCodeInfo,
    ranges: RangeMap,
}

/// Offline metadata for a set of calling codes.
///
/// All range maps share the same classifier types in the same order, since
/// encoded artifacts address types by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    types: Vec<ClassifierType>,
    data: BTreeMap<DigitSequence, CallingCodeData>,
}

#[derive(Debug, Default)]
pub struct MetadataBuilder {
    data: Vec<(DigitSequence, CallingCodeData)>,
}

impl MetadataBuilder {
    pub fn put(mut self, calling_code: DigitSequence, info: CallingCodeInfo, ranges: RangeMap) -> Self {
        self.data.push((calling_code, CallingCodeData { info, ranges }));
        self
    }

    /// Checks the schema consistency of the collected range maps. The types of
    /// the first calling code added define the expected schema.
    pub fn build(self) -> Result<Metadata, MetadataError> {
        let Some((_, first)) = self.data.first() else {
            return Err(MetadataError::EmptyCallingCodes);
        };
        let types = first.ranges.type_list();
        let mut data = BTreeMap::new();
        for (calling_code, cc_data) in self.data {
            if !cc_data.ranges.types().eq(types.iter()) {
                return Err(MetadataError::SchemaMismatch {
                    calling_code,
                    expected: types,
                    found: cc_data.ranges.type_list(),
                });
            }
            if data.insert(calling_code, cc_data).is_some() {
                return Err(MetadataError::DuplicateCallingCode(calling_code));
            }
        }
        Ok(Metadata { types, data })
    }
}

impl Metadata {
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    pub fn types(&self) -> &[ClassifierType] {
        &self.types
    }

    /// Calling codes in ascending digit order.
    pub fn calling_codes(&self) -> impl Iterator<Item = &DigitSequence> {
        self.data.keys()
    }

    pub fn get_range_map(&self, calling_code: &DigitSequence) -> Result<&RangeMap, MetadataError> {
        self.data
            .get(calling_code)
            .map(|d| &d.ranges)
            .ok_or(MetadataError::MissingCallingCode(*calling_code))
    }

    pub fn get_info(&self, calling_code: &DigitSequence) -> Result<&CallingCodeInfo, MetadataError> {
        self.data
            .get(calling_code)
            .map(|d| &d.info)
            .ok_or(MetadataError::MissingCallingCode(*calling_code))
    }

    /// Rebuilds the metadata by transforming every range map, keeping the
    /// root data. The transform must keep the schema consistent.
    pub fn transform<F>(&self, f: F) -> Result<Metadata, MetadataError>
    where
        F: Fn(&DigitSequence, &RangeMap) -> Result<RangeMap, MetadataError>,
    {
        let mut builder = Metadata::builder();
        for (calling_code, d) in &self.data {
            builder = builder.put(*calling_code, d.info.clone(), f(calling_code, &d.ranges)?);
        }
        builder.build()
    }

    /// Restricts every range map to the validity classifier's `VALID` ranges
    /// and drops that classifier. Calling codes with nothing left valid are
    /// removed unless `include_empty` is set.
    pub fn trim_valid_ranges(&self, include_empty: bool) -> Result<Metadata, MetadataError> {
        if !self.types.contains(&ClassifierType::Validity) {
            return Ok(self.clone());
        }
        let mut builder = Metadata::builder();
        for (calling_code, d) in &self.data {
            let trimmed = d.ranges.trim_valid_ranges();
            if trimmed.all_ranges().is_empty() && !include_empty {
                debug!("Dropping calling code {} with no valid ranges", calling_code);
                continue;
            }
            builder = builder.put(*calling_code, d.info.clone(), trimmed);
        }
        builder.build()
    }

    /// Selects the given classifier types (in order) and, if given, the
    /// calling codes to keep. Unknown calling codes in the filter are errors.
    pub fn select(
        &self,
        types: &[ClassifierType],
        calling_codes: Option<&[DigitSequence]>,
    ) -> Result<Metadata, MetadataError> {
        let mut builder = Metadata::builder();
        match calling_codes {
            Some(codes) => {
                for calling_code in codes {
                    let ranges = self.get_range_map(calling_code)?.select(types)?;
                    builder = builder.put(*calling_code, self.get_info(calling_code)?.clone(), ranges);
                }
            }
            None => {
                for (calling_code, d) in &self.data {
                    builder = builder.put(*calling_code, d.info.clone(), d.ranges.select(types)?);
                }
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::{CallingCodeInfo, Metadata};
    use crate::{
        digit_sequence::DigitSequence,
        metadata::{ClassifierType, MetadataError, RangeClassifier, RangeMap},
        range_set::RangeSet,
    };

    fn seq(s: &str) -> DigitSequence {
        DigitSequence::parse(s).unwrap()
    }

    fn ranges(s: &str) -> RangeSet {
        RangeSet::parse(s).unwrap()
    }

    fn range_map(types: &[ClassifierType], all: &str, valid: &str) -> RangeMap {
        let mut builder = RangeMap::builder();
        for t in types {
            let label = if *t == ClassifierType::Validity { "VALID" } else { "X" };
            let r = if *t == ClassifierType::Validity { valid } else { all };
            builder = builder
                .put(t.clone(), RangeClassifier::builder().put(label, ranges(r)).unwrap().build())
                .unwrap();
        }
        builder.build(ranges(all))
    }

    #[test]
    fn build_checks_schema() {
        assert_eq!(Metadata::builder().build().unwrap_err(), MetadataError::EmptyCallingCodes);

        let err = Metadata::builder()
            .put(seq("1"), CallingCodeInfo::new("US"), range_map(&[ClassifierType::Type], "2xx", ""))
            .put(seq("7"), CallingCodeInfo::new("RU"), range_map(&[ClassifierType::Tariff], "2xx", ""))
            .build()
            .unwrap_err();
        assert!(matches!(err, MetadataError::SchemaMismatch { calling_code, .. } if calling_code == seq("7")));

        let types = [ClassifierType::Type, ClassifierType::Tariff];
        let reversed = [ClassifierType::Tariff, ClassifierType::Type];
        let err = Metadata::builder()
            .put(seq("1"), CallingCodeInfo::new("US"), range_map(&types, "2xx", ""))
            .put(seq("7"), CallingCodeInfo::new("RU"), range_map(&reversed, "2xx", ""))
            .build()
            .unwrap_err();
        assert!(matches!(err, MetadataError::SchemaMismatch { .. }));
    }

    #[test]
    fn trim_is_idempotent_and_drops_empty_codes() {
        let types = [ClassifierType::Type, ClassifierType::Validity];
        let metadata = Metadata::builder()
            .put(seq("1"), CallingCodeInfo::new("US"), range_map(&types, "2xx", "2[0-4]x"))
            .put(seq("7"), CallingCodeInfo::new("RU"), range_map(&types, "3xx", "4xx"))
            .build()
            .unwrap();

        let trimmed = metadata.trim_valid_ranges(false).unwrap();
        assert_eq!(trimmed.types(), [ClassifierType::Type]);
        assert_eq!(trimmed.calling_codes().collect::<Vec<_>>(), [&seq("1")]);
        assert_eq!(trimmed.trim_valid_ranges(false).unwrap(), trimmed);

        let with_empty = metadata.trim_valid_ranges(true).unwrap();
        assert_eq!(with_empty.calling_codes().count(), 2);
        assert!(with_empty.get_range_map(&seq("7")).unwrap().all_ranges().is_empty());
        assert_eq!(with_empty.trim_valid_ranges(true).unwrap(), with_empty);
    }

    #[test]
    fn select_types_and_calling_codes() {
        let types = [ClassifierType::Type, ClassifierType::Tariff];
        let metadata = Metadata::builder()
            .put(seq("1"), CallingCodeInfo::new("US"), range_map(&types, "2xx", ""))
            .put(seq("7"), CallingCodeInfo::new("RU"), range_map(&types, "3xx", ""))
            .build()
            .unwrap();
        let selected = metadata
            .select(&[ClassifierType::Tariff], Some(&[seq("7")]))
            .unwrap();
        assert_eq!(selected.types(), [ClassifierType::Tariff]);
        assert_eq!(selected.calling_codes().collect::<Vec<_>>(), [&seq("7")]);
        assert_eq!(selected.get_info(&seq("7")).unwrap().main_region, "RU");
        assert_eq!(
            metadata.select(&types, Some(&[seq("44")])).unwrap_err(),
            MetadataError::MissingCallingCode(seq("44"))
        );
    }
}
