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

use std::{fmt, str::FromStr};

/// A classification axis applied uniformly across calling codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassifierType {
    /// **Number type.** Labels such as `FIXED_LINE`, `MOBILE` or `TOLL_FREE`.
    Type,
    /// **Area code length.** Labels are the number of leading national
    /// digits which make up the area code.
    AreaCodeLength,
    /// **Tariff.** Labels such as `STANDARD_RATE` or `PREMIUM_RATE`.
    Tariff,
    /// **Region.** Labels are CLDR region codes (`"GB"`, `"JE"`, `"001"`).
    Region,
    /// **Validity.** The single label `VALID` marks the accepted ranges. This
    /// type is consumed by [`Metadata::trim_valid_ranges`](super::Metadata::trim_valid_ranges)
    /// and never written to an artifact.
    Validity,
    /// Any other axis, identified by its name.
    Custom(String),
}

impl ClassifierType {
    /// The label of the validity classifier which denotes accepted ranges.
    pub const VALID_LABEL: &'static str = "VALID";

    /// The axes a metadata build selects when none are configured.
    pub fn default_base_types() -> Vec<ClassifierType> {
        vec![
            ClassifierType::Type,
            ClassifierType::AreaCodeLength,
            ClassifierType::Tariff,
            ClassifierType::Region,
        ]
    }

    pub fn id(&self) -> &str {
        match self {
            ClassifierType::Type => "TYPE",
            ClassifierType::AreaCodeLength => "AREA_CODE_LENGTH",
            ClassifierType::Tariff => "TARIFF",
            ClassifierType::Region => "REGION",
            ClassifierType::Validity => "VALIDITY",
            ClassifierType::Custom(id) => id,
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "TYPE" => ClassifierType::Type,
            "AREA_CODE_LENGTH" => ClassifierType::AreaCodeLength,
            "TARIFF" => ClassifierType::Tariff,
            "REGION" => ClassifierType::Region,
            "VALIDITY" => ClassifierType::Validity,
            other => ClassifierType::Custom(other.to_string()),
        }
    }

    /// Whether each number has at most one label on this axis. Only regions
    /// (shared numbering plans) and custom axes can overlap.
    pub fn is_single_valued(&self) -> bool {
        !matches!(self, ClassifierType::Region | ClassifierType::Custom(_))
    }
}

impl fmt::Display for ClassifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ClassifierType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_id(s))
    }
}
