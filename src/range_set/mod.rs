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

mod range_spec;

use std::{fmt, str::FromStr};

pub use range_spec::{ALL_DIGITS_MASK, RangeSpec, RangeSpecParseError};

use crate::digit_sequence::DigitSequence;

/// A set of digit sequences, held as a normalized union of [`RangeSpec`]s.
///
/// All operations are exact. Specs are kept sorted, free of empty ranges and
/// free of ranges subsumed by (or trivially mergeable with) another, but the
/// representation is not unique, so equality is defined as set equality.
#[derive(Clone, Default)]
pub struct RangeSet {
    specs: Vec<RangeSpec>,
}

static EMPTY: RangeSet = RangeSet::empty();

impl RangeSet {
    pub const fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// A static empty set, for lookups which have no ranges to return.
    pub fn empty_ref() -> &'static RangeSet {
        &EMPTY
    }

    pub fn from_specs<I: IntoIterator<Item = RangeSpec>>(specs: I) -> Self {
        Self { specs: normalize(specs.into_iter().collect()) }
    }

    /// Parses a comma separated list of range specifications, e.g.
    /// `"20xxxxxxxx, 7[4-9]xxxxxxxx"`.
    pub fn parse(s: &str) -> Result<Self, RangeSpecParseError> {
        let specs = s
            .split(',')
            .map(str::trim)
            .filter(|spec| !spec.is_empty())
            .map(RangeSpec::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_specs(specs))
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn specs(&self) -> &[RangeSpec] {
        &self.specs
    }

    pub fn contains(&self, sequence: &DigitSequence) -> bool {
        self.specs.iter().any(|spec| spec.contains(sequence))
    }

    /// Whether some sequence in this set starts with (or equals) `prefix`.
    pub fn matches_prefix(&self, prefix: &DigitSequence) -> bool {
        self.specs.iter().any(|spec| spec.matches_prefix(prefix))
    }

    pub fn union(&self, other: &RangeSet) -> RangeSet {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self::from_specs(self.specs.iter().chain(&other.specs).cloned())
    }

    pub fn intersect(&self, other: &RangeSet) -> RangeSet {
        let mut specs = Vec::new();
        for a in &self.specs {
            specs.extend(other.specs.iter().filter_map(|b| a.intersect(b)));
        }
        Self::from_specs(specs)
    }

    pub fn subtract(&self, other: &RangeSet) -> RangeSet {
        let mut remaining = self.specs.clone();
        for b in &other.specs {
            if remaining.is_empty() {
                break;
            }
            remaining = normalize(remaining.iter().flat_map(|a| a.subtract(b)).collect());
        }
        Self { specs: remaining }
    }

    /// Whether every sequence of `other` is in this set.
    pub fn contains_all(&self, other: &RangeSet) -> bool {
        other.subtract(self).is_empty()
    }

    /// Bit mask of the lengths of sequences in this set (bit N for length N).
    pub fn lengths_mask(&self) -> u32 {
        self.specs.iter().fold(0, |acc, spec| acc | (1 << spec.len()))
    }

    /// Applies `f` to every spec. The caller must only widen (or keep) specs
    /// when the result is required to be a superset.
    pub fn map_specs<F: Fn(&RangeSpec) -> RangeSpec>(&self, f: F) -> RangeSet {
        Self::from_specs(self.specs.iter().map(f))
    }
}

/// Sorts, de-duplicates and merges specs until no two specs can be combined.
fn normalize(mut specs: Vec<RangeSpec>) -> Vec<RangeSpec> {
    specs.sort();
    specs.dedup();
    let mut changed = true;
    while changed {
        changed = false;
        let mut i = 0;
        while i < specs.len() {
            let mut j = i + 1;
            while j < specs.len() {
                if let Some(merged) = specs[i].try_merge(&specs[j]) {
                    specs[i] = merged;
                    specs.swap_remove(j);
                    changed = true;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }
    specs.sort();
    specs
}

impl PartialEq for RangeSet {
    fn eq(&self, other: &Self) -> bool {
        self.contains_all(other) && other.contains_all(self)
    }
}

impl Eq for RangeSet {}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", spec)?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeSet{}", self)
    }
}

impl FromStr for RangeSet {
    type Err = RangeSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<RangeSpec> for RangeSet {
    fn from_iter<T: IntoIterator<Item = RangeSpec>>(iter: T) -> Self {
        Self::from_specs(iter)
    }
}
