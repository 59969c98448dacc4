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

use thiserror::Error;

use crate::digit_sequence::{DigitSequence, MAX_DIGITS};

/// Bit mask with one bit set for every decimal digit.
pub const ALL_DIGITS_MASK: u16 = 0x3FF;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeSpecParseError {
    #[error("Unexpected character {found:?} at position {position} in {spec:?}")]
    UnexpectedChar { spec: String, position: usize, found: char },
    #[error("Unterminated digit range in {0:?}")]
    UnterminatedRange(String),
    #[error("Empty or inverted digit range in {0:?}")]
    EmptyRange(String),
    #[error("Range specification {0:?} is longer than {MAX_DIGITS} digits")]
    TooLong(String),
}

/// A fixed length range of digit sequences, described by one non-empty digit
/// mask per position.
///
/// The text form uses a digit for a single value, `x` for any digit and
/// `[...]` for a set of digits or digit ranges, e.g. `"20[0-57-9]xxxxxx"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeSpec {
    masks: Vec<u16>,
}

impl RangeSpec {
    pub fn parse(s: &str) -> Result<Self, RangeSpecParseError> {
        let mut masks = Vec::with_capacity(s.len());
        let mut chars = s.char_indices();
        while let Some((position, c)) = chars.next() {
            let mask = match c {
                'x' | 'X' => ALL_DIGITS_MASK,
                '0'..='9' => 1 << (c as u8 - b'0'),
                '[' => parse_digit_set(s, &mut chars)?,
                _ => {
                    return Err(RangeSpecParseError::UnexpectedChar {
                        spec: s.to_string(),
                        position,
                        found: c,
                    });
                }
            };
            masks.push(mask);
        }
        if masks.len() > MAX_DIGITS {
            return Err(RangeSpecParseError::TooLong(s.to_string()));
        }
        Ok(Self { masks })
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn masks(&self) -> &[u16] {
        &self.masks
    }

    pub fn contains(&self, sequence: &DigitSequence) -> bool {
        sequence.len() == self.len() && self.matches_prefix(sequence)
    }

    /// Whether `sequence` is a (not necessarily strict) prefix of some
    /// sequence in this range.
    pub fn matches_prefix(&self, sequence: &DigitSequence) -> bool {
        sequence.len() <= self.len()
            && sequence
                .digits()
                .iter()
                .zip(&self.masks)
                .all(|(&d, &m)| m & (1 << d) != 0)
    }

    /// Whether every sequence of `other` is also in this range.
    pub fn contains_spec(&self, other: &RangeSpec) -> bool {
        self.len() == other.len()
            && self.masks.iter().zip(&other.masks).all(|(&a, &b)| b & !a == 0)
    }

    pub fn intersect(&self, other: &RangeSpec) -> Option<RangeSpec> {
        if self.len() != other.len() {
            return None;
        }
        let masks: Vec<u16> = self.masks.iter().zip(&other.masks).map(|(a, b)| a & b).collect();
        if masks.contains(&0) {
            return None;
        }
        Some(RangeSpec { masks })
    }

    /// Returns disjoint specs covering exactly `self \ other`.
    pub fn subtract(&self, other: &RangeSpec) -> Vec<RangeSpec> {
        if self.intersect(other).is_none() {
            return vec![self.clone()];
        }
        let mut pieces = Vec::new();
        // Positions before `i` are narrowed to the intersection as we go, so
        // the emitted pieces never overlap.
        let mut current = self.masks.clone();
        for i in 0..self.len() {
            let remaining = self.masks[i] & !other.masks[i];
            if remaining != 0 {
                let mut piece = current.clone();
                piece[i] = remaining;
                pieces.push(RangeSpec { masks: piece });
            }
            current[i] = self.masks[i] & other.masks[i];
        }
        pieces
    }

    /// Merges two specs if their union is itself a single spec.
    pub fn try_merge(&self, other: &RangeSpec) -> Option<RangeSpec> {
        if self.len() != other.len() {
            return None;
        }
        if self.contains_spec(other) {
            return Some(self.clone());
        }
        if other.contains_spec(self) {
            return Some(other.clone());
        }
        let mut differing = self
            .masks
            .iter()
            .zip(&other.masks)
            .enumerate()
            .filter(|(_, (a, b))| a != b);
        let (index, _) = differing.next()?;
        if differing.next().is_some() {
            return None;
        }
        let mut masks = self.masks.clone();
        masks[index] |= other.masks[index];
        Some(RangeSpec { masks })
    }

    /// Returns a spec where every position from `prefix_length` onwards
    /// accepts any digit. The result always contains `self`.
    pub fn widen_after(&self, prefix_length: usize) -> RangeSpec {
        let mut masks = self.masks.clone();
        for mask in masks.iter_mut().skip(prefix_length) {
            *mask = ALL_DIGITS_MASK;
        }
        RangeSpec { masks }
    }

    /// Renders this spec as a regular expression (without anchors).
    pub fn to_regex(&self) -> String {
        let mut pattern = String::with_capacity(self.len() * 4);
        let mut i = 0;
        while i < self.len() {
            let mask = self.masks[i];
            let run = self.masks[i..].iter().take_while(|&&m| m == mask).count();
            let token = mask_to_token(mask, r"\d");
            pattern.push_str(&token);
            if run > 1 {
                let mut buf = itoa::Buffer::new();
                pattern.push_str(&fast_cat::concat_str!("{", buf.format(run), "}"));
            }
            i += run;
        }
        pattern
    }
}

fn parse_digit_set(
    spec: &str,
    chars: &mut std::str::CharIndices<'_>,
) -> Result<u16, RangeSpecParseError> {
    let mut mask = 0u16;
    let mut last: Option<u8> = None;
    let mut in_range = false;
    for (position, c) in chars.by_ref() {
        match c {
            ']' => {
                if in_range || mask == 0 {
                    return Err(RangeSpecParseError::EmptyRange(spec.to_string()));
                }
                return Ok(mask);
            }
            '-' if last.is_some() && !in_range => in_range = true,
            '0'..='9' => {
                let digit = c as u8 - b'0';
                if in_range {
                    let start = last.unwrap_or(digit);
                    if start > digit {
                        return Err(RangeSpecParseError::EmptyRange(spec.to_string()));
                    }
                    for d in start..=digit {
                        mask |= 1 << d;
                    }
                    in_range = false;
                    last = None;
                } else {
                    mask |= 1 << digit;
                    last = Some(digit);
                }
            }
            _ => {
                return Err(RangeSpecParseError::UnexpectedChar {
                    spec: spec.to_string(),
                    position,
                    found: c,
                });
            }
        }
    }
    Err(RangeSpecParseError::UnterminatedRange(spec.to_string()))
}

/// Renders a digit mask, using `any` for the full mask.
fn mask_to_token(mask: u16, any: &str) -> String {
    if mask == ALL_DIGITS_MASK {
        return any.to_string();
    }
    if mask.count_ones() == 1 {
        return (mask.trailing_zeros() as u8).to_string();
    }
    let mut token = String::from("[");
    let mut d = 0u8;
    while d <= 9 {
        if mask & (1 << d) == 0 {
            d += 1;
            continue;
        }
        let mut end = d;
        while end < 9 && mask & (1 << (end + 1)) != 0 {
            end += 1;
        }
        token.push((b'0' + d) as char);
        if end > d {
            token.push('-');
            token.push((b'0' + end) as char);
        }
        d = end + 1;
    }
    token.push(']');
    token
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty>");
        }
        for &mask in &self.masks {
            f.write_str(&mask_to_token(mask, "x"))?;
        }
        Ok(())
    }
}

impl fmt::Debug for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeSpec({})", self)
    }
}

impl FromStr for RangeSpec {
    type Err = RangeSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeSpec, RangeSpecParseError};
    use crate::digit_sequence::DigitSequence;

    fn spec(s: &str) -> RangeSpec {
        RangeSpec::parse(s).unwrap()
    }

    fn seq(s: &str) -> DigitSequence {
        DigitSequence::parse(s).unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(spec("20[0-57-9]xx").to_string(), "20[0-57-9]xx");
        assert_eq!(spec("[0-9]").to_string(), "x");
        assert_eq!(spec("[135]").to_string(), "[135]");
        assert_eq!(spec("[3]").to_string(), "3");
        assert_eq!(spec("").len(), 0);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            RangeSpec::parse("2a"),
            Err(RangeSpecParseError::UnexpectedChar { position: 1, found: 'a', .. })
        ));
        assert!(matches!(RangeSpec::parse("[12"), Err(RangeSpecParseError::UnterminatedRange(_))));
        assert!(matches!(RangeSpec::parse("[5-2]"), Err(RangeSpecParseError::EmptyRange(_))));
        assert!(matches!(RangeSpec::parse("[]"), Err(RangeSpecParseError::EmptyRange(_))));
    }

    #[test]
    fn contains_and_prefix() {
        let s = spec("20[0-5]x");
        assert!(s.contains(&seq("2031")));
        assert!(!s.contains(&seq("2061")));
        assert!(!s.contains(&seq("203")));
        assert!(s.matches_prefix(&seq("203")));
        assert!(s.matches_prefix(&seq("")));
        assert!(!s.matches_prefix(&seq("21")));
        assert!(!s.matches_prefix(&seq("20311")));
    }

    #[test]
    fn subtract_produces_disjoint_cover() {
        let a = spec("[1-3]x");
        let b = spec("2[0-4]");
        let pieces = a.subtract(&b);
        for first in 0..10u8 {
            for second in 0..10u8 {
                let s = DigitSequence::from_digits(&[first, second]).unwrap();
                let expected = a.contains(&s) && !b.contains(&s);
                let hits = pieces.iter().filter(|p| p.contains(&s)).count();
                assert_eq!(hits, expected as usize, "sequence {}", s);
            }
        }
    }

    #[test]
    fn merge_only_when_exact() {
        assert_eq!(spec("12x").try_merge(&spec("13x")), Some(spec("1[23]x")));
        assert_eq!(spec("1[2-4]").try_merge(&spec("13")), Some(spec("1[2-4]")));
        assert_eq!(spec("12").try_merge(&spec("34")), None);
        assert_eq!(spec("12").try_merge(&spec("123")), None);
    }

    #[test]
    fn regex_rendering() {
        assert_eq!(spec("20xxxxxxxx").to_regex(), r"20\d{8}");
        assert_eq!(spec("7[4-9]x").to_regex(), r"7[4-9]\d");
        assert_eq!(spec("11").to_regex(), "1{2}");
    }

    #[test]
    fn widening_keeps_prefix() {
        let widened = spec("2087[0-4]x").widen_after(3);
        assert_eq!(widened, spec("208xxx"));
        assert!(widened.contains_spec(&spec("2087[0-4]x")));
    }
}
