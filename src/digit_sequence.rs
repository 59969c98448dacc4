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

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use thiserror::Error;

/// The maximum number of digits a sequence can hold. This comfortably covers
/// calling codes and national numbers (the ITU limit is 15, but longer
/// numbers exist in some regions).
pub const MAX_DIGITS: usize = 19;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDigitSequenceError {
    #[error("Not a decimal digit: {0:?}")]
    NotADigit(char),
    #[error("Digit value out of range: {0}")]
    DigitOutOfRange(u8),
    #[error("Digit sequence is too long ({0} digits, max is {MAX_DIGITS})")]
    TooLong(usize),
}

/// An immutable sequence of decimal digits.
///
/// Leading zeros and length are preserved, so `"0123"` and `"123"` are
/// different sequences. Ordering is lexicographic over the digit values,
/// with a shorter sequence ordering before any sequence it is a prefix of.
#[derive(Clone, Copy)]
pub struct DigitSequence {
    len: u8,
    digits: [u8; MAX_DIGITS],
}

impl DigitSequence {
    /// Returns the empty sequence.
    pub const fn empty() -> Self {
        Self { len: 0, digits: [0; MAX_DIGITS] }
    }

    /// Parses a string of decimal digits. Any Unicode decimal digit is
    /// accepted (e.g. full width digits), everything else is an error.
    pub fn parse(s: &str) -> Result<Self, InvalidDigitSequenceError> {
        let normalized = dec_from_char::normalize_decimals(s);
        let mut sequence = Self::empty();
        for c in normalized.chars() {
            let digit = c
                .to_digit(10)
                .ok_or(InvalidDigitSequenceError::NotADigit(c))?;
            sequence = sequence.append_digit(digit as u8)?;
        }
        Ok(sequence)
    }

    /// Creates a sequence from digit values (each 0 to 9).
    pub fn from_digits(digits: &[u8]) -> Result<Self, InvalidDigitSequenceError> {
        if digits.len() > MAX_DIGITS {
            return Err(InvalidDigitSequenceError::TooLong(digits.len()));
        }
        let mut sequence = Self::empty();
        for &digit in digits {
            sequence = sequence.append_digit(digit)?;
        }
        Ok(sequence)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the digit values of this sequence.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len()]
    }

    /// Returns the digit at `index`, if present.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.digits().get(index).copied()
    }

    /// Returns the first `n` digits (or the whole sequence if it is shorter).
    pub fn first(&self, n: usize) -> Self {
        let len = n.min(self.len());
        let mut prefix = *self;
        prefix.len = len as u8;
        prefix.digits[len..].fill(0);
        prefix
    }

    /// Returns the digits after the first `n`.
    pub fn skip(&self, n: usize) -> Self {
        let start = n.min(self.len());
        let mut suffix = Self::empty();
        let rest = &self.digits[start..self.len()];
        suffix.digits[..rest.len()].copy_from_slice(rest);
        suffix.len = rest.len() as u8;
        suffix
    }

    pub fn starts_with(&self, prefix: &DigitSequence) -> bool {
        self.digits().starts_with(prefix.digits())
    }

    /// Returns a new sequence with the given digit appended.
    pub fn append_digit(&self, digit: u8) -> Result<Self, InvalidDigitSequenceError> {
        if digit > 9 {
            return Err(InvalidDigitSequenceError::DigitOutOfRange(digit));
        }
        if self.len() == MAX_DIGITS {
            return Err(InvalidDigitSequenceError::TooLong(MAX_DIGITS + 1));
        }
        let mut extended = *self;
        extended.digits[self.len()] = digit;
        extended.len += 1;
        Ok(extended)
    }

    /// Returns the concatenation of this sequence and `other`.
    pub fn extend(&self, other: &DigitSequence) -> Result<Self, InvalidDigitSequenceError> {
        let total = self.len() + other.len();
        if total > MAX_DIGITS {
            return Err(InvalidDigitSequenceError::TooLong(total));
        }
        let mut extended = *self;
        extended.digits[self.len()..total].copy_from_slice(other.digits());
        extended.len = total as u8;
        Ok(extended)
    }
}

impl Default for DigitSequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for DigitSequence {
    fn eq(&self, other: &Self) -> bool {
        self.digits() == other.digits()
    }
}

impl Eq for DigitSequence {}

impl Hash for DigitSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digits().hash(state);
    }
}

impl PartialOrd for DigitSequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DigitSequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits().cmp(other.digits())
    }
}

impl fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitSequence(\"{}\")", self)
    }
}

impl FromStr for DigitSequence {
    type Err = InvalidDigitSequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
