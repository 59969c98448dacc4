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

use std::fmt;

use thiserror::Error;

use crate::digit_sequence::{DigitSequence, InvalidDigitSequenceError};

const PLUS_SIGN: &str = "+";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberParseError {
    #[error("E.164 numbers must start with '+'")]
    MissingPlusSign,
    #[error("{0}")]
    InvalidDigits(#[from] InvalidDigitSequenceError),
    #[error("No supported calling code at the start of {0}")]
    UnknownCallingCode(String),
}

/// A phone number split into its calling code and national number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhoneNumber {
    pub calling_code: DigitSequence,
    pub national_number: DigitSequence,
}

impl PhoneNumber {
    pub fn new(calling_code: DigitSequence, national_number: DigitSequence) -> Self {
        Self { calling_code, national_number }
    }

    /// Renders the number as `+<calling code><national number>`.
    pub fn to_e164(&self) -> String {
        fast_cat::concat_str!(
            PLUS_SIGN,
            &self.calling_code.to_string(),
            &self.national_number.to_string()
        )
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_e164())
    }
}

/// Strips the leading plus sign of an E.164 string and parses the digits.
pub(crate) fn parse_e164_digits(s: &str) -> Result<DigitSequence, PhoneNumberParseError> {
    let digits = s
        .trim()
        .strip_prefix(PLUS_SIGN)
        .ok_or(PhoneNumberParseError::MissingPlusSign)?;
    Ok(DigitSequence::parse(digits)?)
}

#[cfg(test)]
mod tests {
    use super::{PhoneNumber, PhoneNumberParseError, parse_e164_digits};
    use crate::digit_sequence::DigitSequence;

    #[test]
    fn e164_rendering() {
        let number = PhoneNumber::new(
            DigitSequence::parse("44").unwrap(),
            DigitSequence::parse("2087438000").unwrap(),
        );
        assert_eq!(number.to_e164(), "+442087438000");
        assert_eq!(number.to_string(), "+442087438000");
    }

    #[test]
    fn e164_digits() {
        assert_eq!(parse_e164_digits(" +44 ").unwrap(), DigitSequence::parse("44").unwrap());
        assert_eq!(parse_e164_digits("44"), Err(PhoneNumberParseError::MissingPlusSign));
        assert!(matches!(parse_e164_digits("+44-20"), Err(PhoneNumberParseError::InvalidDigits(_))));
    }
}
