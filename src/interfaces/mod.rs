use std::fmt::Debug;

use crate::{digit_sequence::DigitSequence, matcher::MatchResult};

/// Internal digit sequence matching API used to isolate the underlying
/// encoding of a compiled matcher (DFA, regex) and allow different
/// implementations to be swapped in easily.
pub(crate) trait MatcherApi: Debug + Send + Sync {
    /// Matches a complete or partial national number against the ranges
    /// encoded by this matcher.
    fn match_digits(&self, sequence: &DigitSequence) -> MatchResult;
}
