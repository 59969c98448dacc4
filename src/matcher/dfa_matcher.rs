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

//! Compact DFA encoding of a [`RangeSet`].
//!
//! Layout (little endian):
//! `[format = 1][u16 state count]` followed by one record per state:
//! `[flags][edge count]` and `edge count` times `[u16 digit mask][u16 target]`.
//! State 0 is the start state and bit 0 of the flags marks accepting states.

use std::collections::{HashMap, VecDeque};

use super::{MatchResult, errors::MatcherDataError};
use crate::{
    digit_sequence::DigitSequence,
    interfaces::MatcherApi,
    range_set::{ALL_DIGITS_MASK, RangeSet},
};

const FORMAT_VERSION: u8 = 1;
const TERMINAL_FLAG: u8 = 0x1;
const NO_TRANSITION: u16 = u16::MAX;
const MAX_STATES: usize = u16::MAX as usize;

/// Transition targets indexed by digit.
type Targets = [Option<usize>; 10];

/// Builds the minimal DFA for `ranges` and returns its byte encoding.
pub fn encode_ranges(ranges: &RangeSet) -> Result<Vec<u8>, MatcherDataError> {
    let (terminals, targets) = minimize(build_dfa(ranges));
    if terminals.len() > MAX_STATES {
        return Err(MatcherDataError::TooManyStates(terminals.len()));
    }
    let mut bytes = Vec::with_capacity(3 + terminals.len() * 6);
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&(terminals.len() as u16).to_le_bytes());
    for (terminal, state_targets) in terminals.iter().zip(&targets) {
        let edges = group_edges(state_targets);
        bytes.push(if *terminal { TERMINAL_FLAG } else { 0 });
        bytes.push(edges.len() as u8);
        for (mask, target) in edges {
            bytes.extend_from_slice(&mask.to_le_bytes());
            bytes.extend_from_slice(&(target as u16).to_le_bytes());
        }
    }
    Ok(bytes)
}

/// Subset construction over (spec index, offset) positions.
fn build_dfa(ranges: &RangeSet) -> (Vec<bool>, Vec<Targets>) {
    let specs = ranges.specs();
    let start: Vec<(usize, usize)> = (0..specs.len()).map(|i| (i, 0)).collect();
    let mut ids = HashMap::from([(start.clone(), 0usize)]);
    let mut pending = VecDeque::from([start]);
    let mut terminals = Vec::new();
    let mut targets = Vec::new();

    // States are discovered and processed in the same order, so a state's
    // position in `terminals` equals its id.
    while let Some(positions) = pending.pop_front() {
        terminals.push(positions.iter().any(|&(i, offset)| specs[i].len() == offset));
        let mut state_targets: Targets = [None; 10];
        for (digit, target) in state_targets.iter_mut().enumerate() {
            let next: Vec<(usize, usize)> = positions
                .iter()
                .filter(|&&(i, offset)| {
                    offset < specs[i].len() && specs[i].masks()[offset] & (1 << digit) != 0
                })
                .map(|&(i, offset)| (i, offset + 1))
                .collect();
            if next.is_empty() {
                continue;
            }
            let next_id = match ids.get(&next) {
                Some(&id) => id,
                None => {
                    let id = ids.len();
                    ids.insert(next.clone(), id);
                    pending.push_back(next);
                    id
                }
            };
            *target = Some(next_id);
        }
        targets.push(state_targets);
    }
    (terminals, targets)
}

/// Moore partition refinement. The start state always stays at index 0.
fn minimize((terminals, targets): (Vec<bool>, Vec<Targets>)) -> (Vec<bool>, Vec<Targets>) {
    let mut class: Vec<usize> = terminals.iter().map(|&t| t as usize).collect();
    let mut class_count = 0;
    loop {
        let mut signatures: HashMap<(usize, Targets), usize> = HashMap::new();
        let next: Vec<usize> = (0..class.len())
            .map(|state| {
                let signature = (class[state], targets[state].map(|t| t.map(|t| class[t])));
                let id = signatures.len();
                *signatures.entry(signature).or_insert(id)
            })
            .collect();
        let stable = signatures.len() == class_count;
        class_count = signatures.len();
        class = next;
        if stable {
            break;
        }
    }

    let mut min_terminals = vec![false; class_count];
    let mut min_targets: Vec<Targets> = vec![[None; 10]; class_count];
    let mut seen = vec![false; class_count];
    for (state, &c) in class.iter().enumerate() {
        if seen[c] {
            continue;
        }
        seen[c] = true;
        min_terminals[c] = terminals[state];
        min_targets[c] = targets[state].map(|t| t.map(|t| class[t]));
    }
    (min_terminals, min_targets)
}

/// Groups digits by target state into (digit mask, target) edges.
fn group_edges(targets: &Targets) -> Vec<(u16, usize)> {
    let mut edges: Vec<(u16, usize)> = Vec::new();
    for (digit, target) in targets.iter().enumerate() {
        let Some(target) = *target else { continue };
        match edges.iter_mut().find(|(_, t)| *t == target) {
            Some((mask, _)) => *mask |= 1 << digit,
            None => edges.push((1 << digit, target)),
        }
    }
    edges
}

#[derive(Debug, Clone)]
struct State {
    terminal: bool,
    next: [u16; 10],
}

impl State {
    fn has_transitions(&self) -> bool {
        self.next.iter().any(|&t| t != NO_TRANSITION)
    }
}

/// A decoded DFA which is walked one digit at a time.
#[derive(Debug, Clone)]
pub(crate) struct DigitSequenceMatcher {
    states: Vec<State>,
}

impl DigitSequenceMatcher {
    pub fn decode(bytes: &[u8]) -> Result<Self, MatcherDataError> {
        let mut reader = ByteReader { bytes, position: 0 };
        let format = reader.read_u8()?;
        if format != FORMAT_VERSION {
            return Err(MatcherDataError::UnsupportedFormat(format));
        }
        let count = reader.read_u16()? as usize;
        if count == 0 {
            return Err(MatcherDataError::NoStates);
        }
        let mut states = Vec::with_capacity(count);
        for state in 0..count {
            let flags = reader.read_u8()?;
            let edge_count = reader.read_u8()?;
            let mut next = [NO_TRANSITION; 10];
            let mut used = 0u16;
            for _ in 0..edge_count {
                let mask = reader.read_u16()?;
                let target = reader.read_u16()?;
                if mask == 0 || mask & !ALL_DIGITS_MASK != 0 {
                    return Err(MatcherDataError::InvalidMask { state, mask });
                }
                if mask & used != 0 {
                    return Err(MatcherDataError::OverlappingEdges(state));
                }
                if target as usize >= count {
                    return Err(MatcherDataError::InvalidTarget { state, target });
                }
                used |= mask;
                for (digit, slot) in next.iter_mut().enumerate() {
                    if mask & (1 << digit) != 0 {
                        *slot = target;
                    }
                }
            }
            states.push(State { terminal: flags & TERMINAL_FLAG != 0, next });
        }
        let trailing = bytes.len() - reader.position;
        if trailing != 0 {
            return Err(MatcherDataError::TrailingBytes(trailing));
        }
        Ok(Self { states })
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

impl MatcherApi for DigitSequenceMatcher {
    fn match_digits(&self, sequence: &DigitSequence) -> MatchResult {
        let mut state = &self.states[0];
        // Set once any proper prefix of the input has been accepted.
        let mut prefix_matched = false;
        for &digit in sequence.digits() {
            prefix_matched |= state.terminal;
            match state.next[digit as usize] {
                NO_TRANSITION => {
                    return if prefix_matched {
                        MatchResult::ExcessDigits
                    } else {
                        MatchResult::Invalid
                    };
                }
                target => state = &self.states[target as usize],
            }
        }
        if state.terminal {
            MatchResult::Matched
        } else if state.has_transitions() {
            MatchResult::PartialMatch
        } else if prefix_matched {
            MatchResult::ExcessDigits
        } else {
            MatchResult::Invalid
        }
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl ByteReader<'_> {
    fn read_u8(&mut self) -> Result<u8, MatcherDataError> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or(MatcherDataError::Truncated(self.position))?;
        self.position += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16, MatcherDataError> {
        let low = self.read_u8()?;
        let high = self.read_u8()?;
        Ok(u16::from_le_bytes([low, high]))
    }
}

#[cfg(test)]
mod tests {
    use super::{DigitSequenceMatcher, encode_ranges};
    use crate::{
        digit_sequence::DigitSequence,
        interfaces::MatcherApi,
        matcher::{MatchResult, errors::MatcherDataError},
        range_set::RangeSet,
    };

    fn compile(ranges: &str) -> DigitSequenceMatcher {
        let bytes = encode_ranges(&RangeSet::parse(ranges).unwrap()).unwrap();
        DigitSequenceMatcher::decode(&bytes).unwrap()
    }

    fn check(matcher: &DigitSequenceMatcher, s: &str) -> MatchResult {
        matcher.match_digits(&DigitSequence::parse(s).unwrap())
    }

    #[test]
    fn four_valued_matching() {
        let matcher = compile("20xxxxxxxx, 7[4-9]xxxxxxxx");
        assert_eq!(check(&matcher, "2087438000"), MatchResult::Matched);
        assert_eq!(check(&matcher, "2087438"), MatchResult::PartialMatch);
        assert_eq!(check(&matcher, ""), MatchResult::PartialMatch);
        assert_eq!(check(&matcher, "2087438000000"), MatchResult::ExcessDigits);
        assert_eq!(check(&matcher, "0000"), MatchResult::Invalid);
        assert_eq!(check(&matcher, "7312"), MatchResult::Invalid);
    }

    #[test]
    fn excess_digits_after_shorter_member() {
        // "12" is a member, "123" is only a prefix of "1234".
        let matcher = compile("12, 1234");
        assert_eq!(check(&matcher, "12"), MatchResult::Matched);
        assert_eq!(check(&matcher, "123"), MatchResult::PartialMatch);
        assert_eq!(check(&matcher, "125"), MatchResult::ExcessDigits);
        assert_eq!(check(&matcher, "1235"), MatchResult::ExcessDigits);
        assert_eq!(check(&matcher, "12345"), MatchResult::ExcessDigits);
        assert_eq!(check(&matcher, "13"), MatchResult::Invalid);
    }

    #[test]
    fn agrees_with_range_set_for_all_short_sequences() {
        let ranges = RangeSet::parse("1[2-5], 1[3-9]x, 2, 3xx, [4-6]0[1-3]").unwrap();
        let matcher = DigitSequenceMatcher::decode(&encode_ranges(&ranges).unwrap()).unwrap();
        for n in 0..10_000u32 {
            for width in 1..=4 {
                let s = DigitSequence::parse(&format!("{:0width$}", n % 10u32.pow(width as u32)))
                    .unwrap();
                let expected = if ranges.contains(&s) {
                    MatchResult::Matched
                } else if ranges.matches_prefix(&s) {
                    MatchResult::PartialMatch
                } else if (0..s.len()).any(|k| ranges.contains(&s.first(k))) {
                    MatchResult::ExcessDigits
                } else {
                    MatchResult::Invalid
                };
                assert_eq!(matcher.match_digits(&s), expected, "sequence {}", s);
            }
        }
    }

    #[test]
    fn minimization_shares_suffix_states() {
        // Both branches end in the same "any 8 digits" tail.
        let matcher = compile("20xxxxxxxx, 30xxxxxxxx");
        assert_eq!(matcher.state_count(), 11);
    }

    #[test]
    fn empty_set_matches_nothing() {
        let matcher = compile("");
        assert_eq!(check(&matcher, ""), MatchResult::Invalid);
        assert_eq!(check(&matcher, "1"), MatchResult::Invalid);
    }

    #[test]
    fn rejects_malformed_data() {
        assert_eq!(DigitSequenceMatcher::decode(&[]).unwrap_err(), MatcherDataError::Truncated(0));
        assert_eq!(
            DigitSequenceMatcher::decode(&[2, 1, 0]).unwrap_err(),
            MatcherDataError::UnsupportedFormat(2)
        );
        assert_eq!(DigitSequenceMatcher::decode(&[1, 0, 0]).unwrap_err(), MatcherDataError::NoStates);
        // One state with an edge to a missing state.
        assert_eq!(
            DigitSequenceMatcher::decode(&[1, 1, 0, 0, 1, 0x01, 0, 5, 0]).unwrap_err(),
            MatcherDataError::InvalidTarget { state: 0, target: 5 }
        );
        // Two edges claiming digit 0.
        assert_eq!(
            DigitSequenceMatcher::decode(&[1, 1, 0, 1, 2, 0x01, 0, 0, 0, 0x03, 0, 0, 0]).unwrap_err(),
            MatcherDataError::OverlappingEdges(0)
        );
        assert_eq!(
            DigitSequenceMatcher::decode(&[1, 1, 0, 1, 0, 9]).unwrap_err(),
            MatcherDataError::TrailingBytes(1)
        );
    }
}
