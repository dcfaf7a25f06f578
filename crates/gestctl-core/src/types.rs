//! Core value types: finger poses, gesture labels, commands, and bindings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Number of tracked digits on a hand.
pub const DIGIT_COUNT: usize = 5;

// ─────────────────────────────────────────────────────────────
// Digits and finger state
// ─────────────────────────────────────────────────────────────

/// A digit of the hand, in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Digit {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Little finger.
    Pinky,
}

impl Digit {
    /// All digits in detector order.
    pub const ALL: [Self; DIGIT_COUNT] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    /// Position of this digit within a [`FingerState`].
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }
}

/// Which digits are extended on one detected hand, for one frame.
///
/// Serialized as an array of five `0`/`1` integers, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct FingerState([bool; DIGIT_COUNT]);

impl FingerState {
    /// Creates a finger state from explicit flags (thumb first).
    #[must_use]
    pub const fn new(flags: [bool; DIGIT_COUNT]) -> Self {
        Self(flags)
    }

    /// Creates a finger state from the low five bits of `bits`.
    ///
    /// Bit 4 is the thumb and bit 0 is the pinky, so `0b10000` is a lone
    /// thumb. Higher bits are ignored.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self([
            bits & 0b1_0000 != 0,
            bits & 0b0_1000 != 0,
            bits & 0b0_0100 != 0,
            bits & 0b0_0010 != 0,
            bits & 0b0_0001 != 0,
        ])
    }

    /// Packs the flags back into a 5-bit value (see [`Self::from_bits`]).
    #[must_use]
    pub fn to_bits(self) -> u8 {
        self.0
            .iter()
            .fold(0u8, |acc, &up| (acc << 1) | u8::from(up))
    }

    /// Creates a finger state from detector output of `0`/`1` values.
    ///
    /// # Errors
    ///
    /// Returns an error if `flags` does not hold exactly five values or any
    /// value is not `0` or `1`.
    pub fn from_flags(flags: &[u8]) -> Result<Self> {
        if flags.len() != DIGIT_COUNT {
            return Err(CoreError::PatternLength { len: flags.len() });
        }
        let mut state = [false; DIGIT_COUNT];
        for (position, &value) in flags.iter().enumerate() {
            state[position] = match value {
                0 => false,
                1 => true,
                _ => return Err(CoreError::InvalidFlag { position, value }),
            };
        }
        Ok(Self(state))
    }

    /// Returns the raw flags, thumb first.
    #[must_use]
    pub const fn flags(self) -> [bool; DIGIT_COUNT] {
        self.0
    }

    /// Returns true if `digit` is extended.
    #[must_use]
    pub const fn is_up(self, digit: Digit) -> bool {
        self.0[digit.position()]
    }

    /// Number of extended digits.
    #[must_use]
    pub fn count_up(self) -> u8 {
        self.0.iter().map(|&up| u8::from(up)).sum()
    }
}

impl TryFrom<Vec<u8>> for FingerState {
    type Error = CoreError;

    fn try_from(flags: Vec<u8>) -> Result<Self> {
        Self::from_flags(&flags)
    }
}

impl From<FingerState> for Vec<u8> {
    fn from(state: FingerState) -> Self {
        state.0.iter().map(|&up| u8::from(up)).collect()
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &up) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", u8::from(up))?;
        }
        Ok(())
    }
}

impl FromStr for FingerState {
    type Err = CoreError;

    /// Parses `"1,0,0,0,0"`, `"1 0 0 0 0"`, or the compact `"10000"`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let unparsable = || CoreError::Unparsable {
            input: s.to_string(),
        };

        let parse_flag = |part: &str| part.parse::<u8>().map_err(|_| unparsable());

        // Every comma delimits a flag, so empty segments are rejected.
        let flags: Vec<u8> = if trimmed.contains(',') {
            trimmed
                .split(',')
                .map(|part| parse_flag(part.trim()))
                .collect::<Result<_>>()?
        } else if trimmed.contains(char::is_whitespace) {
            trimmed
                .split_whitespace()
                .map(parse_flag)
                .collect::<Result<_>>()?
        } else {
            trimmed
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(unparsable)
                })
                .collect::<Result<_>>()?
        };

        Self::from_flags(&flags)
    }
}

// ─────────────────────────────────────────────────────────────
// Gesture labels
// ─────────────────────────────────────────────────────────────

/// Symbolic name of a recognized hand pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    /// Thumb up, other fingers curled.
    ThumbsUp,
    /// Thumb curled, other fingers extended.
    ThumbsDown,
    /// Every digit curled.
    Fist,
    /// Every digit extended.
    OpenPalm,
    /// Index and middle extended.
    Peace,
    /// No recognized pose, or no hand.
    None,
}

impl GestureLabel {
    /// All labels.
    pub const ALL: [Self; 6] = [
        Self::ThumbsUp,
        Self::ThumbsDown,
        Self::Fist,
        Self::OpenPalm,
        Self::Peace,
        Self::None,
    ];

    /// Returns the snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs_up",
            Self::ThumbsDown => "thumbs_down",
            Self::Fist => "fist",
            Self::OpenPalm => "open_palm",
            Self::Peace => "peace",
            Self::None => "none",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| CoreError::UnknownName {
                kind: "gesture",
                name: s.to_string(),
            })
    }
}

// ─────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────

/// Discrete action signal derived from a stable gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Start the selected instance.
    Start,
    /// Stop the selected instance.
    Stop,
    /// Restart the selected instance.
    Restart,
    /// Refresh the instance list.
    List,
    /// Do nothing.
    None,
}

impl Command {
    /// All commands.
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Stop,
        Self::Restart,
        Self::List,
        Self::None,
    ];

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::List => "list",
            Self::None => "none",
        }
    }

    /// Returns true for every command except [`Command::None`].
    #[must_use]
    pub const fn is_action(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| CoreError::UnknownName {
                kind: "command",
                name: s.to_string(),
            })
    }
}

// ─────────────────────────────────────────────────────────────
// Bindings
// ─────────────────────────────────────────────────────────────

/// Binding from gesture labels to commands.
///
/// A label that is not bound is unmapped and never produces an emission. A
/// label bound to [`Command::None`] still emits, as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandMap(BTreeMap<GestureLabel, Command>);

impl CommandMap {
    /// Creates a map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Binds `label` to `command`, replacing any previous binding.
    #[must_use]
    pub fn with_binding(mut self, label: GestureLabel, command: Command) -> Self {
        self.bind(label, command);
        self
    }

    /// Binds `label` to `command`, replacing any previous binding.
    pub fn bind(&mut self, label: GestureLabel, command: Command) {
        self.0.insert(label, command);
    }

    /// Returns the command bound to `label`, or [`Command::None`].
    #[must_use]
    pub fn command_for(&self, label: GestureLabel) -> Command {
        self.0.get(&label).copied().unwrap_or(Command::None)
    }

    /// Returns the bound command, including an explicit [`Command::None`].
    #[must_use]
    pub fn mapped(&self, label: GestureLabel) -> Option<Command> {
        self.0.get(&label).copied()
    }

    /// Iterates over every label with its effective command.
    pub fn iter(&self) -> impl Iterator<Item = (GestureLabel, Command)> + '_ {
        GestureLabel::ALL
            .into_iter()
            .map(|label| (label, self.command_for(label)))
    }
}

impl Default for CommandMap {
    fn default() -> Self {
        Self::empty()
            .with_binding(GestureLabel::ThumbsUp, Command::Start)
            .with_binding(GestureLabel::ThumbsDown, Command::Stop)
            .with_binding(GestureLabel::Fist, Command::Restart)
            .with_binding(GestureLabel::OpenPalm, Command::List)
            .with_binding(GestureLabel::Peace, Command::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn finger_state_bits_thumb_is_high_bit() {
        let state = FingerState::from_bits(0b1_0000);
        assert!(state.is_up(Digit::Thumb));
        assert!(!state.is_up(Digit::Pinky));
        assert_eq!(state.to_bits(), 0b1_0000);
    }

    #[test]
    fn finger_state_from_bits_ignores_high_bits() {
        assert_eq!(FingerState::from_bits(0b1110_0001), FingerState::from_bits(0b1));
    }

    #[test]
    fn finger_state_bits_cover_all_patterns() {
        for bits in 0u8..32 {
            assert_eq!(FingerState::from_bits(bits).to_bits(), bits);
        }
    }

    #[test]
    fn finger_state_count_up() {
        assert_eq!(FingerState::from_bits(0b0_1100).count_up(), 2);
        assert_eq!(FingerState::from_bits(0b1_1111).count_up(), 5);
        assert_eq!(FingerState::from_bits(0).count_up(), 0);
    }

    #[test]
    fn finger_state_from_flags_rejects_wrong_length() {
        let err = FingerState::from_flags(&[1, 0, 0]).unwrap_err();
        assert_eq!(err, CoreError::PatternLength { len: 3 });
    }

    #[test]
    fn finger_state_from_flags_rejects_non_binary() {
        let err = FingerState::from_flags(&[1, 0, 2, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidFlag {
                position: 2,
                value: 2
            }
        );
    }

    #[test_case("1,0,0,0,0", 0b1_0000 ; "comma separated")]
    #[test_case("0 1 1 0 0", 0b0_1100 ; "space separated")]
    #[test_case("11111", 0b1_1111 ; "compact")]
    #[test_case(" 0, 1, 1, 1, 1 ", 0b0_1111 ; "padded")]
    fn finger_state_parses(input: &str, bits: u8) {
        let state: FingerState = input.parse().unwrap();
        assert_eq!(state.to_bits(), bits);
    }

    #[test_case("" ; "empty")]
    #[test_case("1,0,0" ; "too short")]
    #[test_case("1,0,0,0,0,1" ; "too long")]
    #[test_case("1x000" ; "garbage")]
    #[test_case("1,0,3,0,0" ; "non binary")]
    #[test_case("1,,0,0,0,0" ; "empty segment")]
    #[test_case("1,0,0,0,0," ; "trailing comma")]
    #[test_case(",1,0,0,0,0" ; "leading comma")]
    fn finger_state_parse_rejects(input: &str) {
        assert!(input.parse::<FingerState>().is_err());
    }

    #[test]
    fn finger_state_display() {
        assert_eq!(FingerState::from_bits(0b0_1100).to_string(), "0,1,1,0,0");
    }

    #[test]
    fn finger_state_serializes_as_flag_array() {
        let state = FingerState::from_bits(0b1_0000);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "[1,0,0,0,0]");

        let back: FingerState = serde_json::from_str("[0,1,1,1,1]").unwrap();
        assert_eq!(back.to_bits(), 0b0_1111);

        assert!(serde_json::from_str::<FingerState>("[1,1]").is_err());
    }

    #[test]
    fn gesture_label_names_round_trip() {
        for label in GestureLabel::ALL {
            assert_eq!(label.as_str().parse::<GestureLabel>().unwrap(), label);
        }
        assert!("wave".parse::<GestureLabel>().is_err());
    }

    #[test]
    fn gesture_label_serde_is_snake_case() {
        let json = serde_json::to_string(&GestureLabel::OpenPalm).unwrap();
        assert_eq!(json, "\"open_palm\"");
    }

    #[test]
    fn command_is_action() {
        assert!(Command::Start.is_action());
        assert!(Command::List.is_action());
        assert!(!Command::None.is_action());
    }

    #[test]
    fn command_serde_is_lowercase() {
        let json = serde_json::to_string(&Command::Restart).unwrap();
        assert_eq!(json, "\"restart\"");
        let back: Command = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(back, Command::None);
    }

    #[test_case(GestureLabel::ThumbsUp, Some(Command::Start) ; "thumbs up starts")]
    #[test_case(GestureLabel::ThumbsDown, Some(Command::Stop) ; "thumbs down stops")]
    #[test_case(GestureLabel::Fist, Some(Command::Restart) ; "fist restarts")]
    #[test_case(GestureLabel::OpenPalm, Some(Command::List) ; "open palm lists")]
    #[test_case(GestureLabel::Peace, Some(Command::None) ; "peace is a no-op")]
    #[test_case(GestureLabel::None, None ; "none is unmapped")]
    fn default_bindings(label: GestureLabel, expected: Option<Command>) {
        assert_eq!(CommandMap::default().mapped(label), expected);
    }

    #[test]
    fn command_map_peace_is_bound_to_none() {
        assert_eq!(CommandMap::default().command_for(GestureLabel::Peace), Command::None);
    }

    #[test]
    fn command_map_unbound_differs_from_bound_to_none() {
        let map = CommandMap::empty().with_binding(GestureLabel::Fist, Command::None);
        assert_eq!(map.mapped(GestureLabel::Fist), Some(Command::None));
        assert_eq!(map.mapped(GestureLabel::OpenPalm), None);
        assert_eq!(map.command_for(GestureLabel::OpenPalm), Command::None);
    }

    #[test]
    fn command_map_rebinding_replaces() {
        let map = CommandMap::default().with_binding(GestureLabel::Peace, Command::List);
        assert_eq!(map.mapped(GestureLabel::Peace), Some(Command::List));
    }

    #[test]
    fn command_map_iter_covers_all_labels() {
        let map = CommandMap::empty();
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries.len(), GestureLabel::ALL.len());
        assert!(entries.iter().all(|(_, command)| *command == Command::None));
    }

    #[test]
    fn command_map_serde_uses_label_keys() {
        let map = CommandMap::empty().with_binding(GestureLabel::Fist, Command::Stop);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"fist":"stop"}"#);
    }
}
