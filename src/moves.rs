//! Face-turn moves and their action on a cube state.
//!
//! A quarter turn is two fixed permutations applied together: the turned face's
//! own nine stickers rotate clockwise around the center, and three rings of four
//! stickers on the neighbouring faces cycle one step. Both are plain lookup tables
//! keyed by face; half turns and counter-clockwise turns repeat the quarter turn.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cube::Face::{Back as B, Down as D, Front as F, Left as L, Right as R, Up as U};
use crate::cube::{CubeState, Face, FaceStickers, Sticker, STICKERS_PER_FACE};

/// Clockwise face rotation: slot `i` receives the sticker from `FACE_ROTATION[i]`.
///
/// The center (slot 4) maps to itself.
const FACE_ROTATION: [usize; STICKERS_PER_FACE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// One ring of four stickers; values flow from each entry to the next.
type StickerCycle = [Sticker; 4];

/// Side-sticker cycles for a clockwise quarter turn of each face, indexed by
/// `Face::index` (U, D, F, B, L, R).
const SIDE_CYCLES: [[StickerCycle; 3]; 6] = [
    // U
    [
        [(F, 0), (L, 0), (B, 0), (R, 0)],
        [(F, 1), (L, 1), (B, 1), (R, 1)],
        [(F, 2), (L, 2), (B, 2), (R, 2)],
    ],
    // D
    [
        [(F, 6), (R, 6), (B, 6), (L, 6)],
        [(F, 7), (R, 7), (B, 7), (L, 7)],
        [(F, 8), (R, 8), (B, 8), (L, 8)],
    ],
    // F
    [
        [(U, 6), (R, 0), (D, 2), (L, 8)],
        [(U, 7), (R, 3), (D, 1), (L, 5)],
        [(U, 8), (R, 6), (D, 0), (L, 2)],
    ],
    // B
    [
        [(U, 0), (L, 6), (D, 8), (R, 2)],
        [(U, 1), (L, 3), (D, 7), (R, 5)],
        [(U, 2), (L, 0), (D, 6), (R, 8)],
    ],
    // L
    [
        [(U, 0), (F, 0), (D, 0), (B, 8)],
        [(U, 3), (F, 3), (D, 3), (B, 5)],
        [(U, 6), (F, 6), (D, 6), (B, 2)],
    ],
    // R
    [
        [(U, 2), (B, 6), (D, 2), (F, 2)],
        [(U, 5), (B, 3), (D, 5), (F, 5)],
        [(U, 8), (B, 0), (D, 8), (F, 8)],
    ],
];

/// Turn direction and amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Modifier {
    /// Number of clockwise quarter turns this modifier stands for.
    #[inline]
    pub const fn quarter_turns(self) -> usize {
        match self {
            Modifier::Clockwise => 1,
            Modifier::Half => 2,
            Modifier::CounterClockwise => 3,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Modifier::Clockwise => "",
            Modifier::CounterClockwise => "'",
            Modifier::Half => "2",
        }
    }
}

/// A single face turn, written `R`, `R'` or `R2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub const fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// All 18 face turns.
    pub const ALL: [Move; 18] = {
        let modifiers = [
            Modifier::Clockwise,
            Modifier::CounterClockwise,
            Modifier::Half,
        ];
        let mut moves = [Move::new(Face::Up, Modifier::Clockwise); 18];
        let mut i = 0;
        while i < 18 {
            moves[i] = Move::new(Face::ALL[i / 3], modifiers[i % 3]);
            i += 1;
        }
        moves
    };

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        let modifier = match self.modifier {
            Modifier::Clockwise => Modifier::CounterClockwise,
            Modifier::CounterClockwise => Modifier::Clockwise,
            Modifier::Half => Modifier::Half,
        };
        Self::new(self.face, modifier)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier.suffix())
    }
}

/// A move token that is not valid face-turn notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move token {token:?}")]
pub struct ParseMoveError {
    pub token: String,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMoveError {
            token: token.to_string(),
        };

        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;
        let modifier = match chars.as_str() {
            "" => Modifier::Clockwise,
            "'" => Modifier::CounterClockwise,
            "2" => Modifier::Half,
            _ => return Err(invalid()),
        };
        Ok(Move::new(face, modifier))
    }
}

impl TryFrom<String> for Move {
    type Error = ParseMoveError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

/// Parses a whitespace-separated move sequence such as `R U R' U'`.
///
/// An empty or all-whitespace input is an empty sequence.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, ParseMoveError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Formats moves back into space-separated notation.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the sequence that undoes `moves`.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

#[inline]
fn rotate_face_clockwise(stickers: &mut FaceStickers) {
    let original = *stickers;
    for (slot, &source) in FACE_ROTATION.iter().enumerate() {
        stickers[slot] = original[source];
    }
}

/// Rotates values one step around the cycle: the last value wraps to the first.
#[inline]
fn apply_cycle(state: &mut CubeState, cycle: &StickerCycle) {
    let saved = state.sticker(cycle[cycle.len() - 1]);
    for i in (1..cycle.len()).rev() {
        let previous = state.sticker(cycle[i - 1]);
        state.set_sticker(cycle[i], previous);
    }
    state.set_sticker(cycle[0], saved);
}

/// Applies one move, returning a new state. The input is left untouched.
pub fn apply_move(state: &CubeState, mv: Move) -> CubeState {
    let mut next = state.clone();
    let cycles = &SIDE_CYCLES[mv.face.index()];

    for _ in 0..mv.modifier.quarter_turns() {
        rotate_face_clockwise(next.face_mut(mv.face));
        for cycle in cycles {
            apply_cycle(&mut next, cycle);
        }
    }

    next
}

/// Applies moves left to right.
pub fn apply_sequence(state: &CubeState, moves: &[Move]) -> CubeState {
    moves
        .iter()
        .fold(state.clone(), |current, &mv| apply_move(&current, mv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Color, CENTER};

    fn seq(text: &str) -> Vec<Move> {
        parse_sequence(text).unwrap()
    }

    fn scrambled() -> CubeState {
        apply_sequence(
            &CubeState::solved(),
            &seq("R U2 F' L D B2 R' U' F2 D' L2 B U R2"),
        )
    }

    #[test]
    fn test_face_rotation_fixes_center() {
        assert_eq!(FACE_ROTATION[CENTER], CENTER);
        let mut seen = [false; 9];
        for &source in &FACE_ROTATION {
            assert!(!seen[source], "slot {source} used twice");
            seen[source] = true;
        }
    }

    #[test]
    fn test_side_cycles_never_touch_turned_face() {
        for face in Face::ALL {
            for cycle in &SIDE_CYCLES[face.index()] {
                for &(sticker_face, slot) in cycle {
                    assert_ne!(sticker_face, face);
                    assert_ne!(slot, CENTER);
                }
            }
        }
    }

    #[test]
    fn test_move_then_inverse_is_identity() {
        for start in [CubeState::solved(), scrambled()] {
            for mv in Move::ALL {
                let back = apply_move(&apply_move(&start, mv), mv.inverse());
                assert_eq!(back, start, "{mv} then {} changed the cube", mv.inverse());
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let start = scrambled();
        for face in Face::ALL {
            let mv = Move::new(face, Modifier::Clockwise);
            let after = (0..4).fold(start.clone(), |state, _| apply_move(&state, mv));
            assert_eq!(after, start, "{mv} x4 changed the cube");
        }
    }

    #[test]
    fn test_half_turn_equals_two_quarter_turns() {
        let start = scrambled();
        for face in Face::ALL {
            let half = apply_move(&start, Move::new(face, Modifier::Half));
            let cw = Move::new(face, Modifier::Clockwise);
            let ccw = Move::new(face, Modifier::CounterClockwise);
            assert_eq!(half, apply_move(&apply_move(&start, cw), cw));
            assert_eq!(half, apply_move(&apply_move(&start, ccw), ccw));
        }
    }

    #[test]
    fn test_moves_keep_centers() {
        let state = scrambled();
        for face in Face::ALL {
            assert_eq!(state.center(face), face.reference_color());
        }
    }

    #[test]
    fn test_apply_move_does_not_mutate_input() {
        let start = CubeState::solved();
        let after = apply_move(&start, seq("F")[0]);
        assert!(start.is_solved());
        assert!(!after.is_solved());
    }

    #[test]
    fn test_u_turn_moves_front_row_to_left() {
        let after = apply_move(&CubeState::solved(), seq("U")[0]);
        assert_eq!(after.face(Face::Left)[..3], [Color::Green; 3]);
        assert_eq!(after.face(Face::Front)[..3], [Color::Red; 3]);
        assert_eq!(after.face(Face::Left)[3..], [Color::Orange; 6]);
    }

    #[test]
    fn test_r_turn_moves_front_column_up() {
        let after = apply_move(&CubeState::solved(), seq("R")[0]);
        for slot in [2, 5, 8] {
            assert_eq!(after.sticker((Face::Up, slot)), Color::Green);
            assert_eq!(after.sticker((Face::Back, 8 - slot)), Color::White);
        }
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let sexy = seq("R U R' U'");
        let start = CubeState::solved();
        let mut state = start.clone();
        for round in 1..=6 {
            state = apply_sequence(&state, &sexy);
            assert_eq!(state == start, round == 6, "round {round}");
        }
    }

    #[test]
    fn test_parse_and_format_notation() {
        let moves = seq("  R U'\tF2 \n");
        assert_eq!(
            moves,
            vec![
                Move::new(Face::Right, Modifier::Clockwise),
                Move::new(Face::Up, Modifier::CounterClockwise),
                Move::new(Face::Front, Modifier::Half),
            ]
        );
        assert_eq!(format_sequence(&moves), "R U' F2");
        assert!(parse_sequence("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        for token in ["X", "R3", "r", "R''", "U2'"] {
            let err = token.parse::<Move>().unwrap_err();
            assert_eq!(err.token, token);
        }
        assert!(parse_sequence("R Q").is_err());
    }

    #[test]
    fn test_invert_sequence() {
        let moves = seq("R U R' U'");
        assert_eq!(format_sequence(&invert_sequence(&moves)), "U R U' R'");
        let scrambled = apply_sequence(&CubeState::solved(), &moves);
        assert!(apply_sequence(&scrambled, &invert_sequence(&moves)).is_solved());
    }

    #[test]
    fn test_all_moves_are_distinct() {
        for (i, a) in Move::ALL.iter().enumerate() {
            for b in &Move::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Move::ALL[1].to_string(), "U'");
    }
}
