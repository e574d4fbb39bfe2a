//! Boundary with an external move-sequence solver.
//!
//! The solver itself is not part of this crate. It is reached through the
//! [`MoveOracle`] trait, which speaks the common facelet-string format: 54
//! characters in U, R, F, D, L, B face order, each naming the face whose
//! reference color the sticker carries. Answers come back as move notation.

use thiserror::Error;

use crate::cube::{CubeState, Face, Sticker};
use crate::moves::{apply_sequence, format_sequence, invert_sequence, Move};

/// Face order of the facelet string.
pub const FACELET_ORDER: [Face; 6] = [
    Face::Up,
    Face::Right,
    Face::Front,
    Face::Down,
    Face::Left,
    Face::Back,
];

/// A solver that turns a facelet string into a solving move sequence.
///
/// Implementations return whitespace-separated move tokens, or `None` when no
/// solution could be found. The call is synchronous; callers that need a
/// timeout must wrap it themselves.
pub trait MoveOracle {
    fn solve(&self, facelets: &str) -> Option<String>;
}

impl<F> MoveOracle for F
where
    F: Fn(&str) -> Option<String>,
{
    fn solve(&self, facelets: &str) -> Option<String> {
        self(facelets)
    }
}

/// A sticker whose color has no face code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sticker {}{} has no color assigned", .sticker.0, .sticker.1)]
pub struct FaceletError {
    pub sticker: Sticker,
}

/// Encodes a cube as a facelet string.
///
/// Fails on the first placeholder sticker, which has no face code.
pub fn to_facelets(state: &CubeState) -> Result<String, FaceletError> {
    let mut facelets = String::with_capacity(54);
    for face in FACELET_ORDER {
        for (slot, color) in state.face(face).iter().enumerate() {
            let home = color.home_face().ok_or(FaceletError {
                sticker: (face, slot),
            })?;
            facelets.push(home.letter());
        }
    }
    Ok(facelets)
}

/// An oracle that knows how one cube was scrambled and answers with the
/// inverse sequence for exactly that state.
///
/// Stands in for a real solver where the scramble is known, such as demos and
/// tests. Any other state gets no answer.
pub struct ScrambleOracle {
    facelets: String,
    solution: Vec<Move>,
}

impl ScrambleOracle {
    /// Builds an oracle for the state reached by applying `scramble` to a solved cube.
    pub fn new(scramble: &[Move]) -> Self {
        let scrambled = apply_sequence(&CubeState::solved(), scramble);
        Self {
            // a solved start has no placeholders, so this always encodes
            facelets: to_facelets(&scrambled).unwrap_or_default(),
            solution: invert_sequence(scramble),
        }
    }

    /// The state this oracle can solve.
    pub fn scrambled_state(&self) -> CubeState {
        apply_sequence(&CubeState::solved(), &invert_sequence(&self.solution))
    }
}

impl MoveOracle for ScrambleOracle {
    fn solve(&self, facelets: &str) -> Option<String> {
        (facelets == self.facelets).then(|| format_sequence(&self.solution))
    }
}
