//! Cube state model.
//!
//! A cube is stored as six faces of nine stickers each. Every face is laid out
//! as a 3x3 grid in row-major order with slot 4 at the center:
//!
//! ```text
//!              U0 U1 U2
//!              U3 U4 U5
//!              U6 U7 U8
//!    L0 L1 L2  F0 F1 F2  R0 R1 R2  B0 B1 B2
//!    L3 L4 L5  F3 F4 F5  R3 R4 R5  B3 B4 B5
//!    L6 L7 L8  F6 F7 F8  R6 R7 R8  B6 B7 B8
//!              D0 D1 D2
//!              D3 D4 D5
//!              D6 D7 D8
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of stickers on one face.
pub const STICKERS_PER_FACE: usize = 9;

/// Slot index of the center sticker on every face.
pub const CENTER: usize = 4;

/// One of the six faces of the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "D")]
    Down,
    #[serde(rename = "F")]
    Front,
    #[serde(rename = "B")]
    Back,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Face {
    /// All faces, in storage order.
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single-letter notation for this face.
    pub const fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// The color this face carries on a solved cube.
    pub const fn reference_color(self) -> Color {
        match self {
            Face::Up => Color::White,
            Face::Down => Color::Yellow,
            Face::Front => Color::Green,
            Face::Back => Color::Blue,
            Face::Left => Color::Orange,
            Face::Right => Color::Red,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A sticker color.
///
/// `Placeholder` marks a sticker that has not been assigned yet while a cube is
/// entered by hand. It never appears on a fully specified cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Orange,
    Red,
    #[serde(rename = "neutral")]
    Placeholder,
}

impl Color {
    /// The six real sticker colors.
    pub const STANDARD: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Orange,
        Color::Red,
    ];

    /// The face whose center carries this color on a solved cube.
    pub fn home_face(self) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| face.reference_color() == self)
    }

    /// One-character display code; `.` for the placeholder.
    pub const fn code(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Placeholder => '.',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Placeholder => "neutral",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sticker position: a face and a slot in `0..9`.
pub type Sticker = (Face, usize);

/// The nine stickers of one face, row-major.
pub type FaceStickers = [Color; STICKERS_PER_FACE];

/// A full cube: 54 stickers, grouped by face.
///
/// `Clone` is a deep copy; no two states ever share sticker storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FaceMap", into = "FaceMap")]
pub struct CubeState {
    faces: [FaceStickers; 6],
}

impl CubeState {
    /// A solved cube: every face filled with its reference color.
    pub fn solved() -> Self {
        Self {
            faces: Face::ALL.map(|face| [face.reference_color(); STICKERS_PER_FACE]),
        }
    }

    /// A cube awaiting manual input: centers set, every other sticker unassigned.
    pub fn empty() -> Self {
        Self {
            faces: Face::ALL.map(|face| {
                let mut stickers = [Color::Placeholder; STICKERS_PER_FACE];
                stickers[CENTER] = face.reference_color();
                stickers
            }),
        }
    }

    #[inline]
    pub fn sticker(&self, (face, slot): Sticker) -> Color {
        self.faces[face.index()][slot]
    }

    #[inline]
    pub fn set_sticker(&mut self, (face, slot): Sticker, color: Color) {
        self.faces[face.index()][slot] = color;
    }

    #[inline]
    pub fn face(&self, face: Face) -> &FaceStickers {
        &self.faces[face.index()]
    }

    #[inline]
    pub(crate) fn face_mut(&mut self, face: Face) -> &mut FaceStickers {
        &mut self.faces[face.index()]
    }

    #[inline]
    pub fn center(&self, face: Face) -> Color {
        self.faces[face.index()][CENTER]
    }

    /// True when every face is filled with its reference color.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let expected = face.reference_color();
            self.face(face).iter().all(|&color| color == expected)
        })
    }

    pub fn has_placeholders(&self) -> bool {
        self.stickers()
            .any(|(_, color)| color == Color::Placeholder)
    }

    /// Iterates over all 54 stickers with their positions, face by face.
    pub fn stickers(&self) -> impl Iterator<Item = (Sticker, Color)> + '_ {
        Face::ALL.into_iter().flat_map(move |face| {
            self.face(face)
                .iter()
                .enumerate()
                .map(move |(slot, &color)| ((face, slot), color))
        })
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

/// One line per face: `U: WWW WWW WWW`.
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in Face::ALL {
            write!(f, "{}:", face)?;
            for row in self.face(face).chunks(3) {
                f.write_str(" ")?;
                for color in row {
                    write!(f, "{}", color.code())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// JSON shape of a cube: an object keyed by face letter.
#[derive(Serialize, Deserialize)]
#[allow(non_snake_case)]
struct FaceMap {
    U: FaceStickers,
    D: FaceStickers,
    F: FaceStickers,
    B: FaceStickers,
    L: FaceStickers,
    R: FaceStickers,
}

impl From<FaceMap> for CubeState {
    fn from(map: FaceMap) -> Self {
        Self {
            faces: [map.U, map.D, map.F, map.B, map.L, map.R],
        }
    }
}

impl From<CubeState> for FaceMap {
    fn from(state: CubeState) -> Self {
        let [u, d, f, b, l, r] = state.faces;
        Self {
            U: u,
            D: d,
            F: f,
            B: b,
            L: l,
            R: r,
        }
    }
}
