//! Corner and edge piece definitions.
//!
//! Each piece slot is defined by the sticker positions it occupies. Corner
//! stickers start with the U or D sticker and run clockwise around the corner;
//! edge stickers start with the U or D sticker, or the F or B sticker for the
//! four middle-layer edges. Those orderings are what orientation is measured
//! against.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::cube::{Color, CubeState, Face, Sticker};
use crate::cube::Face::{Back as B, Down as D, Front as F, Left as L, Right as R, Up as U};

/// A corner slot: a name and its three sticker positions.
pub struct CornerSlot {
    pub name: &'static str,
    pub stickers: [Sticker; 3],
}

/// An edge slot: a name and its two sticker positions.
pub struct EdgeSlot {
    pub name: &'static str,
    pub stickers: [Sticker; 2],
}

/// The eight corner slots.
pub const CORNERS: [CornerSlot; 8] = [
    CornerSlot { name: "URF", stickers: [(U, 8), (R, 0), (F, 2)] },
    CornerSlot { name: "UFL", stickers: [(U, 6), (F, 0), (L, 2)] },
    CornerSlot { name: "ULB", stickers: [(U, 0), (L, 0), (B, 2)] },
    CornerSlot { name: "UBR", stickers: [(U, 2), (B, 0), (R, 2)] },
    CornerSlot { name: "DFR", stickers: [(D, 2), (F, 8), (R, 6)] },
    CornerSlot { name: "DLF", stickers: [(D, 0), (L, 8), (F, 6)] },
    CornerSlot { name: "DBL", stickers: [(D, 6), (B, 8), (L, 6)] },
    CornerSlot { name: "DRB", stickers: [(D, 8), (R, 8), (B, 6)] },
];

/// The twelve edge slots.
pub const EDGES: [EdgeSlot; 12] = [
    EdgeSlot { name: "UR", stickers: [(U, 5), (R, 1)] },
    EdgeSlot { name: "UF", stickers: [(U, 7), (F, 1)] },
    EdgeSlot { name: "UL", stickers: [(U, 3), (L, 1)] },
    EdgeSlot { name: "UB", stickers: [(U, 1), (B, 1)] },
    EdgeSlot { name: "DR", stickers: [(D, 5), (R, 7)] },
    EdgeSlot { name: "DF", stickers: [(D, 1), (F, 7)] },
    EdgeSlot { name: "DL", stickers: [(D, 3), (L, 7)] },
    EdgeSlot { name: "DB", stickers: [(D, 7), (B, 7)] },
    EdgeSlot { name: "FR", stickers: [(F, 5), (R, 3)] },
    EdgeSlot { name: "FL", stickers: [(F, 3), (L, 5)] },
    EdgeSlot { name: "BL", stickers: [(B, 5), (L, 3)] },
    EdgeSlot { name: "BR", stickers: [(B, 3), (R, 5)] },
];

/// Canonical piece identities, derived from the solved cube.
///
/// A piece is identified by the sorted set of its colors, which does not change
/// when the piece moves or twists. Each entry also keeps the colors in slot order
/// as they appear on a solved cube, for orientation checks.
pub struct PieceTable {
    corner_ids: FxHashMap<[Color; 3], usize>,
    edge_ids: FxHashMap<[Color; 2], usize>,
    corner_colors: [[Color; 3]; 8],
    edge_colors: [[Color; 2]; 12],
}

static PIECE_TABLE: LazyLock<PieceTable> = LazyLock::new(PieceTable::build);

impl PieceTable {
    /// The shared table, built on first use.
    pub fn get() -> &'static PieceTable {
        &PIECE_TABLE
    }

    fn build() -> Self {
        let solved = CubeState::solved();
        let corner_colors = CORNERS.map(|slot| read_corner(&solved, &slot));
        let edge_colors = EDGES.map(|slot| read_edge(&solved, &slot));

        let corner_ids = corner_colors
            .iter()
            .enumerate()
            .map(|(id, colors)| (sorted(*colors), id))
            .collect();
        let edge_ids = edge_colors
            .iter()
            .enumerate()
            .map(|(id, colors)| (sorted(*colors), id))
            .collect();

        Self {
            corner_ids,
            edge_ids,
            corner_colors,
            edge_colors,
        }
    }

    /// Looks up the corner whose color set matches, in any order.
    pub fn corner_id(&self, colors: [Color; 3]) -> Option<usize> {
        self.corner_ids.get(&sorted(colors)).copied()
    }

    /// Looks up the edge whose color set matches, in any order.
    pub fn edge_id(&self, colors: [Color; 2]) -> Option<usize> {
        self.edge_ids.get(&sorted(colors)).copied()
    }

    /// Colors of a corner piece in slot order on a solved cube.
    pub fn corner_colors(&self, id: usize) -> [Color; 3] {
        self.corner_colors[id]
    }

    /// Colors of an edge piece in slot order on a solved cube.
    pub fn edge_colors(&self, id: usize) -> [Color; 2] {
        self.edge_colors[id]
    }
}

/// Reads the three colors currently in a corner slot, in slot order.
pub fn read_corner(state: &CubeState, slot: &CornerSlot) -> [Color; 3] {
    slot.stickers.map(|sticker| state.sticker(sticker))
}

/// Reads the two colors currently in an edge slot, in slot order.
pub fn read_edge(state: &CubeState, slot: &EdgeSlot) -> [Color; 2] {
    slot.stickers.map(|sticker| state.sticker(sticker))
}

fn sorted<const N: usize>(mut colors: [Color; N]) -> [Color; N] {
    colors.sort_unstable();
    colors
}
