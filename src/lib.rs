//! Rubik's Cube State Library
//!
//! Models a 3x3x3 cube as 54 stickers, applies face turns, checks whether a
//! sticker arrangement is a reachable cube, and splits a solving sequence into
//! the classic layer-by-layer stages.

pub mod cube;
pub mod moves;
pub mod oracle;
pub mod persistence;
pub mod pieces;
pub mod solver;
pub mod validation;

pub use cube::{Color, CubeState, Face, Sticker};
pub use moves::{apply_move, apply_sequence, parse_sequence, Modifier, Move, ParseMoveError};
pub use oracle::{MoveOracle, ScrambleOracle};
pub use solver::{build_plan, build_plan_from_moves, PlanError, SolvePlan, SolveStage, StageId};
pub use validation::{validate, IssueKind, ValidationIssue};
