//! Solve plans: replaying a solving sequence and splitting it into stages.
//!
//! A plan replays the moves one at a time from the starting state, keeping every
//! intermediate state as a frame. The frames are then scanned against a fixed
//! list of sub-assembly checks, each stronger than the last:
//!
//! - cross: the four U edges are home and oriented
//! - first layer: cross, plus the four U corners
//! - second layer: first layer, plus the four middle edges
//! - last-layer orientation: second layer, plus the whole D face
//! - solved
//!
//! Each stage covers the moves between one check first holding and the next
//! check first holding. A whole-sequence stage is always appended.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cube::{CubeState, Face};
use crate::moves::{apply_move, format_sequence, parse_sequence, Move, ParseMoveError};
use crate::oracle::{to_facelets, FaceletError, MoveOracle};
use crate::pieces::{CORNERS, EDGES};
use crate::validation::{validate, ValidationIssue};

/// Identifier of a solve stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageId {
    Cross,
    FirstLayer,
    SecondLayer,
    LastLayerOrientation,
    LastLayerPermutation,
    FullSolve,
}

impl StageId {
    pub const fn label(self) -> &'static str {
        match self {
            StageId::Cross => "Cross",
            StageId::FirstLayer => "First layer",
            StageId::SecondLayer => "Second layer",
            StageId::LastLayerOrientation => "Last layer orientation",
            StageId::LastLayerPermutation => "Last layer permutation",
            StageId::FullSolve => "Full solve",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            StageId::Cross => "Place and orient the four U-layer edges.",
            StageId::FirstLayer => "Insert the four U-layer corners to finish the first layer.",
            StageId::SecondLayer => "Insert the four middle-layer edges.",
            StageId::LastLayerOrientation => "Orient the last layer so the D face is one color.",
            StageId::LastLayerPermutation => "Permute the last-layer pieces into place.",
            StageId::FullSolve => "The complete solving sequence.",
        }
    }
}

/// Sub-assembly checks in the order they are reached, paired with the stage
/// that completes each one.
const STAGE_CHECKS: [(StageId, fn(&CubeState) -> bool); 5] = [
    (StageId::Cross, is_cross_solved),
    (StageId::FirstLayer, is_first_layer_solved),
    (StageId::SecondLayer, is_second_layer_solved),
    (StageId::LastLayerOrientation, is_last_layer_oriented),
    (StageId::LastLayerPermutation, CubeState::is_solved),
];

/// U edges are the first four edge slots, U corners the first four corner slots.
const U_LAYER_SLOTS: usize = 4;

/// Middle-layer edges are the last four edge slots.
const MIDDLE_EDGES: std::ops::Range<usize> = 8..12;

/// True if each U edge shows the U color on top and its side color matches the
/// side face's center.
pub fn is_cross_solved(state: &CubeState) -> bool {
    let up = Face::Up.reference_color();
    state.center(Face::Up) == up
        && EDGES[..U_LAYER_SLOTS].iter().all(|slot| {
            let [top, side] = slot.stickers;
            state.sticker(top) == up && state.sticker(side) == state.center(side.0)
        })
}

/// True if the cross holds and each U corner is home and oriented.
pub fn is_first_layer_solved(state: &CubeState) -> bool {
    let up = Face::Up.reference_color();
    is_cross_solved(state)
        && CORNERS[..U_LAYER_SLOTS].iter().all(|slot| {
            let [top, first, second] = slot.stickers;
            state.sticker(top) == up
                && state.sticker(first) == state.center(first.0)
                && state.sticker(second) == state.center(second.0)
        })
}

/// True if the first layer holds and every middle edge is home and oriented.
pub fn is_second_layer_solved(state: &CubeState) -> bool {
    let up_down = [
        Face::Up.reference_color(),
        Face::Down.reference_color(),
    ];
    is_first_layer_solved(state)
        && EDGES[MIDDLE_EDGES].iter().all(|slot| {
            slot.stickers.iter().all(|&sticker| {
                let color = state.sticker(sticker);
                !up_down.contains(&color) && color == state.center(sticker.0)
            })
        })
}

/// True if the second layer holds and the D face is a single color.
pub fn is_last_layer_oriented(state: &CubeState) -> bool {
    let down = state.center(Face::Down);
    is_second_layer_solved(state)
        && state
            .face(Face::Down)
            .iter()
            .all(|&color| color == down)
}

/// Why a plan could not be built.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("cube state is not valid ({} issues)", .0.len())]
    Invalid(Vec<ValidationIssue>),
    #[error(transparent)]
    Facelets(#[from] FaceletError),
    #[error("could not compute a solving sequence")]
    NoSolution,
    #[error("solver returned unreadable output: {0}")]
    MalformedOracleOutput(#[from] ParseMoveError),
    #[error("solver sequence does not solve the cube")]
    NotSolved,
}

/// One step of a replayed sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveFrame {
    pub index: usize,
    /// The move that produced this frame; `None` for the starting frame.
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    pub state: CubeState,
}

/// A contiguous range of moves that completes one stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStage {
    pub id: StageId,
    pub label: String,
    pub description: String,
    /// Index of the first move in the stage.
    pub start: usize,
    /// Index of the last move in the stage (inclusive).
    pub end: usize,
    pub move_count: usize,
    pub preview: Vec<Move>,
}

impl SolveStage {
    /// Builds the stage covering the moves that lead from frame `start` to
    /// frame `stop`.
    fn new(id: StageId, start: usize, stop: usize, frames: &[SolveFrame]) -> Self {
        let preview = frames
            .get(start + 1..=stop)
            .unwrap_or_default()
            .iter()
            .filter_map(|frame| frame.mv)
            .collect();
        Self {
            id,
            label: id.label().to_string(),
            description: id.description().to_string(),
            start,
            end: stop.saturating_sub(1).max(start),
            move_count: stop - start,
            preview,
        }
    }
}

/// A replayed solving sequence with its stage breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolvePlan {
    stages: Vec<SolveStage>,
    moves: Vec<Move>,
    frames: Vec<SolveFrame>,
}

impl SolvePlan {
    pub fn stages(&self) -> &[SolveStage] {
        &self.stages
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn frames(&self) -> &[SolveFrame] {
        &self.frames
    }

    pub fn stage(&self, id: StageId) -> Option<&SolveStage> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    /// The whole-sequence stage. Every plan has one.
    pub fn full_solve(&self) -> Option<&SolveStage> {
        self.stage(StageId::FullSolve)
    }

    /// The state after the last move.
    pub fn final_state(&self) -> &CubeState {
        // frame 0 always exists
        &self.frames[self.frames.len() - 1].state
    }

    /// One line per stage: label, inclusive move range, move count, moves.
    pub fn summary(&self) -> String {
        let mut output = String::new();
        for stage in &self.stages {
            output.push_str(&format!(
                "{}: {}..={} ({})",
                stage.label, stage.start, stage.end, stage.move_count
            ));
            if !stage.preview.is_empty() {
                output.push(' ');
                output.push_str(&format_sequence(&stage.preview));
            }
            output.push('\n');
        }
        output.truncate(output.trim_end().len());
        output
    }
}

/// Asks `oracle` for a solving sequence and builds a plan from it.
///
/// The state is validated first; an invalid state never reaches the oracle.
pub fn build_plan<O>(state: &CubeState, oracle: &O) -> Result<SolvePlan, PlanError>
where
    O: MoveOracle + ?Sized,
{
    ensure_valid(state)?;

    let facelets = to_facelets(state)?;
    let Some(output) = oracle.solve(&facelets) else {
        warn!(%facelets, "solver returned no result");
        return Err(PlanError::NoSolution);
    };

    let moves = parse_sequence(&output)?;
    if moves.is_empty() && !state.is_solved() {
        warn!(%facelets, "solver returned an empty sequence for an unsolved cube");
        return Err(PlanError::NoSolution);
    }

    let plan = replay(state, moves);
    if !plan.final_state().is_solved() {
        return Err(PlanError::NotSolved);
    }
    Ok(plan)
}

/// Builds a plan from an already known move list, such as one restored from disk.
///
/// The moves are not required to solve the cube; stages stop at the last check
/// the sequence reaches.
pub fn build_plan_from_moves(state: &CubeState, moves: &[Move]) -> Result<SolvePlan, PlanError> {
    ensure_valid(state)?;
    Ok(replay(state, moves.to_vec()))
}

fn ensure_valid(state: &CubeState) -> Result<(), PlanError> {
    let issues = validate(state);
    if issues.is_empty() {
        Ok(())
    } else {
        debug!(count = issues.len(), "refusing to plan an invalid cube");
        Err(PlanError::Invalid(issues))
    }
}

fn replay(state: &CubeState, moves: Vec<Move>) -> SolvePlan {
    let frames = build_frames(state, &moves);
    let stages = segment_stages(&frames);
    debug!(moves = moves.len(), stages = stages.len(), "built solve plan");
    SolvePlan {
        stages,
        moves,
        frames,
    }
}

/// Replays `moves` from `initial`, producing `moves.len() + 1` frames.
pub fn build_frames(initial: &CubeState, moves: &[Move]) -> Vec<SolveFrame> {
    let mut frames = Vec::with_capacity(moves.len() + 1);
    frames.push(SolveFrame {
        index: 0,
        mv: None,
        state: initial.clone(),
    });

    let mut current = initial.clone();
    for (i, &mv) in moves.iter().enumerate() {
        current = apply_move(&current, mv);
        frames.push(SolveFrame {
            index: i + 1,
            mv: Some(mv),
            state: current.clone(),
        });
    }

    frames
}

/// Splits a replayed sequence into stages.
///
/// Each check is searched from the frame where the previous one first held.
/// Stages with no moves are left out. The full-solve stage is always last.
/// Stage moves are read from the frames themselves.
pub fn segment_stages(frames: &[SolveFrame]) -> Vec<SolveStage> {
    let mut stages = Vec::new();
    let mut start = 0;

    for (id, check) in STAGE_CHECKS {
        let Some(reached) = (start..frames.len()).find(|&i| check(&frames[i].state)) else {
            debug!(stage = id.label(), "sequence never completes stage");
            break;
        };
        if reached > start {
            stages.push(SolveStage::new(id, start, reached, frames));
        }
        start = reached;
    }

    let last = frames.len().saturating_sub(1);
    stages.push(SolveStage::new(StageId::FullSolve, 0, last, frames));
    stages
}
