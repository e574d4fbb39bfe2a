//! JSON import and export of cube states and solve plans.
//!
//! A cube is an object keyed by face letter, each holding nine color names in
//! row-major order. Unassigned stickers are written as `"neutral"` so partially
//! entered cubes survive a round trip:
//!
//! ```json
//! { "U": ["white", ...], "D": [...], "F": [...], "B": [...], "L": [...], "R": [...] }
//! ```
//!
//! A plan file stores the starting state and the move list as notation strings;
//! frames and stages are rebuilt on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cube::CubeState;
use crate::moves::Move;
use crate::solver::{build_plan_from_moves, PlanError, SolvePlan};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes a cube as pretty-printed JSON.
pub fn to_json(state: &CubeState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parses a cube from JSON.
///
/// Every face must be present with exactly nine known color names.
pub fn from_json(input: &str) -> Result<CubeState, PersistenceError> {
    Ok(serde_json::from_str(input)?)
}

/// Writes a cube to `path` as JSON.
pub fn save_state(path: &Path, state: &CubeState) -> Result<(), PersistenceError> {
    write_file(path, &to_json(state)?)
}

/// Reads a cube from a JSON file.
pub fn load_state(path: &Path) -> Result<CubeState, PersistenceError> {
    from_json(&read_file(path)?)
}

/// A starting state plus the moves to replay from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFile {
    pub state: CubeState,
    pub moves: Vec<Move>,
}

impl PlanFile {
    pub fn from_plan(plan: &SolvePlan) -> Self {
        Self {
            state: plan.frames()[0].state.clone(),
            moves: plan.moves().to_vec(),
        }
    }

    /// Replays the stored moves into a full plan.
    pub fn rebuild(&self) -> Result<SolvePlan, PlanError> {
        build_plan_from_moves(&self.state, &self.moves)
    }
}

pub fn save_plan(path: &Path, plan: &PlanFile) -> Result<(), PersistenceError> {
    write_file(path, &serde_json::to_string_pretty(plan)?)
}

pub fn load_plan(path: &Path) -> Result<PlanFile, PersistenceError> {
    Ok(serde_json::from_str(&read_file(path)?)?)
}

fn write_file(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    fs::write(path, contents).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, PersistenceError> {
    fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
