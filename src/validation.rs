//! Reachability checks for a sticker arrangement.
//!
//! A sticker arrangement is a real cube state only if every center carries its
//! face's reference color, the color counts are right, every slot holds a real piece, every piece appears once, and the
//! orientation and permutation invariants of the cube group hold:
//!
//! - corner twist sum is 0 mod 3
//! - edge flip sum is 0 mod 2
//! - corner permutation parity equals edge permutation parity
//!
//! All checks run and every problem is reported; nothing short-circuits.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cube::{Color, CubeState, Face, Sticker, CENTER};
use crate::pieces::{read_corner, read_edge, PieceTable, CORNERS, EDGES};

/// Stickers of each standard color on a real cube.
const STICKERS_PER_COLOR: usize = 9;

/// Category of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    ColorCount,
    DuplicatePiece,
    Orientation,
    Parity,
    Incomplete,
}

impl IssueKind {
    /// Short human-readable label for diagnostics lists.
    pub const fn label(self) -> &'static str {
        match self {
            IssueKind::ColorCount => "Color count",
            IssueKind::DuplicatePiece => "Duplicate piece",
            IssueKind::Orientation => "Orientation",
            IssueKind::Parity => "Parity",
            IssueKind::Incomplete => "Missing stickers",
        }
    }
}

/// One problem found in a cube state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
    /// Sticker positions implicated by the issue; empty for global invariants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stickers: Vec<Sticker>,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: String, stickers: Vec<Sticker>) -> Self {
        Self {
            kind,
            message,
            stickers,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.message)
    }
}

/// Checks whether `state` is a reachable cube configuration.
///
/// Returns an empty list for a valid cube.
pub fn validate(state: &CubeState) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let table = PieceTable::get();

    check_placeholders(state, &mut issues);
    check_centers(state, &mut issues);
    check_color_counts(state, &mut issues);

    let corner_names: Vec<&str> = CORNERS.iter().map(|slot| slot.name).collect();
    let corners = resolve_pieces(
        "corner",
        &corner_names,
        CORNERS
            .iter()
            .map(|slot| (slot.name, slot.stickers.to_vec(), read_corner(state, slot).to_vec())),
        |colors| table.corner_id([colors[0], colors[1], colors[2]]),
        &mut issues,
    );

    let edge_names: Vec<&str> = EDGES.iter().map(|slot| slot.name).collect();
    let edges = resolve_pieces(
        "edge",
        &edge_names,
        EDGES
            .iter()
            .map(|slot| (slot.name, slot.stickers.to_vec(), read_edge(state, slot).to_vec())),
        |colors| table.edge_id([colors[0], colors[1]]),
        &mut issues,
    );

    check_edge_orientation(state, table, &edges.slots, &mut issues);
    check_corner_orientation(state, &corners.slots, &mut issues);

    if let (Some(corner_perm), Some(edge_perm)) = (corners.permutation(), edges.permutation()) {
        if permutation_parity(&corner_perm) != permutation_parity(&edge_perm) {
            issues.push(ValidationIssue::new(
                IssueKind::Parity,
                "corner and edge permutation parities differ; no sequence of turns reaches this state"
                    .to_string(),
                Vec::new(),
            ));
        }
    }

    issues
}

fn check_placeholders(state: &CubeState, issues: &mut Vec<ValidationIssue>) {
    let missing: Vec<Sticker> = state
        .stickers()
        .filter(|&(_, color)| color == Color::Placeholder)
        .map(|(sticker, _)| sticker)
        .collect();

    if !missing.is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::Incomplete,
            format!("{} stickers are not assigned yet", missing.len()),
            missing,
        ));
    }
}

/// Centers never move, so each must carry its face's reference color.
fn check_centers(state: &CubeState, issues: &mut Vec<ValidationIssue>) {
    for face in Face::ALL {
        let center = state.center(face);
        let expected = face.reference_color();
        if center != Color::Placeholder && center != expected {
            issues.push(ValidationIssue::new(
                IssueKind::ColorCount,
                format!("center of face {face} is {center} (expected {expected})"),
                vec![(face, CENTER)],
            ));
        }
    }
}

fn check_color_counts(state: &CubeState, issues: &mut Vec<ValidationIssue>) {
    let mut by_color: FxHashMap<Color, Vec<Sticker>> = FxHashMap::default();
    for (sticker, color) in state.stickers() {
        by_color.entry(color).or_default().push(sticker);
    }

    for color in Color::STANDARD {
        let stickers = by_color.remove(&color).unwrap_or_default();
        if stickers.len() != STICKERS_PER_COLOR {
            issues.push(ValidationIssue::new(
                IssueKind::ColorCount,
                format!(
                    "color {} appears {} times (expected {})",
                    color,
                    stickers.len(),
                    STICKERS_PER_COLOR
                ),
                stickers,
            ));
        }
    }
}

/// Outcome of matching every slot of one piece kind against the canonical table.
struct Resolution {
    /// Canonical piece id per slot; `None` where the slot did not resolve.
    slots: Vec<Option<usize>>,
    /// True if every canonical piece was seen exactly once.
    unique: bool,
}

impl Resolution {
    /// The slot-to-piece permutation, if the pieces form one.
    fn permutation(&self) -> Option<Vec<usize>> {
        if !self.unique {
            return None;
        }
        self.slots.iter().copied().collect()
    }
}

/// Matches each slot's colors to a canonical piece and reports invalid,
/// missing and duplicated pieces.
///
/// Slots holding a placeholder are skipped; they are already reported as
/// incomplete, and missing-piece reports are suppressed while any are present.
fn resolve_pieces<I, F>(
    kind: &str,
    names: &[&str],
    slots: I,
    lookup: F,
    issues: &mut Vec<ValidationIssue>,
) -> Resolution
where
    I: Iterator<Item = (&'static str, Vec<Sticker>, Vec<Color>)>,
    F: Fn(&[Color]) -> Option<usize>,
{
    let mut occurrences = vec![0usize; names.len()];
    let mut ids = Vec::with_capacity(names.len());
    let mut has_placeholder = false;

    for (slot_name, stickers, colors) in slots {
        if colors.contains(&Color::Placeholder) {
            has_placeholder = true;
            ids.push(None);
            continue;
        }

        let id = lookup(&colors);
        ids.push(id);
        match id {
            Some(id) => occurrences[id] += 1,
            None => {
                let names: Vec<&str> = colors.iter().map(|color| color.name()).collect();
                issues.push(ValidationIssue::new(
                    IssueKind::DuplicatePiece,
                    format!(
                        "{kind} in slot {slot_name} has an impossible color combination ({})",
                        names.join(", ")
                    ),
                    stickers,
                ));
            }
        }
    }

    for (id, &seen) in occurrences.iter().enumerate() {
        if seen == 0 && !has_placeholder {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicatePiece,
                format!("{kind} {} is missing", names[id]),
                Vec::new(),
            ));
        } else if seen > 1 {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicatePiece,
                format!("{kind} {} appears {seen} times", names[id]),
                Vec::new(),
            ));
        }
    }

    Resolution {
        slots: ids,
        unique: occurrences.iter().all(|&seen| seen == 1),
    }
}

/// An edge is flipped when its first sticker does not carry the first color
/// of the piece it holds. Unresolved slots are left out of the sum.
fn check_edge_orientation(
    state: &CubeState,
    table: &PieceTable,
    ids: &[Option<usize>],
    issues: &mut Vec<ValidationIssue>,
) {
    let flip_sum: usize = EDGES
        .iter()
        .zip(ids)
        .filter_map(|(slot, id)| {
            let id = (*id)?;
            let colors = read_edge(state, slot);
            Some(usize::from(colors[0] != table.edge_colors(id)[0]))
        })
        .sum();

    if flip_sum % 2 != 0 {
        issues.push(ValidationIssue::new(
            IssueKind::Orientation,
            "impossible edge orientation (odd flip sum)".to_string(),
            Vec::new(),
        ));
    }
}

/// A corner's twist is the index of its U or D colored sticker.
fn check_corner_orientation(
    state: &CubeState,
    ids: &[Option<usize>],
    issues: &mut Vec<ValidationIssue>,
) {
    let up_down = [
        Face::Up.reference_color(),
        Face::Down.reference_color(),
    ];

    let twist_sum: usize = CORNERS
        .iter()
        .zip(ids)
        .filter(|(_, id)| id.is_some())
        .filter_map(|(slot, _)| {
            read_corner(state, slot)
                .iter()
                .position(|color| up_down.contains(color))
        })
        .sum();

    if twist_sum % 3 != 0 {
        issues.push(ValidationIssue::new(
            IssueKind::Orientation,
            "impossible corner orientation (twist sum not a multiple of 3)".to_string(),
            Vec::new(),
        ));
    }
}

/// Parity of a permutation: the sum of (cycle length - 1) over its cycles, mod 2.
pub fn permutation_parity(perm: &[usize]) -> usize {
    let mut visited = vec![false; perm.len()];
    let mut transpositions = 0;

    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        let mut length = 0;
        let mut current = start;
        while !visited[current] {
            visited[current] = true;
            current = perm[current];
            length += 1;
        }
        transpositions += length - 1;
    }

    transpositions % 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{apply_sequence, parse_sequence, Move};

    fn kinds(issues: &[ValidationIssue]) -> Vec<IssueKind> {
        issues.iter().map(|issue| issue.kind).collect()
    }

    fn swap(state: &mut CubeState, a: Sticker, b: Sticker) {
        let first = state.sticker(a);
        state.set_sticker(a, state.sticker(b));
        state.set_sticker(b, first);
    }

    #[test]
    fn test_solved_cube_is_valid() {
        assert!(validate(&CubeState::solved()).is_empty());
    }

    #[test]
    fn test_scrambled_cubes_are_valid() {
        let scrambles = [
            "R U R' U'",
            "F2 D' L B2 U R' F D2 L' B U2 R",
            "L' B' D F R U' L2 D2 B R2 F' U",
        ];
        for scramble in scrambles {
            let moves = parse_sequence(scramble).unwrap();
            let state = apply_sequence(&CubeState::solved(), &moves);
            assert!(validate(&state).is_empty(), "{scramble}: {:?}", validate(&state));
        }

        // every face turn, chained, from every single turn
        let mut state = CubeState::solved();
        for mv in Move::ALL {
            state = apply_sequence(&state, &[mv]);
            assert!(validate(&state).is_empty(), "after {mv}");
        }
    }

    #[test]
    fn test_swapped_corners_fail_parity() {
        let mut state = CubeState::solved();
        let urf = CORNERS[0].stickers;
        let ufl = CORNERS[1].stickers;
        for (a, b) in urf.into_iter().zip(ufl) {
            swap(&mut state, a, b);
        }

        let issues = validate(&state);
        assert_eq!(kinds(&issues), vec![IssueKind::Parity]);
    }

    #[test]
    fn test_flipped_edge_fails_orientation() {
        let mut state = CubeState::solved();
        swap(&mut state, (Face::Up, 7), (Face::Front, 1));

        let issues = validate(&state);
        assert_eq!(kinds(&issues), vec![IssueKind::Orientation]);
        assert!(issues[0].message.contains("edge"));
    }

    #[test]
    fn test_twisted_corner_fails_orientation() {
        let mut state = CubeState::solved();
        let [a, b, c] = CORNERS[4].stickers;
        let colors = [state.sticker(a), state.sticker(b), state.sticker(c)];
        state.set_sticker(a, colors[2]);
        state.set_sticker(b, colors[0]);
        state.set_sticker(c, colors[1]);

        let issues = validate(&state);
        assert_eq!(kinds(&issues), vec![IssueKind::Orientation]);
        assert!(issues[0].message.contains("corner"));
    }

    #[test]
    fn test_placeholder_is_reported_as_incomplete() {
        let mut state = CubeState::solved();
        state.set_sticker((Face::Left, 6), Color::Placeholder);

        let issues = validate(&state);
        let incomplete: Vec<_> = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Incomplete)
            .collect();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].stickers, vec![(Face::Left, 6)]);
        assert!(!issues.iter().any(|issue| issue.kind == IssueKind::Parity));
    }

    #[test]
    fn test_empty_cube_reports_without_piece_noise() {
        let issues = validate(&CubeState::empty());
        assert_eq!(issues[0].kind, IssueKind::Incomplete);
        assert_eq!(issues[0].stickers.len(), 48);
        assert_eq!(
            issues
                .iter()
                .filter(|issue| issue.kind == IssueKind::ColorCount)
                .count(),
            6
        );
        assert_eq!(issues.len(), 7);
    }

    #[test]
    fn test_color_count_over_and_under() {
        let mut state = CubeState::solved();
        state.set_sticker((Face::Down, 0), Color::White);

        let issues = validate(&state);
        let counts: Vec<&ValidationIssue> = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::ColorCount)
            .collect();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].message, "color white appears 10 times (expected 9)");
        assert_eq!(counts[1].message, "color yellow appears 8 times (expected 9)");
        assert_eq!(counts[0].stickers.len(), 10);
        assert_eq!(counts[1].stickers.len(), 8);
    }

    #[test]
    fn test_impossible_edges_are_reported() {
        let mut state = CubeState::solved();
        swap(&mut state, (Face::Up, 7), (Face::Front, 7));

        let issues = validate(&state);
        assert!(issues
            .iter()
            .all(|issue| issue.kind == IssueKind::DuplicatePiece));
        let messages: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "edge in slot UF has an impossible color combination (green, green)",
                "edge in slot DF has an impossible color combination (yellow, white)",
                "edge UF is missing",
                "edge DF is missing",
            ]
        );
        assert_eq!(issues[0].stickers, vec![(Face::Up, 7), (Face::Front, 1)]);
    }

    #[test]
    fn test_duplicated_edge_is_reported() {
        let mut state = CubeState::solved();
        // UF now carries white/red, a second copy of UR
        state.set_sticker((Face::Front, 1), Color::Red);

        let issues = validate(&state);
        let pieces: Vec<&str> = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::DuplicatePiece)
            .map(|issue| issue.message.as_str())
            .collect();
        assert_eq!(pieces, vec!["edge UR appears 2 times", "edge UF is missing"]);
        assert!(!issues.iter().any(|issue| issue.kind == IssueKind::Parity));
    }

    #[test]
    fn test_flip_is_checked_alongside_impossible_edge() {
        let mut state = CubeState::solved();
        swap(&mut state, (Face::Up, 7), (Face::Front, 1));
        // DB becomes blue/blue and BL holds a second DL
        swap(&mut state, (Face::Down, 7), (Face::Back, 5));

        let issues = validate(&state);
        let messages: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "edge in slot DB has an impossible color combination (blue, blue)",
                "edge DL appears 2 times",
                "edge DB is missing",
                "edge BL is missing",
                "impossible edge orientation (odd flip sum)",
            ]
        );
        assert!(!issues.iter().any(|issue| issue.kind == IssueKind::Parity));
    }

    #[test]
    fn test_twist_is_checked_alongside_impossible_corner() {
        let mut state = CubeState::solved();
        let [a, b, c] = CORNERS[4].stickers;
        let colors = [state.sticker(a), state.sticker(b), state.sticker(c)];
        state.set_sticker(a, colors[2]);
        state.set_sticker(b, colors[0]);
        state.set_sticker(c, colors[1]);
        // ULB becomes white/white/blue
        state.set_sticker((Face::Left, 0), Color::White);

        let issues = validate(&state);
        assert!(issues
            .iter()
            .any(|issue| issue.message
                == "corner in slot ULB has an impossible color combination (white, white, blue)"));
        assert!(issues
            .iter()
            .any(|issue| issue.message.starts_with("impossible corner orientation")));
    }

    #[test]
    fn test_impossible_corners_are_reported() {
        let mut state = CubeState::solved();
        swap(&mut state, (Face::Up, 8), (Face::Front, 8));

        let issues = validate(&state);
        assert!(issues
            .iter()
            .all(|issue| issue.kind == IssueKind::DuplicatePiece));
        let messages: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "corner in slot URF has an impossible color combination (green, red, green)",
                "corner in slot DFR has an impossible color combination (yellow, white, red)",
                "corner URF is missing",
                "corner DFR is missing",
            ]
        );
        assert_eq!(
            issues[0].stickers,
            vec![(Face::Up, 8), (Face::Right, 0), (Face::Front, 2)]
        );
    }

    #[test]
    fn test_duplicated_corner_is_reported() {
        let mut state = CubeState::solved();
        // UFL now carries white/red/green, a second copy of URF
        state.set_sticker((Face::Front, 0), Color::Red);
        state.set_sticker((Face::Left, 2), Color::Green);

        let issues = validate(&state);
        let pieces: Vec<&str> = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::DuplicatePiece)
            .map(|issue| issue.message.as_str())
            .collect();
        assert_eq!(pieces, vec!["corner URF appears 2 times", "corner UFL is missing"]);
        assert!(!issues.iter().any(|issue| issue.kind == IssueKind::Parity));
    }

    #[test]
    fn test_wrong_centers_are_reported() {
        let mut state = CubeState::solved();
        for slot in 0..9 {
            swap(&mut state, (Face::Up, slot), (Face::Down, slot));
        }

        let issues = validate(&state);
        let messages: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "center of face U is yellow (expected white)",
                "center of face D is white (expected yellow)",
            ]
        );
        assert!(issues.iter().all(|issue| issue.kind == IssueKind::ColorCount));
        assert_eq!(issues[0].stickers, vec![(Face::Up, CENTER)]);
    }

    #[test]
    fn test_permutation_parity() {
        assert_eq!(permutation_parity(&[0, 1, 2, 3]), 0);
        assert_eq!(permutation_parity(&[1, 0, 2, 3]), 1);
        assert_eq!(permutation_parity(&[1, 2, 0, 3]), 0);
        assert_eq!(permutation_parity(&[1, 2, 3, 0]), 1);
        assert_eq!(permutation_parity(&[1, 0, 3, 2]), 0);
    }

    #[test]
    fn test_issue_display_uses_label() {
        let mut state = CubeState::solved();
        swap(&mut state, (Face::Up, 7), (Face::Front, 1));
        let issues = validate(&state);
        assert_eq!(
            issues[0].to_string(),
            "[Orientation] impossible edge orientation (odd flip sum)"
        );
    }
}
