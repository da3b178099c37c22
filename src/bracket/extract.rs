// src/bracket/extract.rs
//
// Walks a reconstructed grid and pairs each top-of-block player cell with
// the nearest compatible opponent below it. A pairing is only accepted when
// the rows' trailing cells compose a legal score.

use crate::core::sanitize::{normalize_ws, strip_parens};

use super::grid::{Grid, RawCell};
use super::rounds::{self, Round, RoundFamily, RoundGroup};
use super::score;

/// Bound on the downward opponent scan. Exceeding it makes the slot
/// structurally ambiguous and it is skipped, never a crash.
pub const MAX_OPPONENT_SCAN: usize = 64;

/// An opponent pairing as found in the markup. Not yet globally consistent;
/// the enforcer dedups and validates the full candidate set afterwards.
#[derive(Clone, Debug)]
pub struct CandidateMatch {
    pub round: Round,
    pub score: String,
    pub winner: String,
    pub loser: String,
    pub winner_country: Option<String>,
    pub loser_country: Option<String>,
    pub source_col: usize,
}

/// Extract all candidate pairings from one table's grid, honoring the
/// table's round family.
pub fn extract(grid: &Grid, groups: &[RoundGroup]) -> Vec<CandidateMatch> {
    let family = RoundFamily::of(groups);
    let mut out = Vec::new();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if !grid.is_top(row, col) {
                continue;
            }
            let Some(cell) = grid.cell(row, col) else { continue };
            let Some(name_a) = player_name(cell) else { continue };

            let Some(round) = rounds::round_for_col(groups, col) else { continue };
            if !family.permits(round) {
                continue;
            }

            if let Some(cand) = pair_opponent(grid, row, col, round, cell, &name_a) {
                out.push(cand);
            }
        }
    }

    out
}

fn pair_opponent(
    grid: &Grid,
    row: usize,
    col: usize,
    round: Round,
    cell_a: &RawCell,
    name_a: &str,
) -> Option<CandidateMatch> {
    let limit = (row + MAX_OPPONENT_SCAN).min(grid.height().saturating_sub(1));

    for row_b in row + 1..=limit {
        if !grid.is_top(row_b, col) {
            continue;
        }
        if grid.cell_id(row, col) == grid.cell_id(row_b, col) {
            continue;
        }
        let Some(cell_b) = grid.cell(row_b, col) else { continue };
        let Some(name_b) = player_name(cell_b) else { continue };

        // Not a score alignment? Keep scanning; the real opponent may sit
        // further down past seed/bye filler.
        let Some(score) = score::read_score(grid, row, row_b, col) else {
            continue;
        };

        // Bracket layout guarantees two-opponent adjacency is immediate once
        // a legal score aligns: take it and stop.
        let a_wins = resolve_winner(cell_a.bold, cell_b.bold);
        let (winner, loser, w_cell, l_cell) = if a_wins {
            (name_a.to_string(), name_b, cell_a, cell_b)
        } else {
            (name_b, name_a.to_string(), cell_b, cell_a)
        };
        // The composed score reads winner-first only when the upper row won;
        // flip each set token otherwise.
        let score = if a_wins { score } else { flip_score(&score) };

        return Some(CandidateMatch {
            round,
            score,
            winner,
            loser,
            winner_country: w_cell.flag.clone(),
            loser_country: l_cell.flag.clone(),
            source_col: col,
        });
    }

    None
}

/// Winner policy: the bold side wins. When both or neither side is bold the
/// markup is ambiguous and the first (upper) name is taken.
/// TODO: verify the both-bold case against a real draw page; it may need a
/// seed-based tiebreak instead.
pub fn resolve_winner(bold_a: bool, bold_b: bool) -> bool {
    if bold_a != bold_b { bold_a } else { true }
}

/// Display name of a cell's player link: anchor text as spelled, falling
/// back to the title with its qualifier stripped. Flag-wrapper anchors were
/// already removed at grid build time.
fn player_name(cell: &RawCell) -> Option<String> {
    let a = cell.anchors.first()?;
    let name = if !a.text.is_empty() {
        a.text.clone()
    } else {
        normalize_ws(&strip_parens(&a.title))
    };
    if name.is_empty() { None } else { Some(name) }
}

/// Reverse every set token of a validated score ("6-4 7-5" → "4-6 5-7").
fn flip_score(score: &str) -> String {
    score
        .split_whitespace()
        .map(|tok| {
            let mut halves = tok.splitn(2, '-');
            match (halves.next(), halves.next()) {
                (Some(a), Some(b)) => format!("{b}-{a}"),
                _ => tok.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
