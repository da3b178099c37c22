// src/merge.rs
//
// Folds one tournament's resolved matches into the persistent stores.
// Replace-by-tournament: existing entries for the same tournament id are
// removed first, so repeated runs are idempotent. All updates are computed
// in memory; the caller writes the full replacement files.

use std::collections::{HashMap, HashSet};

use crate::registry::{MatchRecord, PlayerRecord};

/// Merge `new` into `existing`, replacing everything tagged `tourney_id`.
/// Other tournaments' entries pass through unchanged, in order.
pub fn merge_matches(
    existing: Vec<MatchRecord>,
    new: Vec<MatchRecord>,
    tourney_id: &str,
) -> Vec<MatchRecord> {
    let mut out: Vec<MatchRecord> = existing
        .into_iter()
        .filter(|m| m.tourney_id != tourney_id)
        .collect();
    out.extend(new);
    out
}

/// Fold newly created players into the registry and recompute per-player
/// state from the full merged match store: match counts by id, and the
/// seen-date range widened to cover this tournament for its participants.
pub fn merge_players(
    existing: Vec<PlayerRecord>,
    new_players: Vec<PlayerRecord>,
    merged_matches: &[MatchRecord],
    tourney_id: &str,
    tourney_date: &str,
) -> Vec<PlayerRecord> {
    let mut players = existing;
    players.extend(new_players);

    let mut counts: HashMap<u32, u32> = HashMap::new();
    let mut in_tourney: HashSet<u32> = HashSet::new();
    for m in merged_matches {
        *counts.entry(m.winner_id).or_default() += 1;
        *counts.entry(m.loser_id).or_default() += 1;
        if m.tourney_id == tourney_id {
            in_tourney.insert(m.winner_id);
            in_tourney.insert(m.loser_id);
        }
    }

    for p in &mut players {
        p.match_count = counts.get(&p.id).copied().unwrap_or(0);
        if in_tourney.contains(&p.id) {
            // ISO dates compare lexically.
            if p.first_seen.is_empty() || tourney_date < p.first_seen.as_str() {
                p.first_seen = s!(tourney_date);
            }
            if tourney_date > p.last_seen.as_str() {
                p.last_seen = s!(tourney_date);
            }
        }
    }

    players
}
