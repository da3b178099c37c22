// src/identity.rs
//
// Maps extracted display names onto the player registry. The registry
// snapshot is read-only here; unseen names come back as a delta of new
// records for the merger to fold in.

use std::collections::HashMap;

use crate::bracket::CandidateMatch;
use crate::core::sanitize::normalize_name;
use crate::registry::{MatchRecord, PlayerRecord};

/// Outcome of resolving one document's matches against a registry snapshot.
pub struct Resolution {
    pub matches: Vec<MatchRecord>,
    /// Players not present in the snapshot, in order of first sight.
    pub new_players: Vec<PlayerRecord>,
}

/// Resolve every match's two names to player ids. Surrogate ids for unseen
/// players are assigned above the current numeric maximum, keeping them out
/// of the canonical id range.
pub fn resolve(
    matches: &[CandidateMatch],
    players: &[PlayerRecord],
    countries: &HashMap<String, String>,
    tourney_id: &str,
    tourney_date: &str,
) -> Resolution {
    let mut by_norm: HashMap<String, u32> = players
        .iter()
        .map(|p| (p.name_norm.clone(), p.id))
        .collect();
    let mut next_id = players.iter().map(|p| p.id).max().unwrap_or(0) + 1;

    // Reverse lookup: country display name (lowercased) → 3-letter code.
    let code_by_country: HashMap<String, String> = countries
        .iter()
        .map(|(code, name)| (name.to_lowercase(), code.clone()))
        .collect();

    let mut new_players: Vec<PlayerRecord> = Vec::new();
    let mut out = Vec::with_capacity(matches.len());

    for m in matches {
        let (winner_norm, winner_id) = lookup(
            &m.winner, m.winner_country.as_deref(),
            &mut by_norm, &mut next_id, &mut new_players,
            &code_by_country, tourney_date,
        );
        let (loser_norm, loser_id) = lookup(
            &m.loser, m.loser_country.as_deref(),
            &mut by_norm, &mut next_id, &mut new_players,
            &code_by_country, tourney_date,
        );

        out.push(MatchRecord {
            tourney_id: s!(tourney_id),
            round: m.round,
            score: m.score.clone(),
            winner_name: m.winner.clone(),
            winner_name_norm: winner_norm,
            loser_name: m.loser.clone(),
            loser_name_norm: loser_norm,
            winner_id,
            loser_id,
        });
    }

    Resolution { matches: out, new_players }
}

fn lookup(
    display: &str,
    country: Option<&str>,
    by_norm: &mut HashMap<String, u32>,
    next_id: &mut u32,
    new_players: &mut Vec<PlayerRecord>,
    code_by_country: &HashMap<String, String>,
    tourney_date: &str,
) -> (String, u32) {
    let norm = normalize_name(display);
    if let Some(&id) = by_norm.get(&norm) {
        return (norm, id);
    }

    let id = *next_id;
    *next_id += 1;

    let ioc = country
        .and_then(|c| code_by_country.get(&c.to_lowercase()))
        .cloned()
        .unwrap_or_default();

    new_players.push(PlayerRecord {
        id,
        name: s!(display),
        name_norm: norm.clone(),
        ioc,
        first_seen: s!(tourney_date),
        last_seen: s!(tourney_date),
        match_count: 0,
    });
    by_norm.insert(norm.clone(), id);

    (norm, id)
}
