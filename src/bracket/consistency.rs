// src/bracket/consistency.rs
//
// Post-processes the raw candidate set into a bracket-shaped match list:
// pair dedup keeping the deepest round, score re-validation, top-down
// winner-set filtering, and per-round caps.

use std::collections::{BTreeMap, HashSet};

use crate::core::sanitize::normalize_name;

use super::extract::CandidateMatch;
use super::score;

/// Counters for silently dropped candidates; reported, never thrown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropStats {
    pub duplicates: usize,
    pub bad_scores: usize,
    pub inconsistent: usize,
    pub over_cap: usize,
}

impl DropStats {
    pub fn total(&self) -> usize {
        self.duplicates + self.bad_scores + self.inconsistent + self.over_cap
    }
}

/// Enforce bracket consistency over the full candidate set of one document.
/// Returns surviving matches ordered shallow round first, encounter order
/// within a round, plus drop counters.
pub fn enforce(candidates: Vec<CandidateMatch>) -> (Vec<CandidateMatch>, DropStats) {
    let mut stats = DropStats::default();

    // Dedup by unordered normalized pair; the deeper round wins.
    let mut kept: Vec<CandidateMatch> = Vec::new();
    let mut by_pair: BTreeMap<(String, String), usize> = BTreeMap::new();
    for cand in candidates {
        if !score::valid_score(&cand.score) {
            stats.bad_scores += 1;
            continue;
        }
        let key = pair_key(&cand);
        match by_pair.get(&key) {
            Some(&at) => {
                stats.duplicates += 1;
                if cand.round > kept[at].round {
                    kept[at] = cand;
                }
            }
            None => {
                by_pair.insert(key, kept.len());
                kept.push(cand);
            }
        }
    }

    // Bucket per round, preserving encounter order.
    let mut rounds: BTreeMap<_, Vec<CandidateMatch>> = BTreeMap::new();
    for cand in kept {
        rounds.entry(cand.round).or_default().push(cand);
    }

    // Walk rounds top-down. The shallowest populated round is taken as-is;
    // each later one must be played entirely by the previous round's winners.
    let mut out: Vec<CandidateMatch> = Vec::new();
    let mut prev_winners: Option<HashSet<String>> = None;

    for (round, cands) in rounds {
        let mut survivors: Vec<CandidateMatch> = Vec::new();
        let mut seen_players: HashSet<String> = HashSet::new();

        for cand in cands {
            if let Some(pw) = &prev_winners {
                let w = normalize_name(&cand.winner);
                let l = normalize_name(&cand.loser);
                if !pw.contains(&w) || !pw.contains(&l) {
                    stats.inconsistent += 1;
                    continue;
                }
            }

            // Cap by greedy first-encounter selection, one match per player.
            if survivors.len() == round.cap() {
                stats.over_cap += 1;
                continue;
            }
            let w = normalize_name(&cand.winner);
            let l = normalize_name(&cand.loser);
            if seen_players.contains(&w) || seen_players.contains(&l) {
                stats.over_cap += 1;
                continue;
            }
            seen_players.insert(w);
            seen_players.insert(l);
            survivors.push(cand);
        }

        if !survivors.is_empty() {
            prev_winners = Some(
                survivors
                    .iter()
                    .map(|m| normalize_name(&m.winner))
                    .collect(),
            );
            out.extend(survivors);
        }
    }

    (out, stats)
}

fn pair_key(cand: &CandidateMatch) -> (String, String) {
    let a = normalize_name(&cand.winner);
    let b = normalize_name(&cand.loser);
    if a <= b { (a, b) } else { (b, a) }
}
