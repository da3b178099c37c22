// src/store.rs
//
// Reading and writing the persistent registries. Missing registry files
// load as empty (first run); unreadable rows are errors, not skips.

use std::{collections::HashMap, error::Error, fs, path::Path};

use crate::csv::{self, Delim, detect_headers, parse_rows};
use crate::file::write_atomic;
use crate::registry::{self, MatchRecord, PlayerRecord};

pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("read {}: {}", path.display(), e))?;
    let (_, rows) = detect_headers(parse_rows(&text, Delim::Csv));
    rows.iter().map(|r| PlayerRecord::from_row(r)).collect()
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("read {}: {}", path.display(), e))?;
    let (_, rows) = detect_headers(parse_rows(&text, Delim::Csv));
    rows.iter().map(|r| MatchRecord::from_row(r)).collect()
}

/// Country-code lookup: `code,display name` per line, e.g. `SRB,Serbia`.
/// This input is optional; absence just means no country enrichment.
pub fn load_countries(path: &Path) -> Result<HashMap<String, String>, Box<dyn Error>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("read {}: {}", path.display(), e))?;
    let mut out = HashMap::new();
    for row in parse_rows(&text, Delim::Csv) {
        if row.len() >= 2 && row[0].len() == 3 {
            out.insert(row[0].to_uppercase(), row[1].clone());
        }
    }
    Ok(out)
}

pub fn save_players(path: &Path, players: &[PlayerRecord]) -> Result<(), Box<dyn Error>> {
    let headers = registry::headers(&registry::PLAYER_HEADERS);
    let rows: Vec<Vec<String>> = players.iter().map(|p| p.to_row()).collect();
    write_atomic(path, &csv::rows_to_string(Some(&headers), &rows, Delim::Csv))
}

pub fn save_matches(path: &Path, matches: &[MatchRecord]) -> Result<(), Box<dyn Error>> {
    let headers = registry::headers(&registry::MATCH_HEADERS);
    let rows: Vec<Vec<String>> = matches.iter().map(|m| m.to_row()).collect();
    write_atomic(path, &csv::rows_to_string(Some(&headers), &rows, Delim::Csv))
}
