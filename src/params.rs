// src/params.rs
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const PLAYERS_FILE: &str = "players.csv";
pub const MATCHES_FILE: &str = "matches.csv";
pub const COUNTRIES_FILE: &str = "countries.csv";
pub const DRAFT_FILE: &str = "draft_matches.csv";

#[derive(Clone)]
pub struct Params {
    pub source: String,          // bracket document: file path or http:// URL
    pub tourney_id: String,      // e.g. 2024-ao
    pub tourney_date: String,    // ISO date, e.g. 2024-01-14
    pub data_dir: PathBuf,       // registry directory
    pub countries: Option<PathBuf>, // country-code lookup override
    pub draft: bool,             // write side file only, leave registries alone
}

impl Params {
    pub fn new() -> Self {
        Self {
            source: s!(),
            tourney_id: s!(),
            tourney_date: s!(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            countries: None,
            draft: false,
        }
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(PLAYERS_FILE)
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(MATCHES_FILE)
    }

    pub fn countries_path(&self) -> PathBuf {
        self.countries
            .clone()
            .unwrap_or_else(|| self.data_dir.join(COUNTRIES_FILE))
    }

    pub fn draft_path(&self) -> PathBuf {
        self.data_dir.join(DRAFT_FILE)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
