// src/runner.rs
//
// End-to-end pipeline: read inputs, extract and enforce, resolve identities,
// merge registries, write full replacement files. Input reads are the only
// concurrent part; everything downstream is single-threaded and local to
// this run.

use std::{error::Error, fs, path::PathBuf, thread};

use crate::{
    bracket::{self, DropStats},
    core::net,
    csv::{self, Delim},
    file::write_atomic,
    identity, merge,
    params::Params,
    registry, store,
};

/// Counters and outputs of one run. Soft drop conditions surface here, not
/// as errors.
#[derive(Debug)]
pub struct RunReport {
    pub tables: usize,
    pub tables_skipped: usize,
    pub candidates: usize,
    pub drops: DropStats,
    pub matches: usize,
    pub new_players: usize,
    pub written: Vec<PathBuf>,
}

pub fn run(params: &Params) -> Result<RunReport, Box<dyn Error>> {
    logf!("run: {} as {} ({})", params.source, params.tourney_id, params.tourney_date);

    // Independent reads with no shared state; fetch them side by side.
    // Everything after this point is strictly sequential.
    let (html_doc, players, existing, countries) = thread::scope(|scope| {
        let html = scope.spawn(|| read_source(&params.source).map_err(|e| e.to_string()));
        let players = scope.spawn(|| {
            store::load_players(&params.players_path()).map_err(|e| e.to_string())
        });
        let matches = scope.spawn(|| {
            store::load_matches(&params.matches_path()).map_err(|e| e.to_string())
        });
        let countries = scope.spawn(|| {
            store::load_countries(&params.countries_path()).map_err(|e| e.to_string())
        });
        (join(html), join(players), join(matches), join(countries))
    });
    let (html_doc, players, existing, countries) = (html_doc?, players?, existing?, countries?);

    let extraction = bracket::parse_doc(&html_doc);
    let resolution = identity::resolve(
        &extraction.matches,
        &players,
        &countries,
        &params.tourney_id,
        &params.tourney_date,
    );

    let mut report = RunReport {
        tables: extraction.tables,
        tables_skipped: extraction.tables_skipped,
        candidates: extraction.candidates,
        drops: extraction.drops,
        matches: resolution.matches.len(),
        new_players: resolution.new_players.len(),
        written: Vec::new(),
    };

    if params.draft {
        // Non-destructive: only the newly discovered matches, to the side.
        let path = params.draft_path();
        let headers = registry::headers(&registry::MATCH_HEADERS);
        let rows: Vec<Vec<String>> = resolution.matches.iter().map(|m| m.to_row()).collect();
        write_atomic(&path, &csv::rows_to_string(Some(&headers), &rows, Delim::Csv))?;
        logf!("draft: {} matches -> {}", rows.len(), path.display());
        report.written.push(path);
        return Ok(report);
    }

    let merged = merge::merge_matches(existing, resolution.matches, &params.tourney_id);
    let players = merge::merge_players(
        players,
        resolution.new_players,
        &merged,
        &params.tourney_id,
        &params.tourney_date,
    );

    let matches_path = params.matches_path();
    let players_path = params.players_path();
    store::save_matches(&matches_path, &merged)?;
    store::save_players(&players_path, &players)?;
    logf!(
        "merged: {} matches, {} players ({} new)",
        merged.len(), players.len(), report.new_players
    );
    report.written.push(matches_path);
    report.written.push(players_path);

    Ok(report)
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T, String>>) -> Result<T, String> {
    handle.join().unwrap_or_else(|_| Err(s!("input reader panicked")))
}

/// Fetch the bracket document. Missing or unreadable sources are fatal and
/// abort the run before anything is written.
fn read_source(source: &str) -> Result<String, Box<dyn Error>> {
    if let Some((host, path)) = net::split_url(source) {
        return net::http_get(host, path);
    }
    fs::read_to_string(source).map_err(|e| format!("read {}: {}", source, e).into())
}
