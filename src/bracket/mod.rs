// src/bracket/mod.rs
//! Bracket-table extraction pipeline.
//!
//! One HTML document holds several bracket tables (section draws plus a
//! finals overview). Each table is reconstructed into a dense grid, its
//! header row is read into a column→round mapping, and opponent pairings
//! are extracted wherever a legal score aligns. The per-document candidate
//! set then passes through the consistency enforcer.
//!
//! Stages consume only the previous stage's output:
//! grid → round groups → candidates → consistent matches.

pub mod consistency;
pub mod extract;
pub mod grid;
pub mod rounds;
pub mod score;

use crate::core::html::next_tag_block_ci;

pub use consistency::DropStats;
pub use extract::CandidateMatch;
pub use rounds::Round;

/// Extraction outcome for one document, before identity resolution.
pub struct Extraction {
    pub matches: Vec<CandidateMatch>,
    pub tables: usize,
    pub tables_skipped: usize,
    pub candidates: usize,
    pub drops: DropStats,
}

/// Run grid reconstruction, round labeling, extraction and consistency
/// enforcement over every `<table>` block of a document.
pub fn parse_doc(html_doc: &str) -> Extraction {
    let mut candidates = Vec::new();
    let mut tables = 0usize;
    let mut tables_skipped = 0usize;

    let mut pos = 0usize;
    while let Some((tb_s, tb_e)) = next_tag_block_ci(html_doc, "<table", "</table>", pos) {
        let table = &html_doc[tb_s..tb_e];
        pos = tb_e;
        tables += 1;

        let g = grid::build_grid(table);
        let groups = rounds::detect_groups(&g);
        if groups.is_empty() {
            // No recognizable round header: structurally ambiguous, skip.
            tables_skipped += 1;
            continue;
        }

        candidates.extend(extract::extract(&g, &groups));
    }

    let found = candidates.len();
    let (matches, drops) = consistency::enforce(candidates);

    logd!(
        "parse_doc: {} tables ({} skipped), {} candidates, {} dropped, {} matches",
        tables, tables_skipped, found, drops.total(), matches.len()
    );

    Extraction {
        matches,
        tables,
        tables_skipped,
        candidates: found,
        drops,
    }
}
