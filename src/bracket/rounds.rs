// src/bracket/rounds.rs
//
// Round labels are read once from a table's header row into an explicit
// column→round mapping; extraction never re-derives rounds from ad hoc
// string checks.

use super::grid::Grid;

/// Elimination stages, ordered shallow to deep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Round {
    R128,
    R64,
    R32,
    R16,
    QF,
    SF,
    F,
}

impl Round {
    pub const ALL: [Round; 7] = [
        Round::R128, Round::R64, Round::R32, Round::R16, Round::QF, Round::SF, Round::F,
    ];

    /// Bracket-mandated match count for a 128 draw.
    pub fn cap(self) -> usize {
        match self {
            Round::R128 => 64,
            Round::R64 => 32,
            Round::R32 => 16,
            Round::R16 => 8,
            Round::QF => 4,
            Round::SF => 2,
            Round::F => 1,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Round::R128 => "R128",
            Round::R64 => "R64",
            Round::R32 => "R32",
            Round::R16 => "R16",
            Round::QF => "QF",
            Round::SF => "SF",
            Round::F => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Round> {
        Round::ALL.iter().copied().find(|r| r.code() == code)
    }

    /// Match a header label against the fixed bracket vocabulary.
    /// Case-insensitive, singular/plural tolerant. The quarter/semi checks
    /// must run before the bare "final" check ("semifinals" contains it).
    pub fn from_label(label: &str) -> Option<Round> {
        let lc = crate::core::html::to_lower(label);
        if lc.contains("first round") { return Some(Round::R128); }
        if lc.contains("second round") { return Some(Round::R64); }
        if lc.contains("third round") { return Some(Round::R32); }
        if lc.contains("fourth round") { return Some(Round::R16); }
        if lc.contains("quarterfinal") || lc.contains("quarter-final") { return Some(Round::QF); }
        if lc.contains("semifinal") || lc.contains("semi-final") { return Some(Round::SF); }
        if lc.contains("final") { return Some(Round::F); }
        None
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One labeled header span: columns `from..=to` belong to `round`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundGroup {
    pub round: Round,
    pub from_col: usize,
    pub to_col: usize,
}

/// Which rounds a table is permitted to emit. Section tables repeat the
/// quarterfinal column that the finals-overview table owns; gating by family
/// keeps each match to a single source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundFamily {
    Early,
    Finals,
}

impl RoundFamily {
    /// Finals tables label nothing shallower than the quarterfinals.
    pub fn of(groups: &[RoundGroup]) -> RoundFamily {
        if !groups.is_empty() && groups.iter().all(|g| g.round >= Round::QF) {
            RoundFamily::Finals
        } else {
            RoundFamily::Early
        }
    }

    pub fn permits(self, round: Round) -> bool {
        match self {
            RoundFamily::Early => round <= Round::R16,
            RoundFamily::Finals => round >= Round::QF,
        }
    }
}

/// Scan the grid's rows for the first header row carrying bracket-stage
/// labels; merge adjacent columns with the same label into one group. Only
/// that one row is authoritative. Empty result means the table contributes
/// no matches.
pub fn detect_groups(grid: &Grid) -> Vec<RoundGroup> {
    for row in 0..grid.height() {
        let groups = row_groups(grid, row);
        if !groups.is_empty() {
            return groups;
        }
    }
    Vec::new()
}

fn row_groups(grid: &Grid, row: usize) -> Vec<RoundGroup> {
    let mut groups: Vec<RoundGroup> = Vec::new();
    for col in 0..grid.width() {
        let round = grid
            .cell(row, col)
            .and_then(|c| Round::from_label(&c.text));
        match round {
            Some(r) => match groups.last_mut() {
                Some(last) if last.round == r && last.to_col + 1 == col => last.to_col = col,
                _ => groups.push(RoundGroup { round: r, from_col: col, to_col: col }),
            },
            None => {}
        }
    }
    groups
}

/// Column→round lookup against the detected groups.
pub fn round_for_col(groups: &[RoundGroup], col: usize) -> Option<Round> {
    groups
        .iter()
        .find(|g| g.from_col <= col && col <= g.to_col)
        .map(|g| g.round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::grid::build_grid;

    #[test]
    fn vocabulary_is_tolerant() {
        assert_eq!(Round::from_label("First Round"), Some(Round::R128));
        assert_eq!(Round::from_label("Quarterfinals"), Some(Round::QF));
        assert_eq!(Round::from_label("Semi-finals"), Some(Round::SF));
        assert_eq!(Round::from_label("FINAL"), Some(Round::F));
        assert_eq!(Round::from_label("Semifinals"), Some(Round::SF)); // not F
        assert_eq!(Round::from_label("Seeds"), None);
    }

    #[test]
    fn groups_merge_adjacent_same_label() {
        let table = r#"
            <table>
              <tr><th>First round</th><th>First round</th><th>Second round</th><th>Seed</th></tr>
            </table>
        "#;
        let g = build_grid(table);
        let groups = detect_groups(&g);
        assert_eq!(groups, vec![
            RoundGroup { round: Round::R128, from_col: 0, to_col: 1 },
            RoundGroup { round: Round::R64, from_col: 2, to_col: 2 },
        ]);
        assert_eq!(round_for_col(&groups, 1), Some(Round::R128));
        assert_eq!(round_for_col(&groups, 3), None);
    }

    #[test]
    fn only_first_matching_header_row_counts() {
        let table = r#"
            <table>
              <tr><th>Draw</th></tr>
              <tr><th>Final</th></tr>
              <tr><th>Semifinals</th></tr>
            </table>
        "#;
        let g = build_grid(table);
        let groups = detect_groups(&g);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].round, Round::F);
    }

    #[test]
    fn family_split() {
        let early = vec![
            RoundGroup { round: Round::R128, from_col: 0, to_col: 1 },
            RoundGroup { round: Round::QF, from_col: 2, to_col: 2 },
        ];
        assert_eq!(RoundFamily::of(&early), RoundFamily::Early);
        assert!(RoundFamily::Early.permits(Round::R16));
        assert!(!RoundFamily::Early.permits(Round::QF));

        let finals = vec![
            RoundGroup { round: Round::QF, from_col: 0, to_col: 0 },
            RoundGroup { round: Round::F, from_col: 1, to_col: 1 },
        ];
        assert_eq!(RoundFamily::of(&finals), RoundFamily::Finals);
        assert!(RoundFamily::Finals.permits(Round::F));
        assert!(!RoundFamily::Finals.permits(Round::R32));
    }

    #[test]
    fn round_codes_round_trip() {
        for r in Round::ALL {
            assert_eq!(Round::from_code(r.code()), Some(r));
        }
        assert_eq!(Round::from_code("R512"), None);
    }
}
