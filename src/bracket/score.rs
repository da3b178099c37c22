// src/bracket/score.rs
//
// Tennis score grammar. This is the sole gate deciding whether two visually
// adjacent rows actually form a completed match; incidental text adjacency
// fails it.

use super::grid::Grid;

/// Best-of-5: a completed score carries between 3 and 5 sets.
pub const MIN_SETS: usize = 3;
pub const MAX_SETS: usize = 5;

/// One set token `A-B`, optionally `A(tb)-B(tb)` with tiebreak points.
/// Legal iff A≠B, max ∈ {6,7}, max=6 → min ∈ 0..=4, max=7 → min ∈ {5,6}.
pub fn valid_set(token: &str) -> bool {
    let mut halves = token.splitn(2, '-');
    let (Some(a), Some(b)) = (halves.next(), halves.next()) else {
        return false;
    };
    let (Some(a), Some(b)) = (games(a), games(b)) else {
        return false;
    };
    if a == b {
        return false;
    }
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    match hi {
        6 => lo <= 4,
        7 => lo == 5 || lo == 6,
        _ => false,
    }
}

/// Game count of one half-token: leading digits, then at most a
/// parenthesized tiebreak suffix.
fn games(half: &str) -> Option<u32> {
    let half = half.trim();
    let digits: String = half.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let rest = &half[digits.len()..];
    if !rest.is_empty() {
        let ok = rest.starts_with('(')
            && rest.ends_with(')')
            && rest[1..rest.len() - 1].chars().all(|c| c.is_ascii_digit())
            && rest.len() > 2;
        if !ok {
            return None;
        }
    }
    digits.parse().ok()
}

/// Full score: 3–5 space-separated legal set tokens.
pub fn valid_score(score: &str) -> bool {
    let tokens: Vec<&str> = score.split_whitespace().collect();
    (MIN_SETS..=MAX_SETS).contains(&tokens.len()) && tokens.iter().all(|t| valid_set(t))
}

/// Compose the score of a candidate pairing from the two rows' trailing
/// cells: column `col+1` onward holds one set per column, the upper row's
/// games first. Returns None unless the composed string passes the grammar.
pub fn read_score(grid: &Grid, row_a: usize, row_b: usize, col: usize) -> Option<String> {
    let mut tokens: Vec<String> = Vec::new();

    for c in col + 1..grid.width() {
        if tokens.len() == MAX_SETS {
            break;
        }
        let (Some(a), Some(b)) = (grid.cell(row_a, c), grid.cell(row_b, c)) else {
            break;
        };
        // A cell spanning both rows is layout filler, not a set column.
        if grid.cell_id(row_a, c) == grid.cell_id(row_b, c) {
            break;
        }
        if a.text.is_empty() || b.text.is_empty() {
            break;
        }
        let token = format!("{}-{}", a.text, b.text);
        if !valid_set(&token) {
            break;
        }
        tokens.push(token);
    }

    if (MIN_SETS..=MAX_SETS).contains(&tokens.len()) {
        Some(tokens.join(" "))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::grid::build_grid;

    #[test]
    fn legal_scores_validate() {
        assert!(valid_score("6-4 6-3 6-2"));
        assert!(valid_score("7-6(10) 3-6 6-2"));
        assert!(valid_score("6-4 3-6 6-2 2-6 7-5"));
        assert!(valid_set("7-6(8)"));
        assert!(valid_set("6(4)-7(7)"));
    }

    #[test]
    fn illegal_sets_reject() {
        assert!(!valid_set("6-6"));
        assert!(!valid_set("8-6"));
        assert!(!valid_set("6-5"));
        assert!(!valid_set("7-4"));
        assert!(!valid_set("6"));
        assert!(!valid_set("6-"));
        assert!(!valid_set("ab-cd"));
        assert!(!valid_set("6()-4"));
    }

    #[test]
    fn illegal_scores_reject() {
        assert!(!valid_score("6-4"));               // single token
        assert!(!valid_score("6-4 6-3"));           // sweep shorter than 3 sets
        assert!(!valid_score("6-4 6-3 6-2 6-1 6-0 6-0")); // longer than 5
        assert!(!valid_score(""));
        assert!(!valid_score("6-4 6-6 6-2"));
    }

    #[test]
    fn read_score_pairs_trailing_cells() {
        let table = r#"
            <table>
              <tr><td>Alice</td><td>6</td><td>7<sup>7</sup></td><td>6</td></tr>
              <tr><td>Bob</td><td>4</td><td>6<sup>5</sup></td><td>2</td></tr>
            </table>
        "#;
        let g = build_grid(table);
        assert_eq!(read_score(&g, 0, 1, 0).as_deref(), Some("6-4 7(7)-6(5) 6-2"));
    }

    #[test]
    fn read_score_rejects_short_runs() {
        let table = r#"
            <table>
              <tr><td>Alice</td><td>6</td><td>6</td></tr>
              <tr><td>Bob</td><td>4</td><td>2</td></tr>
            </table>
        "#;
        let g = build_grid(table);
        assert_eq!(read_score(&g, 0, 1, 0), None);
    }
}
