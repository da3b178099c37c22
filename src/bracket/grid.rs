// src/bracket/grid.rs
//
// Rebuilds a dense logical grid from one bracket <table>. Rowspan cells are
// replayed into every row they cover via an explicit carry map; colspan cells
// occupy every column of their span. Addressing by (row, col) is stable no
// matter how sparse the markup is.

use std::collections::HashMap;

use crate::core::html::{
    attr_value, inner_after_open_tag, next_tag_block_ci, opener_lc, span_attr, strip_tags,
    sup_to_parens,
};
use crate::core::sanitize::normalize_entities;

/// A player-link candidate inside a cell.
#[derive(Clone, Debug)]
pub struct Anchor {
    pub text: String,
    pub title: String,
}

/// One source table cell, parsed once. Never mutated after grid construction.
#[derive(Clone, Debug, Default)]
pub struct RawCell {
    /// Tag-stripped, entity-normalized cell text (flag wrappers removed).
    pub text: String,
    /// Anchors outside any flag wrapper, in document order.
    pub anchors: Vec<Anchor>,
    /// Country display name from a nationality flag wrapper, if present.
    pub flag: Option<String>,
    /// Bracket convention: the winner's cell is rendered bold.
    pub bold: bool,
}

#[derive(Clone, Copy)]
struct Slot {
    cell: usize,
    top: bool,
}

struct Carry {
    cell: usize,
    left: usize,
}

/// Dense (row, col) → cell mapping. Built once per table, immutable after.
pub struct Grid {
    pool: Vec<RawCell>,
    rows: Vec<Vec<Option<Slot>>>,
}

impl Grid {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&RawCell> {
        self.slot(row, col).map(|s| &self.pool[s.cell])
    }

    /// Identity of the source cell at (row, col); carried repeats share it.
    pub fn cell_id(&self, row: usize, col: usize) -> Option<usize> {
        self.slot(row, col).map(|s| s.cell)
    }

    /// True only at the topmost, leftmost position of a cell's span.
    pub fn is_top(&self, row: usize, col: usize) -> bool {
        self.slot(row, col).map(|s| s.top).unwrap_or(false)
    }

    fn slot(&self, row: usize, col: usize) -> Option<Slot> {
        self.rows.get(row)?.get(col).copied().flatten()
    }
}

/// Build the dense grid for one `<table>…</table>` block. Pure: all scan
/// state (the carry map) is local to this call.
pub fn build_grid(table_html: &str) -> Grid {
    let mut pool: Vec<RawCell> = Vec::new();
    let mut rows: Vec<Vec<Option<Slot>>> = Vec::new();
    let mut carries: HashMap<usize, Carry> = HashMap::new();

    let mut tr_pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(table_html, "<tr", "</tr>", tr_pos) {
        let tr = &table_html[tr_s..tr_e];
        tr_pos = tr_e;

        let lits = parse_row_cells(tr, &mut pool);
        let mut row: Vec<Option<Slot>> = Vec::new();

        let mut col = 0usize;
        let mut li = 0usize;
        // Malformed tables may declare more carries than they supply cells
        // for; bound the walk so it cannot loop forever.
        let mut budget = lits.len() + carries.len() * 2 + 2;

        while budget > 0 {
            budget -= 1;

            if let Some(carry) = carries.get_mut(&col) {
                place(&mut row, col, Slot { cell: carry.cell, top: false });
                carry.left -= 1;
                if carry.left == 0 {
                    carries.remove(&col);
                }
                col += 1;
                continue;
            }

            if li < lits.len() {
                let (cell, cspan, rspan) = lits[li];
                li += 1;
                for k in 0..cspan {
                    place(&mut row, col + k, Slot { cell, top: k == 0 });
                    if rspan > 1 {
                        carries.insert(col + k, Carry { cell, left: rspan - 1 });
                    }
                }
                col += cspan;
                continue;
            }

            // Literals exhausted; skip ahead to the next pending carry.
            match carries.keys().copied().filter(|&k| k > col).min() {
                Some(next) => col = next,
                None => break,
            }
        }

        rows.push(row);
    }

    Grid { pool, rows }
}

/// Opening tag of a block, original casing (attribute values keep case).
fn opener_raw(block: &str) -> &str {
    let end = block.find('>').map(|i| i + 1).unwrap_or(block.len());
    &block[..end]
}

fn place(row: &mut Vec<Option<Slot>>, col: usize, slot: Slot) {
    if row.len() <= col {
        row.resize(col + 1, None);
    }
    row[col] = Some(slot);
}

/// Literal `<td>`/`<th>` cells of one row, in document order, with spans.
fn parse_row_cells(tr: &str, pool: &mut Vec<RawCell>) -> Vec<(usize, usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    loop {
        let td = next_tag_block_ci(tr, "<td", "</td>", pos);
        let th = next_tag_block_ci(tr, "<th", "</th>", pos);
        let (b_s, b_e) = match (td, th) {
            (Some(a), Some(b)) => if a.0 < b.0 { a } else { b },
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        pos = b_e;

        let block = &tr[b_s..b_e];
        let opener = opener_lc(block);
        let cspan = span_attr(&opener, "colspan");
        let rspan = span_attr(&opener, "rowspan");

        let cell = parse_cell(block);
        pool.push(cell);
        out.push((pool.len() - 1, cspan, rspan));
    }

    out
}

fn parse_cell(block: &str) -> RawCell {
    let inner = inner_after_open_tag(block);
    let inner = normalize_entities(&inner);
    let inner = sup_to_parens(&inner);
    let (inner, flag) = split_flag(&inner);

    let lc = crate::core::html::to_lower(&inner);
    let bold = lc.contains("<b>") || lc.contains("<b ") || lc.contains("<strong");

    let mut anchors = Vec::new();
    let mut a_pos = 0usize;
    while let Some((a_s, a_e)) = next_tag_block_ci(&inner, "<a", "</a>", a_pos) {
        let a_block = &inner[a_s..a_e];
        a_pos = a_e;

        let text = strip_tags(inner_after_open_tag(a_block));
        let title = attr_value(opener_raw(a_block), "title").unwrap_or_default();
        if !text.is_empty() || !title.is_empty() {
            anchors.push(Anchor { text, title });
        }
    }

    RawCell {
        text: strip_tags(&inner),
        anchors,
        flag,
        bold,
    }
}

/// Cut `<span class="flagicon">…</span>` wrappers out of a cell and recover
/// the country display name from the wrapped link title or image alt.
fn split_flag(inner: &str) -> (String, Option<String>) {
    let mut out = String::with_capacity(inner.len());
    let mut flag: Option<String> = None;
    let mut pos = 0usize;

    while let Some((b_s, b_e)) = next_tag_block_ci(inner, "<span", "</span>", pos) {
        let block = &inner[b_s..b_e];
        if !opener_lc(block).contains("flagicon") {
            // Unrelated span; keep it and continue past its opening tag so
            // nested flag spans inside are still found.
            let step = inner[b_s..].find('>').map(|i| b_s + i + 1).unwrap_or(b_e);
            out.push_str(&inner[pos..step]);
            pos = step;
            continue;
        }

        out.push_str(&inner[pos..b_s]);
        if flag.is_none() {
            flag = flag_name(block);
        }
        pos = b_e;
    }
    out.push_str(&inner[pos..]);

    (out, flag)
}

fn flag_name(flag_block: &str) -> Option<String> {
    if let Some((a_s, a_e)) = next_tag_block_ci(flag_block, "<a", "</a>", 0) {
        if let Some(title) = attr_value(opener_raw(&flag_block[a_s..a_e]), "title") {
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    // Self-closing <img> never matches a tag-block scan; search the raw text.
    let lc = crate::core::html::to_lower(flag_block);
    let img = lc.find("<img")?;
    let end = flag_block[img..].find('>').map(|i| img + i + 1)?;
    attr_value(&flag_block[img..end], "alt").filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rowspan_is_carried_into_following_rows() {
        let table = r#"
            <table>
              <tr><td rowspan="2">Alice</td><td>6</td></tr>
              <tr><td>4</td></tr>
            </table>
        "#;
        let g = build_grid(table);
        assert_eq!(g.cell(0, 0).unwrap().text, "Alice");
        assert_eq!(g.cell(1, 0).unwrap().text, "Alice");
        assert_eq!(g.cell_id(0, 0), g.cell_id(1, 0));
        assert!(g.is_top(0, 0));
        assert!(!g.is_top(1, 0));
        // Literal cell of row 1 lands in the column after the carry.
        assert_eq!(g.cell(1, 1).unwrap().text, "4");
    }

    #[test]
    fn colspan_occupies_every_column() {
        let table = r#"<table><tr><td colspan="3">Final</td><td>x</td></tr></table>"#;
        let g = build_grid(table);
        for col in 0..3 {
            assert_eq!(g.cell(0, col).unwrap().text, "Final");
        }
        assert!(g.is_top(0, 0));
        assert!(!g.is_top(0, 1));
        assert_eq!(g.cell(0, 3).unwrap().text, "x");
    }

    #[test]
    fn no_gaps_inside_spanned_region() {
        let table = r#"
            <table>
              <tr><td rowspan="3" colspan="2">blk</td><td>a</td></tr>
              <tr><td>b</td></tr>
              <tr><td>c</td></tr>
            </table>
        "#;
        let g = build_grid(table);
        for row in 0..3 {
            for col in 0..2 {
                assert_eq!(g.cell(row, col).unwrap().text, "blk", "gap at ({row},{col})");
            }
        }
        assert_eq!(g.cell(2, 2).unwrap().text, "c");
    }

    #[test]
    fn malformed_short_rows_terminate() {
        // Declares a 5-row span but supplies only two rows, second one empty.
        let table = r#"
            <table>
              <tr><td rowspan="5">long</td><td rowspan="5">longer</td></tr>
              <tr></tr>
            </table>
        "#;
        let g = build_grid(table);
        assert_eq!(g.height(), 2);
        assert_eq!(g.cell(1, 0).unwrap().text, "long");
        assert_eq!(g.cell(1, 1).unwrap().text, "longer");
    }

    #[test]
    fn cell_parsing_captures_anchor_bold_and_flag() {
        let table = r#"
            <table><tr><td>
              <span class="flagicon"><a title="France"><img alt="FRA"></a></span>
              <b><a href="/wiki/Alice_(tennis)" title="Alice (tennis)">Alice</a></b>
            </td></tr></table>
        "#;
        let g = build_grid(table);
        let cell = g.cell(0, 0).unwrap();
        assert!(cell.bold);
        assert_eq!(cell.flag.as_deref(), Some("France"));
        assert_eq!(cell.anchors.len(), 1);
        assert_eq!(cell.anchors[0].text, "Alice");
        assert_eq!(cell.anchors[0].title, "Alice (tennis)");
        assert_eq!(cell.text, "Alice");
    }

    #[test]
    fn tiebreak_superscript_survives_as_parens() {
        let table = r#"<table><tr><td>6<sup>8</sup></td></tr></table>"#;
        let g = build_grid(table);
        assert_eq!(g.cell(0, 0).unwrap().text, "6(8)");
    }
}
