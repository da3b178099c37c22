// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    pub fn sep(self) -> char {
        match self {
            Delim::Csv => ',',
            Delim::Tsv => '\t',
        }
    }
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). std-only.
pub fn parse_rows(text: &str, delim: Delim) -> Vec<Vec<String>> {
    let sep = delim.sep();
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !row.is_empty() && !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}

/// Registry files carry a header row whose first column is "id" (players)
/// or "tourney_id" (matches). Split it off when present.
pub fn detect_headers(mut rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    if rows.is_empty() { return (None, rows); }
    let first = &rows[0];
    let is_header = first
        .first()
        .map(|c| c.eq_ignore_ascii_case("id") || c.eq_ignore_ascii_case("tourney_id"))
        .unwrap_or(false);
    if is_header {
        let header = rows.remove(0);
        return (Some(header), rows);
    }
    (None, rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], delim: Delim) -> io::Result<()> {
    let sep = delim.sep();
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Stringify headers + rows as one document.
pub fn rows_to_string(headers: Option<&[String]>, rows: &[Vec<String>], delim: Delim) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, delim);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, delim);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quotes_and_crlf() {
        let rows = parse_rows("a,\"b,c\",d\r\ne,\"f\"\"g\",h\r\n", Delim::Csv);
        assert_eq!(rows, vec![
            vec!["a", "b,c", "d"],
            vec!["e", "f\"g", "h"],
        ].into_iter().map(|r| r.into_iter().map(String::from).collect::<Vec<_>>()).collect::<Vec<_>>());
    }

    #[test]
    fn detect_headers_on_registry_shapes() {
        let rows = vec![
            vec![s!("id"), s!("name")],
            vec![s!("7"), s!("Alice")],
        ];
        let (h, body) = detect_headers(rows);
        assert_eq!(h.unwrap()[0], "id");
        assert_eq!(body.len(), 1);

        let rows = vec![vec![s!("7"), s!("Alice")]];
        let (h, body) = detect_headers(rows);
        assert!(h.is_none());
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn round_trips_fields_with_separators() {
        let rows = vec![vec![s!("x"), s!("a,b"), s!("q\"t")]];
        let text = rows_to_string(None, &rows, Delim::Csv);
        assert_eq!(parse_rows(&text, Delim::Csv), rows);
    }
}
