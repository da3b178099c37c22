// src/core/html.rs

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find the next `<o …>…</c>` block, case-insensitive. Returns byte offsets
/// spanning the whole block including both tags.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Inner content of a block returned by `next_tag_block_ci` (between the
/// opening tag's `>` and the closing tag's `<`).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Opening tag of a block (everything up to and including the first `>`),
/// lowercased for attribute sniffing.
pub fn opener_lc(block: &str) -> String {
    let end = block.find('>').map(|i| i + 1).unwrap_or(block.len());
    to_lower(&block[..end])
}

/// Extract an attribute value from an opening tag. Tolerates double quotes,
/// single quotes and unquoted values. Case-insensitive attribute name.
pub fn attr_value(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let needle = format!("{}=", to_lower(name));
    let mut from = 0usize;
    loop {
        let at = lc[from..].find(&needle)? + from;
        // Must be a word boundary, not e.g. "data-colspan=" matching "colspan="
        if at > 0 {
            let prev = lc.as_bytes()[at - 1];
            if prev.is_ascii_alphanumeric() || prev == b'-' || prev == b'_' {
                from = at + needle.len();
                continue;
            }
        }
        let val = &opener[at + needle.len()..];
        let (quote, off) = match val.as_bytes().first() {
            Some(b'"') => ('"', 1),
            Some(b'\'') => ('\'', 1),
            _ => ('\0', 0),
        };
        let end = if quote != '\0' {
            val[off..].find(quote).map(|e| off + e).unwrap_or(val.len())
        } else {
            val.find(|c: char| c.is_ascii_whitespace() || c == '>').unwrap_or(val.len())
        };
        return Some(val[off..end].to_string());
    }
}

/// Parse a span attribute (`colspan`/`rowspan`) from an opening tag.
/// Missing, unparsable or zero values count as 1; absurd values are clamped.
pub fn span_attr(opener: &str, name: &str) -> usize {
    const SPAN_MAX: usize = 512;
    attr_value(opener, name)
        .map(|v| {
            let digits: String = v.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<usize>().unwrap_or(1)
        })
        .map(|n| n.clamp(1, SPAN_MAX))
        .unwrap_or(1)
}

/// Rewrite `<sup>N</sup>` runs as `(N)` so tiebreak digits survive tag
/// stripping as part of the set token (e.g. `6<sup>8</sup>` → `6(8)`).
pub fn sup_to_parens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block_ci(s, "<sup", "</sup>", pos) {
        out.push_str(&s[pos..b_s]);
        let inner = strip_tags(inner_after_open_tag(&s[b_s..b_e]));
        if !inner.is_empty() {
            out.push('(');
            out.push_str(&inner);
            out.push(')');
        }
        pos = b_e;
    }
    out.push_str(&s[pos..]);
    out
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_block_is_case_insensitive() {
        let doc = "<TABLE><TR><TD>x</TD></TR></TABLE>";
        let (s, e) = next_tag_block_ci(doc, "<td", "</td>", 0).unwrap();
        assert_eq!(&doc[s..e], "<TD>x</TD>");
    }

    #[test]
    fn attr_value_quote_styles() {
        assert_eq!(attr_value(r#"<td colspan="3">"#, "colspan").as_deref(), Some("3"));
        assert_eq!(attr_value("<td colspan='2'>", "colspan").as_deref(), Some("2"));
        assert_eq!(attr_value("<td colspan=4>", "colspan").as_deref(), Some("4"));
        assert_eq!(attr_value("<td>", "colspan"), None);
    }

    #[test]
    fn attr_value_skips_prefixed_names() {
        let opener = r#"<td data-rowspan="9" rowspan="2">"#;
        assert_eq!(attr_value(opener, "rowspan").as_deref(), Some("2"));
    }

    #[test]
    fn span_attr_defaults_and_clamps() {
        assert_eq!(span_attr("<td>", "rowspan"), 1);
        assert_eq!(span_attr(r#"<td rowspan="0">"#, "rowspan"), 1);
        assert_eq!(span_attr(r#"<td rowspan="junk">"#, "rowspan"), 1);
        assert_eq!(span_attr(r#"<td rowspan="99999">"#, "rowspan"), 512);
        assert_eq!(span_attr(r#"<td colspan="100%">"#, "colspan"), 100);
    }

    #[test]
    fn sup_becomes_parens() {
        assert_eq!(sup_to_parens("6<sup>8</sup>"), "6(8)");
        assert_eq!(sup_to_parens("7"), "7");
        assert_eq!(sup_to_parens("6<sup></sup>"), "6");
    }
}
