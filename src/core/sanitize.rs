// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&ndash;", "-")
        .replace("&#8211;", "-")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Fold common Latin diacritics to plain ASCII. Characters outside the
/// mapped range pass through unchanged.
pub fn fold_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ā' | 'Ă' | 'Ą' => out.push('A'),
            'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => out.push('e'),
            'É' | 'È' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => out.push('E'),
            'í' | 'ì' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => out.push('i'),
            'Í' | 'Ì' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => out.push('I'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' | 'ő' => out.push('o'),
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' | 'Ō' | 'Ő' => out.push('O'),
            'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => out.push('u'),
            'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' | 'Ų' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' => out.push('Y'),
            'ć' | 'č' | 'ç' | 'ĉ' => out.push('c'),
            'Ć' | 'Č' | 'Ç' | 'Ĉ' => out.push('C'),
            'ď' | 'đ' => out.push('d'),
            'Ď' | 'Đ' => out.push('D'),
            'ğ' | 'ģ' => out.push('g'),
            'Ğ' | 'Ģ' => out.push('G'),
            'ľ' | 'ļ' | 'ł' => out.push('l'),
            'Ľ' | 'Ļ' | 'Ł' => out.push('L'),
            'ñ' | 'ń' | 'ň' | 'ņ' => out.push('n'),
            'Ñ' | 'Ń' | 'Ň' | 'Ņ' => out.push('N'),
            'ŕ' | 'ř' => out.push('r'),
            'Ŕ' | 'Ř' => out.push('R'),
            'ś' | 'š' | 'ş' | 'ș' => out.push('s'),
            'Ś' | 'Š' | 'Ş' | 'Ș' => out.push('S'),
            'ť' | 'ţ' | 'ț' => out.push('t'),
            'Ť' | 'Ţ' | 'Ț' => out.push('T'),
            'ź' | 'ž' | 'ż' => out.push('z'),
            'Ź' | 'Ž' | 'Ż' => out.push('Z'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'þ' => out.push_str("th"),
            'ð' => out.push('d'),
            _ => out.push(ch),
        }
    }
    out
}

/// Remove any `( … )` segments, e.g. "(tennis)", "(born 1999)".
/// Greedy within each pair, no nesting.
pub fn strip_parens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_parens = false;
    for ch in s.chars() {
        match ch {
            '(' => in_parens = true,
            ')' => in_parens = false,
            _ if !in_parens => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Identity key for a player: parenthetical qualifiers stripped, diacritics
/// folded, whitespace collapsed, lowercased.
pub fn normalize_name(display: &str) -> String {
    normalize_ws(&fold_ascii(&strip_parens(display))).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_diacritics() {
        assert_eq!(fold_ascii("Björn Söderling"), "Bjorn Soderling");
        assert_eq!(fold_ascii("Đoković"), "Dokovic");
        assert_eq!(fold_ascii("Muñoz"), "Munoz");
    }

    #[test]
    fn strips_parenthetical_qualifiers() {
        assert_eq!(strip_parens("Alice (tennis)"), "Alice");
        assert_eq!(normalize_ws(&strip_parens("Bob (born 1999) Jr")), "Bob Jr");
        assert_eq!(strip_parens("Plain"), "Plain");
    }

    #[test]
    fn normalize_name_is_identity_key() {
        assert_eq!(normalize_name("  Novák   Đoković (tennis) "), "novak dokovic");
        assert_eq!(normalize_name("ALICE"), normalize_name("Alice"));
    }
}
