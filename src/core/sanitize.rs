// src/core/sanitize.rs
// Text cleanup shared by the mining pipeline.

/// Replace non-breaking-space entity variants with plain spaces.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&#xa0;", " ")
        .replace("&#xA0;", " ")
}

/// Collapse runs of whitespace (tabs/newlines included) to single spaces
/// and trim the ends.
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

/// True if the string has at least one letter or digit.
/// Note: if this crate is ever internationalized, loosen this to any
/// alphanumeric codepoint.
pub fn has_alnum(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphanumeric())
}

/// True for None, empty and whitespace-only strings.
pub fn is_blank(s: Option<&str>) -> bool {
    s.is_none_or(|t| t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses() {
        assert_eq!(normalize_ws("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn entities_become_spaces() {
        assert_eq!(normalize_entities("a&nbsp;b&#160;c"), "a b c");
    }

    #[test]
    fn alnum_check() {
        assert!(has_alnum("-- 7 --"));
        assert!(!has_alnum("--??!"));
        assert!(!has_alnum(""));
    }

    #[test]
    fn blank_check() {
        assert!(is_blank(None));
        assert!(is_blank(Some("  \n")));
        assert!(!is_blank(Some(" x ")));
    }
}
