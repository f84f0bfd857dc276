use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `max_width` display columns, ending in `…` when
/// anything was dropped.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Markets rally", 20), "Markets rally");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(truncate("Markets rally on rate news", 10), "Markets r…");
    }

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(truncate("東京の天気予報", 7), "東京の…");
        assert_eq!(truncate("anything", 0), "");
    }
}
