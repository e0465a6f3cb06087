//! Width-aware text helpers for card layout.
//!
//! Card heights are measured by counting rendered lines, so wrapping has to
//! be deterministic and width-exact. These helpers work on display columns
//! (via `unicode-width`) and grapheme clusters, never on bytes.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marker for cut text.
pub const ELLIPSIS: &str = "…";

/// Display width of `s` in terminal columns.
pub fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cuts `s` to at most `max` columns, ending with an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    let budget = max - width(ELLIPSIS);
    for g in s.graphemes(true) {
        let w = width(g);
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}

/// Pads `s` with spaces on the right to exactly `cols` columns, cutting it
/// first if it is wider.
pub fn pad_right(s: &str, cols: usize) -> String {
    let cut = truncate(s, cols);
    let w = width(&cut);
    format!("{}{}", cut, " ".repeat(cols.saturating_sub(w)))
}

/// Greedy word wrap to `max` columns.
///
/// Words longer than a line are broken at grapheme boundaries. Empty input
/// yields no lines.
pub fn wrap(s: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in s.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let w = width(&word);
            let sep = usize::from(line_width > 0);
            if line_width + sep + w <= max {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(&word);
                line_width += sep + w;
                break;
            }
            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
                continue;
            }
            // Word alone is too wide: hard-break it.
            let (head, tail) = split_at_width(&word, max);
            lines.push(head);
            word = tail;
            if word.is_empty() {
                break;
            }
        }
    }
    if line_width > 0 {
        lines.push(line);
    }
    lines
}

/// Wraps to `max` columns and keeps at most `limit` lines, marking the last
/// kept line with an ellipsis when anything was dropped.
pub fn clamp_lines(s: &str, max: usize, limit: usize) -> Vec<String> {
    let mut lines = wrap(s, max);
    if lines.len() > limit {
        lines.truncate(limit);
        if let Some(last) = lines.last_mut() {
            let room = max.saturating_sub(width(ELLIPSIS));
            let mut cut = truncate(last, room.max(1));
            if !cut.ends_with(ELLIPSIS) {
                cut.push_str(ELLIPSIS);
            }
            *last = cut;
        }
    }
    lines
}

/// Formats `n` with `,` thousands separators.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn split_at_width(s: &str, max: usize) -> (String, String) {
    let mut head = String::new();
    let mut used = 0;
    let mut split = s.len();
    for (i, g) in s.grapheme_indices(true) {
        let w = width(g);
        if used + w > max && !head.is_empty() {
            split = i;
            break;
        }
        head.push_str(g);
        used += w;
    }
    (head, s[split..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Smart Widget", 20), "Smart Widget");
        assert_eq!(truncate("Smart Widget", 8), "Smart W…");
        assert_eq!(truncate("Smart Widget", 6), "Smart…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(width(&truncate("日本語のテキスト", 7)), 7);
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abc…");
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| width(l) <= 10));
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let lines = wrap("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_clamp_lines() {
        let lines = clamp_lines("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(ELLIPSIS));
        assert!(lines.iter().all(|l| width(l) <= 9));

        let short = clamp_lines("one two", 9, 2);
        assert_eq!(short, vec!["one two"]);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(10_000), "10,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
