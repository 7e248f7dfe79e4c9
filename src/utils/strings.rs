//! String helpers for terminal output

/// Collapse a (possibly multi-line) body onto one display line.
///
/// Newlines are shown as `\n`, and a single trailing newline is dropped:
/// - `"echo hi"` → `echo hi`
/// - `"a\nb\n"` → `a\nb`
pub fn one_line(s: &str) -> String {
    s.strip_suffix('\n').unwrap_or(s).replace('\n', "\\n")
}

/// Truncate a string to at most `max_width` characters, adding "..." if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        format!("{}...", s.chars().take(max_width - 3).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("echo hi"), "echo hi");
        assert_eq!(one_line("a\nb\n"), "a\\nb");
        assert_eq!(one_line(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("héllo wörld", 7), "héll...");
    }
}
