//! Terminal output sanitization
//!
//! Record content comes straight from uploaded files and may contain ANSI escape
//! sequences or control characters. Anything drawn in the TUI or printed by the
//! `show` command goes through [`sanitize_for_terminal`] first.

const TAB_WIDTH: usize = 4;

/// Strips ANSI escape sequences and control characters from record text
///
/// - CSI sequences (`ESC [ ... letter`) are removed entirely
/// - Tabs are expanded to four spaces, since ratatui does not lay them out
/// - Carriage returns and other control characters are dropped
/// - Newlines are kept
///
/// # Examples
///
/// ```
/// use chat_record_viewer::utils::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mred\x1b[0m\tok"), "red    ok");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    // Consume parameters up to and including the final letter
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\n' => result.push('\n'),
            '\t' => result.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_color_codes() {
        assert_eq!(sanitize_for_terminal("\x1b[31mRed text\x1b[0m normal"), "Red text normal");
    }

    #[test]
    fn test_sanitize_cursor_movement() {
        assert_eq!(sanitize_for_terminal("\x1b[2J\x1b[H Cleared"), " Cleared");
    }

    #[test]
    fn test_sanitize_lone_escape() {
        assert_eq!(sanitize_for_terminal("a\x1bb"), "ab");
    }

    #[test]
    fn test_sanitize_keeps_newlines_drops_carriage_returns() {
        assert_eq!(sanitize_for_terminal("Line 1\r\nLine 2"), "Line 1\nLine 2");
    }

    #[test]
    fn test_sanitize_expands_tabs() {
        assert_eq!(sanitize_for_terminal("a\tb"), "a    b");
    }

    #[test]
    fn test_sanitize_bell_and_backspace() {
        assert_eq!(sanitize_for_terminal("Alert!\x07\x08"), "Alert!");
    }

    #[test]
    fn test_sanitize_unicode_untouched() {
        assert_eq!(sanitize_for_terminal("Hello 👋 世界"), "Hello 👋 世界");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_for_terminal(""), "");
    }
}
