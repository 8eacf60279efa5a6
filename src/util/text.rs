//! Character classification helpers for word motion and indentation

/// Default delimiters that bound a word-motion scan
pub const DEFAULT_WORD_TERMINALS: [char; 9] = [' ', '.', '/', '{', '[', '(', '\t', '\r', '\n'];

/// Check if a character terminates a line (CR or LF)
#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == '\r' || ch == '\n'
}

/// Check if a character belongs to a leading indentation run
#[inline]
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Number of leading blank characters in a line
pub fn leading_indent_len(text: &[char]) -> usize {
    text.iter().take_while(|c| is_blank(**c)).count()
}

/// Number of whole indent units in a run of indentation.
///
/// Tabs count as one unit each; spaces are grouped by `tab_size`.
pub fn indent_units(indent: &[char], tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    let tabs = indent.iter().filter(|c| **c == '\t').count();
    let spaces = indent.len() - tabs;
    tabs + spaces / tab_size
}

/// How many characters an outdent removes from the end of `indent`.
///
/// Trailing spaces are removed down to the previous unit boundary (a whole
/// unit when already aligned); a trailing tab is removed on its own.
pub fn outdent_width(indent: &[char], unit: &[char]) -> usize {
    if indent.is_empty() || unit.is_empty() {
        return 0;
    }
    let trailing_spaces = indent.iter().rev().take_while(|c| **c == ' ').count();
    if trailing_spaces == 0 {
        return 1;
    }
    match trailing_spaces % unit.len() {
        0 => unit.len(),
        rem => rem,
    }
}

/// Split a character run at line breaks (CR, LF, or CR+LF).
///
/// Always returns at least one segment; `segments.len() - 1` breaks were found.
pub fn split_line_breaks(text: &[char]) -> Vec<&[char]> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        match text[i] {
            '\r' => {
                segments.push(&text[start..i]);
                i += if text.get(i + 1) == Some(&'\n') { 2 } else { 1 };
                start = i;
            }
            '\n' => {
                segments.push(&text[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    segments.push(&text[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_split_line_breaks_mixed() {
        let text = chars("a\r\nb\nc\rd");
        let segments = split_line_breaks(&text);
        let joined: Vec<String> = segments.iter().map(|s| s.iter().collect()).collect();
        assert_eq!(joined, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_line_breaks_trailing_break() {
        let text = chars("a\n");
        assert_eq!(split_line_breaks(&text).len(), 2);
        assert!(split_line_breaks(&text)[1].is_empty());
    }

    #[test]
    fn test_split_line_breaks_no_break() {
        let text = chars("abc");
        assert_eq!(split_line_breaks(&text), vec![&text[..]]);
    }

    #[test]
    fn test_indent_units() {
        assert_eq!(indent_units(&chars("    "), 2), 2);
        assert_eq!(indent_units(&chars("   "), 2), 1);
        assert_eq!(indent_units(&chars("\t\t"), 4), 2);
        assert_eq!(indent_units(&chars(""), 2), 0);
    }

    #[test]
    fn test_outdent_width() {
        let unit = chars("  ");
        assert_eq!(outdent_width(&chars("    "), &unit), 2);
        assert_eq!(outdent_width(&chars("   "), &unit), 1);
        assert_eq!(outdent_width(&chars("\t"), &unit), 1);
        assert_eq!(outdent_width(&chars("\t"), &['\t']), 1);
        assert_eq!(outdent_width(&chars(""), &unit), 0);
    }

    #[test]
    fn test_leading_indent_len() {
        assert_eq!(leading_indent_len(&chars("\t  x y")), 3);
        assert_eq!(leading_indent_len(&chars("x")), 0);
    }
}
