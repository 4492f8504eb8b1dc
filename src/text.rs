use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Get the first `n` characters of `s`, appending an ellipsis when anything
/// was cut off.
///
/// # Examples
///
/// ```
/// assert_eq!(utilbelt::text::left("Hello", 4), "Hell…");
/// assert_eq!(utilbelt::text::left("Hello", 5), "Hello");
/// ```
pub fn left(s: &str, n: usize) -> String {
    match s.char_indices().nth(n) {
        None => s.to_string(),
        Some((cut, _)) => {
            let mut result = String::with_capacity(cut + ELLIPSIS.len_utf8());
            result.push_str(&s[..cut]);
            result.push(ELLIPSIS);
            result
        }
    }
}

/// Like [`left`], but measures display columns instead of characters. The
/// ellipsis counts towards `max_width`.
pub fn left_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let ellipsis_width = ELLIPSIS.width().unwrap_or(1);
    let target_width = max_width.saturating_sub(ellipsis_width);
    let mut result = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push(ELLIPSIS);
    result
}

/// Remove every character that is not graphic. ASCII space is the only
/// whitespace that survives.
pub fn remove_unprintable(s: &str) -> String {
    s.chars().filter(|&c| is_printable(c)).collect()
}

fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        Control
            | Format
            | Surrogate
            | PrivateUse
            | Unassigned
            | SpaceSeparator
            | LineSeparator
            | ParagraphSeparator
    )
}

/// Get line `n` of `s`, counting from 1. Out of range lines are empty.
pub fn get_line(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    s.split('\n').nth(n - 1).unwrap_or("")
}
