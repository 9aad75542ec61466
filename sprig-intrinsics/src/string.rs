//! Character-indexed string scanning used by the string intrinsics.
//!
//! Script code indexes strings by character, so every position accepted or
//! returned here is a character offset, never a byte offset.

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the character at `char_index`, or `text.len()` past the end
pub fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

fn char_index_of(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Finds `needle` at or after character `start`, returning a character index
pub fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    let from = byte_offset(haystack, start);
    haystack[from..]
        .find(needle)
        .map(|found| char_index_of(haystack, from + found))
}

/// Characters `from..to` of `text`; callers pass already-clamped bounds
pub fn substring(text: &str, from: usize, to: usize) -> String {
    if to <= from {
        return String::new();
    }
    text.chars().skip(from).take(to - from).collect()
}

/// Inserts `insertion` before character `index`
pub fn insert_at(text: &str, index: usize, insertion: &str) -> String {
    let split = byte_offset(text, index);
    let mut result = String::with_capacity(text.len() + insertion.len());
    result.push_str(&text[..split]);
    result.push_str(insertion);
    result.push_str(&text[split..]);
    result
}

/// Removes the first occurrence of `needle`, or returns `None` when absent
pub fn remove_first(text: &str, needle: &str) -> Option<String> {
    let found = text.find(needle)?;
    let mut result = String::with_capacity(text.len() - needle.len());
    result.push_str(&text[..found]);
    result.push_str(&text[found + needle.len()..]);
    Some(result)
}

/// Replaces up to `max_count` occurrences of `search` (all when `None`).
///
/// Scanning resumes after the inserted replacement, so a replacement that
/// contains the search text is never rescanned. Returns the new text and the
/// number of substitutions made.
pub fn replace_n(
    text: &str,
    search: &str,
    replacement: &str,
    max_count: Option<usize>,
) -> (String, usize) {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    let mut count = 0;
    if search.is_empty() {
        return (text.to_string(), 0);
    }
    while let Some(found) = rest.find(search) {
        if max_count.is_some_and(|limit| count >= limit) {
            break;
        }
        result.push_str(&rest[..found]);
        result.push_str(replacement);
        rest = &rest[found + search.len()..];
        count += 1;
    }
    result.push_str(rest);
    (result, count)
}

/// Splits `text` on `delimiter`, left to right.
///
/// When the result already holds `max_count - 1` segments the remaining tail
/// becomes the final segment (a negative `max_count` means unlimited). An empty
/// delimiter splits every character, and a trailing delimiter produces one
/// trailing empty segment.
pub fn split(text: &str, delimiter: &str, max_count: i64) -> Vec<String> {
    let mut parts = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let next = if max_count >= 0 && parts.len() as i64 == max_count - 1 {
            text.len()
        } else if delimiter.is_empty() {
            text[pos..]
                .chars()
                .next()
                .map(|c| pos + c.len_utf8())
                .unwrap_or(text.len())
        } else {
            text[pos..]
                .find(delimiter)
                .map(|found| pos + found)
                .unwrap_or(text.len())
        };
        parts.push(text[pos..next].to_string());
        pos = next + delimiter.len();
        if pos == text.len() && !delimiter.is_empty() {
            parts.push(String::new());
        }
    }
    parts
}

/// Code point of the first character, or 0 for an empty string
pub fn code_point(text: &str) -> u32 {
    text.chars().next().map(u32::from).unwrap_or(0)
}

/// Single-character string for `code_point`, or `None` if it is not a scalar value
pub fn from_code_point(code_point: i64) -> Option<String> {
    u32::try_from(code_point)
        .ok()
        .and_then(char::from_u32)
        .map(String::from)
}

/// Parses the leading numeric value of `text`, ignoring leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and `0x` hexadecimal integers. Anything unparseable is 0.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let unsigned = &trimmed[end..];
    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let digits: String = hex.chars().take_while(char::is_ascii_hexdigit).collect();
        let magnitude = u64::from_str_radix(&digits, 16).map(|v| v as f64).unwrap_or(0.0);
        return if trimmed.starts_with('-') { -magnitude } else { magnitude };
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    let mantissa = &trimmed[digits_start..end];
    if mantissa.is_empty() || mantissa == "." {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    trimmed[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_empty_middle_segments() {
        assert_eq!(split("a,,b", ",", -1), vec!["a", "", "b"]);
    }

    #[test]
    fn split_empty_delimiter_yields_characters() {
        assert_eq!(split("abc", "", -1), vec!["a", "b", "c"]);
        assert_eq!(split("héllo", "", 2), vec!["h", "éllo"]);
    }

    #[test]
    fn split_trailing_delimiter_adds_empty_segment() {
        assert_eq!(split("a b ", " ", -1), vec!["a", "b", ""]);
        assert!(split("", " ", -1).is_empty());
    }

    #[test]
    fn split_respects_max_count() {
        assert_eq!(split("a b c d", " ", 2), vec!["a", "b c d"]);
        assert_eq!(split("a b c d", " ", 1), vec!["a b c d"]);
    }

    #[test]
    fn replace_n_limits_substitutions() {
        assert_eq!(replace_n("aaaa", "a", "b", Some(2)), ("bbaa".to_string(), 2));
        assert_eq!(replace_n("aXa", "a", "aa", None), ("aaXaa".to_string(), 2));
        assert_eq!(replace_n("none", "z", "y", None), ("none".to_string(), 0));
    }

    #[test]
    fn remove_first_leaves_later_matches() {
        assert_eq!(remove_first("banana", "an"), Some("bana".to_string()));
        assert_eq!(remove_first("banana", "x"), None);
    }

    #[test]
    fn character_offsets_ignore_byte_width() {
        assert_eq!(find_from("héllo wörld", "w", 0), Some(6));
        assert_eq!(find_from("abcabc", "b", 2), Some(4));
        assert_eq!(insert_at("héllo", 2, "-"), "hé-llo");
        assert_eq!(substring("héllo", 1, 3), "él");
    }

    #[test]
    fn parses_leading_numbers() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("  -3.5abc"), -3.5);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("2e"), 2.0);
        assert_eq!(parse_number("0x1F"), 31.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(".5"), 0.5);
    }

    #[test]
    fn code_points_round_trip() {
        assert_eq!(code_point("A"), 65);
        assert_eq!(from_code_point(65).as_deref(), Some("A"));
        assert_eq!(from_code_point(0x1F600).as_deref(), Some("😀"));
        assert_eq!(from_code_point(-1), None);
        assert_eq!(from_code_point(0xD800), None);
    }
}
