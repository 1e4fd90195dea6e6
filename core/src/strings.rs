//! String helpers shared by the text formatter and the parser.
//!
//! Case-insensitive comparisons only fold ASCII letters. Flags and command
//! names are compared ordinally, so locale rules never change how a command
//! line is interpreted.

use std::cmp::Ordering;

/// Returns `true` if `a` and `b` are equal when ASCII letters are folded.
///
/// # Examples
///
/// ```
/// use argos_core::are_equal_ci;
///
/// assert!(are_equal_ci("--Help", "--hELP"));
/// assert!(!are_equal_ci("@", "`"));
/// ```
pub fn are_equal_ci(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .all(|(x, y)| x.to_ascii_uppercase() == y.to_ascii_uppercase())
}

/// Compares `a` and `b`, folding ASCII letters when `case_insensitive` is set.
pub fn are_equal(a: &str, b: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        are_equal_ci(a, b)
    } else {
        a == b
    }
}

/// Ordinal comparison with ASCII letters folded to upper case.
pub fn compare_ci(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_uppercase())
        .cmp(b.bytes().map(|c| c.to_ascii_uppercase()))
}

/// Returns `true` if `a` sorts before `b` when ASCII letters are folded.
pub fn is_less_ci(a: &str, b: &str) -> bool {
    compare_ci(a, b) == Ordering::Less
}

/// Returns `true` if `s` starts with `prefix`, folding ASCII letters.
pub fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()]
            .iter()
            .zip(prefix.bytes())
            .all(|(x, y)| x.to_ascii_uppercase() == y.to_ascii_uppercase())
}

/// Prefix test under the selected case rule.
pub fn starts_with(s: &str, prefix: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        starts_with_ci(s, prefix)
    } else {
        s.starts_with(prefix)
    }
}

/// Splits `s` at `delimiter`, at most `max_split` times.
///
/// The text after the last permitted split is returned unsplit as the final
/// part. A `max_split` of zero returns `s` as the only part.
///
/// # Examples
///
/// ```
/// use argos_core::split_string;
///
/// assert_eq!(split_string("a:b:c", ':', usize::MAX), vec!["a", "b", "c"]);
/// assert_eq!(split_string("a:b:c", ':', 1), vec!["a", "b:c"]);
/// assert_eq!(split_string("a:b:c", ':', 0), vec!["a:b:c"]);
/// ```
pub fn split_string(s: &str, delimiter: char, max_split: usize) -> Vec<&str> {
    if max_split == 0 {
        return vec![s];
    }
    let mut result = Vec::new();
    let mut rest = s;
    loop {
        match rest.find(delimiter) {
            Some(pos) => {
                result.push(&rest[..pos]);
                rest = &rest[pos + delimiter.len_utf8()..];
                if result.len() == max_split {
                    result.push(rest);
                    break;
                }
            }
            None => {
                result.push(rest);
                break;
            }
        }
    }
    result
}

/// Returns the part of `path` after the last `/` or `\`.
pub fn base_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Number of code points in `s`.
pub fn count_code_points(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of code point number `n` (zero-based) in `s`.
///
/// Returns `None` when `s` has `n` or fewer code points, and whenever `n` is
/// not smaller than the byte length of `s`.
///
/// # Examples
///
/// ```
/// use argos_core::find_nth_code_point;
///
/// assert_eq!(find_nth_code_point("Bæ bæ bø må.", 8), Some(11));
/// assert_eq!(find_nth_code_point("abc", 3), None);
/// ```
pub fn find_nth_code_point(s: &str, n: usize) -> Option<usize> {
    if n >= s.len() {
        return None;
    }
    s.char_indices().nth(n).map(|(i, _)| i)
}

/// Returns `true` if `word` has no ASCII upper case letters.
pub fn is_lower(word: &str) -> bool {
    !word.bytes().any(|c| c.is_ascii_uppercase())
}
