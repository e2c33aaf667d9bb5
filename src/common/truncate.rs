//! Display-width bounding for free-form labels.
//!
//! Both strategies count `char`s, not grapheme clusters or terminal
//! columns, so wide or combining characters may cut unevenly.

const ELLIPSIS: &str = "...";

/// Keep the last `max - 3` characters, prefixed with `...`.
///
/// ```
/// use gitfan::common::truncate::truncate_trailing;
///
/// assert_eq!(truncate_trailing("feature/very-long-branch-name", 10), "...ch-name");
/// assert_eq!(truncate_trailing("main", 10), "main");
/// ```
pub fn truncate_trailing(value: &str, max: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }

    let keep = max.saturating_sub(ELLIPSIS.len());
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}{}", ELLIPSIS, tail)
}

/// Remove characters symmetrically around the midpoint and splice in `...`.
///
/// The right side absorbs the odd character when the removal count is odd.
///
/// ```
/// use gitfan::common::truncate::truncate_middle;
///
/// let out = truncate_middle("abcdefghijklmnopqrstuvwxyz", 10);
/// assert_eq!(out.chars().count(), 10);
/// assert!(out.starts_with("abc"));
/// assert!(out.ends_with("xyz"));
/// ```
pub fn truncate_middle(value: &str, max: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    if len <= max {
        return value.to_string();
    }

    let keep = max.saturating_sub(ELLIPSIS.len());
    let middle = len / 2;
    let remove = len - keep;
    let num_left = remove / 2;
    let num_right = remove - num_left;

    let head: String = chars[..middle - num_left].iter().collect();
    let tail: String = chars[middle + num_right..].iter().collect();
    format!("{}{}{}", head, ELLIPSIS, tail)
}
