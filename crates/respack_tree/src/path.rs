//! Splitting of archive entry names into path segments

/// Split an entry name on `/`.
///
/// A slash at position 0 does not produce a segment, every other slash ends one. The remainder
/// after the last slash is always pushed, so a trailing slash yields a trailing empty segment
/// which marks the entry as a directory.
///
/// ```
/// use respack_tree::path::split_by_slash;
///
/// assert_eq!(split_by_slash("a/b/c"), ["a", "b", "c"]);
/// assert_eq!(split_by_slash("/a"), ["a"]);
/// assert_eq!(split_by_slash("a/b/"), ["a", "b", ""]);
/// assert_eq!(split_by_slash(""), [""]);
/// ```
pub fn split_by_slash(name: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (position, _) in name.match_indices('/') {
        if position != 0 {
            segments.push(&name[start..position]);
        }
        start = position + 1;
    }
    segments.push(&name[start..]);

    segments
}

/// Whether an entry name denotes a directory rather than a file
pub fn is_directory_marker(name: &str) -> bool {
    name.ends_with('/')
}
