//! Virtual path normalization.

/// Normalize a virtual path to canonical form.
///
/// Canonical form is slash-separated, relative, and dot-resolved:
/// platform `\` separators become `/`, empty and `.` segments drop,
/// `..` consumes the preceding segment, and a leading slash is
/// stripped. `..` segments that would climb above the root are dropped
/// outright — the virtual tree has no parent to escape into.
///
/// `""`, `"/"`, and `"."` all normalize to the empty string, which the
/// mount tree reads as "the root node itself".
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}
