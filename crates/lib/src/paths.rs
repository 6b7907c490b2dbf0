//! Path entry handling.
//!
//! Entries are taken verbatim from descriptor lines. Two transformations are
//! applied: sanitising the raw line, and dropping the first path segment to
//! build the destination under the target root.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
  #[error("entry '{entry}' has nothing left after removing its first path segment")]
  NoRemainder { entry: String },

  #[error("entry '{entry}' would be placed outside the target directory")]
  EscapesTarget { entry: String },
}

/// Clean a raw descriptor line into a path entry.
///
/// Leading whitespace, newline characters and backslashes are removed.
/// Nothing else is touched, so trailing spaces survive.
pub fn sanitize_entry(line: &str) -> String {
  line
    .trim_start()
    .chars()
    .filter(|c| *c != '\n' && *c != '\\')
    .collect()
}

/// Drop the first segment of `entry` and return the rest joined with `/`.
///
/// Leading separators are skipped before the first segment is taken, so a
/// root marker never counts as a segment. `.` segments after the first are
/// dropped, so the result never names the subdirectory root itself:
///
/// ```
/// use cmkproj_lib::paths::strip_first_segment;
///
/// assert_eq!(strip_first_segment("/project/include").unwrap(), "include");
/// assert_eq!(strip_first_segment("C:/work/inc").unwrap(), "work/inc");
/// ```
pub fn strip_first_segment(entry: &str) -> Result<String, PathError> {
  let mut segments = entry.split('/').filter(|s| !s.is_empty());
  segments.next();
  let rest: Vec<&str> = segments.filter(|s| *s != ".").collect();

  if rest.is_empty() {
    return Err(PathError::NoRemainder {
      entry: entry.to_string(),
    });
  }
  if rest.contains(&"..") {
    return Err(PathError::EscapesTarget {
      entry: entry.to_string(),
    });
  }

  Ok(rest.join("/"))
}
