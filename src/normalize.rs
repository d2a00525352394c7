//! Canonicalization of raw SVG path data.
//!
//! Every path entering the engine goes through [`clean_path`], which produces a
//! [`PathString`] holding the invariants the rest of the pipeline relies on:
//! the text starts with an absolute move, contains no `NaN`/`Infinity`-style
//! literals, and every subpath is explicitly closed.

use std::fmt;

use kurbo::Point;

use crate::error::{MorphError, MorphResult};

/// Validated, absolute-move, closed path data.
///
/// Only constructed by [`clean_path`] and the placeholder builders; treat the
/// inner text as canonical.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PathString(String);

impl PathString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Zero-area closed path at a single coordinate. Used for "appear"
    /// placeholders and for padding mask lists during correspondence.
    pub fn from_point(p: Point) -> Self {
        Self(format!("M{} {}Z", p.x, p.y))
    }

    pub(crate) fn from_canonical(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for PathString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejects path text the engine refuses to touch: empty input, disallowed
/// numeric literals, or data not starting with a move command.
pub fn validate_path_text(path: &str) -> MorphResult<()> {
    if path.is_empty() {
        return Err(MorphError::malformed_path("path data is empty"));
    }
    let lower = path.to_ascii_lowercase();
    for literal in ["nan", "infinity", "undefined", "null"] {
        if lower.contains(literal) {
            return Err(MorphError::malformed_path(format!(
                "path data contains disallowed literal '{literal}'"
            )));
        }
    }
    if !path.starts_with(['M', 'm']) {
        return Err(MorphError::malformed_path(
            "path data must start with a move command",
        ));
    }
    Ok(())
}

/// Normalizes raw path data into a [`PathString`].
///
/// Separators are cleaned (commas become spaces), the text is split into
/// subpaths at each move command, relative moves are rewritten as absolute
/// coordinates, and every subpath is closed if it is not already. The running
/// cursor for relative moves is threaded through an explicit fold over the
/// subpaths; as in the source representation, a relative move is resolved
/// against the previous subpath's *starting* point.
pub fn clean_path(path: &str) -> MorphResult<PathString> {
    let cleaned = path.trim().replace(',', " ");
    validate_path_text(&cleaned)?;

    let (out, _) = split_subpaths(&cleaned).into_iter().try_fold(
        (String::new(), Point::ORIGIN),
        |(mut out, cursor), subpath| -> MorphResult<(String, Point)> {
            let command = subpath
                .chars()
                .next()
                .ok_or_else(|| MorphError::malformed_path("empty subpath"))?;
            let mut body = subpath[1..].to_string();
            if !body.trim_end().ends_with(['z', 'Z']) {
                body.push('Z');
            }

            let ((x, y), rest_at) = take_two_numbers(&body)?;
            let start = if command == 'm' {
                Point::new(cursor.x + x, cursor.y + y)
            } else {
                Point::new(x, y)
            };

            if command == 'm' {
                out.push('M');
                out.push_str(&format!("{} {}", start.x, start.y));
                out.push_str(&body[rest_at..]);
            } else {
                out.push('M');
                out.push_str(&body);
            }
            Ok((out, start))
        },
    )?;

    validate_path_text(&out)?;
    Ok(PathString(out))
}

/// First move coordinates of a subpath, parsed straight from the text.
///
/// Used as the query point for degenerate subpaths the sampler produces no
/// points for (single-point placeholders).
pub fn first_move_point(subpath: &str) -> MorphResult<Point> {
    let body = subpath
        .strip_prefix(['M', 'm'])
        .ok_or_else(|| MorphError::malformed_path("subpath does not start with a move"))?;
    let ((x, y), _) = take_two_numbers(body)?;
    Ok(Point::new(x, y))
}

/// Splits canonical-ish path text at each move command, keeping the command
/// with its subpath.
pub fn split_subpaths(path: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = path
        .char_indices()
        .filter(|(_, c)| *c == 'M' || *c == 'm')
        .map(|(i, _)| i)
        .collect();
    starts.push(path.len());
    starts
        .windows(2)
        .map(|w| &path[w[0]..w[1]])
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parses the first two numeric tokens of `body`, returning the values and the
/// byte offset just past the second token.
fn take_two_numbers(body: &str) -> MorphResult<((f64, f64), usize)> {
    let (x, x_end) = take_number(body, 0)?;
    let (y, y_end) = take_number(body, x_end)?;
    Ok(((x, y), y_end))
}

fn take_number(s: &str, from: usize) -> MorphResult<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b',') {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i == digits_start {
        return Err(MorphError::malformed_path(format!(
            "expected a number at offset {from} of '{s}'"
        )));
    }
    let value: f64 = s[start..i]
        .parse()
        .map_err(|_| MorphError::malformed_path(format!("invalid number '{}'", &s[start..i])))?;
    Ok((value, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_survives_modulo_whitespace() {
        let out = clean_path("M 0,0 L 10,0 L 10,10 Z").unwrap();
        assert_eq!(out.as_str(), "M 0 0 L 10 0 L 10 10 Z");
    }

    #[test]
    fn unclosed_subpath_is_closed() {
        let out = clean_path("M0 0 L10 0 L10 10").unwrap();
        assert!(out.as_str().ends_with('Z'));
    }

    #[test]
    fn relative_move_accumulates_from_previous_subpath_start() {
        let out = clean_path("M10 10 L20 10 Zm5 5 L30 30 Z").unwrap();
        let subpaths = split_subpaths(out.as_str());
        assert_eq!(subpaths.len(), 2);
        assert_eq!(first_move_point(subpaths[1]).unwrap(), Point::new(15.0, 15.0));
    }

    #[test]
    fn chained_relative_moves_accumulate() {
        let out = clean_path("m1 1 Zm2 2 Zm3 3 Z").unwrap();
        let subpaths = split_subpaths(out.as_str());
        assert_eq!(first_move_point(subpaths[0]).unwrap(), Point::new(1.0, 1.0));
        assert_eq!(first_move_point(subpaths[1]).unwrap(), Point::new(3.0, 3.0));
        assert_eq!(first_move_point(subpaths[2]).unwrap(), Point::new(6.0, 6.0));
    }

    #[test]
    fn negative_relative_move() {
        let out = clean_path("M10 10 Zm-5 -5 Z").unwrap();
        let subpaths = split_subpaths(out.as_str());
        assert_eq!(first_move_point(subpaths[1]).unwrap(), Point::new(5.0, 5.0));
    }

    #[test]
    fn rejects_disallowed_literals() {
        assert!(clean_path("M NaN 0 Z").is_err());
        assert!(clean_path("M 0 Infinity Z").is_err());
        assert!(clean_path("").is_err());
    }

    #[test]
    fn rejects_paths_not_starting_with_move() {
        assert!(clean_path("L 10 10 Z").is_err());
    }

    #[test]
    fn commas_become_spaces() {
        let out = clean_path("M1,2 L3,4 Z").unwrap();
        assert!(!out.as_str().contains(','));
    }

    #[test]
    fn single_point_placeholder_round_trips() {
        let p = PathString::from_point(Point::new(50.0, 50.0));
        assert_eq!(p.as_str(), "M50 50Z");
        assert!(clean_path(p.as_str()).is_ok());
    }
}
