//! Path data parsing.
//!
//! Accepts the outline subset of SVG path syntax: `M L H V Q C Z` and their
//! relative lower-case forms. Numbers may be separated by whitespace or commas,
//! and a command letter may be followed by several argument groups.

use crate::error::{MsdfError, Result};
use crate::math::Vector2;
use crate::types::{Contour, EdgeSegment};

/// Parse path data into contours, one per `M` command.
///
/// `Z` closes the current contour with a line back to its start when the
/// cursor is elsewhere. Contours left open are returned as they are.
pub fn parse_path(data: &str) -> Result<Vec<Contour>> {
    let mut cursor = Cursor::new(data);
    let mut builder = PathBuilder::default();
    let mut command: Option<u8> = None;

    loop {
        cursor.skip_separators();
        let Some(next) = cursor.peek() else {
            break;
        };

        if next.is_ascii_alphabetic() {
            cursor.bump();
            command = Some(next);
        } else if matches!(command, None | Some(b'Z' | b'z')) {
            return Err(cursor.error("expected a path command"));
        }

        let Some(cmd) = command else {
            return Err(cursor.error("expected a path command"));
        };
        let relative = cmd.is_ascii_lowercase();
        let origin = if relative { builder.cursor } else { Vector2::ZERO };

        match cmd.to_ascii_uppercase() {
            b'M' => {
                let p = origin + cursor.point()?;
                builder.move_to(p);
                // Extra coordinate pairs after a move are line segments.
                command = Some(if relative { b'l' } else { b'L' });
            }
            b'L' => {
                let p = origin + cursor.point()?;
                builder.push(&cursor, |from| EdgeSegment::line(from, p))?;
            }
            b'H' => {
                let x = cursor.number()?;
                let y = builder.cursor.y;
                let x = if relative { builder.cursor.x + x } else { x };
                builder.push(&cursor, |from| EdgeSegment::line(from, Vector2::new(x, y)))?;
            }
            b'V' => {
                let y = cursor.number()?;
                let x = builder.cursor.x;
                let y = if relative { builder.cursor.y + y } else { y };
                builder.push(&cursor, |from| EdgeSegment::line(from, Vector2::new(x, y)))?;
            }
            b'Q' => {
                let control = origin + cursor.point()?;
                let p = origin + cursor.point()?;
                builder.push(&cursor, |from| EdgeSegment::quadratic(from, control, p))?;
            }
            b'C' => {
                let c1 = origin + cursor.point()?;
                let c2 = origin + cursor.point()?;
                let p = origin + cursor.point()?;
                builder.push(&cursor, |from| EdgeSegment::cubic(from, c1, c2, p))?;
            }
            b'Z' => builder.close(),
            _ => {
                return Err(cursor.error_at(
                    cursor.pos.saturating_sub(1),
                    &format!("unknown path command '{}'", char::from(cmd)),
                ))
            }
        }
    }

    Ok(builder.finish())
}

#[derive(Default)]
struct PathBuilder {
    contours: Vec<Contour>,
    current: Contour,
    start: Vector2,
    cursor: Vector2,
    started: bool,
}

impl PathBuilder {
    fn move_to(&mut self, p: Vector2) {
        self.flush();
        self.start = p;
        self.cursor = p;
        self.started = true;
    }

    fn push(&mut self, at: &Cursor<'_>, edge: impl FnOnce(Vector2) -> EdgeSegment) -> Result<()> {
        if !self.started {
            return Err(at.error("path must start with a move command (M)"));
        }
        let edge = edge(self.cursor);
        self.cursor = edge.end();
        self.current.push(edge);
        Ok(())
    }

    fn close(&mut self) {
        if self.current.is_empty() {
            return;
        }
        if self.cursor != self.start {
            self.current.push(EdgeSegment::line(self.cursor, self.start));
        }
        self.cursor = self.start;
        self.flush();
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<Contour> {
        self.flush();
        self.contours
    }
}

struct Cursor<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a str) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let bytes = self.data.as_bytes();
        let digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

        let start = self.pos;
        let mut i = start;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let mut digits = false;
        while digit(i) {
            i += 1;
            digits = true;
        }
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            while digit(i) {
                i += 1;
                digits = true;
            }
        }
        if !digits {
            return Err(self.error("expected a number"));
        }
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(bytes.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            if digit(j) {
                while digit(j) {
                    j += 1;
                }
                i = j;
            }
        }

        let value: f64 = self.data[start..i]
            .parse()
            .map_err(|_| self.error("malformed number"))?;
        if !value.is_finite() {
            return Err(self.error("number out of range"));
        }
        self.pos = i;
        Ok(value)
    }

    fn point(&mut self) -> Result<Vector2> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Vector2::new(x, y))
    }

    fn error(&self, message: &str) -> MsdfError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: &str) -> MsdfError {
        let column = self.data[..pos.min(self.data.len())].chars().count() + 1;
        MsdfError::Parse {
            message: format!("{} at column {} of path \"{}\"", message, column, self.data),
            help: Some("Path data uses M, L, H, V, Q, C and Z commands, e.g. \"M 0 0 L 10 0 L 5 8 Z\"".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn test_parse_closed_square() {
        let contours = parse_path("M0,0 L1,0 L1,1 L0,1 Z").unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contours[0].edges(),
            &[
                EdgeSegment::line(v(0.0, 0.0), v(1.0, 0.0)),
                EdgeSegment::line(v(1.0, 0.0), v(1.0, 1.0)),
                EdgeSegment::line(v(1.0, 1.0), v(0.0, 1.0)),
                EdgeSegment::line(v(0.0, 1.0), v(0.0, 0.0)),
            ]
        );
        assert!(contours[0].is_closed());
    }

    #[test]
    fn test_close_skips_redundant_line() {
        let contours = parse_path("M 0 0 L 2 0 L 1 1 L 0 0 Z").unwrap();
        assert_eq!(contours[0].len(), 3);
    }

    #[test]
    fn test_relative_and_axis_commands() {
        let contours = parse_path("m 1 1 h 2 v 2 h -2 z").unwrap();
        let ends: Vec<Vector2> = contours[0].edges().iter().map(EdgeSegment::end).collect();
        assert_eq!(ends, vec![v(3.0, 1.0), v(3.0, 3.0), v(1.0, 3.0), v(1.0, 1.0)]);
    }

    #[test]
    fn test_implicit_line_after_move() {
        let contours = parse_path("M0 0 4 0 2 3z").unwrap();
        assert_eq!(contours[0].len(), 3);
        assert_eq!(contours[0].edges()[0], EdgeSegment::line(v(0.0, 0.0), v(4.0, 0.0)));
    }

    #[test]
    fn test_repeated_arguments() {
        let contours = parse_path("M0 0 L 1 0 1 1 0 1 Z").unwrap();
        assert_eq!(contours[0].len(), 4);
    }

    #[test]
    fn test_curves() {
        let contours = parse_path("M0 0 Q 1 2 2 0 C 2 -1 0 -1 0 0 Z").unwrap();
        let edges = contours[0].edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], EdgeSegment::quadratic(v(0.0, 0.0), v(1.0, 2.0), v(2.0, 0.0)));
        assert_eq!(
            edges[1],
            EdgeSegment::cubic(v(2.0, 0.0), v(2.0, -1.0), v(0.0, -1.0), v(0.0, 0.0))
        );
    }

    #[test]
    fn test_relative_curve() {
        let contours = parse_path("M 1 1 q 1 1 2 0 z").unwrap();
        assert_eq!(
            contours[0].edges()[0],
            EdgeSegment::quadratic(v(1.0, 1.0), v(2.0, 2.0), v(3.0, 1.0))
        );
    }

    #[test]
    fn test_multiple_contours() {
        let contours = parse_path("M0 0 L4 0 L4 4 Z M1 1 L1 2 L2 1 Z").unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[1].edges()[0].start(), v(1.0, 1.0));
    }

    #[test]
    fn test_number_formats() {
        let contours = parse_path("M-.5,1e1 L+2.5-3 L.5.5z").unwrap();
        let edges = contours[0].edges();
        assert_eq!(edges[0].start(), v(-0.5, 10.0));
        assert_eq!(edges[0].end(), v(2.5, -3.0));
        assert_eq!(edges[1].end(), v(0.5, 0.5));
    }

    #[test]
    fn test_open_path_is_kept() {
        let contours = parse_path("M0 0 L1 0 L1 1").unwrap();
        assert_eq!(contours.len(), 1);
        assert!(!contours[0].is_closed());
    }

    #[test]
    fn test_empty_path() {
        assert!(parse_path("").unwrap().is_empty());
        assert!(parse_path("M 3 3").unwrap().is_empty());
    }

    #[test]
    fn test_errors() {
        for data in ["L 1 1", "M 0", "M 0 0 X 1", "M 0 0 L 1 0 Z 3", "12"] {
            let err = parse_path(data).unwrap_err();
            assert!(matches!(err, MsdfError::Parse { .. }), "{}", data);
        }
    }

    #[test]
    fn test_error_reports_column() {
        let err = parse_path("M 0 0 L 1 x").unwrap_err();
        assert!(err.to_string().contains("column 11"), "{}", err);
    }
}
