use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Absolute path command in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo([f64; 2]),
    LineTo([f64; 2]),
    QuadTo {
        control: [f64; 2],
        to: [f64; 2],
    },
    CubicTo {
        control1: [f64; 2],
        control2: [f64; 2],
        to: [f64; 2],
    },
    ArcTo {
        radii: [f64; 2],
        x_axis_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: [f64; 2],
    },
    Close,
}

impl PathCommand {
    /// End point of the command, `None` for `Close`.
    #[must_use]
    pub fn end_point(self) -> Option<[f64; 2]> {
        match self {
            Self::MoveTo(to)
            | Self::LineTo(to)
            | Self::QuadTo { to, .. }
            | Self::CubicTo { to, .. }
            | Self::ArcTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }

    fn write_to(self, out: &mut String) {
        // Writing into a String is infallible.
        let _ = match self {
            Self::MoveTo([x, y]) => write!(out, "M{x},{y}"),
            Self::LineTo([x, y]) => write!(out, "L{x},{y}"),
            Self::QuadTo {
                control: [cx, cy],
                to: [x, y],
            } => write!(out, "Q{cx},{cy} {x},{y}"),
            Self::CubicTo {
                control1: [c1x, c1y],
                control2: [c2x, c2y],
                to: [x, y],
            } => write!(out, "C{c1x},{c1y} {c2x},{c2y} {x},{y}"),
            Self::ArcTo {
                radii: [rx, ry],
                x_axis_rotation_deg,
                large_arc,
                sweep,
                to: [x, y],
            } => write!(
                out,
                "A{rx},{ry} {x_axis_rotation_deg} {},{} {x},{y}",
                u8::from(large_arc),
                u8::from(sweep)
            ),
            Self::Close => write!(out, "Z"),
        };
    }
}

/// Printable path plus the ordered anchor points it was built from.
///
/// `points()` returns the sampled data coordinates (one per data point), not
/// every vertex of the path: step and smooth strategies add corners and
/// control points that must not receive point markers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurvePath {
    commands: Vec<PathCommand>,
    points: Vec<[f64; 2]>,
}

impl CurvePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(commands: Vec<PathCommand>, points: Vec<[f64; 2]>) -> Self {
        Self { commands, points }
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn push_point(&mut self, point: [f64; 2]) {
        self.points.push(point);
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serializes the path to SVG path data.
    #[must_use]
    pub fn print(&self) -> String {
        let mut out = String::with_capacity(self.commands.len() * 16);
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            command.write_to(&mut out);
        }
        out
    }
}

/// Parses SVG path data into absolute commands.
///
/// Supports `M L H V C S Q T A Z` in both absolute and relative form,
/// including implicit command repetition.
pub fn parse_path(input: &str) -> ChartResult<Vec<PathCommand>> {
    let mut lexer = PathLexer::new(input);
    let mut commands = Vec::new();
    let mut current = [0.0, 0.0];
    let mut subpath_start = [0.0, 0.0];
    let mut last_cubic_control: Option<[f64; 2]> = None;
    let mut last_quad_control: Option<[f64; 2]> = None;
    let mut active: Option<u8> = None;

    loop {
        lexer.skip_separators();
        if lexer.at_end() {
            break;
        }

        let letter = match lexer.take_command() {
            Some(letter) => letter,
            None => match active {
                Some(letter) => letter,
                None => return Err(lexer.error("path data must start with a command")),
            },
        };
        let relative = letter.is_ascii_lowercase();
        let origin = if relative { current } else { [0.0, 0.0] };
        let offset = |point: [f64; 2]| [origin[0] + point[0], origin[1] + point[1]];

        let mut cubic_control = None;
        let mut quad_control = None;
        let command = match letter.to_ascii_uppercase() {
            b'M' => {
                let to = offset(lexer.pair()?);
                subpath_start = to;
                // Coordinates following a moveto are implicit linetos.
                active = Some(if relative { b'l' } else { b'L' });
                PathCommand::MoveTo(to)
            }
            b'L' => PathCommand::LineTo(offset(lexer.pair()?)),
            b'H' => {
                let x = lexer.number()?;
                PathCommand::LineTo([origin[0] + x, current[1]])
            }
            b'V' => {
                let y = lexer.number()?;
                PathCommand::LineTo([current[0], origin[1] + y])
            }
            b'C' => {
                let control1 = offset(lexer.pair()?);
                let control2 = offset(lexer.pair()?);
                let to = offset(lexer.pair()?);
                cubic_control = Some(control2);
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                }
            }
            b'S' => {
                let control1 = reflect(last_cubic_control, current);
                let control2 = offset(lexer.pair()?);
                let to = offset(lexer.pair()?);
                cubic_control = Some(control2);
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                }
            }
            b'Q' => {
                let control = offset(lexer.pair()?);
                let to = offset(lexer.pair()?);
                quad_control = Some(control);
                PathCommand::QuadTo { control, to }
            }
            b'T' => {
                let control = reflect(last_quad_control, current);
                let to = offset(lexer.pair()?);
                quad_control = Some(control);
                PathCommand::QuadTo { control, to }
            }
            b'A' => {
                let rx = lexer.number()?;
                let ry = lexer.number()?;
                let x_axis_rotation_deg = lexer.number()?;
                let large_arc = lexer.flag()?;
                let sweep = lexer.flag()?;
                let to = offset(lexer.pair()?);
                PathCommand::ArcTo {
                    radii: [rx, ry],
                    x_axis_rotation_deg,
                    large_arc,
                    sweep,
                    to,
                }
            }
            b'Z' => {
                current = subpath_start;
                commands.push(PathCommand::Close);
                last_cubic_control = None;
                last_quad_control = None;
                active = None;
                continue;
            }
            _ => {
                return Err(lexer.error(&format!(
                    "unsupported path command `{}`",
                    char::from(letter)
                )));
            }
        };

        if !matches!(letter, b'M' | b'm') {
            active = Some(letter);
        }
        if let Some(to) = command.end_point() {
            current = to;
        }
        last_cubic_control = cubic_control;
        last_quad_control = quad_control;
        commands.push(command);
    }

    Ok(commands)
}

fn reflect(control: Option<[f64; 2]>, about: [f64; 2]) -> [f64; 2] {
    match control {
        Some([x, y]) => [2.0 * about[0] - x, 2.0 * about[1] - y],
        None => about,
    }
}

struct PathLexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathLexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() || byte == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn take_command(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        // `e`/`E` only appear inside numbers, never at a token start.
        if byte.is_ascii_alphabetic() {
            self.pos += 1;
            Some(byte)
        } else {
            None
        }
    }

    fn number(&mut self) -> ChartResult<f64> {
        self.skip_separators();
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            self.pos = start;
            return Err(self.error("expected a number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                self.pos = mark;
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>().map_err(|_| ChartError::InvalidPath {
            offset: start,
            reason: format!("malformed number `{text}`"),
        })
    }

    fn pair(&mut self) -> ChartResult<[f64; 2]> {
        Ok([self.number()?, self.number()?])
    }

    fn flag(&mut self) -> ChartResult<bool> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error("expected arc flag `0` or `1`")),
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn error(&self, reason: &str) -> ChartError {
        ChartError::InvalidPath {
            offset: self.pos,
            reason: reason.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CurvePath, PathCommand, parse_path};

    #[test]
    fn print_then_parse_keeps_commands() {
        let path = CurvePath::from_parts(
            vec![
                PathCommand::MoveTo([0.0, 10.0]),
                PathCommand::LineTo([5.5, 2.0]),
                PathCommand::CubicTo {
                    control1: [6.0, 1.0],
                    control2: [7.0, 1.0],
                    to: [8.0, 3.0],
                },
                PathCommand::Close,
            ],
            vec![[0.0, 10.0], [5.5, 2.0], [8.0, 3.0]],
        );

        assert_eq!(path.print(), "M0,10 L5.5,2 C6,1 7,1 8,3 Z");
        let parsed = parse_path(&path.print()).expect("parse printed path");
        assert_eq!(parsed, path.commands());
    }

    #[test]
    fn relative_and_implicit_commands_are_resolved() {
        let parsed = parse_path("m10 10 5 0 h5 v-5 z l1-1").expect("parse");
        assert_eq!(
            parsed,
            vec![
                PathCommand::MoveTo([10.0, 10.0]),
                PathCommand::LineTo([15.0, 10.0]),
                PathCommand::LineTo([20.0, 10.0]),
                PathCommand::LineTo([20.0, 5.0]),
                PathCommand::Close,
                PathCommand::LineTo([11.0, 9.0]),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_control_point() {
        let parsed = parse_path("M0,0 C0,10 10,10 10,0 S20,-10 20,0").expect("parse");
        assert_eq!(
            parsed[2],
            PathCommand::CubicTo {
                control1: [10.0, -10.0],
                control2: [20.0, -10.0],
                to: [20.0, 0.0],
            }
        );
    }

    #[test]
    fn compact_numbers_and_arc_flags_parse() {
        let parsed = parse_path("M.5.5L1e1-2A5 5 0 0110,0").expect("parse");
        assert_eq!(parsed[0], PathCommand::MoveTo([0.5, 0.5]));
        assert_eq!(parsed[1], PathCommand::LineTo([10.0, -2.0]));
        assert_eq!(
            parsed[2],
            PathCommand::ArcTo {
                radii: [5.0, 5.0],
                x_axis_rotation_deg: 0.0,
                large_arc: false,
                sweep: true,
                to: [10.0, 0.0],
            }
        );
    }

    #[test]
    fn malformed_input_reports_offset() {
        let err = parse_path("M0,0 L5").expect_err("missing y");
        assert!(err.to_string().contains("byte 7"));
        assert!(parse_path("10,10").is_err());
        assert!(parse_path("M0,0 X1,1").is_err());
    }
}
