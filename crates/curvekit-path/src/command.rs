//! Command parser.
//!
//! Splits path data into command groups (a letter plus everything up to
//! the next letter) and tokenizes each group's arguments.

use crate::tokenizer::{FlagLayout, Tokenizer, ARC_FLAGS};
use crate::{Diagnostic, DiagnosticKind, ParseError, ParseResult};
use tracing::debug;

/// The fixed path command alphabet, independent of absolute/relative form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// `M` / `m`
    MoveTo,
    /// `H` / `h`
    HorizontalLineTo,
    /// `V` / `v`
    VerticalLineTo,
    /// `L` / `l`
    LineTo,
    /// `C` / `c`
    CubicTo,
    /// `S` / `s`
    SmoothCubicTo,
    /// `Q` / `q`
    QuadTo,
    /// `T` / `t`
    SmoothQuadTo,
    /// `A` / `a`
    ArcTo,
    /// `Z` / `z`
    ClosePath,
}

impl CommandKind {
    /// Look up a command letter. Lowercase letters are relative.
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'H' => Self::HorizontalLineTo,
            'V' => Self::VerticalLineTo,
            'L' => Self::LineTo,
            'C' => Self::CubicTo,
            'S' => Self::SmoothCubicTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::ArcTo,
            'Z' => Self::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// The command letter in absolute or relative form.
    pub fn letter(self, relative: bool) -> char {
        let letter = match self {
            Self::MoveTo => 'M',
            Self::HorizontalLineTo => 'H',
            Self::VerticalLineTo => 'V',
            Self::LineTo => 'L',
            Self::CubicTo => 'C',
            Self::SmoothCubicTo => 'S',
            Self::QuadTo => 'Q',
            Self::SmoothQuadTo => 'T',
            Self::ArcTo => 'A',
            Self::ClosePath => 'Z',
        };
        if relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    /// Number of arguments in one repetition of the command.
    pub fn arity(self) -> usize {
        match self {
            Self::ClosePath => 0,
            Self::HorizontalLineTo | Self::VerticalLineTo => 1,
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => 2,
            Self::SmoothCubicTo | Self::QuadTo => 4,
            Self::CubicTo => 6,
            Self::ArcTo => 7,
        }
    }

    /// Argument positions holding single-character flags, if any.
    pub fn flag_layout(self) -> Option<FlagLayout> {
        match self {
            Self::ArcTo => Some(ARC_FLAGS),
            _ => None,
        }
    }
}

/// A command letter with its tokenized arguments.
///
/// [`parse_path`] keeps `values.len()` a multiple of `kind.arity()`.
/// Hand-built commands may carry extra values; [`PathCommand::groups`]
/// ignores them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub values: Vec<f64>,
}

impl PathCommand {
    pub fn new(kind: CommandKind, relative: bool, values: Vec<f64>) -> Self {
        Self {
            kind,
            relative,
            values,
        }
    }

    /// The source letter of this command.
    pub fn letter(&self) -> char {
        self.kind.letter(self.relative)
    }

    /// Argument groups, one per implicit repetition of the command.
    ///
    /// Trailing values that do not fill a whole group are skipped.
    pub fn groups(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.kind.arity().max(1))
    }

    /// Multiply every y-bearing argument by `sign`.
    ///
    /// Arc rotations take the sign only, never the magnitude. A negative
    /// sign mirrors the arc, so its sweep flag is inverted to keep it on
    /// the same geometry.
    pub fn apply_y_sign(&mut self, sign: f64) {
        if sign == 1.0 {
            return;
        }

        let arity = self.kind.arity();
        let y_positions: &[usize] = match self.kind {
            CommandKind::ClosePath | CommandKind::HorizontalLineTo => &[],
            CommandKind::VerticalLineTo => &[0],
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadTo => &[1],
            CommandKind::SmoothCubicTo | CommandKind::QuadTo => &[1, 3],
            CommandKind::CubicTo => &[1, 3, 5],
            CommandKind::ArcTo => &[6],
        };

        for (i, value) in self.values.iter_mut().enumerate() {
            let position = i % arity.max(1);
            if self.kind == CommandKind::ArcTo && position == 2 {
                *value *= sign.signum();
            } else if y_positions.contains(&position) {
                *value *= sign;
            } else if self.kind == CommandKind::ArcTo && position == 4 && sign < 0.0 {
                *value = if *value != 0.0 { 0.0 } else { 1.0 };
            }
        }
    }
}

/// Commands parsed from one path data string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPath {
    pub commands: Vec<PathCommand>,
    /// Soft failures; the commands above are still usable.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse path data into commands.
///
/// Empty input and `"none"` yield no commands.
pub fn parse_path(d: &str) -> ParseResult<ParsedPath> {
    let mut parsed = ParsedPath::default();
    if d.is_empty() || d == "none" {
        return Ok(parsed);
    }

    for (offset, group) in split_groups(d) {
        let mut chars = group.chars();
        let Some(letter) = chars.next() else {
            continue;
        };
        let data = chars.as_str().trim();

        let Some((kind, relative)) = CommandKind::from_letter(letter) else {
            debug!(%letter, offset, "dropping unrecognized path command");
            parsed.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::UnrecognizedCommand { letter },
                offset,
                text: group.to_string(),
            });
            continue;
        };

        let mut values = match kind {
            CommandKind::ClosePath => Vec::new(),
            _ => tokenize_arguments(kind, data).map_err(|source| ParseError::InCommand {
                letter,
                offset,
                source: Box::new(source),
            })?,
        };

        let arity = kind.arity();
        let dropped = if arity == 0 { 0 } else { values.len() % arity };
        if dropped > 0 {
            debug!(%letter, offset, arity, dropped, "truncating incomplete argument group");
            values.truncate(values.len() - dropped);
            parsed.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::IncompleteArguments {
                    letter,
                    arity,
                    dropped,
                },
                offset,
                text: group.to_string(),
            });
        }

        parsed.commands.push(PathCommand::new(kind, relative, values));
    }

    Ok(parsed)
}

fn tokenize_arguments(kind: CommandKind, data: &str) -> ParseResult<Vec<f64>> {
    let tokenizer = Tokenizer::new(data);
    match kind.flag_layout() {
        Some(layout) => tokenizer.with_flags(layout).tokenize(),
        None => tokenizer.tokenize(),
    }
}

/// Any ASCII letter except the exponent marker starts a command group.
fn is_command_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !matches!(ch, 'e' | 'E')
}

/// Split `d` into `(byte offset, group)` pairs. Text before the first
/// command letter belongs to no group and is ignored.
fn split_groups(d: &str) -> Vec<(usize, &str)> {
    let starts: Vec<usize> = d
        .char_indices()
        .filter(|&(_, ch)| is_command_letter(ch))
        .map(|(offset, _)| offset)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(d.len());
            (start, &d[start..end])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_groups() {
        let groups = split_groups("M0,0 L10 10z");
        assert_eq!(groups, vec![(0, "M0,0 "), (5, "L10 10"), (11, "z")]);
        assert!(split_groups("1 2 3").is_empty());
    }

    #[test]
    fn test_exponent_is_not_a_command() {
        let parsed = parse_path("M1e1,2E-1").unwrap();
        assert_eq!(parsed.commands.len(), 1);
        assert_eq!(parsed.commands[0].values, vec![10.0, 0.2]);
    }

    #[test]
    fn test_parse_commands() {
        let parsed = parse_path("M 10 20 l 5 5 5 5 Z").unwrap();
        assert_eq!(parsed.commands.len(), 3);
        assert_eq!(parsed.commands[0], PathCommand::new(CommandKind::MoveTo, false, vec![10.0, 20.0]));
        assert_eq!(parsed.commands[1].letter(), 'l');
        assert_eq!(parsed.commands[1].groups().count(), 2);
        assert_eq!(parsed.commands[2].kind, CommandKind::ClosePath);
        assert!(parsed.commands[2].values.is_empty());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_arc_flags() {
        let parsed = parse_path("M0 0a10 10 0 01 5 5").unwrap();
        assert_eq!(parsed.commands[1].values, vec![10.0, 10.0, 0.0, 0.0, 1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_empty_and_none() {
        assert!(parse_path("").unwrap().commands.is_empty());
        assert!(parse_path("none").unwrap().commands.is_empty());
    }

    #[test]
    fn test_unrecognized_command_is_dropped() {
        let parsed = parse_path("M0 0 X5 5 L1 1").unwrap();
        assert_eq!(parsed.commands.len(), 2);
        assert_eq!(parsed.commands[1].kind, CommandKind::LineTo);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(
            parsed.diagnostics[0].kind,
            DiagnosticKind::UnrecognizedCommand { letter: 'X' }
        );
        assert_eq!(parsed.diagnostics[0].offset, 5);
    }

    #[test]
    fn test_incomplete_group_is_truncated() {
        let parsed = parse_path("M0 0 L1 2 3").unwrap();
        assert_eq!(parsed.commands[1].values, vec![1.0, 2.0]);
        assert!(matches!(
            parsed.diagnostics[0].kind,
            DiagnosticKind::IncompleteArguments { letter: 'L', arity: 2, dropped: 1 }
        ));
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let err = parse_path("M0 0 L1,,2").unwrap_err();
        assert!(matches!(err, ParseError::InCommand { letter: 'L', offset: 5, .. }));
        assert!(matches!(err.root_cause(), ParseError::DoubleComma { .. }));
    }

    #[test]
    fn test_apply_y_sign() {
        let mut cubic = PathCommand::new(CommandKind::CubicTo, false, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        cubic.apply_y_sign(-1.0);
        assert_eq!(cubic.values, vec![1.0, -2.0, 3.0, -4.0, 5.0, -6.0]);

        let mut vertical = PathCommand::new(CommandKind::VerticalLineTo, true, vec![3.0, 4.0]);
        vertical.apply_y_sign(-1.0);
        assert_eq!(vertical.values, vec![-3.0, -4.0]);

        let mut arc = PathCommand::new(CommandKind::ArcTo, false, vec![5.0, 6.0, 30.0, 1.0, 1.0, 7.0, 8.0]);
        arc.apply_y_sign(-1.0);
        assert_eq!(arc.values, vec![5.0, 6.0, -30.0, 1.0, 0.0, 7.0, -8.0]);
    }

    #[test]
    fn test_y_scale_keeps_arc_rotation() {
        let mut arc = PathCommand::new(CommandKind::ArcTo, false, vec![5.0, 6.0, 30.0, 1.0, 1.0, 7.0, 8.0]);
        arc.apply_y_sign(2.0);
        assert_eq!(arc.values, vec![5.0, 6.0, 30.0, 1.0, 1.0, 7.0, 16.0]);

        let mut arc = PathCommand::new(CommandKind::ArcTo, false, vec![5.0, 6.0, 30.0, 0.0, 0.0, 7.0, 8.0]);
        arc.apply_y_sign(-2.0);
        assert_eq!(arc.values, vec![5.0, 6.0, -30.0, 0.0, 1.0, 7.0, -16.0]);
    }

    #[test]
    fn test_groups_skip_partial_group() {
        let command = PathCommand::new(CommandKind::LineTo, false, vec![1.0, 2.0, 3.0]);
        let groups: Vec<&[f64]> = command.groups().collect();
        assert_eq!(groups, vec![&[1.0, 2.0][..]]);
    }
}
