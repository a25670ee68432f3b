//! Parsing of `grid-row`, `grid-column`, `grid-area` and their longhands.
//!
//! Invalid values degrade to `auto` rather than failing.

use cssparser::{Parser, ParserInput, Token};

use super::{GridLine, GridPlacement};

/// A grid line component token, detached from the input lifetime.
#[derive(Debug, Clone, PartialEq)]
enum LineToken {
    Ident(String),
    Integer(i32),
    Span,
    Slash,
    Invalid,
}

fn tokenize(value: &str) -> Vec<LineToken> {
    let mut input = ParserInput::new(value.trim());
    let mut parser = Parser::new(&mut input);
    let mut tokens = Vec::new();
    while let Ok(token) = parser.next() {
        tokens.push(match token {
            Token::Ident(ident) if ident.eq_ignore_ascii_case("span") => LineToken::Span,
            Token::Ident(ident) => LineToken::Ident(ident.as_ref().to_owned()),
            Token::Number {
                int_value: Some(int),
                ..
            } => LineToken::Integer(*int),
            Token::Delim('/') => LineToken::Slash,
            _ => LineToken::Invalid,
        });
    }
    tokens
}

/// Interpret the tokens of one `<grid-line>` value.
///
/// Spec: §8.3 Line-based Placement: the grid-row-start, grid-column-start,
/// grid-row-end, and grid-column-end properties
fn line_from_tokens(tokens: &[LineToken]) -> Option<GridLine> {
    let is_span = tokens.contains(&LineToken::Span);
    let mut integer = None;
    let mut ident = None;
    for token in tokens {
        match token {
            LineToken::Span => {}
            LineToken::Integer(value) if integer.is_none() => integer = Some(*value),
            LineToken::Ident(name) if ident.is_none() => ident = Some(name.clone()),
            _ => return None,
        }
    }
    if tokens.iter().filter(|token| **token == LineToken::Span).count() > 1 {
        return None;
    }

    if is_span {
        // `span` must come first or last, never between the other parts.
        if tokens.len() == 3 && tokens.get(1) == Some(&LineToken::Span) {
            return None;
        }
        let count = match integer {
            Some(value) if value > 0 => u32::try_from(value).ok()?,
            Some(_) => return None,
            None => 1,
        };
        return Some(match ident {
            Some(name) => GridLine::NamedSpan(name, count),
            None if integer.is_some() => GridLine::Span(count),
            None => return None,
        });
    }

    match (integer, ident) {
        (None, None) => None,
        (None, Some(name)) if name.eq_ignore_ascii_case("auto") => Some(GridLine::Auto),
        (None, Some(name)) => Some(GridLine::Named(name, None)),
        (Some(0), _) => None,
        (Some(value), None) => Some(GridLine::Line(value)),
        (Some(_), Some(name)) if name.eq_ignore_ascii_case("auto") => None,
        (Some(value), Some(name)) => Some(GridLine::Named(name, Some(value))),
    }
}

/// Split tokens on `/`.
fn components(value: &str) -> Vec<Vec<LineToken>> {
    let mut parts = vec![Vec::new()];
    for token in tokenize(value) {
        if token == LineToken::Slash {
            parts.push(Vec::new());
        } else if let Some(part) = parts.last_mut() {
            part.push(token);
        }
    }
    parts
}

fn line_or_auto(tokens: &[LineToken], value: &str) -> GridLine {
    line_from_tokens(tokens).unwrap_or_else(|| {
        log::warn!(target: "css::grid::parse", "invalid grid line '{value}', using auto");
        GridLine::Auto
    })
}

/// Default for an omitted end edge: a lone `<custom-ident>` is copied, anything else is `auto`.
fn omitted_from(line: &GridLine) -> GridLine {
    match line {
        GridLine::Named(name, None) => GridLine::Named(name.clone(), None),
        _ => GridLine::Auto,
    }
}

/// Parse a single `<grid-line>` (`grid-row-start` and friends).
pub fn parse_grid_line(value: &str) -> GridLine {
    let tokens = tokenize(value);
    if tokens.is_empty() || tokens.contains(&LineToken::Slash) {
        log::warn!(target: "css::grid::parse", "invalid grid line '{value}', using auto");
        return GridLine::Auto;
    }
    line_or_auto(&tokens, value)
}

/// Parse a `grid-row` / `grid-column` shorthand into `(start, end)`.
pub fn parse_line_pair(value: &str) -> (GridLine, GridLine) {
    let parts = components(value);
    if parts.len() > 2 {
        log::warn!(target: "css::grid::parse", "too many '/' in '{value}', using auto");
        return (GridLine::Auto, GridLine::Auto);
    }
    let start = line_or_auto(parts.first().map_or(&[][..], Vec::as_slice), value);
    let end = match parts.get(1) {
        Some(tokens) => line_or_auto(tokens, value),
        None => omitted_from(&start),
    };
    (start, end)
}

/// Parse the `grid-area` shorthand: `row-start / column-start / row-end / column-end`.
pub fn parse_grid_area(value: &str) -> GridPlacement {
    let parts = components(value);
    if parts.len() > 4 {
        log::warn!(target: "css::grid::parse", "too many '/' in grid-area '{value}', using auto");
        return GridPlacement::auto();
    }
    let mut lines = parts
        .iter()
        .map(|tokens| line_or_auto(tokens, value))
        .collect::<Vec<_>>()
        .into_iter();

    let row_start = lines.next().unwrap_or_default();
    let column_start = lines.next().unwrap_or_else(|| omitted_from(&row_start));
    let row_end = lines.next().unwrap_or_else(|| omitted_from(&row_start));
    let column_end = lines.next().unwrap_or_else(|| omitted_from(&column_start));

    GridPlacement {
        row_start,
        row_end,
        column_start,
        column_end,
    }
}
