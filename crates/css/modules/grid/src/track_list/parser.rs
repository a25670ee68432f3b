//! Grid template parsing using cssparser.
//!
//! Malformed track functions never fail the declaration: each one degrades
//! to `auto` and parsing continues with the next component.

use std::mem;

use cssparser::{ParseError, Parser, ParserInput, Token};

use super::{
    GridTemplate, GridTemplateAreas, RepeatCount, TrackListEntry, TrackRepeat, TrackTemplate,
};
use crate::types::{GridTrackSize, LengthPercentage, TrackBreadth};

/// Parse error type shared by the grid parsers.
type GridParseError<'input> = ParseError<'input, ()>;

/// Parse `grid-template-columns` / `grid-template-rows`.
///
/// Accepts `none`, `subgrid [<line-names>]*`, or a track list with
/// bracketed line names, `repeat()`, `minmax()` and `fit-content()`.
pub fn parse_track_template(template: &str) -> GridTemplate {
    let mut input = ParserInput::new(template.trim());
    let mut parser = Parser::new(&mut input);

    if parser
        .try_parse(|parser| parser.expect_ident_matching("none"))
        .is_ok()
    {
        return GridTemplate::None;
    }
    if parser
        .try_parse(|parser| parser.expect_ident_matching("subgrid"))
        .is_ok()
    {
        return GridTemplate::Subgrid(parse_subgrid_names(&mut parser));
    }

    let mut template_out = TrackTemplate::default();
    let mut pending_names: Vec<String> = Vec::new();
    let mut seen_auto_repeat = false;

    loop {
        if parser.is_exhausted() {
            break;
        }
        let start = parser.state();
        let Ok(token) = parser.next().cloned() else {
            break;
        };

        match token {
            Token::SquareBracketBlock => {
                let names = parser
                    .parse_nested_block(parse_line_names)
                    .unwrap_or_default();
                pending_names.extend(names);
            }
            Token::Function(name) if name.eq_ignore_ascii_case("repeat") => {
                match parser.parse_nested_block(parse_repeat) {
                    Ok(repeat) if repeat.is_auto() && seen_auto_repeat => {
                        log::warn!(target: "css::grid::parse", "second auto repeat() in '{template}' ignored");
                    }
                    Ok(repeat) => {
                        seen_auto_repeat |= repeat.is_auto();
                        template_out.line_names.push(mem::take(&mut pending_names));
                        template_out.entries.push(TrackListEntry::Repeat(repeat));
                    }
                    Err(_) => {
                        log::warn!(target: "css::grid::parse", "invalid repeat() in '{template}', using auto");
                        template_out.line_names.push(mem::take(&mut pending_names));
                        template_out
                            .entries
                            .push(TrackListEntry::Track(GridTrackSize::AUTO));
                    }
                }
            }
            _ => {
                parser.reset(&start);
                let size = parse_track_size(&mut parser).unwrap_or_else(|_| {
                    log::warn!(target: "css::grid::parse", "invalid track size in '{template}', using auto");
                    GridTrackSize::AUTO
                });
                template_out.line_names.push(mem::take(&mut pending_names));
                template_out.entries.push(TrackListEntry::Track(size));
            }
        }
    }
    template_out.line_names.push(pending_names);

    if template_out.entries.is_empty() {
        return GridTemplate::None;
    }
    GridTemplate::Tracks(template_out)
}

/// Parse `grid-auto-columns` / `grid-auto-rows`: a list of track sizes.
///
/// An empty or fully invalid value yields the initial value `auto`.
pub fn parse_track_sizes(value: &str) -> Vec<GridTrackSize> {
    let mut input = ParserInput::new(value.trim());
    let mut parser = Parser::new(&mut input);
    let mut sizes = Vec::new();
    while !parser.is_exhausted() {
        match parse_track_size(&mut parser) {
            Ok(size) => sizes.push(size),
            Err(_) => {
                log::warn!(target: "css::grid::parse", "invalid implicit track size in '{value}', using auto");
                sizes.push(GridTrackSize::AUTO);
            }
        }
    }
    if sizes.is_empty() {
        sizes.push(GridTrackSize::AUTO);
    }
    sizes
}

/// Parse `grid-template-areas`: `none` or a sequence of quoted row strings.
pub fn parse_template_areas(value: &str) -> Option<GridTemplateAreas> {
    let mut input = ParserInput::new(value.trim());
    let mut parser = Parser::new(&mut input);
    let mut rows: Vec<String> = Vec::new();
    while !parser.is_exhausted() {
        match parser.next() {
            Ok(Token::QuotedString(row)) => rows.push(row.as_ref().to_owned()),
            Ok(Token::Ident(ident)) if ident.eq_ignore_ascii_case("none") => return None,
            _ => {
                log::warn!(target: "css::grid::parse", "invalid grid-template-areas '{value}'");
                return None;
            }
        }
    }
    GridTemplateAreas::from_rows(&rows)
}

/// Parse the `[name ...]` groups following the `subgrid` keyword.
fn parse_subgrid_names(parser: &mut Parser<'_, '_>) -> Vec<Vec<String>> {
    let mut groups = Vec::new();
    while !parser.is_exhausted() {
        match parser.next() {
            Ok(Token::SquareBracketBlock) => {
                groups.push(
                    parser
                        .parse_nested_block(parse_line_names)
                        .unwrap_or_default(),
                );
            }
            _ => {
                log::warn!(target: "css::grid::parse", "unexpected token after subgrid, ignoring");
            }
        }
    }
    groups
}

/// Parse the identifiers inside a `[...]` block.
fn parse_line_names<'input>(
    parser: &mut Parser<'input, '_>,
) -> Result<Vec<String>, GridParseError<'input>> {
    let mut names = Vec::new();
    while !parser.is_exhausted() {
        let ident = parser.expect_ident()?;
        if ident.eq_ignore_ascii_case("span") || ident.eq_ignore_ascii_case("auto") {
            continue;
        }
        names.push(ident.as_ref().to_owned());
    }
    Ok(names)
}

/// Parse `repeat()` function content.
fn parse_repeat<'input>(
    parser: &mut Parser<'input, '_>,
) -> Result<TrackRepeat, GridParseError<'input>> {
    let count = match parser.next()?.clone() {
        Token::Number {
            int_value: Some(count),
            ..
        } if count > 0 => RepeatCount::Count(u16::try_from(count).unwrap_or(u16::MAX)),
        Token::Ident(name) if name.eq_ignore_ascii_case("auto-fill") => RepeatCount::AutoFill,
        Token::Ident(name) if name.eq_ignore_ascii_case("auto-fit") => RepeatCount::AutoFit,
        _ => return Err(parser.new_custom_error(())),
    };
    parser.expect_comma()?;

    let mut tracks = Vec::new();
    let mut line_names = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    while !parser.is_exhausted() {
        if let Ok(names) = parser.try_parse(|parser| {
            parser.expect_square_bracket_block()?;
            parser.parse_nested_block(parse_line_names)
        }) {
            pending.extend(names);
            continue;
        }
        let size = parse_track_size(parser)?;
        // Auto repetitions only accept fixed sizes.
        if !matches!(count, RepeatCount::Count(_)) && is_auto_sized(&size) {
            return Err(parser.new_custom_error(()));
        }
        line_names.push(mem::take(&mut pending));
        tracks.push(size);
    }
    line_names.push(pending);

    if tracks.is_empty() {
        return Err(parser.new_custom_error(()));
    }
    Ok(TrackRepeat {
        count,
        tracks,
        line_names,
    })
}

/// Whether a track size has no fixed component at all.
fn is_auto_sized(size: &GridTrackSize) -> bool {
    let fixed = |breadth: TrackBreadth| {
        matches!(breadth, TrackBreadth::Length(_) | TrackBreadth::Percentage(_))
    };
    match size {
        GridTrackSize::FitContent(_) => false,
        _ => !fixed(size.min_breadth()) && !fixed(size.max_breadth()),
    }
}

/// Parse a track size (can be breadth, minmax, or fit-content).
fn parse_track_size<'input>(
    parser: &mut Parser<'input, '_>,
) -> Result<GridTrackSize, GridParseError<'input>> {
    let start = parser.state();
    let token = parser.next()?.clone();

    match token {
        Token::Function(name) if name.eq_ignore_ascii_case("minmax") => {
            parser.parse_nested_block(parse_minmax)
        }
        Token::Function(name) if name.eq_ignore_ascii_case("fit-content") => parser
            .parse_nested_block(|parser| {
                let limit = parse_length_percentage(parser)?;
                Ok(GridTrackSize::FitContent(limit))
            }),
        _ => {
            parser.reset(&start);
            let breadth = parse_track_breadth(parser)?;
            Ok(GridTrackSize::Breadth(breadth))
        }
    }
}

/// Parse `minmax()` function.
///
/// # Errors
/// Returns an error if the `minmax()` syntax is invalid or its minimum is flexible.
fn parse_minmax<'input>(
    parser: &mut Parser<'input, '_>,
) -> Result<GridTrackSize, GridParseError<'input>> {
    let min = parse_track_breadth(parser)?;
    parser.expect_comma()?;
    let max = parse_track_breadth(parser)?;
    if min.is_flexible() {
        return Err(parser.new_custom_error(()));
    }
    Ok(GridTrackSize::minmax(min, max))
}

/// Parse a track breadth value.
fn parse_track_breadth<'input>(
    parser: &mut Parser<'input, '_>,
) -> Result<TrackBreadth, GridParseError<'input>> {
    let token = parser.next()?.clone();

    match token {
        Token::Dimension { value, unit, .. } if value >= 0.0 => {
            let unit_lower = unit.as_ref().to_ascii_lowercase();
            match unit_lower.as_str() {
                "px" => Ok(TrackBreadth::Length(value)),
                "fr" => Ok(TrackBreadth::Flex(value)),
                _ => Err(parser.new_custom_error(())),
            }
        }
        Token::Percentage { unit_value, .. } if unit_value >= 0.0 => {
            Ok(TrackBreadth::Percentage(unit_value))
        }
        Token::Number { value, .. } if value.abs() < f32::EPSILON => Ok(TrackBreadth::Length(0.0)),
        Token::Ident(name) => {
            let name_lower = name.as_ref().to_ascii_lowercase();
            match name_lower.as_str() {
                "auto" => Ok(TrackBreadth::Auto),
                "min-content" => Ok(TrackBreadth::MinContent),
                "max-content" => Ok(TrackBreadth::MaxContent),
                _ => Err(parser.new_custom_error(())),
            }
        }
        _ => Err(parser.new_custom_error(())),
    }
}

/// Parse a non-negative `<length-percentage>` in pixels.
fn parse_length_percentage<'input>(
    parser: &mut Parser<'input, '_>,
) -> Result<LengthPercentage, GridParseError<'input>> {
    match parser.next()?.clone() {
        Token::Dimension { value, unit, .. }
            if value >= 0.0 && unit.as_ref().eq_ignore_ascii_case("px") =>
        {
            Ok(LengthPercentage::Length(value))
        }
        Token::Percentage { unit_value, .. } if unit_value >= 0.0 => {
            Ok(LengthPercentage::Percentage(unit_value))
        }
        Token::Number { value, .. } if value.abs() < f32::EPSILON => {
            Ok(LengthPercentage::Length(0.0))
        }
        _ => Err(parser.new_custom_error(())),
    }
}
