//! Format template segmentation.
//!
//! A template is scanned once, left to right. At each `%` the token markers
//! are tried in declaration order; anything that is not a marker is literal
//! text. Substitution walks the segments, so replacement text is never
//! rescanned for markers.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_till1},
    character::complete::char,
    combinator::{map, recognize, value},
    sequence::pair,
    IResult,
};

use crate::token::FormatToken;

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(FormatToken),
}

/// A parsed format template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Parse one token marker.
fn token(input: &str) -> IResult<&str, FormatToken> {
    alt((
        value(FormatToken::Value, tag("%v")),
        value(FormatToken::Hex, tag("%hex")),
        value(FormatToken::Rgba, tag("%rgba")),
        value(FormatToken::Bound, tag("%bound")),
        value(FormatToken::Red, tag("%r")),
        value(FormatToken::Green, tag("%g")),
        value(FormatToken::Blue, tag("%b")),
        value(FormatToken::Alpha, tag("%a")),
    ))(input)
}

/// Parse a run of literal text: either text up to the next `%`, or a `%`
/// that does not start a marker together with the text after it.
fn literal(input: &str) -> IResult<&str, &str> {
    alt((
        take_till1(|c: char| c == '%'),
        recognize(pair(char('%'), take_till(|c: char| c == '%'))),
    ))(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    alt((
        map(token, Segment::Token),
        map(literal, |s: &str| Segment::Literal(s.to_string())),
    ))(input)
}

impl Template {
    /// Parse a template string. Never fails: unrecognized text is literal.
    pub fn parse(input: &str) -> Self {
        let mut template = Template::default();
        let mut rest = input;

        while !rest.is_empty() {
            match segment(rest) {
                Ok((remaining, seg)) => {
                    template.push(seg);
                    rest = remaining;
                }
                Err(_) => {
                    template.push(Segment::Literal(rest.to_string()));
                    break;
                }
            }
        }

        template
    }

    fn push(&mut self, seg: Segment) {
        if let (Segment::Literal(text), Some(Segment::Literal(prev))) =
            (&seg, self.segments.last_mut())
        {
            prev.push_str(text);
            return;
        }
        self.segments.push(seg);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check whether a token occurs in the template.
    pub fn contains(&self, token: FormatToken) -> bool {
        self.segments.iter().any(|s| s == &Segment::Token(token))
    }

    /// Distinct tokens present, in declaration order.
    pub fn tokens(&self) -> Vec<FormatToken> {
        FormatToken::ALL
            .into_iter()
            .filter(|t| self.contains(*t))
            .collect()
    }

    /// Whether any present token needs a color value.
    pub fn requires_color(&self) -> bool {
        self.tokens().into_iter().any(FormatToken::requires_color)
    }

    /// Substitute every token occurrence, stopping at the first error.
    pub fn try_render<E, F>(&self, mut resolve: F) -> Result<String, E>
    where
        F: FnMut(FormatToken) -> Result<String, E>,
    {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => out.push_str(&resolve(*token)?),
            }
        }
        Ok(out)
    }

    /// Substitute every token occurrence.
    pub fn render<F>(&self, mut resolve: F) -> String
    where
        F: FnMut(FormatToken) -> String,
    {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => out.push_str(&resolve(*token)),
            }
        }
        out
    }
}
