//! Colour micro-syntax
//!
//! A run such as `%gwarning text%` is decorated with the colour selected by the
//! code right after the opening `%`, and the closing `%` becomes a reset
//! marker. The code `a` picks the colour from the level being logged. `%%`
//! outside a run is a literal percent sign, and a `%` with no closing partner
//! is left untouched.
//!
//! Treating `%%` as an escape differs from the classic `%.*?%` matching, where
//! it is an empty run and renders as a bare reset marker.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use colored::Color;

/// Foreground reset, matching what terminals expect after a coloured run
pub const ANSI_RESET: &str = "\x1b[39m";

/// Colour selected by a run's category code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Fixed(Color),
    /// `a`: derived from the level of the record
    Auto,
    /// Unrecognised code, decorated with the reset marker
    Neutral,
}

impl ColorTag {
    pub fn from_code(code: char) -> Self {
        match code {
            'g' => ColorTag::Fixed(Color::Green),
            'r' => ColorTag::Fixed(Color::Red),
            'y' => ColorTag::Fixed(Color::Yellow),
            'b' => ColorTag::Fixed(Color::Blue),
            'm' => ColorTag::Fixed(Color::Magenta),
            'c' => ColorTag::Fixed(Color::Cyan),
            'w' => ColorTag::Fixed(Color::White),
            'n' => ColorTag::Fixed(Color::Black),
            'a' => ColorTag::Auto,
            _ => ColorTag::Neutral,
        }
    }

    /// Colour for this tag, `None` meaning the neutral decoration
    pub fn resolve(&self, level: Option<LogLevel>) -> Result<Option<Color>> {
        match (self, level) {
            (ColorTag::Auto, None) => Err(LoggerError::invalid_level("None")),
            (_, Some(level)) => Ok(self.for_level(level)),
            (_, None) => Ok(self.for_level(LogLevel::default())),
        }
    }

    pub fn for_level(&self, level: LogLevel) -> Option<Color> {
        match self {
            ColorTag::Fixed(color) => Some(*color),
            ColorTag::Auto => Some(level.color_code()),
            ColorTag::Neutral => None,
        }
    }
}

/// Turns colour categories into the text written around a run
pub trait Decorator: Send + Sync {
    fn open(&self, color: Option<Color>) -> String;
    fn reset(&self) -> String;
}

/// ANSI escape sequences for terminals
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDecorator;

impl Decorator for AnsiDecorator {
    fn open(&self, color: Option<Color>) -> String {
        match color {
            Some(color) => format!("\x1b[{}m", color.to_fg_str()),
            None => self.reset(),
        }
    }

    fn reset(&self) -> String {
        ANSI_RESET.to_string()
    }
}

/// Drops every decoration, leaving only the run's text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDecorator;

impl Decorator for PlainDecorator {
    fn open(&self, _color: Option<Color>) -> String {
        String::new()
    }

    fn reset(&self) -> String {
        String::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ColorToken {
    Text(String),
    Open(ColorTag),
    Close,
}

pub(crate) fn tokenize(input: &str) -> Vec<ColorToken> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut in_run = false;
    let mut chars = input.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '%' {
            text.push(ch);
            continue;
        }

        if in_run {
            flush_text(&mut tokens, &mut text);
            tokens.push(ColorToken::Close);
            in_run = false;
            continue;
        }

        match chars.peek().copied() {
            Some((_, '%')) => {
                chars.next();
                text.push('%');
            }
            Some((code_idx, code)) if input[code_idx + code.len_utf8()..].contains('%') => {
                chars.next();
                flush_text(&mut tokens, &mut text);
                tokens.push(ColorToken::Open(ColorTag::from_code(code)));
                in_run = true;
            }
            _ => text.push('%'),
        }
    }

    flush_text(&mut tokens, &mut text);
    tokens
}

fn flush_text(tokens: &mut Vec<ColorToken>, text: &mut String) {
    if !text.is_empty() {
        tokens.push(ColorToken::Text(std::mem::take(text)));
    }
}

/// Apply the colour micro-syntax to `text`
///
/// Fails with `InvalidLevel` only when an `a` run is present and no level is given.
///
/// # Examples
///
/// ```
/// use multistream_logger::core::color::{format_colors, AnsiDecorator};
///
/// let out = format_colors("%gnana%", None, &AnsiDecorator).unwrap();
/// assert_eq!(out, "\x1b[32mnana\x1b[39m");
/// ```
pub fn format_colors(
    text: &str,
    level: Option<LogLevel>,
    decorator: &dyn Decorator,
) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            ColorToken::Text(text) => output.push_str(&text),
            ColorToken::Open(tag) => output.push_str(&decorator.open(tag.resolve(level)?)),
            ColorToken::Close => output.push_str(&decorator.reset()),
        }
    }
    Ok(output)
}
