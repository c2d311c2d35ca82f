//! Template substitution
//!
//! Templates mix literal text, `{placeholder}` fields and the colour runs from
//! [`color`](super::color). They are compiled once into a [`Template`] and then
//! rendered for every entry that passes a stream's gate.
//!
//! | Placeholder   | Value                                   |
//! |---------------|-----------------------------------------|
//! | `{time}`      | entry time in the stream's time format  |
//! | `{filename}`  | source file of the log call             |
//! | `{funcname}`  | function containing the log call        |
//! | `{lineno}`    | line of the log call                    |
//! | `{levelname}` | `DEBUG` .. `CRITICAL`                   |
//! | `{levelno}`   | `0` .. `4`                              |
//! | `{logger}`    | name of the emitting logger             |
//! | `{message}`   | the composed message                    |
//!
//! A template without `{message}` gets ` {message}` appended before rendering.

use super::caller::CallerInfo;
use super::color::{tokenize, AnsiDecorator, ColorTag, ColorToken, Decorator};
use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::TimeFormat;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Time,
    Filename,
    Funcname,
    Lineno,
    Levelname,
    Levelno,
    Logger,
    Message,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Filename => "filename",
            Field::Funcname => "funcname",
            Field::Lineno => "lineno",
            Field::Levelname => "levelname",
            Field::Levelno => "levelno",
            Field::Logger => "logger",
            Field::Message => "message",
        }
    }
}

impl FromStr for Field {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "time" => Ok(Field::Time),
            "filename" => Ok(Field::Filename),
            "funcname" => Ok(Field::Funcname),
            "lineno" => Ok(Field::Lineno),
            "levelname" => Ok(Field::Levelname),
            "levelno" => Ok(Field::Levelno),
            "logger" => Ok(Field::Logger),
            "message" => Ok(Field::Message),
            other => Err(LoggerError::formatter(
                "template",
                format!("unknown placeholder '{{{}}}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
    ColorOpen(ColorTag),
    ColorReset,
}

/// A compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `source`, failing on unknown placeholders or unbalanced braces
    ///
    /// # Examples
    ///
    /// ```
    /// use multistream_logger::core::Template;
    ///
    /// assert!(Template::parse("[{levelname}] {message}").is_ok());
    /// assert!(Template::parse("[{user}]").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for token in tokenize(source) {
            match token {
                ColorToken::Text(text) => parse_placeholders(&text, &mut segments)?,
                ColorToken::Open(tag) => segments.push(Segment::ColorOpen(tag)),
                ColorToken::Close => segments.push(Segment::ColorReset),
            }
        }

        if !segments.contains(&Segment::Field(Field::Message)) {
            segments.push(Segment::Text(" ".to_string()));
            segments.push(Segment::Field(Field::Message));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template as it was written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn uses(&self, field: Field) -> bool {
        self.segments.contains(&Segment::Field(field))
    }

    /// Render an entry. Time is only formatted when the template asks for it.
    #[must_use]
    pub fn render(
        &self,
        entry: &LogEntry,
        time_format: &TimeFormat,
        decorator: &dyn Decorator,
    ) -> String {
        let mut output = String::with_capacity(self.source.len() + entry.message.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Field(field) => push_field(&mut output, *field, entry, time_format),
                Segment::ColorOpen(tag) => {
                    output.push_str(&decorator.open(tag.for_level(entry.level)))
                }
                Segment::ColorReset => output.push_str(&decorator.reset()),
            }
        }
        output
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Template {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Template::parse(s)
    }
}

fn push_field(output: &mut String, field: Field, entry: &LogEntry, time_format: &TimeFormat) {
    match field {
        Field::Time => output.push_str(&time_format.format(&entry.timestamp)),
        Field::Filename => output.push_str(&entry.caller.file),
        Field::Funcname => output.push_str(&entry.caller.function),
        Field::Lineno => output.push_str(&entry.caller.line.to_string()),
        Field::Levelname => output.push_str(entry.level.to_str()),
        Field::Levelno => output.push_str(&entry.level.number().to_string()),
        Field::Logger => output.push_str(&entry.logger),
        Field::Message => output.push_str(&entry.message),
    }
}

fn parse_placeholders(text: &str, segments: &mut Vec<Segment>) -> Result<()> {
    let mut literal = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(LoggerError::formatter(
                                "template",
                                format!("unterminated placeholder '{{{}'", name),
                            ))
                        }
                    }
                }
                let field = name.parse::<Field>()?;
                if !literal.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(field));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '}' => {
                return Err(LoggerError::formatter(
                    "template",
                    "single '}' encountered in template",
                ))
            }
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Text(literal));
    }
    Ok(())
}

/// One-shot substitution with ANSI colours and the current time
///
/// # Examples
///
/// ```
/// use multistream_logger::core::{substitute, CallerInfo, LogLevel};
///
/// let caller = CallerInfo::new("src/main.rs", 3, "main");
/// let line = substitute("[{levelname}] {logger}:", LogLevel::Info, "app", &caller, "ready", None)
///     .unwrap();
/// assert_eq!(line, "[INFO] app: ready");
/// ```
pub fn substitute(
    template: &str,
    level: LogLevel,
    logger_name: &str,
    caller: &CallerInfo,
    message: &str,
    time_format: Option<&str>,
) -> Result<String> {
    let time_format = match time_format {
        Some(pattern) => TimeFormat::new(pattern)?,
        None => TimeFormat::default(),
    };
    let entry = LogEntry::new(level, message, logger_name, caller.clone());
    Ok(Template::parse(template)?.render(&entry, &time_format, &AnsiDecorator))
}
