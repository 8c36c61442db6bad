//! Solver output line classification and result record parsing
//!
//! A result line looks like
//!
//! ```text
//! 119612 30723474 30961478 68093 17485 F gen.2.500.500.99
//! ```
//!
//! i.e. `profit total_reuse total_hash_count cpu_time elapsed flags name...`,
//! with times in milliseconds.

use thiserror::Error;

/// Prefix of run metadata lines
pub const COMMENT_MARKER: &str = "#";
/// Prefix of solver instrumentation lines
pub const INSTRUMENT_MARKER: &str = "INSTRUMENT";
/// Prefix of summary lines written by this harness
pub const SUMMARY_MARKER: &str = "STATS";
/// First token of a limit-exceeded line
pub const LIMIT_KEYWORD: &str = "LIMIT";

/// Number of leading fields before the problem name
const FIXED_FIELDS: usize = 6;

/// Errors produced while parsing a result line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty result line")]
    Empty,

    #[error("malformed record: expected at least 6 fields, found {found} in {line:?}")]
    TooFewFields { found: usize, line: String },

    #[error("malformed record: field {field} is not an integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("malformed record: no group key in problem name {name:?}")]
    MissingGroupKey { name: String },

    #[error("malformed record: group key {value:?} in problem name {name:?} is not an integer")]
    InvalidGroupKey { name: String, value: String },
}

/// One parsed solver outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub profit: i64,
    pub total_reuse: i64,
    pub total_hash_count: i64,
    pub cpu_time_ms: i64,
    pub elapsed_ms: i64,
    /// Opaque solver flags token
    pub flags: String,
    /// `gen.<type>.<n1>.<n2>.<index>`
    pub problem_name: String,
    /// Problem type, the second dot-delimited field of `problem_name`
    pub group_key: i64,
}

impl ResultRecord {
    /// Parse a whitespace-delimited result line
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }
        if tokens.len() < FIXED_FIELDS {
            return Err(ParseError::TooFewFields {
                found: tokens.len(),
                line: line.to_string(),
            });
        }

        let problem_name = tokens[FIXED_FIELDS..].join(" ");
        let group_key = group_key_of(&problem_name)?;

        Ok(Self {
            profit: parse_int("profit", tokens[0])?,
            total_reuse: parse_int("total_reuse", tokens[1])?,
            total_hash_count: parse_int("total_hash_count", tokens[2])?,
            cpu_time_ms: parse_int("cpu_time", tokens[3])?,
            elapsed_ms: parse_int("elapsed", tokens[4])?,
            flags: tokens[5].to_string(),
            problem_name,
            group_key,
        })
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

/// Extract the group key (problem type) from a `gen.<type>.…` name
pub fn group_key_of(problem_name: &str) -> Result<i64, ParseError> {
    let value = problem_name
        .split('.')
        .nth(1)
        .ok_or_else(|| ParseError::MissingGroupKey {
            name: problem_name.to_string(),
        })?;
    value.trim().parse().map_err(|_| ParseError::InvalidGroupKey {
        name: problem_name.to_string(),
        value: value.to_string(),
    })
}

/// Sentinel outcome: the solver gave up on a resource or time bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitExceeded {
    pub description: String,
}

impl LimitExceeded {
    /// `LIMIT <word> <word> description...`; the description starts at the fourth token
    fn from_tokens(tokens: &[&str]) -> Self {
        Self {
            description: tokens.get(3..).unwrap_or_default().join(" "),
        }
    }
}

/// Classification of one line of a combined output stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Run metadata, passed through verbatim
    Comment(String),
    /// Solver diagnostics, passed through verbatim
    Instrument(String),
    /// A previously written summary; always regenerated, never trusted
    Summary,
    LimitExceeded(LimitExceeded),
    Result(ResultRecord),
}

impl Line {
    /// Classify a line and parse it when it carries a result
    pub fn classify(line: &str) -> Result<Self, ParseError> {
        if line.starts_with(COMMENT_MARKER) {
            return Ok(Line::Comment(line.to_string()));
        }
        if line.starts_with(SUMMARY_MARKER) {
            return Ok(Line::Summary);
        }
        if line.starts_with(INSTRUMENT_MARKER) {
            return Ok(Line::Instrument(line.to_string()));
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&LIMIT_KEYWORD) {
            return Ok(Line::LimitExceeded(LimitExceeded::from_tokens(&tokens)));
        }

        ResultRecord::parse(line).map(Line::Result)
    }
}
