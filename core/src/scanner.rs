//! Argument scanner.
//!
//! Walks the argument sequence front to back, matching `-X` and `--name`
//! tokens against declared options and consuming option values. The first
//! failure aborts the scan; nothing after it is looked at.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::error::{ParseError, Result};
use crate::types::{OptionKind, OptionSchema, OptionValue};
use crate::validate::check_string_value;
use crate::values::OptionSink;

/// Consumes `params` until empty, writing matched values into `sink`.
///
/// Tokens are removed as they are interpreted. On error, `params` holds the
/// offending token (for unknown options) and everything after it.
pub fn scan<S: OptionSink + ?Sized>(
    options: &[OptionSchema],
    params: &mut VecDeque<String>,
    sink: &mut S,
) -> Result<()> {
    while let Some(token) = params.front() {
        let Some(opt) = match_token(options, token) else {
            return Err(ParseError::UnknownOption(token.clone()));
        };

        debug!(token = %token, option = %opt.long, kind = %opt.kind, "matched option");
        params.pop_front();
        consume_value(opt, params, sink)?;
    }

    Ok(())
}

/// Resolves a token to a declared option.
///
/// `-X` is tried first on the second character; a token that fails the
/// short match still gets a long-form attempt if it starts with `--`.
fn match_token<'a>(options: &'a [OptionSchema], token: &str) -> Option<&'a OptionSchema> {
    let mut chars = token.chars();
    if let (Some('-'), Some(key)) = (chars.next(), chars.next()) {
        if key != '-' {
            trace!(key = %key, "short lookup");
            if let Some(opt) = find_short(options, key) {
                return Some(opt);
            }
        }
    }

    if token.len() >= 3 {
        if let Some(name) = token.strip_prefix("--") {
            trace!(name, "long lookup");
            return find_long(options, name);
        }
    }

    None
}

pub(crate) fn find_short(options: &[OptionSchema], key: char) -> Option<&OptionSchema> {
    options.iter().find(|opt| opt.matches_short(key))
}

pub(crate) fn find_long<'a>(options: &'a [OptionSchema], name: &str) -> Option<&'a OptionSchema> {
    options.iter().find(|opt| opt.matches_long(name))
}

fn consume_value<S: OptionSink + ?Sized>(
    opt: &OptionSchema,
    params: &mut VecDeque<String>,
    sink: &mut S,
) -> Result<()> {
    let value = match opt.kind {
        OptionKind::Boolean => OptionValue::Boolean(true),
        OptionKind::Integer => {
            let raw = take_value(opt, params)?;
            OptionValue::Integer(parse_c_int(&raw))
        }
        OptionKind::String => {
            let raw = take_value(opt, params)?;
            check_string_value(opt, &raw)?;
            OptionValue::String(raw)
        }
    };

    sink.write(opt, value);
    Ok(())
}

fn take_value(opt: &OptionSchema, params: &mut VecDeque<String>) -> Result<String> {
    params.pop_front().ok_or_else(|| ParseError::MissingValue {
        option: opt.long.clone(),
    })
}

/// Whitespace as classified by C `isspace` in the "C" locale.
fn is_c_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Permissive integer conversion with C `atoi` semantics.
///
/// Leading ASCII whitespace is skipped, an optional sign is honoured and the
/// longest run of decimal digits is converted. Anything after the digits is
/// ignored, input without digits yields `0`, and out-of-range values
/// saturate.
///
/// # Examples
///
/// ```
/// use getopt_core::parse_c_int;
///
/// assert_eq!(parse_c_int("42"), 42);
/// assert_eq!(parse_c_int("  -17"), -17);
/// assert_eq!(parse_c_int("12abc"), 12);
/// assert_eq!(parse_c_int("abc"), 0);
/// ```
pub fn parse_c_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start_matches(is_c_space);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 || digit_len != digits.len() {
        warn!(raw, "integer value has non-numeric content, parsing leniently");
    }

    digits[..digit_len].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    })
}
