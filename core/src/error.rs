//! Error types for option declaration and argument parsing.
//!
//! Parse errors carry the exact diagnostic wording printed by command-line
//! consumers; declaration errors report registry invariant violations.

use thiserror::Error;

use crate::types::OptionKind;

/// Wraps a value in single quotes for diagnostics.
pub(crate) fn quote(value: &str) -> String {
    format!("'{value}'")
}

fn quote_option(long: &str) -> String {
    quote(&format!("--{long}"))
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| quote(value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while scanning the argument sequence.
///
/// Every variant aborts the whole parse. `option` fields hold the long form
/// without dashes; the `Display` impl adds them back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An integer or string option was the last token.
    #[error("Option {} requires a value", quote_option(.option))]
    MissingValue { option: String },

    /// A string option received a value outside its allowed set.
    #[error(
        "Option {} can have only these values: {}.",
        quote_option(.option),
        quote_list(.allowed)
    )]
    InvalidValue {
        option: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A token matched no declared option.
    #[error("Unknown option {}", quote(.0))]
    UnknownOption(String),
}

/// Discriminant of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    MissingValue,
    InvalidValue,
    UnknownOption,
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MissingValue { .. } => ParseErrorKind::MissingValue,
            ParseError::InvalidValue { .. } => ParseErrorKind::InvalidValue,
            ParseError::UnknownOption(_) => ParseErrorKind::UnknownOption,
        }
    }

    /// Long form of the offending option, if the error names one.
    pub fn option(&self) -> Option<&str> {
        match self {
            ParseError::MissingValue { option } | ParseError::InvalidValue { option, .. } => {
                Some(option)
            }
            ParseError::UnknownOption(_) => None,
        }
    }

    /// The literal offending token for unknown options.
    pub fn token(&self) -> Option<&str> {
        match self {
            ParseError::UnknownOption(token) => Some(token),
            _ => None,
        }
    }
}

/// Registry invariant violations detected when an option is declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// Long form is empty or whitespace-only.
    #[error("option long form cannot be empty")]
    EmptyLongForm,
    /// Long form starts with a dash or contains whitespace.
    #[error("invalid long form: {0}")]
    InvalidLongForm(String),
    /// Short form is `-` or whitespace and could never be matched.
    #[error("invalid short form: {0:?}")]
    InvalidShortForm(char),
    /// Short form already used by another option.
    #[error("duplicate short form: -{0}")]
    DuplicateShort(char),
    /// Long form already used by another option.
    #[error("duplicate long form: --{0}")]
    DuplicateLong(String),
    /// Default value kind differs from the option kind.
    #[error("default for --{option} must be {expected}, found {found}")]
    DefaultKindMismatch {
        option: String,
        expected: OptionKind,
        found: OptionKind,
    },
    /// Allowed values were given for a non-string option.
    #[error("allowed values are only supported for string options: --{0}")]
    UnexpectedAllowedValues(String),
}

/// Convenience alias for parse results.
pub type Result<T> = std::result::Result<T, ParseError>;
