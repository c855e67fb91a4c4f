//! Declaration checks, default application and string value validation.
//!
//! Declaration checks enforce the registry invariants: every option has a
//! well-formed long form and no short or long form is used twice. Default
//! application seeds every bound value before the scanner looks at a
//! single token.
//!
//! # Examples
//!
//! ```
//! use getopt_core::*;
//!
//! let options = vec![
//!     OptionSchema::boolean(Some('v'), "verbose", "Verbose output"),
//!     OptionSchema::boolean(Some('v'), "version", "Print version"),
//! ];
//! assert_eq!(
//!     validate_options(&options),
//!     vec![DeclarationError::DuplicateShort('v')]
//! );
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::error::{DeclarationError, ParseError};
use crate::types::{OptionKind, OptionSchema};
use crate::values::OptionSink;

/// Checks `candidate` on its own and against already declared `existing`
/// options.
pub fn validate_declaration(
    existing: &[OptionSchema],
    candidate: &OptionSchema,
) -> Result<(), DeclarationError> {
    validate_shape(candidate)?;

    if let Some(short) = candidate.short {
        if existing.iter().any(|opt| opt.matches_short(short)) {
            return Err(DeclarationError::DuplicateShort(short));
        }
    }

    if existing.iter().any(|opt| opt.matches_long(&candidate.long)) {
        return Err(DeclarationError::DuplicateLong(candidate.long.clone()));
    }

    Ok(())
}

/// Validates a whole option list, e.g. one loaded from JSON.
///
/// Stops at the first problem, like declaration does.
pub fn validate_options(options: &[OptionSchema]) -> Vec<DeclarationError> {
    let mut errors = Vec::new();
    let mut seen_short = HashSet::new();
    let mut seen_long = HashSet::new();

    for opt in options {
        if let Err(err) = validate_shape(opt) {
            errors.push(err);
            return errors;
        }

        if let Some(short) = opt.short {
            if !seen_short.insert(short) {
                errors.push(DeclarationError::DuplicateShort(short));
                return errors;
            }
        }

        if !seen_long.insert(opt.long.as_str()) {
            errors.push(DeclarationError::DuplicateLong(opt.long.clone()));
            return errors;
        }
    }

    errors
}

fn validate_shape(opt: &OptionSchema) -> Result<(), DeclarationError> {
    if opt.long.trim().is_empty() {
        return Err(DeclarationError::EmptyLongForm);
    }
    if opt.long.starts_with('-') || opt.long.chars().any(char::is_whitespace) {
        return Err(DeclarationError::InvalidLongForm(opt.long.clone()));
    }

    if let Some(short) = opt.short {
        if short == '-' || short.is_whitespace() {
            return Err(DeclarationError::InvalidShortForm(short));
        }
    }

    let found = opt.default.kind();
    if found != opt.kind {
        return Err(DeclarationError::DefaultKindMismatch {
            option: opt.long.clone(),
            expected: opt.kind,
            found,
        });
    }

    if opt.kind != OptionKind::String && opt.has_allowed_values() {
        return Err(DeclarationError::UnexpectedAllowedValues(opt.long.clone()));
    }

    Ok(())
}

/// Returns true if `candidate` is acceptable for `option`.
///
/// Options without allowed values accept anything.
///
/// # Examples
///
/// ```
/// use getopt_core::{OptionSchema, validate_string_value};
///
/// let mode = OptionSchema::string(Some('m'), "mode", "").with_allowed_values("mc|data");
/// assert!(validate_string_value(&mode, "data"));
/// assert!(!validate_string_value(&mode, "bogus"));
///
/// let name = OptionSchema::string(None, "name", "");
/// assert!(validate_string_value(&name, "anything"));
/// ```
pub fn validate_string_value(option: &OptionSchema, candidate: &str) -> bool {
    !option.has_allowed_values() || option.allowed_values.iter().any(|value| value == candidate)
}

/// Like [`validate_string_value`], but reports the failure as a
/// [`ParseError::InvalidValue`].
pub fn check_string_value(option: &OptionSchema, candidate: &str) -> Result<(), ParseError> {
    if validate_string_value(option, candidate) {
        Ok(())
    } else {
        Err(ParseError::InvalidValue {
            option: option.long.clone(),
            value: candidate.to_string(),
            allowed: option.allowed_values.clone(),
        })
    }
}

/// Writes every option's default into `sink`, in declaration order.
pub fn apply_defaults<S: OptionSink + ?Sized>(options: &[OptionSchema], sink: &mut S) {
    for opt in options {
        debug!(option = %opt.long, default = %opt.default, "applying default");
        sink.write(opt, opt.default.clone());
    }
}
