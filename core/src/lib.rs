//! Declarative command-line option parsing.
//!
//! Callers declare named options of a fixed kind, then hand the parser the
//! process arguments:
//!
//! - [`OptionSchema`] — an option with optional short form (`-m`), required
//!   long form (`--mode`), description, default value and, for strings, an
//!   enumerated set of legal values.
//! - [`OptionParser`] — the registry. [`declare`](OptionParser::declare)
//!   enforces unique, well-formed names; [`parse`](OptionParser::parse)
//!   applies defaults and scans the arguments.
//! - [`OptionSink`] — where values go. [`OptionValues`] is the built-in map;
//!   [`FnSink`] routes values into caller-owned fields.
//!
//! Parsing fails fast with a [`ParseError`]: a missing value, a value outside
//! the allowed set, or an unknown option. Integer values are parsed
//! leniently (see [`parse_c_int`]).
//!
//! # Example
//!
//! ```
//! use getopt_core::*;
//!
//! let mut parser = OptionParser::new();
//! parser.declare(
//!     OptionSchema::string(Some('m'), "mode", "Operation mode")
//!         .with_default("mc")
//!         .with_allowed_values("mc|data"),
//! )?;
//! parser.declare(OptionSchema::boolean(Some('t'), "test-mode", "Enable test mode"))?;
//!
//! let values = parser.parse(["-t"]).unwrap();
//! assert_eq!(values.get_str("mode"), Some("mc"));
//! assert_eq!(values.get_bool("test-mode"), Some(true));
//!
//! let err = parser.parse(["--mode", "bogus"]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Option '--mode' can have only these values: 'mc', 'data'."
//! );
//! # Ok::<(), DeclarationError>(())
//! ```

mod error;
mod registry;
mod scanner;
mod types;
mod validate;
mod values;

pub use error::{DeclarationError, ParseError, ParseErrorKind, Result};
pub use registry::{EnvArgs, OptionHandle, OptionParser};
pub use scanner::{parse_c_int, scan};
pub use types::*;
pub use validate::{
    apply_defaults, check_string_value, validate_declaration, validate_options,
    validate_string_value,
};
pub use values::{FnSink, OptionSink, OptionValues};
