//! Option registry and parse entry points.

use std::collections::VecDeque;
use std::ffi::OsString;

use tracing::{debug, warn};

use crate::error::{DeclarationError, Result};
use crate::scanner::{find_long, find_short, scan};
use crate::types::OptionSchema;
use crate::validate::{apply_defaults, validate_declaration};
use crate::values::{OptionSink, OptionValues};

/// Stable reference to a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionHandle(usize);

impl OptionHandle {
    /// Position of the option in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Result of [`OptionParser::parse_env`] and [`OptionParser::parse_os`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvArgs {
    /// First process argument, if the platform supplied one.
    pub program: Option<String>,
    pub values: OptionValues,
}

/// Declarative option parser.
///
/// Options are declared once and never removed. Each parse first writes
/// every default, then scans the arguments.
///
/// # Examples
///
/// ```
/// use getopt_core::{OptionParser, OptionSchema, ParseErrorKind};
///
/// let mut parser = OptionParser::new();
/// parser.declare(
///     OptionSchema::string(Some('m'), "mode", "Operation mode")
///         .with_default("mc")
///         .with_allowed_values("mc|data"),
/// )?;
/// parser.declare(
///     OptionSchema::integer(Some('n'), "iterations", "Iteration count").with_default(5000),
/// )?;
///
/// let values = parser.parse(["--mode", "data"]).unwrap();
/// assert_eq!(values.get_str("mode"), Some("data"));
/// assert_eq!(values.get_int("iterations"), Some(5000));
///
/// let err = parser.parse(["-n"]).unwrap_err();
/// assert_eq!(err.kind(), ParseErrorKind::MissingValue);
/// # Ok::<(), getopt_core::DeclarationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionParser {
    options: Vec<OptionSchema>,
}

impl OptionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option.
    ///
    /// Nothing is written to any binding until a parse runs.
    pub fn declare(
        &mut self,
        option: OptionSchema,
    ) -> std::result::Result<OptionHandle, DeclarationError> {
        validate_declaration(&self.options, &option)?;
        debug!(
            long = %option.long,
            short = ?option.short,
            kind = %option.kind,
            "declared option"
        );
        self.options.push(option);
        Ok(OptionHandle(self.options.len() - 1))
    }

    /// Returns the option behind `handle`.
    pub fn option(&self, handle: OptionHandle) -> Option<&OptionSchema> {
        self.options.get(handle.0)
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> &[OptionSchema] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Looks an option up by its short form.
    pub fn find_short(&self, key: char) -> Option<&OptionSchema> {
        find_short(&self.options, key)
    }

    /// Looks an option up by its long form (without dashes).
    pub fn find_long(&self, name: &str) -> Option<&OptionSchema> {
        find_long(&self.options, name)
    }

    /// Writes every declared default into `sink`.
    pub fn apply_defaults<S: OptionSink + ?Sized>(&self, sink: &mut S) {
        apply_defaults(&self.options, sink);
    }

    /// Parses `args` (program name excluded) into a fresh value map.
    pub fn parse<I, T>(&self, args: I) -> Result<OptionValues>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut values = OptionValues::new();
        self.parse_into(args, &mut values)?;
        Ok(values)
    }

    /// Parses `args` (program name excluded), writing defaults and then
    /// matched values into `sink`.
    ///
    /// On error `sink` holds the defaults plus whatever was assigned before
    /// the failing token.
    pub fn parse_into<I, T, S>(&self, args: I, sink: &mut S) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        S: OptionSink + ?Sized,
    {
        let mut params: VecDeque<String> = args.into_iter().map(Into::into).collect();
        debug!(args = params.len(), options = self.options.len(), "parsing arguments");

        self.apply_defaults(sink);
        scan(&self.options, &mut params, sink)
    }

    /// Parses the current process arguments, skipping the program name.
    pub fn parse_env(&self) -> Result<EnvArgs> {
        self.parse_os(std::env::args_os())
    }

    /// Like [`parse_env`](Self::parse_env), writing into `sink`. Returns the
    /// program name.
    pub fn parse_env_into<S: OptionSink + ?Sized>(&self, sink: &mut S) -> Result<Option<String>> {
        self.parse_os_into(std::env::args_os(), sink)
    }

    /// Parses an argv-style sequence whose first item is the program name.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily, so they
    /// surface as ordinary unknown options or values instead of aborting.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopt_core::{OptionParser, OptionSchema};
    ///
    /// let mut parser = OptionParser::new();
    /// parser.declare(OptionSchema::boolean(Some('t'), "test-mode", "Enable test mode"))?;
    ///
    /// let parsed = parser.parse_os(["demo", "-t"]).unwrap();
    /// assert_eq!(parsed.program.as_deref(), Some("demo"));
    /// assert_eq!(parsed.values.get_bool("test-mode"), Some(true));
    /// # Ok::<(), getopt_core::DeclarationError>(())
    /// ```
    pub fn parse_os<I, T>(&self, args: I) -> Result<EnvArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut values = OptionValues::new();
        let program = self.parse_os_into(args, &mut values)?;
        Ok(EnvArgs { program, values })
    }

    /// Like [`parse_os`](Self::parse_os), writing into `sink`. Returns the
    /// program name.
    pub fn parse_os_into<I, T, S>(&self, args: I, sink: &mut S) -> Result<Option<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
        S: OptionSink + ?Sized,
    {
        let mut args = args.into_iter().map(|arg| lossy_arg(arg.into()));
        let program = args.next();
        self.parse_into(args, sink)?;
        Ok(program)
    }
}

fn lossy_arg(arg: OsString) -> String {
    arg.into_string().unwrap_or_else(|raw| {
        let converted = raw.to_string_lossy().into_owned();
        warn!(arg = %converted, "argument is not valid UTF-8");
        converted
    })
}

#[cfg(test)]
mod tests {
    use crate::{OptionValue, ParseError};

    use super::*;

    fn parser() -> OptionParser {
        let mut parser = OptionParser::new();
        parser
            .declare(
                OptionSchema::string(Some('m'), "mode", "Operation mode")
                    .with_default("mc")
                    .with_allowed_values("mc|data"),
            )
            .unwrap();
        parser
            .declare(
                OptionSchema::integer(Some('n'), "iterations", "Iteration count")
                    .with_default(5000),
            )
            .unwrap();
        parser
            .declare(OptionSchema::boolean(None, "dry-run", "Do nothing"))
            .unwrap();
        parser
    }

    #[test]
    fn test_declare_returns_sequential_handles() {
        let mut parser = OptionParser::new();
        let a = parser.declare(OptionSchema::boolean(Some('a'), "all", "")).unwrap();
        let b = parser.declare(OptionSchema::boolean(Some('b'), "brief", "")).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(parser.option(b).map(|o| o.long.as_str()), Some("brief"));
    }

    #[test]
    fn test_rejected_declaration_leaves_registry_unchanged() {
        let mut parser = parser();
        let err = parser
            .declare(OptionSchema::boolean(Some('m'), "merge", ""))
            .unwrap_err();
        assert_eq!(err, DeclarationError::DuplicateShort('m'));
        assert_eq!(parser.len(), 3);
        assert!(parser.find_long("merge").is_none());
    }

    #[test]
    fn test_find_by_short_and_long() {
        let parser = parser();
        assert_eq!(parser.find_short('n').map(|o| o.long.as_str()), Some("iterations"));
        assert_eq!(parser.find_long("dry-run").and_then(|o| o.short), None);
        assert!(parser.find_short('z').is_none());
        assert!(parser.find_long("nope").is_none());
    }

    #[test]
    fn test_options_keep_declaration_order() {
        let parser = parser();
        let names: Vec<&str> = parser.options().iter().map(|o| o.long.as_str()).collect();
        assert_eq!(names, vec!["mode", "iterations", "dry-run"]);
    }

    #[test]
    fn test_parse_empty_args_yields_defaults() {
        let values = parser().parse(Vec::<String>::new()).unwrap();
        assert_eq!(values.get_str("mode"), Some("mc"));
        assert_eq!(values.get_int("iterations"), Some(5000));
        assert_eq!(values.get_bool("dry-run"), Some(false));
    }

    #[test]
    fn test_parse_into_resets_to_defaults() {
        let parser = parser();
        let mut values = OptionValues::new();
        parser
            .parse_into(["--mode", "data", "--dry-run"], &mut values)
            .unwrap();
        assert_eq!(values.get_str("mode"), Some("data"));

        parser.parse_into(Vec::<&str>::new(), &mut values).unwrap();
        assert_eq!(values.get_str("mode"), Some("mc"));
        assert_eq!(values.get_bool("dry-run"), Some(false));
    }

    #[test]
    fn test_parse_into_keeps_defaults_on_error() {
        let parser = parser();
        let mut values = OptionValues::new();
        let err = parser
            .parse_into(["-n", "7", "--mode"], &mut values)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                option: "mode".to_string()
            }
        );
        assert_eq!(values.get_int("iterations"), Some(7));
        assert_eq!(values.get("mode"), Some(&OptionValue::from("mc")));
    }

    #[test]
    fn test_parse_os_keeps_program_name_apart() {
        let parsed = parser().parse_os(["demo", "-n", "3"]).unwrap();
        assert_eq!(parsed.program.as_deref(), Some("demo"));
        assert_eq!(parsed.values.get_int("iterations"), Some(3));
        assert_eq!(parsed.values.get_str("mode"), Some("mc"));
    }

    #[test]
    fn test_parse_os_without_program_name() {
        let parsed = parser().parse_os(Vec::<OsString>::new()).unwrap();
        assert_eq!(parsed.program, None);
        assert_eq!(parsed.values.get_bool("dry-run"), Some(false));
    }

    #[test]
    fn test_parse_os_into_returns_program_name() {
        let mut values = OptionValues::new();
        let program = parser()
            .parse_os_into(["demo", "--dry-run"], &mut values)
            .unwrap();
        assert_eq!(program.as_deref(), Some("demo"));
        assert_eq!(values.get_bool("dry-run"), Some(true));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_os_reports_non_utf8_token_as_unknown() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let args = [OsStr::new("demo"), OsStr::from_bytes(b"--mode\xff")];
        let err = parser().parse_os(args).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("--mode\u{fffd}".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_os_converts_non_utf8_value() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let args = [OsStr::new("demo"), OsStr::new("-n"), OsStr::from_bytes(b"7\xff")];
        let parsed = parser().parse_os(args).unwrap();
        assert_eq!(parsed.values.get_int("iterations"), Some(7));
    }
}
