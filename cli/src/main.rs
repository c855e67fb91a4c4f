use std::process::ExitCode;

use getopt_core::{DeclarationError, OptionParser, OptionSchema, OptionSink, OptionValue};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Application options filled in by the parser.
#[derive(Debug)]
struct DemoOptions {
    /// Monte-Carlo mode, derived from `mode_str`
    mc_mode: bool,
    mode_str: String,
    iterations: i64,
    int_parameter: i64,
    test_mode: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            mc_mode: true,
            mode_str: "mc".to_string(),
            iterations: 1000,
            int_parameter: 1,
            test_mode: false,
        }
    }
}

impl DemoOptions {
    fn process(&mut self) {
        self.mc_mode = self.mode_str == "mc";
    }

    fn render(&self) -> String {
        format!(
            "Options:\n  Mode:           {}\n  Iterations:     {}\n  Int parameter:  {}\n  Test mode:      {}\n",
            self.mode_str, self.iterations, self.int_parameter, self.test_mode
        )
    }
}

impl OptionSink for DemoOptions {
    fn write(&mut self, option: &OptionSchema, value: OptionValue) {
        match (option.long.as_str(), value) {
            ("mode", OptionValue::String(v)) => self.mode_str = v,
            ("iterations", OptionValue::Integer(v)) => self.iterations = v,
            ("int-parameter", OptionValue::Integer(v)) => self.int_parameter = v,
            ("test-mode", OptionValue::Boolean(v)) => self.test_mode = v,
            (long, value) => debug!(option = long, %value, "ignoring unbound option"),
        }
    }
}

fn declare_options(parser: &mut OptionParser) -> Result<(), DeclarationError> {
    parser.declare(
        OptionSchema::string(Some('m'), "mode", "Operation mode")
            .with_default("mc")
            .with_allowed_values("mc|data"),
    )?;
    parser.declare(
        OptionSchema::integer(Some('n'), "iterations", "Iteration count").with_default(5000),
    )?;
    parser.declare(OptionSchema::integer(
        Some('p'),
        "int-parameter",
        "Some int parameter",
    ))?;
    parser.declare(
        OptionSchema::boolean(Some('t'), "test-mode", "Enable test mode").with_default(true),
    )?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let mut parser = OptionParser::new();
    if let Err(err) = declare_options(&mut parser) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let mut options = DemoOptions::default();
    let program = match parser.parse_env_into(&mut options) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    options.process();
    debug!(program = ?program, mc_mode = options.mc_mode, "options processed");

    eprint!("{}", options.render());
    ExitCode::SUCCESS
}
