//! cmdusage binary entry point.

use std::process::ExitCode;

use cmdusage::cli::{self, Cli};
use cmdusage::ui::output;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(output::error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `--debug` forces debug level, otherwise `RUST_LOG` applies.
fn init_logging(debug: bool) {
    let env_filter = if debug {
        EnvFilter::new("cmdusage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .try_init();

    if let Err(e) = result {
        output::error(format!("log system initialization failed: {e}"));
    }
}
