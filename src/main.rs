use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use sse_audit::analyzer::analyze_log;
use sse_audit::cli::{handle_version_command, parse_args, CliCommand};
use sse_audit::report;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Diagnostics go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match parse_args(std::env::args()) {
        CliCommand::Version => handle_version_command(),
        CliCommand::Analyze { log_path } => {
            println!("Analyzing SSE logs from: {}\n", log_path.display());
            let result = analyze_log(&log_path)?;
            print!("{}", report::render(&result));
            Ok(())
        }
    }
}
