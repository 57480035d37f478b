use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use query_tags::cli::{self, orchestration, Parsed};
use query_tags::ui;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("QUERY_TAGS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    // Help and unknown options are handled before stdin is touched
    let args = match cli::parse_from(std::env::args_os()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Info(text)) => {
            print!("{}", text);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let piped = match ui::read_piped_stdin() {
        Ok(piped) => piped,
        Err(e) => {
            ui::display_error(&format!("Cannot read standard input: {}", e));
            return ExitCode::FAILURE;
        }
    };

    match orchestration::run(args, piped.as_deref()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
