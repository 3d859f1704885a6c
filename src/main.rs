use clap::Parser;
use sales_insight::app;
use sales_insight::{logger, CliConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();
    logger::init_logger(config.verbose);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let input = match config.resolve_input() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match app::run(&config, &input, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing useful is left to do if the terminal itself is gone
            let _ = app::report_failure(&e, &mut stdout, &mut std::io::stderr());
            ExitCode::FAILURE
        }
    }
}
