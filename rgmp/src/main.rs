//! `rgmp-scan`: decode one request frame from stdin
//!
//! Reads stdin to the end, decodes it as a single request and prints the
//! rendering to stdout. Decode failures go to stderr with exit status 1.
//! Output format and size limit come from the environment (see
//! [`rgmp::config`]); log verbosity from `RUST_LOG`.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use rgmp::config::Config;
use rgmp::render::render;
use rgmp::Scanner;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env()?;

    let mut buffer = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut buffer)
        .inspect_err(|e| log::error!("Error reading stdin: {}", e))
        .context("no request provided on stdin")?;

    let scanner = Scanner::new(config.scan_config());
    match rgmp::scan_with(&scanner, &buffer) {
        Ok(request) => {
            let text = render(&request, config.format()).context("failed to render request")?;
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
