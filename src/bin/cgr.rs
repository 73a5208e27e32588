//! Thin binary entry point: parse arguments, run, print, set the exit code.
//!
//! Grounded on the teacher's `main.rs`, which is itself a thin driver
//! around `Spsn`/`Cgr`; logging setup follows the `tracing_subscriber`
//! `EnvFilter` + `fmt` layering used across the wider pack
//! (`other_examples/.../khx02-vrp`).

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cgr_engine::cli::{self, Cli};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();
    match cli::run(args) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
