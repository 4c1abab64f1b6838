// src/bin/cli.rs
use pagemine::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
