use clap::Parser;
use sigcompose::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
