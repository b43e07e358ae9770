// simplec: lexer and parser front end for a small teaching language

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use simplec::driver;

#[derive(Parser, Debug)]
#[command(name = "simplec")]
#[command(about = "Tokenize and parse a program, writing .dyd .err .pro and .var files")]
#[command(version)]
struct Cli {
    /// Source file; artifacts are written next to it
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    driver::compile(&cli.input)
        .with_context(|| format!("compiling {}", cli.input.display()))?;
    Ok(())
}
