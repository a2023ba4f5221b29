use anyhow::bail;
use clap::Parser;
use iri_rules::patterns;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Prints the regular expressions of RFC 3986 and RFC 3987 rules.
#[derive(Parser)]
#[command(name = "iri-rules", version, about, long_about = None)]
struct Cli {
    /// Print every rule with its pattern
    #[arg(long, conflicts_with = "rules")]
    all: bool,

    /// Rule names to print the patterns of
    rules: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    run(Cli::parse(), &mut io::stdout().lock())
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let patterns = patterns();

    if cli.all {
        for (name, pattern) in patterns.iter() {
            writeln!(out, "{name}:\n{pattern}\n")?;
        }
    } else if cli.rules.is_empty() {
        writeln!(out, "Valid arguments are \"--all\" or rule names from")?;
        writeln!(out, "  {}", patterns.names().collect::<Vec<_>>().join("  "))?;
    } else {
        for name in &cli.rules {
            let Some(pattern) = patterns.get(name) else {
                bail!("unknown rule `{name}`");
            };
            writeln!(out, "{pattern}")?;
        }
    }
    Ok(())
}
