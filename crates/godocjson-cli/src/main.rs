//! godocjson CLI - structural documentation for Go packages as JSON

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use godocjson_core::doc::{
    DeclarationDump, ExcludeFilter, FlattenOptions, Package, DEFAULT_PARALLEL_THRESHOLD,
};
use godocjson_core::Flattener;

mod logging;

#[derive(Parser, Debug)]
#[command(name = "godocjson")]
#[command(version = godocjson_core::VERSION)]
#[command(
    about = "Flatten the documentation of a Go package into JSON",
    long_about = None
)]
struct Cli {
    /// Declaration dump produced by the Go parser, or `-` for stdin
    input: PathBuf,

    /// Regular expression; files whose base name matches are ignored
    #[arg(short, long, env = "GODOCJSON_EXCLUDE", default_value = "")]
    exclude: String,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Convert declaration lists longer than this in parallel
    #[arg(long, env = "GODOCJSON_PARALLEL_THRESHOLD", default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions::new().with_parallel_threshold(self.parallel_threshold)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match flatten_input(&cli)? {
        Some(package) => write_output(&cli, &package),
        None => {
            tracing::warn!(input = %cli.input.display(), "no package found, nothing to write");
            Ok(())
        }
    }
}

/// Read the dump named on the command line and flatten its package
fn flatten_input(cli: &Cli) -> Result<Option<Package>> {
    let text = read_input(cli)?;
    let dump = DeclarationDump::from_json(&text)
        .with_context(|| format!("Failed to decode declaration dump '{}'", cli.input.display()))?;
    tracing::debug!(
        files = dump.file_set.files.len(),
        packages = dump.packages.len(),
        "loaded declaration dump"
    );

    let (file_set, package) = dump.into_single_package()?;
    let Some(mut package) = package else {
        return Ok(None);
    };

    if let Some(filter) = ExcludeFilter::new(&cli.exclude)? {
        filter.prune(&mut package, &file_set)?;
    }

    let flattened = Flattener::flatten_with_options(&package, &file_set, cli.flatten_options())
        .with_context(|| format!("Failed to flatten package '{}'", package.name))?;
    Ok(Some(flattened))
}

fn read_input(cli: &Cli) -> Result<String> {
    if cli.reads_stdin() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(&cli.input)
            .with_context(|| format!("Failed to read '{}'", cli.input.display()))
    }
}

fn render(package: &Package, compact: bool) -> Result<String> {
    let mut json = if compact {
        serde_json::to_string(package)
    } else {
        serde_json::to_string_pretty(package)
    }
    .context("Failed to encode package")?;
    json.push('\n');
    Ok(json)
}

fn write_output(cli: &Cli, package: &Package) -> Result<()> {
    let json = render(package, cli.compact)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            tracing::debug!(output = %path.display(), "wrote package");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
