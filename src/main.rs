use std::path::PathBuf;
use std::process::{Command, ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gosince::config::{self, Config};
use gosince::lookup::{Lookup, Query, resolve};
use gosince::versiondb::{CachedSource, SymbolInfo, VersionDb};

const ADDED_IN: &str = "added in";
const DEPRECATED_IN: &str = "and deprecated in";

#[derive(Parser)]
#[command(name = "gosince")]
#[command(
    version,
    about = "Shows the introducing version of a Go package or symbol",
    after_help = "Usage forms:\n  gosince <pkg>\n  gosince <sym>\n  gosince <pkg>.<sym>[.<methodOrField>]\n  gosince <pkg> <sym>[.<methodOrField>]"
)]
struct Cli {
    /// Package, symbol or `pkg.symbol` expression
    expr: String,

    /// Symbol of the package given as first argument
    symbol: Option<String>,

    /// Local path to cache the retrieved api information
    #[arg(short = 'p', long, default_value_os_t = config::cache_path())]
    cache_path: PathBuf,

    /// Location of Go source
    #[arg(short = 'a', long = "source-addr", default_value_t = config::source_url())]
    source_url: String,

    /// Call go doc command
    #[arg(short = 'd', long)]
    go_doc: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config {
        cache_path: cli.cache_path.clone(),
        source_url: cli.source_url.clone(),
        verbose: cli.verbose,
    };
    init_tracing(&config);

    info!("Use the repository {:?} as local cache", config.cache_path);
    info!("Use the url {} as base to download api information", config.source_url);

    let source = CachedSource::from_config(&config)?;
    let db = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(VersionDb::load(&source))
        .context("failed to load Go api information")?;

    let query = Query::parse(&cli.expr, cli.symbol.as_deref());
    let lookup = resolve(&db, &query);

    if cli.json {
        print_json(&lookup)?;
    } else {
        print_text(&lookup);
    }

    let doc_args: Vec<String> = match &lookup {
        Lookup::Exact(_) => std::iter::once(cli.expr.clone())
            .chain(cli.symbol.clone())
            .collect(),
        Lookup::Matches(hits) if hits.len() == 1 => {
            hits[0].name.split(' ').map(str::to_string).collect()
        }
        Lookup::Matches(_) => Vec::new(),
        Lookup::NotFound(_) => return Ok(ExitCode::FAILURE),
    };

    if cli.go_doc && !doc_args.is_empty() {
        run_go_doc(&doc_args)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn describe(info: &SymbolInfo) -> String {
    match info.deprecated {
        Some(deprecated) => format!("{ADDED_IN} {} {DEPRECATED_IN} {deprecated}", info.since),
        None => format!("{ADDED_IN} {}", info.since),
    }
}

fn print_text(lookup: &Lookup) {
    match lookup {
        Lookup::Exact(info) => println!("{}", describe(info)),
        Lookup::Matches(hits) if hits.len() == 1 => {
            println!("found {} {}", hits[0].name, describe(&hits[0].info));
        }
        Lookup::Matches(hits) => {
            println!("Several possibilities found :");
            for hit in hits {
                println!("{} {}", hit.name, describe(&hit.info));
            }
        }
        Lookup::NotFound(error) => println!("{error}"),
    }
}

fn print_json(lookup: &Lookup) -> anyhow::Result<()> {
    let value = match lookup {
        Lookup::Exact(info) => serde_json::to_value(info)?,
        Lookup::Matches(hits) => serde_json::to_value(hits)?,
        Lookup::NotFound(error) => serde_json::json!({ "error": error.to_string() }),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn run_go_doc(args: &[String]) -> anyhow::Result<()> {
    let status = Command::new("go")
        .arg("doc")
        .args(args)
        .status()
        .context("failed to run go doc")?;

    if !status.success() {
        anyhow::bail!("go doc exited with {status}");
    }
    Ok(())
}
