use clap::Parser;
use std::{
    io::{IsTerminal, Read},
    path::PathBuf,
    sync::Arc,
};
use tsgraph::{
    server::{run_server, ServerConfig},
    source::{BlankLines, Format, Source, Unit},
    Config, Error, WidthFallback,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Chart event timestamps as counts over time.
///
/// Reads one timestamp per line from standard input, a file, or two files (to
/// compare two series), and serves the chart on localhost.
#[derive(Parser, Debug)]
#[command(name = "tsgraph")]
#[command(version)]
struct Args {
    /// Files with one timestamp per line (at most 2); reads standard input if none are given
    sources: Vec<PathBuf>,

    /// Parse lines as RFC3339 dates instead of integers
    #[arg(long, env = "TSGRAPH_RFC")]
    rfc: bool,

    /// Unit of integer timestamps
    #[arg(long, value_enum, default_value_t = Unit::Seconds, env = "TSGRAPH_UNIT")]
    unit: Unit,

    /// Ignore blank lines instead of reporting them as parse errors
    #[arg(long)]
    skip_blank: bool,

    /// Amount every timestamp adds to its bucket
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    multiply: u64,

    /// Also chart the last, still incomplete bucket
    #[arg(long)]
    keep_partial: bool,

    /// Bucket width for requests without one (e.g. 5m), instead of inferring it
    #[arg(long, value_name = "DURATION", env = "TSGRAPH_DEFAULT_SAMPLE")]
    default_sample: Option<String>,

    /// Port for the web server, 0 picks a free one
    #[arg(short, long, default_value_t = 0, env = "TSGRAPH_PORT")]
    port: u16,

    /// Don't open the browser automatically
    #[arg(long)]
    no_browser: bool,
}

fn capture_stdin() -> tsgraph::Result<Arc<[u8]>> {
    let mut stdin = std::io::stdin();

    if stdin.is_terminal() {
        log::warn!("no input files and standard input is a terminal, the chart will be empty");
        return Ok(Arc::from(Vec::new()));
    }

    let mut data = vec![];
    stdin.read_to_end(&mut data)?;
    log::debug!("captured {} bytes from standard input", data.len());

    Ok(Arc::from(data))
}

fn build_config(args: &Args) -> tsgraph::Result<Config> {
    if args.sources.len() > 2 {
        return Err(Error::SourceCount(args.sources.len()));
    }

    let format = if args.rfc {
        Format::Rfc3339
    } else {
        Format::Integer(args.unit)
    };

    let fallback = match args.default_sample.as_deref().map(tsgraph::parse_width_strict) {
        Some(Ok(Some(width))) => WidthFallback::Fixed(width),
        Some(Ok(None)) | None => WidthFallback::default(),
        Some(Err(e)) => return Err(e),
    };

    let blank_lines = if args.skip_blank {
        BlankLines::Skip
    } else {
        BlankLines::Reject
    };

    let mut builder = Config::builder()
        .format(format)
        .blank_lines(blank_lines)
        .multiplier(args.multiply)
        .keep_partial(args.keep_partial)
        .fallback(fallback);

    if args.sources.is_empty() {
        builder = builder.source(Source::Captured(capture_stdin()?));
    } else {
        for path in &args.sources {
            builder = builder.source(Source::File(path.clone()));
        }
    }

    builder.build()
}

#[tokio::main]
async fn main() -> tsgraph::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("tsgraph", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    for source in config.sources() {
        log::info!("charting {:?}", source.label());
    }

    let server = ServerConfig {
        port: args.port,
        open_browser: !args.no_browser,
    };

    run_server(config, server).await
}
