use anyhow::{bail, Context, Result};
use ariadne::builder::GraphBuilder;
use ariadne::excerpt::ExcerptFetcher;
use ariadne::linkset::{HttpPageFetcher, PaginatedQueryRunner, RunnerConfig};
use ariadne::resolver::{GeoNamesClient, RegionResolver};
use ariadne::schema::CoveragePolicy;
use ariadne::sheet;
use ariadne::sources::{self, IngestOptions, RegionMode, SheetConfig};
use ariadne::stats::IngestStats;
use ariadne::store::{self, NQuadsFileSink, QuadSink};
use ariadne::vocab::graphs;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ariadne")]
#[command(about = "Map damage-site sheets to RDF and link them to earlier damage events")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map one sheet's CSV export into an N-Quads file
    Ingest(IngestArgs),
    /// Page through the remote linking query and collect its results
    Linkset(LinksetArgs),
    /// Download the GeoNames excerpt for a set of region names
    Excerpt(ExcerptArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetKind {
    /// The UNESCO-verified damage sheet
    Unesco,
    /// The Science-at-Risk damage sheet
    ScienceAtRisk,
}

#[derive(Args)]
struct IngestArgs {
    /// Path to the sheet's CSV export
    #[arg(short, long)]
    input: String,

    /// Output N-Quads file
    #[arg(short, long)]
    output: String,

    /// Which sheet configuration to apply
    #[arg(long, value_enum)]
    sheet: SheetKind,

    /// Require every configured column to appear in the sheet
    #[arg(long)]
    exact_columns: bool,

    /// Warn about coordinates outside Ukraine
    #[arg(long)]
    check_bounds: bool,

    /// Resolve region names against GeoNames (needs GEONAMES_USERNAME)
    /// instead of minting local slug identifiers
    #[arg(long)]
    resolve_regions: bool,
}

#[derive(Args)]
struct LinksetArgs {
    /// Run link (URL) of the saved linking query
    #[arg(long, required_unless_present = "print_query")]
    endpoint: Option<String>,

    /// Output N-Quads file
    #[arg(short, long, required_unless_present = "print_query")]
    output: Option<String>,

    /// Initial page size; it adapts from there
    #[arg(long, default_value_t = ariadne::config::INITIAL_PAGE_SIZE)]
    page_size: u32,

    /// Give up after this many consecutive timeouts (default: keep trying)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Bearer token for the endpoint (falls back to LINKSET_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Print the CONSTRUCT query the remote saved query should run, then exit
    #[arg(long)]
    print_query: bool,
}

#[derive(Args)]
struct ExcerptArgs {
    /// Region name to resolve and include; repeatable
    #[arg(long = "region")]
    regions: Vec<String>,

    /// Output N-Quads file
    #[arg(short, long)]
    output: String,
}

fn ensure_parent_dir(output: &str) -> Result<()> {
    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {parent:?}"))?;
        }
    }
    Ok(())
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("ariadne-worker")
        .enable_io()
        .enable_time()
        .build()
        .context("Failed to build tokio runtime")
}

fn run_ingest(args: IngestArgs) -> Result<()> {
    ensure_parent_dir(&args.output)?;

    let options = IngestOptions {
        regions: if args.resolve_regions {
            RegionMode::Authority
        } else {
            RegionMode::Slug
        },
        check_bounds: args.check_bounds,
    };
    let config: SheetConfig = match args.sheet {
        SheetKind::Unesco => sources::unesco(&options),
        SheetKind::ScienceAtRisk => sources::science_at_risk(&options),
    };
    let policy = if args.exact_columns {
        CoveragePolicy::Exact
    } else {
        CoveragePolicy::Subset
    };

    let resolver = if args.resolve_regions {
        if std::env::var("GEONAMES_USERNAME").is_err() {
            bail!("GEONAMES_USERNAME must be set when --resolve-regions is used");
        }
        Some(RegionResolver::new(Box::new(GeoNamesClient::from_env())))
    } else {
        None
    };

    let start = Instant::now();
    let rows = sheet::read_rows(Path::new(&args.input), &config.registry, policy)
        .with_context(|| format!("Failed to read sheet: {}", args.input))?;

    let stats = IngestStats::new();
    let rt = build_runtime()?;
    let quads = rt.block_on(async {
        GraphBuilder::new(&config, resolver.as_ref(), &stats)
            .build(&rows)
            .await
    })?;

    let mut sink = NQuadsFileSink::new(&args.output);
    sink.import(&quads)?;
    let elapsed = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!("Sheet:              {}", config.name);
    println!("Mapping time:       {:.2}s", elapsed.as_secs_f64());
    println!();
    println!("Rows processed:     {}", stats.rows());
    println!("Quads emitted:      {}", stats.quads());
    println!("Cells skipped:      {}", stats.skipped());
    if let Some(ref resolver) = resolver {
        println!("Region lookups:     {}", resolver.lookups_performed());
        println!("Region cache hits:  {}", resolver.cache_hits());
    }
    println!("Output:             {}", args.output);

    Ok(())
}

fn run_linkset(args: LinksetArgs) -> Result<()> {
    if args.print_query {
        println!("{}", ariadne::linkset::LINKSET_QUERY);
        return Ok(());
    }
    // Both are required unless --print-query short-circuited above.
    let endpoint = args.endpoint.expect("endpoint is required");
    let output = args.output.expect("output is required");

    ensure_parent_dir(&output)?;

    let token = args.token.or_else(|| std::env::var("LINKSET_TOKEN").ok());
    if token.is_none() {
        info!("no bearer token configured, querying anonymously");
    }

    let fetcher = HttpPageFetcher::new(&endpoint, token);
    let config = RunnerConfig {
        initial_page_size: args.page_size,
        max_retries: args.max_retries,
        target_graph: graphs::LINKSET.into_owned(),
    };
    let runner = PaginatedQueryRunner::new(Box::new(fetcher), config);

    let start = Instant::now();
    let rt = build_runtime()?;
    let (quads, report) = rt
        .block_on(runner.run())
        .context("Linkset retrieval failed")?;
    store::write_nquads(Path::new(&output), &quads)?;
    let elapsed = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!("Retrieval time:     {:.2}s", elapsed.as_secs_f64());
    println!();
    println!("Pages fetched:      {}", report.pages);
    println!("Quads collected:    {}", report.quads);
    println!("Timeout retries:    {}", report.timeouts);
    println!("Output:             {output}");

    Ok(())
}

fn run_excerpt(args: ExcerptArgs) -> Result<()> {
    ensure_parent_dir(&args.output)?;

    if !args.regions.is_empty() && std::env::var("GEONAMES_USERNAME").is_err() {
        bail!("GEONAMES_USERNAME must be set to resolve region names");
    }

    let start = Instant::now();
    let rt = build_runtime()?;
    let quads = rt.block_on(async {
        let resolver = RegionResolver::new(Box::new(GeoNamesClient::from_env()));
        let mut resolved = Vec::new();
        for name in &args.regions {
            resolved.push(resolver.resolve(name).await?);
        }
        let fetcher = ExcerptFetcher::new(ariadne::config::GEONAMES_RDF_BASE);
        fetcher.fetch_all(&resolved).await
    })?;
    store::write_nquads(Path::new(&args.output), &quads)?;
    let elapsed = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!("Download time:      {:.2}s", elapsed.as_secs_f64());
    println!();
    println!("Regions resolved:   {}", args.regions.len());
    println!("Quads collected:    {}", quads.len());
    println!("Output:             {}", args.output);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Ingest(args) => run_ingest(args),
        Commands::Linkset(args) => run_linkset(args),
        Commands::Excerpt(args) => run_excerpt(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
