use anyhow::{Context, Result, bail};
use clap::Parser;
use docroute::config::RoutingConfig;
use docroute::routing::{RouteReport, RoutingEngine};
use docroute::scene::SceneFile;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (JSON) with documents, annotations and connections
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the scene's column gap
    #[arg(long)]
    column_gap: Option<f64>,

    /// Override the scene's row gap
    #[arg(long)]
    row_gap: Option<f64>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Exit with an error if any connection fails to route
    #[arg(long)]
    strict: bool,

    /// Log each routed connection
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let reports = route_input(args, &input)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };

    match &args.output {
        Some(path) => fs::write(path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    check_strict(&reports, args.strict)
}

/// Parse the scene, apply the command-line gaps and route every connection.
fn route_input(args: &Args, input: &str) -> Result<Vec<RouteReport>> {
    let file = SceneFile::from_json(input)
        .with_context(|| format!("Invalid scene file {}", args.input.display()))?;

    let (scene, config, connections) = file.into_parts();
    scene.validate()?;
    let engine = RoutingEngine::new(apply_overrides(config, args))?;

    let index = scene.index();
    let reports = engine.route_report(&index, &connections);
    tracing::info!(
        connections = reports.len(),
        failed = failed_count(&reports),
        "Routing finished"
    );
    Ok(reports)
}

fn apply_overrides(mut config: RoutingConfig, args: &Args) -> RoutingConfig {
    if let Some(gap) = args.column_gap {
        config.column_gap = gap;
    }
    if let Some(gap) = args.row_gap {
        config.row_gap = gap;
    }
    config
}

fn failed_count(reports: &[RouteReport]) -> usize {
    reports.iter().filter(|r| !r.is_ok()).count()
}

fn check_strict(reports: &[RouteReport], strict: bool) -> Result<()> {
    let failed = failed_count(reports);
    if strict && failed > 0 {
        bail!("{failed} of {} connections could not be routed", reports.len());
    }
    Ok(())
}
