use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use campus_transit_map::data_source::{lint_document, load_document, sample_document};
use campus_transit_map::presentation::{MapView, MarkerAssets, MarkerPalette, parse_route_color};
use campus_transit_map::view::build_scene;
use clap::Parser;
use dotenvy::dotenv;
use itertools::Itertools;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Builds the campus map scene (stop markers, timetables, accessibility points) as JSON
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Stop document to read. The built-in campus data is used when absent.
    #[arg(long, env = "CAMPUS_MAP_DATA")]
    data: Option<PathBuf>,

    /// Where to write the scene. Defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, env = "CAMPUS_MAP_LOG_DIR", default_value = "./logs")]
    log_dir: PathBuf,

    /// Marker color for a route, as ROUTE=COLOR. Can be repeated.
    #[arg(long = "route-color", value_name = "ROUTE=COLOR")]
    route_colors: Vec<String>,

    #[arg(long)]
    zoom: Option<u8>,

    #[arg(long)]
    pretty: bool,

    /// Exit with an error if any stop had to be left off the map
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    _ = dotenv();
    let args = Args::parse();

    // Nothing is listening for tracing events yet
    let _guard = match init_tracing(&args.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("campus_transit_map.log")
        .build(log_dir)
        .with_context(|| format!("couldn't set up log dir {}", log_dir.display()))?;
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    // stdout carries the scene, so the console log goes to stderr
    let console_log = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    Registry::default()
        .with(file_log)
        .with(console_log)
        .with(env_filter)
        .init();

    Ok(guard)
}

fn run(args: Args) -> Result<()> {
    let overrides = args
        .route_colors
        .iter()
        .map(|raw| parse_route_color(raw))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --route-color")?;

    let mut view = MapView::default();
    if let Some(zoom) = args.zoom {
        view.zoom = zoom;
    }

    let document = match &args.data {
        Some(path) => load_document(path)?,
        None => {
            info!("No stop document given, using the built-in campus data");
            sample_document()
        }
    };

    // --route-color wins over colors from the document
    let palette = MarkerPalette::default()
        .with_route_colors(document.route_colors())
        .with_route_colors(overrides);

    let warnings = lint_document(&document);
    if !warnings.is_empty() {
        info!("stop document has {} warnings", warnings.len());
    }

    let scene = build_scene(&document, &palette, view, MarkerAssets::default());

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Couldn't create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if args.pretty {
        serde_json::to_writer_pretty(&mut writer, &scene)
    } else {
        serde_json::to_writer(&mut writer, &scene)
    }
    .context("error writing the scene")?;
    writeln!(writer)?;
    writer.flush()?;

    if args.strict && !scene.skipped.is_empty() {
        bail!(
            "{} stops were left off the map: {}",
            scene.skipped.len(),
            scene.skipped.iter().map(|s| s.id.to_string()).join(", ")
        );
    }

    Ok(())
}
