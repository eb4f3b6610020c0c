// src/main.rs
mod cv;
mod extractors;
mod graph;
mod profile;
mod report;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cv::YearWindow;
use graph::{CollaborationGraph, ForceLayout, LayoutConfig};
use report::presentation::{AREA_PALETTE, BROAD_AREA_PALETTE, SUB_AREA_PALETTE};
use report::{network_primitives, word_cloud, BatchSummary};
use storage::{LoadFailure, RunMetadata, StorageManager, WordClouds};
use utils::AppError;

/// Command Line Interface for the Lattes CV profiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CV text files, or directories whose *.txt files are analysed
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// First year (inclusive) of the publication window
    #[arg(long)]
    start_year: i32,

    /// Last year (inclusive) of the publication window
    #[arg(long)]
    end_year: i32,

    /// Output directory for profiles, summary and network files
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Layout simulation ticks (default: LAYOUT_TICKS or 300)
    #[arg(long)]
    ticks: Option<usize>,

    /// Layout canvas width
    #[arg(long, default_value_t = graph::layout::DEFAULT_WIDTH)]
    width: f64,

    /// Layout canvas height
    #[arg(long, default_value_t = graph::layout::DEFAULT_HEIGHT)]
    height: f64,

    /// Seed for layout jitter and word cloud rotation (default: derived from the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Debug mode - save per-document extraction dumps
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments and set up logging (RUST_LOG wins over --debug)
    let args = Args::parse();
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting analysis for args: {:?}", args);

    // 2. Validate the window before touching any input
    let window = YearWindow::new(args.start_year, args.end_year)?;

    let ticks = resolve_ticks(args.ticks);
    let seed = args
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs());
    tracing::debug!("Layout ticks: {}, seed: {}", ticks, seed);

    // 3. Load every document; failures are reported and skipped
    let paths = cv::loader::expand_inputs(&args.inputs).await?;
    tracing::info!("Loading {} CV documents", paths.len());

    let mut documents = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in paths.iter().zip(cv::loader::load_documents(&paths).await) {
        match result {
            Ok(document) => documents.push(document),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                failures.push(LoadFailure {
                    file: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    if documents.is_empty() {
        return Err(AppError::Processing(format!(
            "None of the {} input documents could be read",
            paths.len()
        )));
    }

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    if args.debug {
        let debug_dir = storage.debug_dir();
        for document in &documents {
            if let Err(e) = utils::debug_dump::save_extraction_dump(document, window, &debug_dir) {
                tracing::warn!("Failed to write extraction dump for {}: {}", document.file_name, e);
            }
        }
    }

    // 5. Extract profiles, then build the batch-wide graph
    let profiles = profile::analyze_batch(&documents, window);
    let graph = CollaborationGraph::from_profiles(&profiles);
    if graph.is_empty() {
        tracing::warn!("No collaborations found in {}-{}", window.start(), window.end());
    }

    let mut layout = ForceLayout::new(
        &graph,
        LayoutConfig {
            width: args.width,
            height: args.height,
            ticks,
            seed,
            ..LayoutConfig::default()
        },
    );
    layout.run();
    tracing::debug!("Layout {:?} after {} ticks", layout.state(), layout.ticks_run());
    let positions = layout.positions()?;
    let drawing = network_primitives(&graph, &positions);

    // 6. Aggregates and word clouds
    let summary = BatchSummary::build(&profiles, &graph);
    let mut rng = StdRng::seed_from_u64(seed);
    let clouds = WordClouds {
        broad: word_cloud(&summary.areas.broad, &BROAD_AREA_PALETTE, &mut rng),
        area: word_cloud(&summary.areas.area, &AREA_PALETTE, &mut rng),
        sub: word_cloud(&summary.areas.sub, &SUB_AREA_PALETTE, &mut rng),
    };

    // 7. Write outputs; one failing file does not stop the others
    let mut storage_failures = 0;
    let outputs = [
        storage.save_profiles(&profiles),
        storage.save_profiles_csv(&profiles),
        storage.save_summary(&summary, &clouds),
        storage.save_network(&graph, &positions, &drawing),
        storage.save_run_metadata(&RunMetadata {
            start_year: window.start(),
            end_year: window.end(),
            documents_requested: paths.len(),
            documents_analyzed: documents.len(),
            failures,
            seed,
            ticks,
            width: args.width,
            height: args.height,
        }),
    ];
    for output in outputs {
        if let Err(e) = output {
            tracing::error!("Failed to save output: {}", e);
            storage_failures += 1;
        }
    }

    tracing::info!(
        "Processing finished. Analyzed: {}, Unreadable: {}, Output failures: {}",
        documents.len(),
        paths.len() - documents.len(),
        storage_failures
    );

    if storage_failures > 0 {
        return Err(AppError::Processing(format!(
            "{} output files could not be written to {}",
            storage_failures,
            storage.base_dir().display()
        )));
    }

    Ok(())
}

/// `--ticks` wins; otherwise `LAYOUT_TICKS` from the environment; otherwise the default.
fn resolve_ticks(cli: Option<usize>) -> usize {
    if let Some(ticks) = cli {
        return ticks;
    }
    match std::env::var("LAYOUT_TICKS") {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid LAYOUT_TICKS value '{}'", value);
            graph::layout::DEFAULT_TICKS
        }),
        Err(_) => graph::layout::DEFAULT_TICKS,
    }
}
