mod app;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use doi_explorer::config::ExplorerConfig;
use doi_explorer::dataset::load_dataset;
use doi_explorer::graph::Graph;
use doi_explorer::interest::WeightSet;
use doi_explorer::session::Session;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Dataset JSON with `vertexArchetypes`, `vertices` and `edges`.
    dataset: PathBuf,
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    /// Iterations for headless export.
    #[arg(long)]
    iterations: Option<usize>,
    /// Seed for the initial random placement.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    weights: Option<WeightSet>,
    /// Vertex id to focus on start.
    #[arg(long)]
    focus: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Run the layout headless and write a JSON snapshot (`-` for stdout).
    #[arg(long)]
    export: Option<PathBuf>,
}

impl Args {
    fn apply_to(&self, config: &mut ExplorerConfig) {
        if let Some(width) = self.width {
            config.layout.width = width;
        }
        if let Some(height) = self.height {
            config.layout.height = height;
        }
        if let Some(iterations) = self.iterations {
            config.layout.iterations = Some(iterations);
        }
        if let Some(seed) = self.seed {
            config.layout.seed = Some(seed);
        }
        if let Some(weights) = self.weights {
            config.interest.weights = weights;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    args.apply_to(&mut config);

    let dataset = load_dataset(&args.dataset)?;
    let graph = Graph::from_dataset(dataset, &config.dataset);
    let mut session = Session::new(graph, &config);
    if let Some(query) = &args.search {
        session.set_search(query);
    }
    if let Some(focus) = &args.focus {
        session.set_focus(Some(focus));
    }
    session.refresh_scores();

    if let Some(target) = &args.export {
        return export(&mut session, target);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "doi-explorer",
        options,
        Box::new(move |cc| Ok(Box::new(app::ExplorerApp::new(cc, session, &config)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}

fn export(session: &mut Session, target: &Path) -> Result<()> {
    session.run_configured();
    if let Some(focus) = session.focus().map(str::to_owned) {
        session.highlight_nodes(&[focus.as_str()]);
    }
    let snapshot = session.snapshot();

    if target == Path::new("-") {
        snapshot.write_json(io::stdout().lock())
    } else {
        let file = File::create(target)
            .with_context(|| format!("failed to create {}", target.display()))?;
        snapshot.write_json(BufWriter::new(file))?;
        info!("wrote snapshot to {}", target.display());
        Ok(())
    }
}
