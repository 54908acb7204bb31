use threebody::export::{append_run_record, export_positions, save_frame, RunRecord};
use threebody::{GlyphKind, SimulationConfig, SimulationLoop};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Headless three-body gravity simulation")]
struct Args {
    /// JSON configuration; defaults are used for anything it leaves out
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 2000)]
    ticks: u64,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long, default_value = "run_output")]
    out: PathBuf,
    /// Draw bodies as oriented ships instead of glows
    #[arg(long)]
    ship: bool,
    #[arg(long)]
    hide_reference: bool,
    #[arg(long, default_value = "")]
    notes: String,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.ship {
        config.glyph = GlyphKind::Ship;
    }
    if args.hide_reference {
        config.show_reference = false;
    }
    config.record_history = true;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut sim = SimulationLoop::new(config)?;
    sim.initialize()?;

    let pb = ProgressBar::new(args.ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    for tick in 0..args.ticks {
        if tick % 100 == 0 {
            pb.set_position(tick);
        }
        sim.tick();
    }
    pb.finish_with_message("Simulation complete");
    let elapsed = start.elapsed().as_secs_f64();

    fs::create_dir_all(&args.out)
        .with_context(|| format!("cannot create {}", args.out.display()))?;

    save_frame(sim.screen(), &args.out.join("frame.png"))?;
    if let Some(trajectory) = sim.trajectory() {
        let masses: Vec<f64> = sim.bodies().iter().map(|b| b.mass).collect();
        export_positions(trajectory, &masses, &args.out, "run")?;
    }
    let record = RunRecord::from_run(&sim, elapsed, &args.notes)?;
    append_run_record(&args.out.join("runs.csv"), &record)?;

    if let Some(drift) = sim.monitor().and_then(|m| m.latest_drift()) {
        log::info!(
            "{} ticks in {:.2}s, relative energy drift {:.3e}",
            sim.frame(),
            elapsed,
            drift
        );
    }
    for body in sim.bodies() {
        log::info!("{}", body);
    }

    Ok(())
}
