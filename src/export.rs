use crate::error::Result;
use crate::gravity::ForceLaw;
use crate::simulation::{SimulationLoop, Trajectory};
use crate::surface::Surface;
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

/// One row of the run log.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub date: String,
    pub bodies: usize,
    pub gravitational_constant: f64,
    pub force_law: String,
    pub ticks: u64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub std_energy: f64,
    pub energy_thresholds: String,
    pub execution_duration: f64,
    pub notes: String,
}

impl RunRecord {
    pub fn from_run(sim: &SimulationLoop, execution_duration: f64, notes: &str) -> Result<Self> {
        let config = sim.config();
        let (initial_energy, final_energy, std_energy, crossings) = match sim.monitor() {
            Some(m) => (
                m.initial_energy(),
                m.latest().unwrap_or(m.initial_energy()),
                m.std_dev(),
                m.crossings(),
            ),
            None => (0.0, 0.0, 0.0, Vec::new()),
        };
        let force_law = match config.force_law {
            ForceLaw::Product => "product",
            ForceLaw::Newtonian => "newtonian",
        };
        Ok(Self {
            date: Utc::now().to_rfc3339(),
            bodies: sim.bodies().len(),
            gravitational_constant: config.g,
            force_law: force_law.to_string(),
            ticks: sim.frame(),
            initial_energy,
            final_energy,
            std_energy,
            energy_thresholds: serde_json::to_string(&crossings)?,
            execution_duration,
            notes: notes.to_string(),
        })
    }
}

/// Append `record` to the CSV at `path`, writing the header only when the
/// file does not exist yet.
pub fn append_run_record(path: &Path, record: &RunRecord) -> Result<()> {
    let file_exists = path.exists();
    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

/// Write `<label>_positions.csv` and `<label>_metadata.csv` into `dir`.
pub fn export_positions(
    trajectory: &Trajectory,
    masses: &[f64],
    dir: &Path,
    label: &str,
) -> Result<()> {
    let positions_path = dir.join(format!("{}_positions.csv", label));
    let metadata_path = dir.join(format!("{}_metadata.csv", label));

    let mut wtr_meta = csv::Writer::from_path(metadata_path)?;
    wtr_meta.write_record(["body_id", "mass"])?;
    for (i, mass) in masses.iter().enumerate() {
        wtr_meta.write_record(&[i.to_string(), mass.to_string()])?;
    }
    wtr_meta.flush()?;

    let mut wtr_pos = csv::Writer::from_path(positions_path)?;
    wtr_pos.write_record(["body_id", "tick", "x", "y"])?;
    for (i, positions) in trajectory.positions.iter().enumerate() {
        for (tick, pos) in positions.iter().enumerate() {
            wtr_pos.write_record(&[
                i.to_string(),
                (tick + 1).to_string(),
                pos.x.to_string(),
                pos.y.to_string(),
            ])?;
        }
    }
    wtr_pos.flush()?;

    Ok(())
}

/// Encode a surface as PNG.
pub fn save_frame(surface: &Surface, path: &Path) -> Result<()> {
    surface.image().save(path)?;
    Ok(())
}
