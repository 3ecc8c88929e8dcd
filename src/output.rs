//! Trajectory export for external renderers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::trajectory::Trajectories;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Guess from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// One CSV row: position of one body after one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub step: usize,
    pub time: f64,
    pub body: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTrack {
    pub name: String,
    pub color: String,
    pub positions: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDocument {
    /// Model time before the first recorded step.
    #[serde(default)]
    pub start_time: f64,
    pub dt: f64,
    pub steps: usize,
    pub bodies: Vec<BodyTrack>,
}

impl From<&Trajectories> for TrajectoryDocument {
    fn from(t: &Trajectories) -> Self {
        TrajectoryDocument {
            start_time: t.start_time(),
            dt: t.dt(),
            steps: t.steps(),
            bodies: t
                .iter()
                .map(|(name, color, path)| BodyTrack {
                    name: name.to_string(),
                    color: color.to_string(),
                    positions: path.iter().map(|p| [p.x, p.y, p.z]).collect(),
                })
                .collect(),
        }
    }
}

/// Rows ordered by step, then by body within a step. Steps are 1-based.
pub fn write_csv<W: Write>(trajectories: &Trajectories, writer: W) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for k in 0..trajectories.steps() {
        for (name, _, path) in trajectories.iter() {
            let p = path[k];
            wtr.serialize(TrajectoryRow {
                step: k + 1,
                time: trajectories.time_of(k),
                body: name.to_string(),
                x: p.x,
                y: p.y,
                z: p.z,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(trajectories: &Trajectories, writer: W) -> Result<(), SimError> {
    serde_json::to_writer_pretty(writer, &TrajectoryDocument::from(trajectories))?;
    Ok(())
}

pub fn save(trajectories: &Trajectories, path: &Path, format: OutputFormat) -> Result<(), SimError> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(trajectories, &mut writer)?,
        OutputFormat::Json => write_json(trajectories, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}
