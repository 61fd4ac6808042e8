use crate::error::{IbtracsError, Result};
use crate::models::sub_basin_name;
use crate::processors::{PeakWind, SeasonWindow, StormTrack};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders query results for the command line.
pub struct ReportWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)
            .map_err(|e| IbtracsError::InvalidFormat(format!("JSON encoding failed: {}", e)))?;
        writeln!(self.out)?;
        Ok(())
    }

    pub fn write_seasons(&mut self, seasons: &[i32]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(seasons),
            OutputFormat::Text => {
                let joined: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
                writeln!(self.out, "Seasons: {}", joined.join(", "))?;
                Ok(())
            }
        }
    }

    pub fn write_window(&mut self, window: &SeasonWindow) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(window),
            OutputFormat::Text => {
                writeln!(
                    self.out,
                    "Allowed: {} to {}",
                    window.min_allowed, window.max_allowed
                )?;
                match (window.earliest_observed, window.latest_observed) {
                    (Some(first), Some(last)) => {
                        writeln!(self.out, "Observed: {} to {}", first, last)?
                    }
                    _ => writeln!(self.out, "Observed: no data for this selection")?,
                }
                Ok(())
            }
        }
    }

    pub fn write_disturbances(&mut self, ids: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(ids),
            OutputFormat::Text => {
                if ids.is_empty() {
                    writeln!(self.out, "No disturbances in range")?;
                } else {
                    writeln!(self.out, "Disturbances: {}", ids.join(", "))?;
                }
                Ok(())
            }
        }
    }

    pub fn write_tracks(&mut self, title: &str, tracks: &[StormTrack<'_>]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(tracks),
            OutputFormat::Text => {
                writeln!(self.out, "{}", title)?;
                if tracks.is_empty() {
                    writeln!(self.out, "No track points for this selection")?;
                }
                for track in tracks {
                    let region = track
                        .points
                        .first()
                        .and_then(|v| sub_basin_name(&v.point.sub_basin))
                        .map(|name| format!(", {}", name))
                        .unwrap_or_default();
                    writeln!(
                        self.out,
                        "\n{} ({}{}) - {} points",
                        track.name,
                        track.disturbance_id,
                        region,
                        track.points.len()
                    )?;
                    for view in &track.points {
                        let p = view.point;
                        writeln!(
                            self.out,
                            "  {}  {:>6.2}, {:>7.2}  {:>5} kt  {:>6} mb  {} [{}]",
                            p.iso_time,
                            p.latitude,
                            p.longitude,
                            optional(p.wind_speed),
                            optional(p.pressure),
                            view.label,
                            view.color
                        )?;
                    }
                }
                Ok(())
            }
        }
    }

    pub fn write_top(&mut self, title: &str, ranked: &[PeakWind]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(ranked),
            OutputFormat::Text => {
                writeln!(self.out, "{}", title)?;
                if ranked.is_empty() {
                    writeln!(self.out, "No storms with wind observations for this selection")?;
                }
                for (i, entry) in ranked.iter().enumerate() {
                    writeln!(
                        self.out,
                        "{:>2}. {} ({} #{}) - {} knots, {}",
                        i + 1,
                        entry.name,
                        entry.season,
                        entry.disturbance_id,
                        entry.peak_wind,
                        entry.category_label()
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn write_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
