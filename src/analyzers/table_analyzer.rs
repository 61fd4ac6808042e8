use crate::models::{Category, TrackTable};
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct TableStatistics {
    pub total_points: usize,
    pub unique_storms: usize,
    pub season_span: Option<(i32, i32)>,
    pub time_span: Option<(NaiveDateTime, NaiveDateTime)>,
    pub basins: Vec<String>,
    pub data_quality: DataQuality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataQuality {
    pub total_points: usize,
    pub missing_wind: usize,
    pub missing_pressure: usize,
    pub unspecified_category: usize,
    /// Storms whose rows are not stored in chronological order
    pub unordered_tracks: usize,
}

impl DataQuality {
    pub fn missing_wind_percentage(&self) -> f64 {
        percentage(self.missing_wind, self.total_points)
    }

    pub fn missing_pressure_percentage(&self) -> f64 {
        percentage(self.missing_pressure, self.total_points)
    }

    pub fn unspecified_category_percentage(&self) -> f64 {
        percentage(self.unspecified_category, self.total_points)
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

pub struct TableAnalyzer;

impl TableAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, table: &TrackTable) -> TableStatistics {
        let mut last_seen: HashMap<(&str, i32, &str), NaiveDateTime> = HashMap::new();
        let mut unordered: HashSet<(&str, i32, &str)> = HashSet::new();
        let mut time_span: Option<(NaiveDateTime, NaiveDateTime)> = None;

        let mut missing_wind = 0;
        let mut missing_pressure = 0;
        let mut unspecified_category = 0;

        for point in table.points() {
            let key = point.storm_key();
            if let Some(previous) = last_seen.insert(key, point.iso_time) {
                if point.iso_time < previous {
                    unordered.insert(key);
                }
            }

            let t = point.iso_time;
            time_span = Some(match time_span {
                Some((first, last)) => (first.min(t), last.max(t)),
                None => (t, t),
            });

            if point.wind_speed.is_none() {
                missing_wind += 1;
            }
            if point.pressure.is_none() {
                missing_pressure += 1;
            }
            if point.category() == Category::Unspecified {
                unspecified_category += 1;
            }
        }

        TableStatistics {
            total_points: table.len(),
            unique_storms: last_seen.len(),
            season_span: table.season_span(),
            time_span,
            basins: table.basins().to_vec(),
            data_quality: DataQuality {
                total_points: table.len(),
                missing_wind,
                missing_pressure,
                unspecified_category,
                unordered_tracks: unordered.len(),
            },
        }
    }
}

impl Default for TableAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStatistics {
    pub fn summary(&self) -> String {
        let seasons = match self.season_span {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "none".to_string(),
        };
        let observed = match self.time_span {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "none".to_string(),
        };

        format!(
            "Track points: {}\n\
            Storms: {}\n\
            Seasons: {}\n\
            Observed: {}\n\
            Basins: {}\n\
            Data Quality: {:.1}% missing wind, {:.1}% missing pressure, {:.1}% unspecified category\n\
            Tracks stored out of time order: {}",
            self.total_points,
            self.unique_storms,
            seasons,
            observed,
            self.basins.join(", "),
            self.data_quality.missing_wind_percentage(),
            self.data_quality.missing_pressure_percentage(),
            self.data_quality.unspecified_category_percentage(),
            self.data_quality.unordered_tracks
        )
    }
}
