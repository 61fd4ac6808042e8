use crate::error::{IbtracsError, Result};
use crate::models::{Category, TrackPoint, TrackTable};
use crate::processors::peak_wind::{rank_by_peak_wind, PeakWind};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Inclusive timestamp interval; `start <= end` is enforced on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(IbtracsError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// From midnight of `start` through the last instant of `end`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(IbtracsError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Self::new(start_of_day(start), end_of_day(end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time <= self.end
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Calendar bounds of a season plus the span actually observed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonWindow {
    pub min_allowed: NaiveDate,
    pub max_allowed: NaiveDate,
    pub earliest_observed: Option<NaiveDateTime>,
    pub latest_observed: Option<NaiveDateTime>,
}

impl SeasonWindow {
    /// Observed span as a range, when the selection has any data.
    pub fn observed_range(&self) -> Option<DateRange> {
        DateRange::new(self.earliest_observed?, self.latest_observed?).ok()
    }
}

/// A track point with its presentation attributes resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPointView<'a> {
    #[serde(flatten)]
    pub point: &'a TrackPoint,
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub marker_size: f64,
}

impl<'a> TrackPointView<'a> {
    pub fn new(point: &'a TrackPoint) -> Self {
        let category = point.category();
        Self {
            point,
            category,
            label: category.label(),
            color: category.color(),
            marker_size: category.marker_size(),
        }
    }
}

/// All points of one disturbance, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormTrack<'a> {
    pub disturbance_id: &'a str,
    pub name: &'a str,
    pub season: i32,
    pub points: Vec<TrackPointView<'a>>,
}

/// Group points into one track per disturbance id.
///
/// Groups appear in first-seen order; each group is sorted by timestamp.
/// Points of different disturbances are never mixed.
pub fn group_tracks<'a>(points: Vec<TrackPointView<'a>>) -> Vec<StormTrack<'a>> {
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut tracks: Vec<StormTrack<'a>> = Vec::new();

    for view in points {
        let point: &'a TrackPoint = view.point;
        let slot = match slots.get(point.disturbance_id.as_str()) {
            Some(&slot) => slot,
            None => {
                tracks.push(StormTrack {
                    disturbance_id: &point.disturbance_id,
                    name: &point.name,
                    season: point.season,
                    points: Vec::new(),
                });
                slots.insert(&point.disturbance_id, tracks.len() - 1);
                tracks.len() - 1
            }
        };
        tracks[slot].points.push(view);
    }

    for track in &mut tracks {
        track.points.sort_by_key(|v| v.point.iso_time);
    }
    tracks
}

/// Read-only queries over a shared [`TrackTable`].
///
/// Unknown basins, seasons or ids give empty results, never errors.
#[derive(Debug, Clone)]
pub struct TrackQuery {
    table: Arc<TrackTable>,
}

impl TrackQuery {
    pub fn new(table: Arc<TrackTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TrackTable {
        &self.table
    }

    fn selection<'a, 'b>(
        &'a self,
        basin: &'b str,
        season: i32,
    ) -> impl Iterator<Item = &'a TrackPoint> + 'b
    where
        'a: 'b,
    {
        self.table
            .points()
            .iter()
            .filter(move |p| p.season == season && p.basin == basin)
    }

    pub fn date_range_for_selection(&self, basin: &str, season: i32) -> Result<SeasonWindow> {
        let (min_allowed, max_allowed) = NaiveDate::from_ymd_opt(season, 1, 1)
            .zip(NaiveDate::from_ymd_opt(season, 12, 31))
            .ok_or_else(|| {
                IbtracsError::InvalidFormat(format!(
                    "Season {} is outside the supported calendar",
                    season
                ))
            })?;

        let mut earliest_observed: Option<NaiveDateTime> = None;
        let mut latest_observed: Option<NaiveDateTime> = None;
        for point in self.selection(basin, season) {
            let t = point.iso_time;
            earliest_observed = Some(earliest_observed.map_or(t, |e| e.min(t)));
            latest_observed = Some(latest_observed.map_or(t, |l| l.max(t)));
        }

        Ok(SeasonWindow {
            min_allowed,
            max_allowed,
            earliest_observed,
            latest_observed,
        })
    }

    /// Distinct disturbance ids with a point inside `range`, first-seen order.
    pub fn disturbances_in_range(&self, basin: &str, season: i32, range: DateRange) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for point in self
            .selection(basin, season)
            .filter(|p| range.contains(p.iso_time))
        {
            if !ids.iter().any(|id| *id == point.disturbance_id) {
                ids.push(point.disturbance_id.clone());
            }
        }
        debug!(basin, season, count = ids.len(), "disturbances in range");
        ids
    }

    /// Points of the requested disturbances inside `range`.
    ///
    /// Ordered by the position of the disturbance id in `ids`, then by time.
    pub fn tracks_for<S: AsRef<str>>(
        &self,
        basin: &str,
        season: i32,
        ids: &[S],
        range: DateRange,
    ) -> Vec<TrackPointView<'_>> {
        let mut rank: HashMap<&str, usize> = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            rank.entry(id.as_ref()).or_insert(i);
        }

        let mut selected: Vec<(usize, &TrackPoint)> = self
            .selection(basin, season)
            .filter(|p| range.contains(p.iso_time))
            .filter_map(|p| rank.get(p.disturbance_id.as_str()).map(|&r| (r, p)))
            .collect();
        selected.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.iso_time.cmp(&b.1.iso_time)));

        debug!(basin, season, points = selected.len(), "tracks selected");
        selected
            .into_iter()
            .map(|(_, p)| TrackPointView::new(p))
            .collect()
    }

    /// [`Self::tracks_for`] grouped into one track per disturbance.
    pub fn tracks_grouped<S: AsRef<str>>(
        &self,
        basin: &str,
        season: i32,
        ids: &[S],
        range: DateRange,
    ) -> Vec<StormTrack<'_>> {
        group_tracks(self.tracks_for(basin, season, ids, range))
    }

    /// Every disturbance named `name` in the basin and season.
    pub fn tracks_for_storm(&self, basin: &str, season: i32, name: &str) -> Vec<StormTrack<'_>> {
        let points = self
            .selection(basin, season)
            .filter(|p| p.name == name)
            .map(TrackPointView::new)
            .collect();
        group_tracks(points)
    }

    /// Strongest storms by peak wind over an inclusive season range.
    pub fn top_by_peak_wind(
        &self,
        basin: &str,
        season_start: i32,
        season_end: i32,
        limit: usize,
    ) -> Result<Vec<PeakWind>> {
        if season_start > season_end {
            return Err(IbtracsError::InvalidRange {
                start: season_start.to_string(),
                end: season_end.to_string(),
            });
        }

        let points = self
            .table
            .points()
            .iter()
            .filter(|p| p.basin == basin && (season_start..=season_end).contains(&p.season));
        let ranked = rank_by_peak_wind(points, limit);

        debug!(basin, season_start, season_end, count = ranked.len(), "peak wind ranking");
        Ok(ranked)
    }
}
