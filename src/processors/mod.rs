pub mod peak_wind;
pub mod track_query;

pub use peak_wind::{rank_by_peak_wind, PeakWind};
pub use track_query::{
    group_tracks, DateRange, SeasonWindow, StormTrack, TrackPointView, TrackQuery,
};
