pub mod analyzers;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{IbtracsError, Result};
pub use models::{Category, TrackPoint, TrackTable};
pub use processors::{DateRange, PeakWind, TrackQuery};
pub use readers::load;
pub use settings::Settings;
