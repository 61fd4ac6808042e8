pub mod dataset_loader;
pub mod downloader;
pub mod track_reader;

pub use dataset_loader::DatasetLoader;
pub use downloader::{Downloader, FetchOutcome};
pub use track_reader::TrackReader;

use crate::error::Result;
use crate::models::TrackTable;
use std::path::Path;
use std::sync::Arc;

/// Fetch `url` into `path` if needed and load the table with default options.
pub fn load(path: &Path, url: &str) -> Result<Arc<TrackTable>> {
    DatasetLoader::new(url).load(path, None)
}
