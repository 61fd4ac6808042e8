use crate::error::Result;
use crate::models::TrackTable;
use crate::readers::{Downloader, FetchOutcome, TrackReader};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Download-if-needed followed by a full parse of the track file.
pub struct DatasetLoader {
    source_url: String,
    require_atcf_id: bool,
    verify_remote_size: bool,
    offline: bool,
}

impl DatasetLoader {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            require_atcf_id: true,
            verify_remote_size: true,
            offline: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.source_url.clone())
            .with_require_atcf_id(settings.require_atcf_id)
            .with_verify_remote_size(settings.verify_remote_size)
    }

    pub fn with_require_atcf_id(mut self, require_atcf_id: bool) -> Self {
        self.require_atcf_id = require_atcf_id;
        self
    }

    pub fn with_verify_remote_size(mut self, verify_remote_size: bool) -> Self {
        self.verify_remote_size = verify_remote_size;
        self
    }

    /// Never touch the network; the local file must already exist.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Make sure the local file is present and current, without parsing it
    pub fn fetch(&self, path: &Path, progress: Option<&ProgressReporter>) -> Result<FetchOutcome> {
        if self.offline {
            return Ok(FetchOutcome::KeptLocal);
        }
        let downloader = Downloader::new(self.source_url.clone())?
            .with_verify_remote_size(self.verify_remote_size);
        debug!(url = downloader.url(), path = %path.display(), "checking track file");
        downloader.ensure_local(path, progress)
    }

    pub fn load(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Arc<TrackTable>> {
        let outcome = self.fetch(path, progress)?;
        info!(?outcome, path = %path.display(), "track file ready");

        if let Some(p) = progress {
            p.set_message("Parsing track file...");
        }

        let table = TrackReader::new()
            .with_require_atcf_id(self.require_atcf_id)
            .read_table(path)?;

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Loaded {} track points across {} seasons",
                table.len(),
                table.seasons().len()
            ));
        }

        Ok(Arc::new(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IbtracsError;
    use tempfile::TempDir;

    #[test]
    fn test_offline_load_of_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let loader = DatasetLoader::new("http://127.0.0.1:9/tracks.csv").with_offline(true);

        let err = loader.load(&dir.path().join("missing.csv"), None).unwrap_err();

        assert!(matches!(err, IbtracsError::Io(_)));
        assert!(err.is_load_error());
    }

    #[test]
    fn test_fetch_keeps_existing_file_without_size_check() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("tracks.csv");
        std::fs::write(&path, "SID\n")?;

        let outcome = DatasetLoader::new("http://127.0.0.1:9/tracks.csv")
            .with_verify_remote_size(false)
            .fetch(&path, None)?;

        assert_eq!(outcome, FetchOutcome::UpToDate);
        Ok(())
    }

    #[test]
    fn test_offline_load_reads_local_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("tracks.csv");
        std::fs::write(
            &path,
            "SID,SEASON,NUMBER,BASIN,SUBBASIN,NAME,ISO_TIME,NATURE,LAT,LON,USA_ATCF_ID,USA_WIND,USA_PRES,USA_SSHS\n\
             ,Year,,,,,,,degrees_north,degrees_east,,kts,mb,1\n\
             S1,2020,1,NA,MM,ARTHUR,2020-05-16 18:00:00,TS,28.0,-78.7,AL012020,30,1009,-1\n",
        )?;

        let table = DatasetLoader::new("http://127.0.0.1:9/tracks.csv")
            .with_offline(true)
            .load(&path, None)?;

        assert_eq!(table.len(), 1);
        assert_eq!(table.seasons(), &[2020]);
        Ok(())
    }
}
