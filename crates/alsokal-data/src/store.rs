use std::path::{Path, PathBuf};
use std::sync::Arc;

use alsokal_core::{
    CalendarItem, GoalsConfig, Inquiry, MediaKitConfig, Partnership, Platform, PlatformMetric,
    RevenueEntry, Snapshot,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::DataError;

const PLATFORMS_DIR: &str = "platforms";
const REVENUE_FILE: &str = "revenue/entries.json";
const PARTNERSHIPS_FILE: &str = "partnerships/entries.json";
const CALENDAR_FILE: &str = "calendar/entries.json";
const INQUIRIES_FILE: &str = "inquiries/entries.json";
const GOALS_FILE: &str = "goals/config.json";
const MEDIA_KIT_FILE: &str = "media-kit/config.json";

/// Single-file collections, relative to the data root.
pub const DATA_FILES: [&str; 6] = [
    REVENUE_FILE,
    PARTNERSHIPS_FILE,
    CALENDAR_FILE,
    INQUIRIES_FILE,
    GOALS_FILE,
    MEDIA_KIT_FILE,
];

/// Handle to a data directory. Cheap to clone; clones share the write lock.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

fn io_error(path: &Path, source: std::io::Error) -> DataError {
    DataError::Io {
        path: path.to_path_buf(),
        source,
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| io_error(path, source))?;
    serde_json::from_slice(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` to a sibling temp file, then rename it over `path`.
async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), DataError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| io_error(parent, source))?;
    }

    let payload = serde_json::to_vec_pretty(value).map_err(|source| DataError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, payload)
        .await
        .map_err(|source| io_error(&temp_path, source))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|source| io_error(path, source))
}

impl DataStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Verify the data root exists and is a listable directory.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotADirectory`] when the root is a file, or
    /// [`DataError::Io`] when it cannot be inspected.
    pub async fn health_check(&self) -> Result<(), DataError> {
        let meta = tokio::fs::metadata(&self.root)
            .await
            .map_err(|source| io_error(&self.root, source))?;
        if !meta.is_dir() {
            return Err(DataError::NotADirectory(self.root.clone()));
        }
        tokio::fs::read_dir(&self.root)
            .await
            .map_err(|source| io_error(&self.root, source))?;
        Ok(())
    }

    async fn read_file<T: DeserializeOwned>(&self, relative: &str) -> Result<T, DataError> {
        read_json(&self.root.join(relative)).await
    }

    async fn read_or_default<T: DeserializeOwned + Default>(&self, relative: &str) -> T {
        match self.read_file(relative).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => {
                tracing::debug!(file = relative, "data file missing, using defaults");
                T::default()
            }
            Err(e) => {
                tracing::warn!(file = relative, error = %e, "unreadable data file, using defaults");
                T::default()
            }
        }
    }

    /// `platforms/*.json`, sorted by file name.
    async fn platform_files(&self) -> Result<Vec<PathBuf>, DataError> {
        let dir = self.root.join(PLATFORMS_DIR);
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|source| io_error(&dir, source))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| io_error(&dir, source))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Every platform file in file-name order. Malformed files are skipped
    /// individually.
    pub async fn load_platforms(&self) -> Vec<PlatformMetric> {
        let files = match self.platform_files().await {
            Ok(files) => files,
            Err(e) => {
                tracing::debug!(error = %e, "no platform metrics available");
                return Vec::new();
            }
        };

        let mut metrics = Vec::with_capacity(files.len());
        for path in files {
            match read_json(&path).await {
                Ok(metric) => metrics.push(metric),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable platform file");
                }
            }
        }
        metrics
    }

    /// # Errors
    ///
    /// Fails on the first unreadable or malformed platform file, or when the
    /// platforms directory cannot be listed.
    pub async fn try_load_platforms(&self) -> Result<Vec<PlatformMetric>, DataError> {
        let mut metrics = Vec::new();
        for path in self.platform_files().await? {
            metrics.push(read_json(&path).await?);
        }
        Ok(metrics)
    }

    /// The metrics file for one platform, if present and well-formed.
    pub async fn load_platform(&self, platform: Platform) -> Option<PlatformMetric> {
        let relative = format!("{PLATFORMS_DIR}/{platform}.json");
        match self.read_file(&relative).await {
            Ok(metric) => Some(metric),
            Err(e) => {
                tracing::debug!(%platform, error = %e, "platform metrics unavailable");
                None
            }
        }
    }

    pub async fn load_revenue(&self) -> Vec<RevenueEntry> {
        self.read_or_default(REVENUE_FILE).await
    }

    /// # Errors
    ///
    /// Returns [`DataError`] when the revenue file is missing or malformed.
    pub async fn try_load_revenue(&self) -> Result<Vec<RevenueEntry>, DataError> {
        self.read_file(REVENUE_FILE).await
    }

    pub async fn load_partnerships(&self) -> Vec<Partnership> {
        self.read_or_default(PARTNERSHIPS_FILE).await
    }

    /// # Errors
    ///
    /// Returns [`DataError`] when the partnerships file is missing or malformed.
    pub async fn try_load_partnerships(&self) -> Result<Vec<Partnership>, DataError> {
        self.read_file(PARTNERSHIPS_FILE).await
    }

    pub async fn load_calendar(&self) -> Vec<CalendarItem> {
        self.read_or_default(CALENDAR_FILE).await
    }

    /// # Errors
    ///
    /// Returns [`DataError`] when the calendar file is missing or malformed.
    pub async fn try_load_calendar(&self) -> Result<Vec<CalendarItem>, DataError> {
        self.read_file(CALENDAR_FILE).await
    }

    pub async fn load_inquiries(&self) -> Vec<Inquiry> {
        self.read_or_default(INQUIRIES_FILE).await
    }

    /// # Errors
    ///
    /// Returns [`DataError`] when the inquiries file is missing or malformed.
    pub async fn try_load_inquiries(&self) -> Result<Vec<Inquiry>, DataError> {
        self.read_file(INQUIRIES_FILE).await
    }

    pub async fn load_goals(&self) -> GoalsConfig {
        self.read_or_default(GOALS_FILE).await
    }

    /// # Errors
    ///
    /// Returns [`DataError`] when the goals file is missing or malformed.
    pub async fn try_load_goals(&self) -> Result<GoalsConfig, DataError> {
        self.read_file(GOALS_FILE).await
    }

    pub async fn load_media_kit(&self) -> MediaKitConfig {
        self.read_or_default(MEDIA_KIT_FILE).await
    }

    /// # Errors
    ///
    /// Returns [`DataError`] when the media-kit file is missing or malformed.
    pub async fn try_load_media_kit(&self) -> Result<MediaKitConfig, DataError> {
        self.read_file(MEDIA_KIT_FILE).await
    }

    /// Every collection at once.
    pub async fn load_snapshot(&self) -> Snapshot {
        let (platforms, revenue, partnerships, calendar, inquiries, goals, media_kit) = tokio::join!(
            self.load_platforms(),
            self.load_revenue(),
            self.load_partnerships(),
            self.load_calendar(),
            self.load_inquiries(),
            self.load_goals(),
            self.load_media_kit(),
        );

        Snapshot {
            platforms,
            revenue,
            partnerships,
            calendar,
            inquiries,
            goals,
            media_kit,
        }
    }

    /// Append one inquiry to `inquiries/entries.json`.
    ///
    /// Writers are serialised through the store's lock, and the file is
    /// replaced atomically. An existing file that fails to parse is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the existing file is malformed or the write
    /// fails.
    pub async fn append_inquiry(&self, inquiry: Inquiry) -> Result<(), DataError> {
        let _guard = self.write_lock.lock().await;
        let path = self.root.join(INQUIRIES_FILE);

        // Existing records stay raw JSON so unmodelled keys and statuses survive.
        let mut inquiries: Vec<serde_json::Value> = match read_json(&path).await {
            Ok(existing) => existing,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e),
        };
        let record = serde_json::to_value(&inquiry).map_err(|source| DataError::Encode {
            path: path.clone(),
            source,
        })?;
        inquiries.push(record);

        write_json_atomic(&path, &inquiries).await?;
        tracing::info!(total = inquiries.len(), "stored new inquiry");
        Ok(())
    }
}
