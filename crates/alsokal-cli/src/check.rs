//! `check`: strict load of every data file.
//!
//! A missing file is reported but is not a failure, since the dashboard falls
//! back to defaults for it. Unreadable or malformed files fail the command.

use alsokal_data::{DataError, DataStore};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FileStatus {
    Loaded(String),
    Missing,
    Failed(String),
}

impl FileStatus {
    fn from_result<T>(result: Result<T, DataError>, describe: impl FnOnce(&T) -> String) -> Self {
        match result {
            Ok(value) => FileStatus::Loaded(describe(&value)),
            Err(e) if e.is_not_found() => FileStatus::Missing,
            Err(e) => FileStatus::Failed(e.to_string()),
        }
    }

    fn is_failure(&self) -> bool {
        matches!(self, FileStatus::Failed(_))
    }
}

fn records(count: usize) -> String {
    format!("{count} record{}", if count == 1 { "" } else { "s" })
}

/// Status of every data file, in layout order.
pub(crate) async fn check_store(store: &DataStore) -> Vec<(&'static str, FileStatus)> {
    vec![
        (
            "platforms/*.json",
            FileStatus::from_result(store.try_load_platforms().await, |v| records(v.len())),
        ),
        (
            "revenue/entries.json",
            FileStatus::from_result(store.try_load_revenue().await, |v| records(v.len())),
        ),
        (
            "partnerships/entries.json",
            FileStatus::from_result(store.try_load_partnerships().await, |v| records(v.len())),
        ),
        (
            "calendar/entries.json",
            FileStatus::from_result(store.try_load_calendar().await, |v| records(v.len())),
        ),
        (
            "inquiries/entries.json",
            FileStatus::from_result(store.try_load_inquiries().await, |v| records(v.len())),
        ),
        (
            "goals/config.json",
            FileStatus::from_result(store.try_load_goals().await, |g| {
                format!("annual target {}", g.annual_revenue_target)
            }),
        ),
        (
            "media-kit/config.json",
            FileStatus::from_result(store.try_load_media_kit().await, |m| {
                format!("creator {}", m.creator_name)
            }),
        ),
    ]
}

/// Print one line per data file and fail when any file is broken.
///
/// # Errors
///
/// Returns an error if the data root is unusable or any file failed to load.
pub(crate) async fn run_check(store: &DataStore) -> anyhow::Result<()> {
    store.health_check().await?;

    let results = check_store(store).await;
    println!("data directory: {}", store.root().display());
    for (file, status) in &results {
        match status {
            FileStatus::Loaded(detail) => println!("  ok       {file:<28}{detail}"),
            FileStatus::Missing => println!("  missing  {file:<28}using defaults"),
            FileStatus::Failed(error) => println!("  FAILED   {file:<28}{error}"),
        }
    }

    let failures = results.iter().filter(|(_, s)| s.is_failure()).count();
    if failures > 0 {
        tracing::warn!(failures, "data check failed");
        anyhow::bail!("{failures} data file(s) failed to load");
    }
    Ok(())
}
