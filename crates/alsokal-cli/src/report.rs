//! Read-only report commands. Each loads what it needs from the data store
//! and prints either pretty JSON or a plain table to stdout.

use alsokal_core::{
    displayed_actions, pipeline::PipelineReport, prioritize_actions, ActionItem,
    DashboardSummary, Platform, RevenueReport,
};
use alsokal_data::DataStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the dashboard summary.
///
/// # Errors
///
/// Returns an error if the summary cannot be serialized.
pub(crate) async fn run_summary(store: &DataStore, now: DateTime<Utc>) -> anyhow::Result<()> {
    let snapshot = store.load_snapshot().await;
    print_json(&DashboardSummary::build(&snapshot, now))
}

fn action_rows(actions: &[ActionItem]) -> Vec<String> {
    actions
        .iter()
        .map(|item| {
            format!(
                "{:<8}{:<13}{:<32}{}",
                item.priority.as_str(),
                item.detail.kind(),
                item.title,
                item.description
            )
        })
        .collect()
}

/// Print prioritised action items as a table, capped unless `all`.
pub(crate) async fn run_actions(
    store: &DataStore,
    all: bool,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let (partnerships, calendar, inquiries) = tokio::join!(
        store.load_partnerships(),
        store.load_calendar(),
        store.load_inquiries(),
    );
    let actions = prioritize_actions(&partnerships, &calendar, &inquiries, now);

    if actions.is_empty() {
        println!("nothing needs attention");
        return Ok(());
    }

    let shown = if all {
        &actions[..]
    } else {
        displayed_actions(&actions)
    };

    println!("{:<8}{:<13}{:<32}DETAIL", "PRIORITY", "TYPE", "TITLE");
    for row in action_rows(shown) {
        println!("{row}");
    }
    if shown.len() < actions.len() {
        println!("({} more; use --all)", actions.len() - shown.len());
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub(crate) async fn run_pipeline(store: &DataStore) -> anyhow::Result<()> {
    let partnerships = store.load_partnerships().await;
    print_json(&PipelineReport::build(&partnerships))
}

/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub(crate) async fn run_revenue(store: &DataStore, now: DateTime<Utc>) -> anyhow::Result<()> {
    let (entries, goals) = tokio::join!(store.load_revenue(), store.load_goals());
    print_json(&RevenueReport::build(
        &entries,
        goals.annual_revenue_target,
        now,
    ))
}

/// Platform name as written in data files, e.g. `youtube-shorts`.
fn parse_platform(name: &str) -> anyhow::Result<Platform> {
    let platform: Platform =
        serde_json::from_value(serde_json::Value::String(name.trim().to_lowercase()))?;
    if !platform.is_known() {
        anyhow::bail!("unknown platform '{name}'");
    }
    Ok(platform)
}

/// Aligned growth series for every platform, or the sorted history of one.
///
/// # Errors
///
/// Returns an error for an unknown platform name or when that platform has no
/// readable metrics file.
pub(crate) async fn run_growth(store: &DataStore, platform: Option<&str>) -> anyhow::Result<()> {
    match platform {
        None => {
            let platforms = store.load_platforms().await;
            print_json(&alsokal_core::align_growth_series(&platforms))
        }
        Some(name) => {
            let platform = parse_platform(name)?;
            let metric = store.load_platform(platform).await.ok_or_else(|| {
                anyhow::anyhow!(
                    "no metrics for {}; expected platforms/{platform}.json",
                    platform.label()
                )
            })?;
            print_json(&metric.sorted_history())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_platform_names() {
        assert_eq!(parse_platform("TikTok").unwrap(), Platform::Tiktok);
        assert_eq!(
            parse_platform("youtube-shorts").unwrap(),
            Platform::YoutubeShorts
        );
    }

    #[test]
    fn youtube_needs_its_format_suffix() {
        assert_eq!(
            parse_platform("youtube-long").unwrap(),
            Platform::YoutubeLong
        );
        assert!(parse_platform("youtube").is_err());
    }

    #[test]
    fn rejects_unknown_platform_names() {
        let err = parse_platform("myspace").unwrap_err();
        assert!(err.to_string().contains("myspace"));
    }
}
