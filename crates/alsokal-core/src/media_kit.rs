//! Public media-kit content and the audience figures shown alongside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::growth::platform_overview;
use crate::records::{Platform, PlatformMetric};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightMetric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgeRange {
    pub range: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenderShare {
    pub gender: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationShare {
    pub location: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Demographics {
    pub age_ranges: Vec<AgeRange>,
    pub gender_split: Vec<GenderShare>,
    pub top_locations: Vec<LocationShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SponsorPackage {
    pub name: String,
    pub description: String,
    /// Display text, e.g. `"$2,500"`.
    pub starting_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PastPartner {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaKitConfig {
    pub creator_name: String,
    pub tagline: String,
    pub bio: String,
    pub hero_image: String,
    pub profile_image: String,
    pub social_links: BTreeMap<String, String>,
    pub highlight_metrics: Vec<HighlightMetric>,
    pub demographics: Demographics,
    pub packages: Vec<SponsorPackage>,
    pub past_partners: Vec<PastPartner>,
}

impl Default for MediaKitConfig {
    fn default() -> Self {
        Self {
            creator_name: "AlsoKal".to_string(),
            tagline: "Skoolie life, family travel, outdoor adventure".to_string(),
            bio: String::new(),
            hero_image: String::new(),
            profile_image: String::new(),
            social_links: BTreeMap::new(),
            highlight_metrics: Vec::new(),
            demographics: Demographics::default(),
            packages: Vec::new(),
            past_partners: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformReach {
    pub platform: Platform,
    pub label: &'static str,
    pub followers: u64,
}

/// Media-kit content plus live audience size.
#[derive(Debug, Clone, Serialize)]
pub struct MediaKitView<'a> {
    pub config: &'a MediaKitConfig,
    pub total_followers: u64,
    pub platforms: Vec<PlatformReach>,
}

impl<'a> MediaKitView<'a> {
    #[must_use]
    pub fn build(config: &'a MediaKitConfig, platforms: &[PlatformMetric]) -> Self {
        Self {
            config,
            total_followers: platform_overview(platforms).total_followers,
            platforms: platforms
                .iter()
                .filter(|m| m.platform.is_known())
                .map(|m| PlatformReach {
                    platform: m.platform,
                    label: m.platform.label(),
                    followers: m.followers,
                })
                .collect(),
        }
    }
}
