use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::classifier::Category;
use mediapool_core::CollectFilter;

/// The media type checkboxes: which kinds of clips an organize run picks
/// up. RAW and Sequences have no flag of their own, they ride `video`;
/// Fusion titles and generators ride `fusion`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySelection {
    pub video: bool,
    pub audio: bool,
    pub timelines: bool,
    pub compound: bool,
    pub fusion: bool,
    pub subtitles: bool,
    pub stills: bool,
    pub multicam: bool,
}

impl CategorySelection {
    pub fn all() -> Self {
        Self {
            video: true,
            audio: true,
            timelines: true,
            compound: true,
            fusion: true,
            subtitles: true,
            stills: true,
            multicam: true,
        }
    }

    pub fn none(&self) -> bool {
        *self == Self::default()
    }

    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Raw | Category::Sequences | Category::Video => self.video,
            Category::Audio => self.audio,
            Category::Timeline => self.timelines,
            Category::Compound => self.compound,
            Category::Fusion | Category::FusionTitles | Category::FusionGenerators => self.fusion,
            Category::Subtitle => self.subtitles,
            Category::Still => self.stills,
            Category::Multicam => self.multicam,
        }
    }

    /// Collection-pass filter for this selection. Stills share the video
    /// flag at collection time so that either checkbox pulls in the
    /// `Video + Audio`/`Video`/`Still` group; classification sorts the
    /// group out afterwards.
    pub fn collect_filter(&self) -> CollectFilter {
        CollectFilter {
            video: self.video || self.stills,
            audio: self.audio,
            timeline: self.timelines,
            compound: self.compound,
            fusion: self.fusion,
            subtitle: self.subtitles,
            multicam: self.multicam,
        }
    }
}

/// One organize run's worth of settings, the checkbox panel in struct
/// form. Keyword grouping is the only option that defaults on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeOptions {
    pub categories: CategorySelection,
    pub root_only: bool,
    pub use_current_folder: bool,
    pub group_by_keywords: bool,
    pub delete_empty: bool,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            categories: CategorySelection::default(),
            root_only: false,
            use_current_folder: false,
            group_by_keywords: true,
            delete_empty: false,
        }
    }
}

impl OrganizeOptions {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(Into::into)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(Into::into)
    }
}
