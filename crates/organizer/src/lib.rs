pub mod classifier;
pub mod config;
pub mod controller;
pub mod organizer;
pub mod prune;
pub mod scanner;
pub mod snapshot;

#[cfg(test)]
mod testutils;

pub use classifier::{classify_clip, is_raw_codec, Category, ClipFacts, RAW_CODEC_TOKENS};
pub use config::{CategorySelection, OrganizeOptions};
pub use controller::{Controller, NullProgress, Phase, ProgressListener};
pub use organizer::{
    execute_plan, organize_media, plan_moves, resolve_scope, BinPlan, KeywordGroup, MoveStats,
    OrganizeError, OrganizePlan, OrganizeReport, PlannedMove,
};
pub use prune::{prune_empty_folders, PruneStats};
pub use scanner::{
    format_size, pool_from_scan, scan_directory, ScanOptions, ScannedMedia,
};
pub use snapshot::{ClipSnapshot, FolderSnapshot, PoolSnapshot, SNAPSHOT_VERSION};
