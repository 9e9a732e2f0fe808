use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use mediapool_core::{props, ClipKind, ClipRecord, FolderId, FolderIndex, MediaPool, MemoryPool};

pub const SNAPSHOT_VERSION: u32 = 1;

/// One clip as persisted: the name plus the raw property and metadata
/// maps, so fields this tool never reads survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl ClipSnapshot {
    fn from_record(record: &ClipRecord) -> Self {
        Self {
            name: record.name.clone(),
            properties: record.properties.clone(),
            metadata: record.metadata.clone(),
        }
    }

    fn to_record(&self) -> ClipRecord {
        let kind = self
            .properties
            .get(props::TYPE)
            .map(|tag| ClipKind::from_tag(tag))
            .unwrap_or(ClipKind::Unknown);
        let mut record = ClipRecord::new(self.name.clone(), kind);
        for (key, value) in &self.properties {
            record = record.with_property(key.clone(), value.clone());
        }
        for (key, value) in &self.metadata {
            record = record.with_metadata(key.clone(), value.clone());
        }
        record
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clips: Vec<ClipSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<FolderSnapshot>,
}

/// The persisted form of a whole media pool: folder tree, clip records,
/// and which folder was open. The JSON file is what the CLI commands
/// pass between each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub version: u32,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_folder: Option<String>,
    pub root: FolderSnapshot,
}

impl PoolSnapshot {
    pub fn capture(pool: &MemoryPool) -> Self {
        let now = Utc::now();
        Self {
            version: SNAPSHOT_VERSION,
            created: now,
            updated: now,
            current_folder: current_folder_path(pool),
            root: snapshot_folder(pool, pool.root()),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(Into::into)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let updated = Self {
            updated: Utc::now(),
            ..self.clone()
        };
        let content = serde_json::to_string_pretty(&updated)?;
        std::fs::write(path, content).map_err(Into::into)
    }

    /// Rebuild the in-memory pool. The recorded current folder is
    /// restored when its path still resolves, and silently dropped when
    /// it does not.
    pub fn into_pool(self) -> MemoryPool {
        let mut pool = MemoryPool::new(self.root.name.clone());
        let root = pool.root();
        fill_folder(&mut pool, root, &self.root);
        if let Some(path) = &self.current_folder {
            let index = FolderIndex::build(&pool);
            if let Some(folder) = index.resolve(path) {
                pool.set_current_folder(folder);
            }
        }
        pool
    }
}

fn snapshot_folder(pool: &MemoryPool, folder: FolderId) -> FolderSnapshot {
    let clips = pool
        .clips_in(folder)
        .into_iter()
        .filter_map(|clip| pool.clip_record(clip))
        .map(ClipSnapshot::from_record)
        .collect();
    let folders = pool
        .subfolders(folder)
        .into_iter()
        .map(|sub| snapshot_folder(pool, sub))
        .collect();
    FolderSnapshot {
        name: pool.folder_name(folder),
        clips,
        folders,
    }
}

fn current_folder_path(pool: &MemoryPool) -> Option<String> {
    let current = pool.current_folder();
    if current == pool.root() {
        return None;
    }
    let index = FolderIndex::build(pool);
    index
        .paths()
        .iter()
        .find(|path| index.get(path.as_str()) == Some(current))
        .cloned()
}

fn fill_folder(pool: &mut MemoryPool, folder: FolderId, snapshot: &FolderSnapshot) {
    for clip in &snapshot.clips {
        pool.add_clip(folder, clip.to_record());
    }
    for sub in &snapshot.folders {
        let child = pool.add_folder(folder, sub.name.as_str());
        fill_folder(pool, child, sub);
    }
}
