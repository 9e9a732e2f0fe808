use crate::clip::ClipRecord;
use crate::pool::{ClipId, FolderId, MediaPool};

#[derive(Debug, Clone)]
struct FolderEntry {
    name: String,
    parent: Option<FolderId>,
    clips: Vec<ClipId>,
    subfolders: Vec<FolderId>,
    deleted: bool,
}

#[derive(Debug, Clone)]
struct ClipEntry {
    record: ClipRecord,
    folder: FolderId,
    deleted: bool,
}

/// In-memory media pool: the backing store the CLI mutates after loading a
/// snapshot, and the test double for everything written against
/// [`MediaPool`].
///
/// Entries live in arenas and deletion tombstones them, so handles stay
/// stable for the life of the pool and queries against deleted entries
/// come back empty, the way dead host handles behave.
#[derive(Debug, Clone)]
pub struct MemoryPool {
    folders: Vec<FolderEntry>,
    clips: Vec<ClipEntry>,
    root: FolderId,
    current: FolderId,
}

impl MemoryPool {
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = FolderId(0);
        Self {
            folders: vec![FolderEntry {
                name: root_name.into(),
                parent: None,
                clips: Vec::new(),
                subfolders: Vec::new(),
                deleted: false,
            }],
            clips: Vec::new(),
            root,
            current: root,
        }
    }

    /// Attach a new folder under `parent`. Construction-time counterpart of
    /// [`MediaPool::create_subfolder`]; callers hand in handles this pool
    /// minted, so it cannot refuse.
    pub fn add_folder(&mut self, parent: FolderId, name: impl Into<String>) -> FolderId {
        let id = FolderId(self.folders.len() as u32);
        self.folders.push(FolderEntry {
            name: name.into(),
            parent: Some(parent),
            clips: Vec::new(),
            subfolders: Vec::new(),
            deleted: false,
        });
        self.folders[parent.0 as usize].subfolders.push(id);
        id
    }

    pub fn add_clip(&mut self, folder: FolderId, record: ClipRecord) -> ClipId {
        let id = ClipId(self.clips.len() as u32);
        self.clips.push(ClipEntry {
            record,
            folder,
            deleted: false,
        });
        self.folders[folder.0 as usize].clips.push(id);
        id
    }

    pub fn set_current_folder(&mut self, folder: FolderId) {
        self.current = folder;
    }

    /// Full stored record of a clip, `None` for dead handles. Snapshot
    /// capture needs this; the organizing logic never does.
    pub fn clip_record(&self, clip: ClipId) -> Option<&ClipRecord> {
        self.clips
            .get(clip.0 as usize)
            .filter(|entry| !entry.deleted)
            .map(|entry| &entry.record)
    }

    /// Live clips in the whole pool.
    pub fn clip_count(&self) -> usize {
        self.clips.iter().filter(|entry| !entry.deleted).count()
    }

    /// Live folders in the whole pool, the root included.
    pub fn folder_count(&self) -> usize {
        self.folders.iter().filter(|entry| !entry.deleted).count()
    }

    fn folder(&self, id: FolderId) -> Option<&FolderEntry> {
        self.folders
            .get(id.0 as usize)
            .filter(|entry| !entry.deleted)
    }

    fn clip(&self, id: ClipId) -> Option<&ClipEntry> {
        self.clips.get(id.0 as usize).filter(|entry| !entry.deleted)
    }
}

impl MediaPool for MemoryPool {
    fn root(&self) -> FolderId {
        self.root
    }

    fn current_folder(&self) -> FolderId {
        self.current
    }

    fn folder_name(&self, folder: FolderId) -> String {
        self.folder(folder)
            .map(|entry| entry.name.clone())
            .unwrap_or_default()
    }

    fn subfolders(&self, folder: FolderId) -> Vec<FolderId> {
        self.folder(folder)
            .map(|entry| entry.subfolders.clone())
            .unwrap_or_default()
    }

    fn clips_in(&self, folder: FolderId) -> Vec<ClipId> {
        self.folder(folder)
            .map(|entry| entry.clips.clone())
            .unwrap_or_default()
    }

    fn clip_name(&self, clip: ClipId) -> String {
        self.clip(clip)
            .map(|entry| entry.record.name.clone())
            .unwrap_or_default()
    }

    fn clip_property(&self, clip: ClipId, key: &str) -> Option<String> {
        self.clip(clip)?.record.properties.get(key).cloned()
    }

    fn clip_metadata(&self, clip: ClipId, key: &str) -> Option<String> {
        self.clip(clip)?.record.metadata.get(key).cloned()
    }

    fn move_clip(&mut self, clip: ClipId, target: FolderId) -> bool {
        let source = match self.clip(clip) {
            Some(entry) => entry.folder,
            None => return false,
        };
        if self.folder(target).is_none() {
            return false;
        }
        if source == target {
            return true;
        }
        self.folders[source.0 as usize].clips.retain(|c| *c != clip);
        self.folders[target.0 as usize].clips.push(clip);
        self.clips[clip.0 as usize].folder = target;
        true
    }

    fn create_subfolder(&mut self, parent: FolderId, name: &str) -> Option<FolderId> {
        self.folder(parent)?;
        Some(self.add_folder(parent, name))
    }

    fn delete_folder(&mut self, folder: FolderId) -> bool {
        if folder == self.root || self.folder(folder).is_none() {
            return false;
        }
        if let Some(parent) = self.folders[folder.0 as usize].parent {
            self.folders[parent.0 as usize]
                .subfolders
                .retain(|f| *f != folder);
        }
        let mut stack = vec![folder];
        while let Some(id) = stack.pop() {
            let entry = &mut self.folders[id.0 as usize];
            entry.deleted = true;
            for clip in entry.clips.drain(..) {
                self.clips[clip.0 as usize].deleted = true;
            }
            let entry = &mut self.folders[id.0 as usize];
            stack.extend(entry.subfolders.drain(..));
        }
        true
    }
}
