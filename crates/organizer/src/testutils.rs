use mediapool_core::{ClipId, ClipKind, ClipRecord, FolderId, MediaPool, MemoryPool};

/// Pool wrapper that refuses chosen mutations, for failure-path tests.
pub struct FlakyPool {
    pub inner: MemoryPool,
    pub refuse_moves: bool,
    pub refuse_creates: bool,
    pub refuse_deletes: bool,
}

impl FlakyPool {
    pub fn wrap(inner: MemoryPool) -> Self {
        Self {
            inner,
            refuse_moves: false,
            refuse_creates: false,
            refuse_deletes: false,
        }
    }
}

impl MediaPool for FlakyPool {
    fn root(&self) -> FolderId {
        self.inner.root()
    }

    fn current_folder(&self) -> FolderId {
        self.inner.current_folder()
    }

    fn folder_name(&self, folder: FolderId) -> String {
        self.inner.folder_name(folder)
    }

    fn subfolders(&self, folder: FolderId) -> Vec<FolderId> {
        self.inner.subfolders(folder)
    }

    fn clips_in(&self, folder: FolderId) -> Vec<ClipId> {
        self.inner.clips_in(folder)
    }

    fn clip_name(&self, clip: ClipId) -> String {
        self.inner.clip_name(clip)
    }

    fn clip_property(&self, clip: ClipId, key: &str) -> Option<String> {
        self.inner.clip_property(clip, key)
    }

    fn clip_metadata(&self, clip: ClipId, key: &str) -> Option<String> {
        self.inner.clip_metadata(clip, key)
    }

    fn move_clip(&mut self, clip: ClipId, target: FolderId) -> bool {
        !self.refuse_moves && self.inner.move_clip(clip, target)
    }

    fn create_subfolder(&mut self, parent: FolderId, name: &str) -> Option<FolderId> {
        if self.refuse_creates {
            None
        } else {
            self.inner.create_subfolder(parent, name)
        }
    }

    fn delete_folder(&mut self, folder: FolderId) -> bool {
        !self.refuse_deletes && self.inner.delete_folder(folder)
    }
}

pub fn video_clip(name: &str) -> ClipRecord {
    ClipRecord::new(name, ClipKind::Video)
        .with_file_path(format!("/media/{name}"))
        .with_video_codec("H.264")
}

pub fn audio_clip(name: &str) -> ClipRecord {
    ClipRecord::new(name, ClipKind::Audio).with_file_path(format!("/media/{name}"))
}

pub fn keyworded_clip(name: &str, keywords: &str) -> ClipRecord {
    video_clip(name).with_keywords(keywords)
}
