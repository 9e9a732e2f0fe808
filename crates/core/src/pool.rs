use std::fmt;

/// Opaque handle to a media pool folder (a bin). Handles are minted by the
/// pool implementation and are only meaningful against the pool that issued
/// them. They stay valid for the lifetime of that pool, including across
/// moves, but a deleted folder's handle goes dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(pub(crate) u32);

/// Opaque handle to a media pool clip. Same lifetime rules as [`FolderId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(pub(crate) u32);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "folder#{}", self.0)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip#{}", self.0)
    }
}

/// The host media pool surface the organizing logic is written against.
///
/// This is the entire contract with the editing host: folder listing and
/// naming, clip property/metadata lookup, and the three mutations (move,
/// create, delete). The host side is unversioned, so the mutations report
/// refusal through their return values rather than structured errors;
/// queries against dead or foreign handles come back empty.
pub trait MediaPool {
    /// The root folder of the pool (the master bin). Never deletable.
    fn root(&self) -> FolderId;

    /// The folder currently open in the host UI.
    fn current_folder(&self) -> FolderId;

    fn folder_name(&self, folder: FolderId) -> String;

    /// Direct subfolders in the host's listing order.
    fn subfolders(&self, folder: FolderId) -> Vec<FolderId>;

    /// Direct clips of the folder, not including clips in subfolders.
    fn clips_in(&self, folder: FolderId) -> Vec<ClipId>;

    fn clip_name(&self, clip: ClipId) -> String;

    /// Named clip property (`Type`, `File Path`, `Video Codec`, ...).
    /// `None` when the clip does not carry the property.
    fn clip_property(&self, clip: ClipId, key: &str) -> Option<String>;

    /// Named metadata field (`Keywords`, ...). `None` when unset.
    fn clip_metadata(&self, clip: ClipId, key: &str) -> Option<String>;

    /// Move a clip into `target`. False means the host refused; the clip is
    /// still wherever it was. Moving a clip to the folder it is already in
    /// succeeds as a no-op.
    fn move_clip(&mut self, clip: ClipId, target: FolderId) -> bool;

    /// Create a new subfolder under `parent`. The host does not enforce
    /// name uniqueness among siblings. `None` means the host refused.
    fn create_subfolder(&mut self, parent: FolderId, name: &str) -> Option<FolderId>;

    /// Delete a folder and everything below it. False means the host
    /// refused (the root always refuses).
    fn delete_folder(&mut self, folder: FolderId) -> bool;
}
