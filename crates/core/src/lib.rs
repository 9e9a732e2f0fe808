pub mod clip;
pub mod collect;
pub mod index;
pub mod memory;
pub mod pool;
pub mod tree;

pub use clip::{
    clip_file_path, clip_keywords, clip_kind, clip_video_codec, first_keyword, parse_keywords,
    props, ClipKind, ClipRecord,
};
pub use collect::{collect_clips, CollectFilter, CollectedClip};
pub use index::{collect_descendants, FolderIndex};
pub use memory::MemoryPool;
pub use pool::{ClipId, FolderId, MediaPool};
pub use tree::{build_tree, render_tree, PoolNode, PoolTree};
