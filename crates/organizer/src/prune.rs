use mediapool_core::{FolderId, MediaPool};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub deleted: usize,
    pub failed: usize,
}

/// Remove empty folders under each root, children before parents, so a
/// chain of nested empty folders collapses in a single pass. The roots
/// themselves are never deleted. A refused deletion is counted and
/// logged, and the walk carries on.
pub fn prune_empty_folders<P: MediaPool + ?Sized>(pool: &mut P, roots: &[FolderId]) -> PruneStats {
    let mut stats = PruneStats::default();
    for &root in roots {
        prune_under(pool, root, &mut stats);
    }
    stats
}

fn prune_under<P: MediaPool + ?Sized>(pool: &mut P, folder: FolderId, stats: &mut PruneStats) {
    for subfolder in pool.subfolders(folder) {
        prune_under(pool, subfolder, stats);
        if pool.clips_in(subfolder).is_empty() && pool.subfolders(subfolder).is_empty() {
            let name = pool.folder_name(subfolder);
            if pool.delete_folder(subfolder) {
                stats.deleted += 1;
                log::info!("Deleted empty folder: {name}");
            } else {
                stats.failed += 1;
                log::warn!("Failed to delete folder: {name}");
            }
        }
    }
}
