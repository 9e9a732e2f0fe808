use crate::pool::{FolderId, MediaPool};
use std::collections::HashMap;

/// Path index over the folder tree: every folder from the root down keyed
/// by its full slash-joined path (`Master/A/B`, the root's own name
/// first). Built once per command to translate user folder picks back
/// into handles.
///
/// Sibling folders may share a name; the later sibling wins the path key,
/// same as the host's own path listing.
#[derive(Debug, Clone)]
pub struct FolderIndex {
    root: FolderId,
    root_name: String,
    paths: Vec<String>,
    map: HashMap<String, FolderId>,
}

impl FolderIndex {
    pub fn build<P: MediaPool + ?Sized>(pool: &P) -> Self {
        let root = pool.root();
        let root_name = pool.folder_name(root);
        let mut index = Self {
            root,
            root_name: root_name.clone(),
            paths: Vec::new(),
            map: HashMap::new(),
        };
        index.insert_subtree(pool, root, root_name);
        index
    }

    fn insert_subtree<P: MediaPool + ?Sized>(&mut self, pool: &P, folder: FolderId, path: String) {
        log::debug!("indexed folder: {path}");
        self.map.insert(path.clone(), folder);
        self.paths.push(path.clone());
        for sub in pool.subfolders(folder) {
            let sub_path = format!("{}/{}", path, pool.folder_name(sub));
            self.insert_subtree(pool, sub, sub_path);
        }
    }

    /// Exact full-path lookup.
    pub fn get(&self, path: &str) -> Option<FolderId> {
        self.map.get(path).copied()
    }

    /// Forgiving lookup: the literal name `Root` (or the root's real name)
    /// means the root, and a path without the root prefix is retried with
    /// the prefix added.
    pub fn resolve(&self, path: &str) -> Option<FolderId> {
        if path == "Root" || path == self.root_name {
            return Some(self.root);
        }
        self.get(path)
            .or_else(|| self.get(&format!("{}/{}", self.root_name, path)))
    }

    /// All indexed paths, depth-first with each folder before its subtree.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Every folder strictly below `folder`, depth-first in listing order.
/// Selection expansion: picking a folder means picking its whole subtree.
pub fn collect_descendants<P: MediaPool + ?Sized>(pool: &P, folder: FolderId) -> Vec<FolderId> {
    let mut out = Vec::new();
    descend(pool, folder, &mut out);
    out
}

fn descend<P: MediaPool + ?Sized>(pool: &P, folder: FolderId, out: &mut Vec<FolderId>) {
    for sub in pool.subfolders(folder) {
        out.push(sub);
        descend(pool, sub, out);
    }
}
