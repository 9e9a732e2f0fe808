use crate::clip::{clip_kind, ClipKind};
use crate::pool::{FolderId, MediaPool};
use serde::{Deserialize, Serialize};

/// One node of a rendered pool tree: a bin or a clip. Clips carry their
/// type tag, bins their children (subfolders first, then clips, both in
/// host listing order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolNode {
    pub name: String,
    pub is_folder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ClipKind>,
    #[serde(default)]
    pub children: Vec<PoolNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolTree {
    pub root: PoolNode,
    pub total_clips: usize,
    pub total_folders: usize,
}

/// Snapshot the folder/clip structure under `folder` into a plain tree.
pub fn build_tree<P: MediaPool + ?Sized>(pool: &P, folder: FolderId) -> PoolTree {
    let root = build_node(pool, folder);
    let (total_clips, total_folders) = count_totals(&root);
    PoolTree {
        root,
        total_clips,
        total_folders,
    }
}

fn build_node<P: MediaPool + ?Sized>(pool: &P, folder: FolderId) -> PoolNode {
    let mut children: Vec<PoolNode> = pool
        .subfolders(folder)
        .into_iter()
        .map(|sub| build_node(pool, sub))
        .collect();
    children.extend(pool.clips_in(folder).into_iter().map(|clip| PoolNode {
        name: pool.clip_name(clip),
        is_folder: false,
        kind: Some(clip_kind(pool, clip)),
        children: Vec::new(),
    }));
    PoolNode {
        name: pool.folder_name(folder),
        is_folder: true,
        kind: None,
        children,
    }
}

fn count_totals(node: &PoolNode) -> (usize, usize) {
    if !node.is_folder {
        return (1, 0);
    }
    node.children
        .iter()
        .map(count_totals)
        .fold((0, 1), |(clips, folders), (c, f)| (clips + c, folders + f))
}

/// ASCII rendering with a totals line, bins as `name/` and clips
/// annotated with their type tag.
pub fn render_tree(tree: &PoolTree) -> String {
    let mut output = format!("{}/\n", tree.root.name);
    let child_count = tree.root.children.len();
    for (i, child) in tree.root.children.iter().enumerate() {
        output.push_str(&render_node(child, "", i == child_count - 1));
    }
    output.push_str(&format!(
        "\n{} clips, {} bins\n",
        tree.total_clips, tree.total_folders
    ));
    output
}

fn render_node(node: &PoolNode, prefix: &str, is_last: bool) -> String {
    let connector = if is_last { "`-- " } else { "|-- " };

    let display_name = if node.is_folder {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    };

    let annotation = match node.kind {
        Some(kind) => format!("  [{kind}]"),
        None => String::new(),
    };

    let mut output = format!("{prefix}{connector}{display_name}{annotation}\n");

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}|   ")
    };

    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        output.push_str(&render_node(child, &child_prefix, i == child_count - 1));
    }

    output
}
