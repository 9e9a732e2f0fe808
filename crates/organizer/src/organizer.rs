use std::collections::HashMap;

use mediapool_core::{collect_clips, first_keyword, ClipId, CollectedClip, FolderId, MediaPool};
use thiserror::Error;

use crate::classifier::{classify_clip, Category, ClipFacts};
use crate::config::{CategorySelection, OrganizeOptions};
use crate::controller::{Phase, ProgressListener};
use crate::prune::{prune_empty_folders, PruneStats};

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("media pool refused to create bin \"{name}\" under \"{parent}\"")]
    CreateBin { parent: String, name: String },
}

/// One pending move: a clip and the folder it currently sits in. Clips
/// already sitting in their destination are skipped at execute time, so
/// re-running a finished organize moves nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub clip: ClipId,
    pub source: FolderId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    pub keyword: String,
    pub moves: Vec<PlannedMove>,
}

/// Everything headed for one category bin: clips going straight in, and
/// keyword groups headed for subfolders. Group order is first-encounter
/// order, clip order is collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinPlan {
    pub category: Category,
    pub direct: Vec<PlannedMove>,
    pub keyword_groups: Vec<KeywordGroup>,
}

impl BinPlan {
    pub fn move_count(&self) -> usize {
        self.direct.len()
            + self
                .keyword_groups
                .iter()
                .map(|group| group.moves.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizePlan {
    pub bins: Vec<BinPlan>,
    pub unassigned: usize,
}

impl OrganizePlan {
    pub fn move_count(&self) -> usize {
        self.bins.iter().map(BinPlan::move_count).sum()
    }
}

/// Pure planning: classify every collected clip and bucket it by category
/// and (optionally) first keyword. Reads the pool, never mutates it.
pub fn plan_moves<P: MediaPool + ?Sized>(
    pool: &P,
    clips: &[CollectedClip],
    selection: &CategorySelection,
    group_by_keywords: bool,
) -> OrganizePlan {
    let mut bins: Vec<BinPlan> = Category::in_priority_order()
        .filter(|category| selection.includes(*category))
        .map(|category| BinPlan {
            category,
            direct: Vec::new(),
            keyword_groups: Vec::new(),
        })
        .collect();
    let mut unassigned = 0;

    for entry in clips {
        let facts = ClipFacts::gather(pool, entry.clip);
        let Some(category) = classify_clip(&facts, selection) else {
            unassigned += 1;
            continue;
        };
        // The selection gate inside classify_clip guarantees the bin exists.
        let Some(bin) = bins.iter_mut().find(|bin| bin.category == category) else {
            unassigned += 1;
            continue;
        };

        let planned = PlannedMove {
            clip: entry.clip,
            source: entry.source,
        };
        let keyword = group_by_keywords
            .then(|| first_keyword(pool, entry.clip))
            .flatten();
        match keyword {
            Some(keyword) => match bin
                .keyword_groups
                .iter_mut()
                .find(|group| group.keyword == keyword)
            {
                Some(group) => group.moves.push(planned),
                None => bin.keyword_groups.push(KeywordGroup {
                    keyword,
                    moves: vec![planned],
                }),
            },
            None => bin.direct.push(planned),
        }
    }

    bins.retain(|bin| bin.move_count() > 0);
    OrganizePlan { bins, unassigned }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveStats {
    pub moved: usize,
    pub failed: usize,
    pub already_placed: usize,
    pub bins_created: usize,
}

/// Execute a plan against the pool: resolve or create each category bin
/// directly under the root (reusing any existing direct child of that
/// name), then the keyword subfolders beneath, and move clips one at a
/// time. A refused move is counted and logged; a refused folder creation
/// aborts the run.
pub fn execute_plan<P: MediaPool + ?Sized>(
    pool: &mut P,
    plan: &OrganizePlan,
) -> Result<MoveStats, OrganizeError> {
    let mut stats = MoveStats::default();
    let root = pool.root();
    let root_name = pool.folder_name(root);
    let mut existing: HashMap<String, FolderId> = pool
        .subfolders(root)
        .into_iter()
        .map(|folder| (pool.folder_name(folder), folder))
        .collect();

    for bin in &plan.bins {
        let name = bin.category.bin_name();
        let target = match existing.get(name) {
            Some(folder) => *folder,
            None => {
                let created =
                    pool.create_subfolder(root, name)
                        .ok_or_else(|| OrganizeError::CreateBin {
                            parent: root_name.clone(),
                            name: name.to_string(),
                        })?;
                stats.bins_created += 1;
                created
            }
        };
        existing.insert(name.to_string(), target);
        log::info!("Created or using folder: {name}");

        let mut keyword_folders: HashMap<String, FolderId> = pool
            .subfolders(target)
            .into_iter()
            .map(|folder| (pool.folder_name(folder), folder))
            .collect();

        for planned in &bin.direct {
            apply_move(pool, *planned, target, &mut stats);
        }

        for group in &bin.keyword_groups {
            let subfolder = match keyword_folders.get(group.keyword.as_str()) {
                Some(folder) => *folder,
                None => {
                    let created = pool.create_subfolder(target, &group.keyword).ok_or_else(
                        || OrganizeError::CreateBin {
                            parent: name.to_string(),
                            name: group.keyword.clone(),
                        },
                    )?;
                    stats.bins_created += 1;
                    keyword_folders.insert(group.keyword.clone(), created);
                    created
                }
            };
            log::info!("Created or using keyword subfolder: {}", group.keyword);
            for planned in &group.moves {
                apply_move(pool, *planned, subfolder, &mut stats);
            }
        }
    }

    Ok(stats)
}

fn apply_move<P: MediaPool + ?Sized>(
    pool: &mut P,
    planned: PlannedMove,
    target: FolderId,
    stats: &mut MoveStats,
) {
    if planned.source == target {
        stats.already_placed += 1;
        return;
    }
    if pool.move_clip(planned.clip, target) {
        stats.moved += 1;
    } else {
        stats.failed += 1;
        log::warn!(
            "Failed to move clip {} into {}",
            pool.clip_name(planned.clip),
            pool.folder_name(target)
        );
    }
}

/// Which folders an organize run works on: the current folder when asked
/// for, else the confirmed selection, else the pool root.
pub fn resolve_scope<P: MediaPool + ?Sized>(
    pool: &P,
    selected: &[FolderId],
    options: &OrganizeOptions,
) -> Vec<FolderId> {
    if options.use_current_folder {
        vec![pool.current_folder()]
    } else if !selected.is_empty() {
        selected.to_vec()
    } else {
        vec![pool.root()]
    }
}

/// Totals of one organize run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    pub collected: usize,
    pub unassigned: usize,
    pub moved: usize,
    pub failed: usize,
    pub already_placed: usize,
    pub bins_created: usize,
    pub folders_deleted: usize,
    pub delete_failures: usize,
}

impl OrganizeReport {
    pub fn status_line(&self) -> String {
        format!(
            "Complete! Moved {} files, {} errors.",
            self.moved, self.failed
        )
    }
}

/// The whole pipeline: collect, plan, move, optionally prune. Phase
/// changes are announced through `listener` as each stage begins.
pub fn organize_media<P: MediaPool + ?Sized>(
    pool: &mut P,
    selected: &[FolderId],
    options: &OrganizeOptions,
    listener: &mut dyn ProgressListener,
) -> Result<OrganizeReport, OrganizeError> {
    listener.phase_changed(Phase::Analyzing);
    let roots = resolve_scope(pool, selected, options);
    let clips = collect_clips(
        pool,
        &roots,
        options.root_only,
        options.categories.collect_filter(),
    );
    let plan = plan_moves(pool, &clips, &options.categories, options.group_by_keywords);
    log::info!(
        "planned {} moves into {} bins, {} clips unassigned",
        plan.move_count(),
        plan.bins.len(),
        plan.unassigned
    );

    listener.phase_changed(Phase::Moving);
    let moves = execute_plan(pool, &plan)?;

    let pruned = if options.delete_empty {
        listener.phase_changed(Phase::Pruning);
        prune_empty_folders(pool, &roots)
    } else {
        PruneStats::default()
    };

    Ok(OrganizeReport {
        collected: clips.len(),
        unassigned: plan.unassigned,
        moved: moves.moved,
        failed: moves.failed,
        already_placed: moves.already_placed,
        bins_created: moves.bins_created,
        folders_deleted: pruned.deleted,
        delete_failures: pruned.failed,
    })
}
