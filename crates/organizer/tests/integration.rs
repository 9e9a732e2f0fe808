use bin_organizer::{
    pool_from_scan, scan_directory, CategorySelection, Controller, NullProgress, OrganizeOptions,
    Phase, PoolSnapshot, ScanOptions,
};
use mediapool_core::{
    build_tree, render_tree, ClipKind, ClipRecord, FolderId, MediaPool, MemoryPool,
};
use std::fs;
use tempfile::TempDir;

fn clip(name: &str, kind: ClipKind) -> ClipRecord {
    ClipRecord::new(name, kind).with_file_path(format!("/media/{name}"))
}

/// A small production-shaped pool: dailies over two days, a graphics
/// folder, a loose clip at the root, and an empty scratch folder.
fn studio_pool() -> MemoryPool {
    let mut pool = MemoryPool::new("Master");
    let root = pool.root();
    pool.add_clip(
        root,
        clip("slate.mov", ClipKind::Video).with_video_codec("H.264"),
    );

    let dailies = pool.add_folder(root, "dailies");
    pool.add_clip(
        dailies,
        clip("interview.mov", ClipKind::VideoAudio)
            .with_video_codec("H.264")
            .with_keywords("interview, day1"),
    );
    pool.add_clip(
        dailies,
        clip("broll.mov", ClipKind::Video).with_video_codec("H.264"),
    );
    pool.add_clip(dailies, clip("tone.wav", ClipKind::Audio));
    pool.add_clip(
        dailies,
        clip("shot.braw", ClipKind::Video).with_video_codec("Blackmagic RAW"),
    );
    pool.add_clip(dailies, clip("plate.0001.exr", ClipKind::Still));
    pool.add_clip(dailies, clip("photo.jpg", ClipKind::Still));
    pool.add_clip(dailies, clip("subs.srt", ClipKind::Subtitle));

    let day2 = pool.add_folder(dailies, "day2");
    pool.add_clip(
        day2,
        clip("sunset.mov", ClipKind::Video)
            .with_video_codec("H.264")
            .with_keywords("beach"),
    );
    pool.add_clip(day2, ClipRecord::new("cut_v1", ClipKind::Timeline));
    pool.add_clip(day2, ClipRecord::new("comp_1", ClipKind::Compound));
    pool.add_clip(day2, ClipRecord::new("mc_1", ClipKind::Multicam));

    let graphics = pool.add_folder(root, "graphics");
    pool.add_clip(graphics, ClipRecord::new("fx", ClipKind::Fusion));
    pool.add_clip(graphics, ClipRecord::new("bars", ClipKind::Generator));
    pool.add_clip(graphics, ClipRecord::new("title.comp", ClipKind::FusionTitle));

    pool.add_folder(root, "scratch");
    pool
}

fn everything_on() -> OrganizeOptions {
    OrganizeOptions {
        categories: CategorySelection::all(),
        delete_empty: true,
        ..OrganizeOptions::default()
    }
}

fn child_named(pool: &MemoryPool, parent: FolderId, name: &str) -> Option<FolderId> {
    pool.subfolders(parent)
        .into_iter()
        .find(|f| pool.folder_name(*f) == name)
}

fn child_names(pool: &MemoryPool, parent: FolderId) -> Vec<String> {
    pool.subfolders(parent)
        .into_iter()
        .map(|f| pool.folder_name(f))
        .collect()
}

fn clip_names(pool: &MemoryPool, folder: FolderId) -> Vec<String> {
    pool.clips_in(folder)
        .into_iter()
        .map(|c| pool.clip_name(c))
        .collect()
}

// ============================================================================
// Organize Pipeline Tests
// ============================================================================

#[test]
fn organize_sorts_a_full_project_into_bins() {
    let mut controller = Controller::new(studio_pool());
    let status = controller
        .organize(&everything_on(), &mut NullProgress)
        .to_string();

    assert_eq!(status, "Complete! Moved 15 files, 0 errors.");
    assert_eq!(controller.phase(), Phase::Done);

    let report = controller.last_report().unwrap();
    assert_eq!(report.collected, 15);
    assert_eq!(report.unassigned, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(report.bins_created, 14); // 12 category bins plus two keyword folders
    assert_eq!(report.folders_deleted, 4); // day2, dailies, graphics, scratch

    let pool = controller.pool();
    let root = pool.root();
    assert_eq!(
        child_names(pool, root),
        [
            "RAW",
            "Sequences",
            "Video",
            "Audio",
            "Timeline",
            "Compound",
            "Fusion",
            "Fusion Titles",
            "Fusion Generators",
            "Subtitle",
            "Still",
            "Multicam",
        ]
    );
}

#[test]
fn raw_and_exr_outrank_video_and_still() {
    let mut controller = Controller::new(studio_pool());
    controller.organize(&everything_on(), &mut NullProgress);

    let pool = controller.pool();
    let root = pool.root();

    let raw = child_named(pool, root, "RAW").unwrap();
    assert_eq!(clip_names(pool, raw), ["shot.braw"]);

    let sequences = child_named(pool, root, "Sequences").unwrap();
    assert_eq!(clip_names(pool, sequences), ["plate.0001.exr"]);

    let still = child_named(pool, root, "Still").unwrap();
    assert_eq!(clip_names(pool, still), ["photo.jpg"]);
}

#[test]
fn keywords_group_under_their_bin() {
    let mut controller = Controller::new(studio_pool());
    controller.organize(&everything_on(), &mut NullProgress);

    let pool = controller.pool();
    let root = pool.root();
    let video = child_named(pool, root, "Video").unwrap();

    assert_eq!(clip_names(pool, video), ["slate.mov", "broll.mov"]);
    assert_eq!(child_names(pool, video), ["interview", "beach"]);

    let interview = child_named(pool, video, "interview").unwrap();
    assert_eq!(clip_names(pool, interview), ["interview.mov"]);

    let beach = child_named(pool, video, "beach").unwrap();
    assert_eq!(clip_names(pool, beach), ["sunset.mov"]);
}

#[test]
fn a_second_organize_run_changes_nothing() {
    let mut controller = Controller::new(studio_pool());
    controller.organize(&everything_on(), &mut NullProgress);
    let before = render_tree(&build_tree(controller.pool(), controller.pool().root()));

    let status = controller
        .organize(&everything_on(), &mut NullProgress)
        .to_string();

    assert_eq!(status, "Complete! Moved 0 files, 0 errors.");
    let report = controller.last_report().unwrap();
    assert_eq!(report.already_placed, 15);
    assert_eq!(report.bins_created, 0);
    assert_eq!(report.folders_deleted, 0);

    let after = render_tree(&build_tree(controller.pool(), controller.pool().root()));
    assert_eq!(before, after);
}

// ============================================================================
// Scope Tests
// ============================================================================

#[test]
fn selection_limits_the_scope_to_picked_subtrees() {
    let mut controller = Controller::new(studio_pool());
    let count = controller.confirm_selection(&["Master/graphics".to_string()]);
    assert_eq!(count, 1);

    let options = OrganizeOptions {
        categories: CategorySelection::all(),
        ..OrganizeOptions::default()
    };
    controller.organize(&options, &mut NullProgress);

    let pool = controller.pool();
    let root = pool.root();
    assert!(child_named(pool, root, "Fusion").is_some());
    assert!(child_named(pool, root, "Video").is_none());

    let dailies = child_named(pool, root, "dailies").unwrap();
    assert_eq!(pool.clips_in(dailies).len(), 7);
    assert_eq!(clip_names(pool, root), ["slate.mov"]);
}

#[test]
fn root_only_skips_nested_folders() {
    let mut controller = Controller::new(studio_pool());
    let options = OrganizeOptions {
        categories: CategorySelection::all(),
        root_only: true,
        ..OrganizeOptions::default()
    };
    controller.organize(&options, &mut NullProgress);

    let report = controller.last_report().unwrap();
    assert_eq!(report.collected, 1);

    let pool = controller.pool();
    let root = pool.root();
    let video = child_named(pool, root, "Video").unwrap();
    assert_eq!(clip_names(pool, video), ["slate.mov"]);

    let dailies = child_named(pool, root, "dailies").unwrap();
    assert_eq!(pool.clips_in(dailies).len(), 7);
}

#[test]
fn current_folder_scope_organizes_the_open_folder() {
    let mut pool = studio_pool();
    let dailies = child_named(&pool, pool.root(), "dailies").unwrap();
    pool.set_current_folder(dailies);

    let mut controller = Controller::new(pool);
    let options = OrganizeOptions {
        categories: CategorySelection::all(),
        use_current_folder: true,
        ..OrganizeOptions::default()
    };
    controller.organize(&options, &mut NullProgress);

    let report = controller.last_report().unwrap();
    assert_eq!(report.collected, 11);

    let pool = controller.pool();
    let root = pool.root();
    assert_eq!(clip_names(pool, root), ["slate.mov"]);
    let graphics = child_named(pool, root, "graphics").unwrap();
    assert_eq!(pool.clips_in(graphics).len(), 3);
}

#[test]
fn preset_file_drives_the_selection() {
    let dir = TempDir::new().unwrap();
    let preset_path = dir.path().join("audio-only.json");

    let preset = OrganizeOptions {
        categories: CategorySelection {
            audio: true,
            ..CategorySelection::default()
        },
        ..OrganizeOptions::default()
    };
    preset.save(&preset_path).unwrap();

    let loaded = OrganizeOptions::load(&preset_path).unwrap();
    let mut controller = Controller::new(studio_pool());
    controller.organize(&loaded, &mut NullProgress);

    let pool = controller.pool();
    let root = pool.root();
    assert!(child_named(pool, root, "Audio").is_some());
    assert!(child_named(pool, root, "Video").is_none());
    assert_eq!(controller.last_report().map(|r| r.moved), Some(1));
}

// ============================================================================
// Snapshot and Import Tests
// ============================================================================

#[test]
fn organized_pool_survives_a_snapshot_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pool.json");

    let mut controller = Controller::new(studio_pool());
    controller.organize(&everything_on(), &mut NullProgress);
    PoolSnapshot::capture(controller.pool())
        .save_to(&path)
        .unwrap();

    let reloaded = PoolSnapshot::load(&path).unwrap().into_pool();
    assert_eq!(
        render_tree(&build_tree(&reloaded, reloaded.root())),
        render_tree(&build_tree(controller.pool(), controller.pool().root()))
    );
}

#[test]
fn imported_media_organizes_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("dailies")).unwrap();
    fs::write(dir.path().join("dailies/a.mov"), b"x").unwrap();
    fs::write(dir.path().join("dailies/tone.wav"), b"x").unwrap();
    fs::write(dir.path().join("plate.0001.exr"), b"x").unwrap();
    fs::write(dir.path().join("plate.0002.exr"), b"x").unwrap();

    let media = scan_directory(dir.path(), &ScanOptions::default()).unwrap();
    let pool = pool_from_scan("Master", dir.path(), &media, false);

    let mut controller = Controller::new(pool);
    controller.organize(&everything_on(), &mut NullProgress);

    let pool = controller.pool();
    let root = pool.root();
    let video = child_named(pool, root, "Video").unwrap();
    assert_eq!(clip_names(pool, video), ["a.mov"]);
    let sequences = child_named(pool, root, "Sequences").unwrap();
    assert_eq!(clip_names(pool, sequences), ["plate.[0001-0002].exr"]);
    assert!(child_named(pool, root, "Audio").is_some());
}
