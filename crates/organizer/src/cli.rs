use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const TICK_MS: u64 = 80;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(" {spinner} {msg}")
        .unwrap()
        .tick_chars("▏▎▍▌▋▊▉█▉▋▌▍▎")
}

use bin_organizer::{
    format_size, plan_moves, pool_from_scan, scan_directory, CategorySelection, Controller,
    OrganizeOptions, Phase, PoolSnapshot, ProgressListener, ScanOptions,
};
use mediapool_core::{build_tree, collect_clips, render_tree, MediaPool};

#[derive(Parser)]
#[command(name = "bin-organizer")]
#[command(version)]
#[command(about = "Sort media pool clips into bins by type and keyword")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort clips into category bins and keyword subfolders
    Organize {
        #[arg(help = "Pool snapshot JSON to organize")]
        pool: PathBuf,
        #[arg(long, help = "Sort video clips (RAW and EXR sequences ride along)")]
        video: bool,
        #[arg(long, help = "Sort audio clips")]
        audio: bool,
        #[arg(long, help = "Sort timelines")]
        timelines: bool,
        #[arg(long, help = "Sort compound clips")]
        compound: bool,
        #[arg(long, help = "Sort Fusion clips, titles and generators")]
        fusion: bool,
        #[arg(long, help = "Sort subtitles")]
        subtitles: bool,
        #[arg(long, help = "Sort stills")]
        stills: bool,
        #[arg(long, help = "Sort multicam clips")]
        multicam: bool,
        #[arg(short, long, help = "Folder paths to organize [default: whole pool]")]
        folders: Vec<String>,
        #[arg(
            long,
            conflicts_with = "current_folder",
            help = "Top-level clips of each folder only"
        )]
        root_only: bool,
        #[arg(long, help = "Organize the folder open in the host instead")]
        current_folder: bool,
        #[arg(long, help = "Skip keyword subfolder grouping")]
        no_keywords: bool,
        #[arg(long, help = "Remove empty folders afterwards")]
        delete_empty: bool,
        #[arg(long, help = "Report without writing the snapshot back")]
        dry_run: bool,
        #[arg(short, long, help = "Write the organized snapshot here instead")]
        output: Option<PathBuf>,
        #[arg(short, long, help = "Options preset JSON (replaces the flags above)")]
        preset: Option<PathBuf>,
    },
    /// Report where each clip would go, without moving anything
    Classify {
        #[arg(help = "Pool snapshot JSON to inspect")]
        pool: PathBuf,
    },
    Tree {
        #[arg(help = "Pool snapshot JSON to render")]
        pool: PathBuf,
        #[arg(long, help = "Emit the tree as JSON")]
        json: bool,
    },
    /// Build a pool snapshot from media files on disk
    Import {
        #[arg(help = "Directory to scan for media")]
        dir: PathBuf,
        #[arg(short, long, default_value = "pool.json", help = "Snapshot file to write")]
        output: PathBuf,
        #[arg(long, help = "Put every clip at the root, no folder mirroring")]
        flat: bool,
        #[arg(long, help = "Top-level only, skip subdirectories")]
        shallow: bool,
        #[arg(long, help = "Include hidden files")]
        include_hidden: bool,
        #[arg(short, long, default_value = "Master", help = "Root bin name")]
        name: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(help = "Shell to generate for (bash, zsh, fish, powershell)")]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Organize {
            pool,
            video,
            audio,
            timelines,
            compound,
            fusion,
            subtitles,
            stills,
            multicam,
            folders,
            root_only,
            current_folder,
            no_keywords,
            delete_empty,
            dry_run,
            output,
            preset,
        } => {
            let categories = CategorySelection {
                video,
                audio,
                timelines,
                compound,
                fusion,
                subtitles,
                stills,
                multicam,
            };
            cmd_organize(
                &pool,
                categories,
                &folders,
                root_only,
                current_folder,
                no_keywords,
                delete_empty,
                dry_run,
                output,
                preset,
            )
        }
        Commands::Classify { pool } => cmd_classify(&pool),
        Commands::Tree { pool, json } => cmd_tree(&pool, json),
        Commands::Import {
            dir,
            output,
            flat,
            shallow,
            include_hidden,
            name,
        } => cmd_import(&dir, &output, flat, shallow, include_hidden, &name),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "bin-organizer",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

struct SpinnerProgress<'a> {
    pb: &'a ProgressBar,
}

impl ProgressListener for SpinnerProgress<'_> {
    fn phase_changed(&mut self, phase: Phase) {
        self.pb.set_message(phase.message().to_string());
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_organize(
    pool_path: &Path,
    categories: CategorySelection,
    folders: &[String],
    root_only: bool,
    current_folder: bool,
    no_keywords: bool,
    delete_empty: bool,
    dry_run: bool,
    output: Option<PathBuf>,
    preset: Option<PathBuf>,
) -> Result<()> {
    let snapshot = PoolSnapshot::load(pool_path)?;
    let created = snapshot.created;
    let mut controller = Controller::new(snapshot.into_pool());

    if !folders.is_empty() {
        let count = controller.confirm_selection(folders);
        if count == 0 {
            anyhow::bail!("none of the selected folders exist in the pool");
        }
    }

    let options = match preset {
        Some(path) => OrganizeOptions::load(&path)?,
        None => OrganizeOptions {
            // Bare `organize` sorts everything, same as picking every box.
            categories: if categories.none() {
                CategorySelection::all()
            } else {
                categories
            },
            root_only,
            use_current_folder: current_folder,
            group_by_keywords: !no_keywords,
            delete_empty,
        },
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(TICK_MS));

    let mut progress = SpinnerProgress { pb: &pb };
    controller.organize(&options, &mut progress);
    pb.finish_and_clear();

    if controller.phase() == Phase::Error {
        anyhow::bail!("{}", controller.status());
    }

    println!("{}", controller.status());
    if let Some(report) = controller.last_report() {
        println!(
            "  {} clips collected, {} left unassigned",
            report.collected, report.unassigned
        );
        if report.already_placed > 0 {
            println!("  {} already in place", report.already_placed);
        }
        if report.bins_created > 0 {
            println!("  {} bins created", report.bins_created);
        }
        if options.delete_empty {
            let mut line = format!("  {} empty folders removed", report.folders_deleted);
            if report.delete_failures > 0 {
                line.push_str(&format!(", {} refused", report.delete_failures));
            }
            println!("{line}");
        }
    }

    if dry_run {
        println!("Dry run, snapshot not written.");
        return Ok(());
    }

    let mut organized = PoolSnapshot::capture(controller.pool());
    organized.created = created;
    let target = output.unwrap_or_else(|| pool_path.to_path_buf());
    organized.save_to(&target)?;
    println!("Wrote {}", target.display());

    Ok(())
}

fn cmd_classify(pool_path: &Path) -> Result<()> {
    let pool = PoolSnapshot::load(pool_path)?.into_pool();
    let selection = CategorySelection::all();
    let roots = [pool.root()];
    let clips = collect_clips(&pool, &roots, false, selection.collect_filter());
    let plan = plan_moves(&pool, &clips, &selection, true);

    println!("{} clips in {}:\n", pool.clip_count(), pool_path.display());

    for bin in &plan.bins {
        println!("  {:<18} {:>5}", bin.category.bin_name(), bin.move_count());
    }

    let unknown = pool.clip_count() - clips.len();
    if unknown > 0 {
        println!("  {:<18} {:>5}", "(unknown type)", unknown);
    }
    if plan.unassigned > 0 {
        println!("  {:<18} {:>5}", "(unassigned)", plan.unassigned);
    }

    Ok(())
}

fn cmd_tree(pool_path: &Path, json: bool) -> Result<()> {
    let pool = PoolSnapshot::load(pool_path)?.into_pool();
    let tree = build_tree(&pool, pool.root());

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_tree(&tree));
    }

    Ok(())
}

fn cmd_import(
    dir: &Path,
    output: &Path,
    flat: bool,
    shallow: bool,
    include_hidden: bool,
    name: &str,
) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let options = ScanOptions {
        recursive: !shallow,
        include_hidden,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(TICK_MS));
    pb.set_message(format!("Scanning {}", dir.display()));

    let media = scan_directory(dir, &options)?;
    pb.finish_and_clear();

    if media.is_empty() {
        println!("No media found under {}.", dir.display());
        return Ok(());
    }

    let mut total_size = 0u64;
    for item in &media {
        println!(
            "  {:>10}  {:<13}  {}",
            format_size(item.size),
            item.kind,
            item.name
        );
        total_size += item.size;
    }

    let sequences = media.iter().filter(|m| m.is_sequence()).count();
    if sequences > 0 {
        println!("\n{} image sequences collapsed.", sequences);
    }

    let pool = pool_from_scan(name, dir, &media, flat);
    PoolSnapshot::capture(&pool).save_to(output)?;

    println!(
        "\nImported {} clips ({}) into {}",
        media.len(),
        format_size(total_size),
        output.display()
    );

    Ok(())
}
