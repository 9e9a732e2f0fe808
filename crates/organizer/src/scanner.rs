use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use mediapool_core::{ClipKind, ClipRecord, FolderId, MediaPool, MemoryPool};

/// Trailing frame number in a file stem, e.g. `plate.0047`.
static FRAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)(\d+)$").unwrap());

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub recursive: bool,
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            include_hidden: false,
        }
    }
}

/// One clip-to-be found on disk. A run of numbered image frames shows up
/// as a single entry with `frames` carrying the first and last number.
#[derive(Debug, Clone)]
pub struct ScannedMedia {
    pub path: PathBuf,
    pub name: String,
    pub kind: ClipKind,
    pub codec: Option<String>,
    pub size: u64,
    pub frames: Option<(u64, u64)>,
}

impl ScannedMedia {
    pub fn is_sequence(&self) -> bool {
        self.frames.is_some()
    }

    pub fn record(&self) -> ClipRecord {
        let mut record = ClipRecord::new(self.name.clone(), self.kind)
            .with_file_path(self.path.display().to_string());
        if let Some(codec) = &self.codec {
            record = record.with_video_codec(codec.clone());
        }
        record
    }
}

/// Walk a directory for media files, probe them in parallel, and collapse
/// numbered image frames into sequence clips. Unreadable entries are
/// skipped. Results come back sorted by path.
pub fn scan_directory(path: &Path, options: &ScanOptions) -> anyhow::Result<Vec<ScannedMedia>> {
    let walker = match options.recursive {
        true => WalkDir::new(path),
        false => WalkDir::new(path).max_depth(1),
    };

    let is_candidate = |entry: &walkdir::DirEntry| -> bool {
        entry.file_type().is_file()
            && (options.include_hidden || !is_hidden(entry.path()))
            && ext_of(entry.path())
                .map(|ext| media_kind(&ext).is_some())
                .unwrap_or(false)
    };

    let paths: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(Result::ok)
        .filter(is_candidate)
        .map(|e| e.into_path())
        .collect();

    let probed: Vec<(PathBuf, u64)> = paths
        .par_iter()
        .filter_map(|p| std::fs::metadata(p).ok().map(|m| (p.clone(), m.len())))
        .collect();

    let mut media = collapse_sequences(probed);
    media.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(media)
}

type SequenceKey = (PathBuf, String, usize, String);

fn collapse_sequences(probed: Vec<(PathBuf, u64)>) -> Vec<ScannedMedia> {
    let mut sequences: HashMap<SequenceKey, Vec<(u64, u64, PathBuf)>> = HashMap::new();
    let mut media = Vec::new();

    for (path, size) in probed {
        match sequence_key(&path) {
            Some((key, frame)) => sequences.entry(key).or_default().push((frame, size, path)),
            None => media.push(single(path, size)),
        }
    }

    for ((dir, prefix, width, ext), mut frames) in sequences {
        if frames.len() < 2 {
            for (_, size, path) in frames {
                media.push(single(path, size));
            }
            continue;
        }
        frames.sort_by_key(|(frame, _, _)| *frame);
        let first = frames[0].0;
        let last = frames[frames.len() - 1].0;
        let size = frames.iter().map(|(_, size, _)| size).sum();
        let name = format!("{prefix}[{first:0width$}-{last:0width$}].{ext}");
        // A sequence of CinemaDNG frames plays as raw video; other image
        // runs become plain video sequence clips.
        let codec = (ext == "dng").then(|| "CinemaDNG".to_string());
        media.push(ScannedMedia {
            path: dir.join(&name),
            name,
            kind: ClipKind::Video,
            codec,
            size,
            frames: Some((first, last)),
        });
    }

    media
}

fn single(path: PathBuf, size: u64) -> ScannedMedia {
    let (kind, codec) = ext_of(&path)
        .and_then(|ext| media_kind(&ext))
        .unwrap_or((ClipKind::Unknown, None));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ScannedMedia {
        path,
        name,
        kind,
        codec: codec.map(str::to_string),
        size,
        frames: None,
    }
}

fn sequence_key(path: &Path) -> Option<(SequenceKey, u64)> {
    let ext = ext_of(path)?;
    if !is_image_ext(&ext) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let caps = FRAME_RE.captures(stem)?;
    let digits = caps.get(2)?.as_str();
    let frame = digits.parse::<u64>().ok()?;
    let prefix = caps.get(1)?.as_str().to_string();
    let dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    Some(((dir, prefix, digits.len(), ext), frame))
}

/// Clip kind (and raw codec, where the container implies one) for a file
/// extension. `None` means the extension is not media this tool imports.
fn media_kind(ext: &str) -> Option<(ClipKind, Option<&'static str>)> {
    let mapped = match ext {
        "mov" | "mp4" | "m4v" | "mxf" | "avi" | "mkv" => (ClipKind::VideoAudio, None),
        "braw" => (ClipKind::Video, Some("Blackmagic RAW")),
        "r3d" => (ClipKind::Video, Some("REDCODE RAW")),
        "ari" => (ClipKind::Video, Some("ARRIRAW")),
        "cine" => (ClipKind::Video, Some("Phantom CINE")),
        "wav" | "aif" | "aiff" | "mp3" | "flac" | "ogg" => (ClipKind::Audio, None),
        "srt" | "vtt" => (ClipKind::Subtitle, None),
        "exr" | "dpx" | "tif" | "tiff" | "png" | "jpg" | "jpeg" | "bmp" | "psd" | "dng" => {
            (ClipKind::Still, None)
        }
        _ => return None,
    };
    Some(mapped)
}

/// Extensions whose numbered runs collapse into sequence clips.
fn is_image_ext(ext: &str) -> bool {
    matches!(
        ext,
        "exr" | "dpx" | "tif" | "tiff" | "png" | "jpg" | "jpeg" | "dng"
    )
}

fn ext_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Build a pool from scanned media, mirroring the directory layout below
/// `base` as folders, or dropping everything into the root when `flat`.
pub fn pool_from_scan(
    root_name: &str,
    base: &Path,
    files: &[ScannedMedia],
    flat: bool,
) -> MemoryPool {
    let mut pool = MemoryPool::new(root_name);
    let root = pool.root();
    let mut folders: HashMap<PathBuf, FolderId> = HashMap::new();

    for item in files {
        let folder = if flat {
            root
        } else {
            let rel = item
                .path
                .parent()
                .and_then(|dir| dir.strip_prefix(base).ok())
                .map(Path::to_path_buf)
                .unwrap_or_default();
            ensure_folder(&mut pool, &mut folders, root, &rel)
        };
        pool.add_clip(folder, item.record());
    }

    pool
}

fn ensure_folder(
    pool: &mut MemoryPool,
    folders: &mut HashMap<PathBuf, FolderId>,
    root: FolderId,
    rel: &Path,
) -> FolderId {
    if rel.as_os_str().is_empty() {
        return root;
    }
    if let Some(folder) = folders.get(rel) {
        return *folder;
    }
    let parent_rel = rel.parent().map(Path::to_path_buf).unwrap_or_default();
    let parent = ensure_folder(pool, folders, root, &parent_rel);
    let name = rel
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let folder = pool.add_folder(parent, name);
    folders.insert(rel.to_path_buf(), folder);
    folder
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: &[(u64, &str)] = &[
        (1024 * 1024 * 1024, "GB"),
        (1024 * 1024, "MB"),
        (1024, "KB"),
    ];

    UNITS
        .iter()
        .find(|(threshold, _)| bytes >= *threshold)
        .map(|(threshold, unit)| format!("{:.2} {}", bytes as f64 / *threshold as f64, unit))
        .unwrap_or_else(|| format!("{} B", bytes))
}
