use crate::clip::{clip_kind, ClipKind};
use crate::pool::{ClipId, FolderId, MediaPool};

/// Which coarse clip kinds a collection pass keeps. One flag per host
/// media type group: `video` spans `Video + Audio`, `Video`, and `Still`
/// clips, `fusion` spans Fusion comps, titles, and generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectFilter {
    pub video: bool,
    pub audio: bool,
    pub timeline: bool,
    pub compound: bool,
    pub fusion: bool,
    pub subtitle: bool,
    pub multicam: bool,
}

impl CollectFilter {
    pub fn matches(&self, kind: ClipKind) -> bool {
        match kind {
            ClipKind::VideoAudio | ClipKind::Video | ClipKind::Still => self.video,
            ClipKind::Audio => self.audio,
            ClipKind::Timeline => self.timeline,
            ClipKind::Compound => self.compound,
            ClipKind::Fusion | ClipKind::FusionTitle | ClipKind::Generator => self.fusion,
            ClipKind::Subtitle => self.subtitle,
            ClipKind::Multicam => self.multicam,
            ClipKind::Unknown => false,
        }
    }
}

/// A clip together with the folder it was collected from. The source is
/// what later lets placement recognize clips already sitting in their
/// destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectedClip {
    pub clip: ClipId,
    pub source: FolderId,
}

/// Gather clips under the given roots: an iterative depth-first walk with
/// an explicit stack (deep pools must not recurse), then a second pass
/// that filters on the `Type` property. With `root_only` set, only the
/// roots' direct clips are taken.
///
/// The stack starts out holding every root, so work proceeds from the
/// last root backwards. Roots are taken as given: a folder reachable
/// through two roots is walked twice and its clips appear twice.
pub fn collect_clips<P: MediaPool + ?Sized>(
    pool: &P,
    roots: &[FolderId],
    root_only: bool,
    filter: CollectFilter,
) -> Vec<CollectedClip> {
    let mut collected = Vec::new();
    let mut stack: Vec<FolderId> = roots.to_vec();
    while let Some(folder) = stack.pop() {
        collected.extend(
            pool.clips_in(folder)
                .into_iter()
                .map(|clip| CollectedClip { clip, source: folder }),
        );
        if !root_only {
            stack.extend(pool.subfolders(folder));
        }
    }

    let total = collected.len();
    collected.retain(|entry| filter.matches(clip_kind(pool, entry.clip)));
    log::debug!(
        "collected {} of {} clips under {} root(s)",
        collected.len(),
        total,
        roots.len()
    );
    collected
}
