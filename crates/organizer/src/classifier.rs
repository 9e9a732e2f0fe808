use mediapool_core::{clip_file_path, clip_kind, clip_video_codec, ClipId, ClipKind, MediaPool};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CategorySelection;

/// Codec names the host reports for camera-original RAW media, substring
/// matched case-insensitively against the `Video Codec` property.
pub const RAW_CODEC_TOKENS: &[&str] = &[
    "BRAW",
    "Blackmagic RAW",
    "R3D",
    "RED RAW",
    "RED",
    "ARRIRAW",
    "Cinema DNG",
    "CinemaDNG",
    "Sony RAW",
    "X-OCN",
    "X-OCN ST",
    "X-OCN LT",
    "ProRes RAW",
    "Canon RAW",
    "Canon Cinema RAW Light",
    "Z CAM ZRAW",
];

pub fn is_raw_codec(codec: &str) -> bool {
    let upper = codec.to_uppercase();
    !codec.is_empty()
        && RAW_CODEC_TOKENS
            .iter()
            .any(|token| upper.contains(&token.to_uppercase()))
}

fn is_exr_path(path: &str) -> bool {
    path.to_lowercase().ends_with(".exr")
}

/// Destination bin for a clip. Variants double as the bin names created
/// under the pool root; [`Category::bin_name`] spells them the way the
/// bins are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Raw,
    Sequences,
    Video,
    Audio,
    Timeline,
    Compound,
    Fusion,
    FusionTitles,
    FusionGenerators,
    Subtitle,
    Still,
    Multicam,
}

impl Category {
    pub fn bin_name(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Sequences => "Sequences",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Timeline => "Timeline",
            Self::Compound => "Compound",
            Self::Fusion => "Fusion",
            Self::FusionTitles => "Fusion Titles",
            Self::FusionGenerators => "Fusion Generators",
            Self::Subtitle => "Subtitle",
            Self::Still => "Still",
            Self::Multicam => "Multicam",
        }
    }

    /// Categories in classification priority order: the order the rule
    /// table is consulted, RAW and Sequences ahead of everything else.
    pub fn in_priority_order() -> impl Iterator<Item = Category> {
        RULES.iter().map(|(category, _)| *category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bin_name())
    }
}

/// The observable clip facts classification runs on. Gathering them up
/// front keeps the rule predicates pure and the pool reads in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipFacts {
    pub kind: ClipKind,
    pub file_path: String,
    pub video_codec: String,
}

impl ClipFacts {
    pub fn gather<P: MediaPool + ?Sized>(pool: &P, clip: ClipId) -> Self {
        Self {
            kind: clip_kind(pool, clip),
            file_path: clip_file_path(pool, clip),
            video_codec: clip_video_codec(pool, clip),
        }
    }

    fn is_raw(&self) -> bool {
        self.kind.has_video() && is_raw_codec(&self.video_codec)
    }

    fn is_exr_sequence(&self) -> bool {
        matches!(
            self.kind,
            ClipKind::VideoAudio | ClipKind::Video | ClipKind::Still
        ) && is_exr_path(&self.file_path)
    }
}

type Rule = fn(&ClipFacts) -> bool;

/// The classification table: first selected rule whose predicate holds
/// wins. RAW outranks Sequences outranks Video; Video and Still carve
/// out RAW codecs and `.exr` paths so no clip can match twice.
const RULES: &[(Category, Rule)] = &[
    (Category::Raw, |facts| facts.is_raw()),
    (Category::Sequences, |facts| facts.is_exr_sequence()),
    (Category::Video, |facts| {
        facts.kind.has_video() && !is_raw_codec(&facts.video_codec) && !is_exr_path(&facts.file_path)
    }),
    (Category::Audio, |facts| facts.kind == ClipKind::Audio),
    (Category::Timeline, |facts| facts.kind == ClipKind::Timeline),
    (Category::Compound, |facts| facts.kind == ClipKind::Compound),
    (Category::Fusion, |facts| facts.kind == ClipKind::Fusion),
    (Category::FusionTitles, |facts| {
        facts.kind == ClipKind::FusionTitle
    }),
    (Category::FusionGenerators, |facts| {
        facts.kind == ClipKind::Generator
    }),
    (Category::Subtitle, |facts| facts.kind == ClipKind::Subtitle),
    (Category::Still, |facts| {
        facts.kind == ClipKind::Still && !is_exr_path(&facts.file_path)
    }),
    (Category::Multicam, |facts| facts.kind == ClipKind::Multicam),
];

/// Assign a clip to the first selected category whose rule matches, or
/// `None` to leave it where it is.
pub fn classify_clip(facts: &ClipFacts, selection: &CategorySelection) -> Option<Category> {
    RULES
        .iter()
        .find(|(category, rule)| selection.includes(*category) && rule(facts))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(kind: ClipKind, path: &str, codec: &str) -> ClipFacts {
        ClipFacts {
            kind,
            file_path: path.to_string(),
            video_codec: codec.to_string(),
        }
    }

    #[test]
    fn raw_codec_matching_is_substring_and_case_blind() {
        assert!(is_raw_codec("braw"));
        assert!(is_raw_codec("Blackmagic RAW 8:1"));
        assert!(is_raw_codec("REDCODE"));
        assert!(is_raw_codec("x-ocn lt"));
        assert!(!is_raw_codec("H.264"));
        assert!(!is_raw_codec("Apple ProRes 422"));
        assert!(!is_raw_codec(""));
    }

    #[test]
    fn raw_outranks_video() {
        let selection = CategorySelection {
            video: true,
            ..CategorySelection::default()
        };
        let clip = facts(ClipKind::Video, "/m/a0001.braw", "braw");

        assert_eq!(classify_clip(&clip, &selection), Some(Category::Raw));
    }

    #[test]
    fn exr_goes_to_sequences_not_video_or_still() {
        let selection = CategorySelection {
            video: true,
            stills: true,
            ..CategorySelection::default()
        };

        let video_exr = facts(ClipKind::Video, "/m/shot.0001.EXR", "");
        assert_eq!(classify_clip(&video_exr, &selection), Some(Category::Sequences));

        // A RAW-looking codec cannot pull a Still-kind clip out of
        // Sequences: the RAW rule wants a video-bearing kind.
        let still_exr = facts(ClipKind::Still, "/m/shot.0001.exr", "Blackmagic RAW");
        assert_eq!(classify_clip(&still_exr, &selection), Some(Category::Sequences));

        let plain_still = facts(ClipKind::Still, "/m/frame.png", "");
        assert_eq!(classify_clip(&plain_still, &selection), Some(Category::Still));
    }

    #[test]
    fn raw_and_sequences_ride_the_video_selection() {
        let no_video = CategorySelection {
            stills: true,
            ..CategorySelection::default()
        };
        let braw = facts(ClipKind::Video, "/m/a.braw", "braw");
        let exr_still = facts(ClipKind::Still, "/m/s.exr", "");

        assert_eq!(classify_clip(&braw, &no_video), None);
        // Still is selected, but the Still rule excludes .exr paths and
        // Sequences is not selected without video. The clip stays put.
        assert_eq!(classify_clip(&exr_still, &no_video), None);
    }

    #[test]
    fn fusion_selection_covers_titles_and_generators() {
        let selection = CategorySelection {
            fusion: true,
            ..CategorySelection::default()
        };

        let comp = facts(ClipKind::Fusion, "", "");
        let title = facts(ClipKind::FusionTitle, "", "");
        let generator = facts(ClipKind::Generator, "", "");

        assert_eq!(classify_clip(&comp, &selection), Some(Category::Fusion));
        assert_eq!(classify_clip(&title, &selection), Some(Category::FusionTitles));
        assert_eq!(
            classify_clip(&generator, &selection),
            Some(Category::FusionGenerators)
        );
    }

    #[test]
    fn unselected_categories_never_fire() {
        let nothing = CategorySelection::default();
        for kind in [
            ClipKind::Video,
            ClipKind::Audio,
            ClipKind::Timeline,
            ClipKind::Still,
            ClipKind::Multicam,
        ] {
            assert_eq!(classify_clip(&facts(kind, "/m/x", ""), &nothing), None);
        }
    }

    #[test]
    fn video_and_still_rules_carve_out_raw_and_exr() {
        // Outside the RAW/Sequences overlap below, no two rules can claim
        // the same clip: Video excludes RAW codecs and .exr paths, Still
        // excludes .exr paths.
        let samples = [
            facts(ClipKind::Video, "/m/a.braw", "Blackmagic RAW"),
            facts(ClipKind::VideoAudio, "/m/b.mov", "H.264"),
            facts(ClipKind::Video, "/m/c.0001.exr", ""),
            facts(ClipKind::Still, "/m/d.exr", ""),
            facts(ClipKind::Still, "/m/e.png", ""),
            facts(ClipKind::Audio, "/m/f.wav", ""),
            facts(ClipKind::Timeline, "", ""),
            facts(ClipKind::Compound, "", ""),
            facts(ClipKind::Fusion, "", ""),
            facts(ClipKind::FusionTitle, "", ""),
            facts(ClipKind::Generator, "", ""),
            facts(ClipKind::Subtitle, "/m/g.srt", ""),
            facts(ClipKind::Multicam, "", ""),
            facts(ClipKind::Unknown, "/m/h", ""),
        ];

        for sample in &samples {
            let matches = RULES.iter().filter(|(_, rule)| rule(sample)).count();
            assert!(matches <= 1, "{sample:?} matched {matches} rules");
        }
    }

    #[test]
    fn raw_outranks_sequences_when_both_apply() {
        // An .exr path with a RAW codec satisfies both leading rules;
        // table order decides and the assignment stays single.
        let selection = CategorySelection {
            video: true,
            ..CategorySelection::default()
        };
        let clip = facts(ClipKind::Video, "/m/plate.0001.exr", "ARRIRAW");

        assert_eq!(classify_clip(&clip, &selection), Some(Category::Raw));
    }

    #[test]
    fn priority_order_starts_with_raw_and_sequences() {
        let order: Vec<Category> = Category::in_priority_order().collect();
        assert_eq!(order[0], Category::Raw);
        assert_eq!(order[1], Category::Sequences);
        assert_eq!(order[2], Category::Video);
        assert_eq!(order.len(), 12);
    }
}
