use crate::pool::{ClipId, MediaPool};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Clip property and metadata keys as the host spells them.
pub mod props {
    pub const TYPE: &str = "Type";
    pub const CLIP_NAME: &str = "Clip Name";
    pub const FILE_PATH: &str = "File Path";
    pub const VIDEO_CODEC: &str = "Video Codec";
    pub const KEYWORDS: &str = "Keywords";
}

/// The host's coarse clip type, read from the `Type` property. The tag
/// strings are fixed host vocabulary; anything else maps to `Unknown` and
/// is ignored by collection and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipKind {
    VideoAudio,
    Video,
    Audio,
    Timeline,
    Compound,
    Fusion,
    FusionTitle,
    Generator,
    Subtitle,
    Still,
    Multicam,
    Unknown,
}

impl ClipKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Video + Audio" => Self::VideoAudio,
            "Video" => Self::Video,
            "Audio" => Self::Audio,
            "Timeline" => Self::Timeline,
            "Compound" => Self::Compound,
            "Fusion" => Self::Fusion,
            "Fusion Title" => Self::FusionTitle,
            "Generator" => Self::Generator,
            "Subtitle" => Self::Subtitle,
            "Still" => Self::Still,
            "Multicam" => Self::Multicam,
            _ => Self::Unknown,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::VideoAudio => "Video + Audio",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Timeline => "Timeline",
            Self::Compound => "Compound",
            Self::Fusion => "Fusion",
            Self::FusionTitle => "Fusion Title",
            Self::Generator => "Generator",
            Self::Subtitle => "Subtitle",
            Self::Still => "Still",
            Self::Multicam => "Multicam",
            Self::Unknown => "Unknown",
        }
    }

    /// Video-bearing kinds, the ones a video codec property belongs to.
    pub fn has_video(&self) -> bool {
        matches!(self, Self::Video | Self::VideoAudio)
    }
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// On the wire a kind is its host tag string, and a tag this build does
// not know comes back as `Unknown` rather than failing the whole file.
impl Serialize for ClipKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ClipKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// A clip as stored by [`crate::MemoryPool`]: a name plus the raw string
/// property and metadata maps the host would hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRecord {
    pub name: String,
    pub properties: HashMap<String, String>,
    pub metadata: HashMap<String, String>,
}

impl ClipRecord {
    pub fn new(name: impl Into<String>, kind: ClipKind) -> Self {
        let name = name.into();
        let mut properties = HashMap::new();
        properties.insert(props::TYPE.to_string(), kind.tag().to_string());
        properties.insert(props::CLIP_NAME.to_string(), name.clone());
        Self {
            name,
            properties,
            metadata: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_file_path(self, path: impl Into<String>) -> Self {
        self.with_property(props::FILE_PATH, path)
    }

    pub fn with_video_codec(self, codec: impl Into<String>) -> Self {
        self.with_property(props::VIDEO_CODEC, codec)
    }

    pub fn with_keywords(self, keywords: impl Into<String>) -> Self {
        self.with_metadata(props::KEYWORDS, keywords)
    }

    pub fn kind(&self) -> ClipKind {
        self.properties
            .get(props::TYPE)
            .map(|tag| ClipKind::from_tag(tag))
            .unwrap_or(ClipKind::Unknown)
    }
}

/// Clip type from the `Type` property; `Unknown` when missing or foreign.
pub fn clip_kind<P: MediaPool + ?Sized>(pool: &P, clip: ClipId) -> ClipKind {
    pool.clip_property(clip, props::TYPE)
        .map(|tag| ClipKind::from_tag(&tag))
        .unwrap_or(ClipKind::Unknown)
}

/// Source file path, empty for pathless clips (timelines, generators).
pub fn clip_file_path<P: MediaPool + ?Sized>(pool: &P, clip: ClipId) -> String {
    pool.clip_property(clip, props::FILE_PATH).unwrap_or_default()
}

/// Video codec name, empty when the host reports none.
pub fn clip_video_codec<P: MediaPool + ?Sized>(pool: &P, clip: ClipId) -> String {
    pool.clip_property(clip, props::VIDEO_CODEC).unwrap_or_default()
}

/// Split a raw `Keywords` field into tokens: comma-separated, whitespace
/// trimmed, empty tokens dropped.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The clip's keyword tokens, empty when the metadata field is unset.
pub fn clip_keywords<P: MediaPool + ?Sized>(pool: &P, clip: ClipId) -> Vec<String> {
    pool.clip_metadata(clip, props::KEYWORDS)
        .map(|raw| parse_keywords(&raw))
        .unwrap_or_default()
}

/// First keyword token, the one keyword grouping buckets by.
pub fn first_keyword<P: MediaPool + ?Sized>(pool: &P, clip: ClipId) -> Option<String> {
    clip_keywords(pool, clip).into_iter().next()
}
