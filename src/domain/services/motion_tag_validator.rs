//! Motion tag validator
//!
//! Looks for the XMP property names that Google and Samsung cameras write
//! into motion photos. The metadata itself is never parsed: a tag counts as
//! present when its exact, case-sensitive name occurs anywhere before the
//! end of the image.

use aho_corasick::{AhoCorasick, MatchKind};
use memchr::memmem;

/// Known motion-photo tag names, most specific first
///
/// Typical forms are `<GCamera:MotionPhoto>1</GCamera:MotionPhoto>`,
/// `Camera:MotionPhoto="1"` and the older `GCamera:MicroVideo`.
pub const MOTION_TAGS: [&str; 5] = [
    "GCamera:MotionPhoto",
    "Camera:MotionPhoto",
    "GCamera:MicroVideo",
    "MotionPhoto",
    "MicroVideo",
];

/// Detects motion-photo indicator tags ahead of the image end
#[derive(Debug, Clone)]
pub struct MotionTagValidator {
    tags: Vec<&'static str>,
    /// Leftmost-longest automaton over `tags`
    matcher: Option<AhoCorasick>,
}

impl MotionTagValidator {
    /// Creates a validator over the built-in vocabulary
    pub fn new() -> Self {
        Self::with_tags(&MOTION_TAGS)
    }

    /// Creates a validator over a custom vocabulary
    pub fn with_tags(tags: &[&'static str]) -> Self {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(tags)
            .ok();

        Self {
            tags: tags.to_vec(),
            matcher,
        }
    }

    /// Returns the vocabulary
    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }

    /// Returns the first tag found in `data[..eoi_offset]`
    ///
    /// When two tags start at the same byte the longer one wins, so
    /// `GCamera:MotionPhoto` is reported instead of `MotionPhoto`'s
    /// shorter relatives.
    pub fn find_tag(&self, data: &[u8], eoi_offset: usize) -> Option<&'static str> {
        let region = &data[..eoi_offset.min(data.len())];

        match &self.matcher {
            Some(matcher) => matcher
                .find(region)
                .map(|m| self.tags[m.pattern().as_usize()]),
            None => self.find_tag_linear(region),
        }
    }

    /// Returns whether any tag occurs before `eoi_offset`
    pub fn has_motion_tag(&self, data: &[u8], eoi_offset: usize) -> bool {
        self.find_tag(data, eoi_offset).is_some()
    }

    /// Fallback when the automaton could not be built
    fn find_tag_linear(&self, region: &[u8]) -> Option<&'static str> {
        self.tags
            .iter()
            .filter_map(|tag| memmem::find(region, tag.as_bytes()).map(|pos| (pos, *tag)))
            .min_by_key(|(pos, tag)| (*pos, std::cmp::Reverse(tag.len())))
            .map(|(_, tag)| tag)
    }
}

impl Default for MotionTagValidator {
    fn default() -> Self {
        Self::new()
    }
}
