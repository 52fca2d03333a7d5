//! Payload carver
//!
//! Locates an embedded container after the end of the JPEG image and
//! turns the match into a [`PayloadSpan`]. The container is assumed to run
//! to the end of the file, so only its start has to be found.

use super::scanner::ScanError;
use crate::domain::entities::{ContainerKind, ContainerSignature, MP4_FTYP_SIGNATURE, PayloadSpan};
use aho_corasick::{AhoCorasick, MatchKind};
use memchr::memmem;
use std::ops::Range;

/// ISO-BMFF box names reported by [`PayloadCarver::probe_tail`]
pub const VIDEO_BOX_NAMES: [&str; 4] = ["ftyp", "moov", "mdat", "mvhd"];

/// Smallest legal box: 4-byte length plus 4-byte type
const MIN_BOX_LEN: usize = 8;
const TAIL_PREVIEW_LEN: usize = 50;

/// What follows the image end when no container was recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailProbe {
    /// Bytes between the image end and the end of the file
    pub trailing_bytes: usize,
    /// First bytes of the tail
    pub preview: Vec<u8>,
    /// First offset (relative to the image end) of each box name seen
    pub box_hints: Vec<(&'static str, usize)>,
}

/// Finds the first container signature inside the tail window
#[derive(Debug, Clone)]
pub struct PayloadCarver {
    signatures: Vec<ContainerSignature>,
    /// Leftmost-first automaton over the signature magics
    matcher: Option<AhoCorasick>,
}

impl PayloadCarver {
    /// Creates a carver recognizing MP4 payloads
    pub fn new() -> Self {
        Self::with_signatures(vec![MP4_FTYP_SIGNATURE])
    }

    /// Creates a carver over custom signatures
    pub fn with_signatures(signatures: Vec<ContainerSignature>) -> Self {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(signatures.iter().map(|s| s.magic()))
            .ok();

        Self {
            signatures,
            matcher,
        }
    }

    /// Returns `eoi_offset .. min(len, eoi_offset + max_tail_search)`
    pub fn tail_window(data: &[u8], eoi_offset: usize, max_tail_search: usize) -> Range<usize> {
        let start = eoi_offset.min(data.len());
        let end = start.saturating_add(max_tail_search).min(data.len());
        start..end
    }

    /// Carves the payload that follows `eoi_offset`
    ///
    /// Returns `Ok(None)` when no signature lies entirely inside the tail
    /// window. The payload starts `header_prefix_len` bytes before the
    /// signature, never earlier than `eoi_offset`, and ends at the end of
    /// the buffer.
    pub fn carve(
        &self,
        data: &[u8],
        eoi_offset: usize,
        max_tail_search: usize,
    ) -> Result<Option<PayloadSpan>, ScanError> {
        let window = Self::tail_window(data, eoi_offset, max_tail_search);

        let Some((relative, signature)) = self.first_signature(&data[window.clone()]) else {
            return Ok(None);
        };

        let match_pos = window.start + relative;
        let prefix = signature.header_prefix_len();
        let start = match_pos.saturating_sub(prefix).max(eoi_offset);
        let end = data.len();

        let clamped = match_pos - start < prefix;
        let kind = if clamped {
            ContainerKind::Unknown
        } else {
            classify_box(data, start, signature)
        };

        tracing::trace!(match_pos, start, end, %kind, "container signature matched");

        PayloadSpan::new(start, end, kind, data.len())
            .map(Some)
            .ok_or(ScanError::MalformedPayloadSpan {
                start,
                end,
                total_length: data.len(),
            })
    }

    /// Describes the tail when no payload was found
    pub fn probe_tail(data: &[u8], eoi_offset: usize) -> TailProbe {
        let tail = &data[eoi_offset.min(data.len())..];
        let preview_len = tail.len().min(TAIL_PREVIEW_LEN);

        let box_hints = VIDEO_BOX_NAMES
            .iter()
            .filter_map(|name| memmem::find(tail, name.as_bytes()).map(|pos| (*name, pos)))
            .collect();

        TailProbe {
            trailing_bytes: tail.len(),
            preview: tail[..preview_len].to_vec(),
            box_hints,
        }
    }

    /// Earliest signature match within `window`
    fn first_signature(&self, window: &[u8]) -> Option<(usize, ContainerSignature)> {
        match &self.matcher {
            Some(matcher) => matcher
                .find(window)
                .map(|m| (m.start(), self.signatures[m.pattern().as_usize()])),
            None => self
                .signatures
                .iter()
                .filter_map(|sig| memmem::find(window, sig.magic()).map(|pos| (pos, *sig)))
                .min_by_key(|(pos, _)| *pos),
        }
    }
}

impl Default for PayloadCarver {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the big-endian box length at `start` and checks it is plausible
fn classify_box(data: &[u8], start: usize, signature: ContainerSignature) -> ContainerKind {
    let Some(header) = data.get(start..start + 4) else {
        return ContainerKind::Unknown;
    };

    let box_len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let fits = start
        .checked_add(box_len)
        .is_some_and(|box_end| box_end <= data.len());

    if box_len >= MIN_BOX_LEN && fits {
        signature.kind()
    } else {
        ContainerKind::Unknown
    }
}
