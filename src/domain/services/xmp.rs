//! Lightweight XMP packet walk
//!
//! Steps over the JPEG marker segments that precede the scan data and
//! collects APP1 segments carrying XMP. Only used to describe a file when
//! the motion tag gate rejects it.

use super::boundary_locator::JPEG_SOI;
use memchr::memchr;

/// Namespace identifier that opens an XMP APP1 segment
pub const XMP_NAMESPACE: &[u8] = b"http://ns.adobe.com/xap/1.0/";

const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;

/// Returns the XMP packets stored in the APP1 segments of `data`
///
/// The namespace header and its NUL terminator are stripped. The walk
/// stops at the first start-of-scan or end-of-image marker, at a byte
/// that is not a marker, or at a segment whose length runs past the
/// buffer.
pub fn xmp_packets(data: &[u8]) -> Vec<&[u8]> {
    let mut packets = Vec::new();

    if !data.starts_with(&JPEG_SOI) {
        return packets;
    }

    let mut pos = JPEG_SOI.len();

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            break;
        }

        let marker = data[pos + 1];
        pos += 2;

        if marker == SOS || marker == EOI {
            break;
        }

        if pos + 2 > data.len() {
            break;
        }

        let seg_len = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        if seg_len < 2 {
            break;
        }

        let seg_end = pos + seg_len;
        if seg_end > data.len() {
            break;
        }

        let segment = &data[pos + 2..seg_end];
        if marker == APP1 && segment.starts_with(XMP_NAMESPACE) {
            let packet = match memchr(0, segment) {
                Some(nul) => &segment[nul + 1..],
                None => segment,
            };
            packets.push(packet);
        }

        pos = seg_end;
    }

    packets
}
