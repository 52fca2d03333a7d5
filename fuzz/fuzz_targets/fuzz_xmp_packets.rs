#![no_main]

use libfuzzer_sys::fuzz_target;
use motioncarve::domain::services::xmp_packets;

fuzz_target!(|data: &[u8]| {
    for packet in xmp_packets(data) {
        assert!(packet.len() <= data.len());
    }
});
