#![no_main]

use broadcast_wire::Broadcast;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to the same bytes
    if let Ok(b) = Broadcast::from_bytes(data) {
        if let Ok(out) = b.to_bytes() {
            assert_eq!(Broadcast::from_bytes(&out).ok(), Some(b));
        }
    }
});
