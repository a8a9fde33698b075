#![no_main]

use broadcast_wire::Broadcast;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut b = Broadcast::default();
    let mut r = data;
    let _ = b.decode_from_decrypted(&mut r);
});
