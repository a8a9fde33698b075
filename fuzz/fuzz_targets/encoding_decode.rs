#![no_main]

use broadcast_wire::format;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = data;
    let _ = format::decode(&mut r);
});
