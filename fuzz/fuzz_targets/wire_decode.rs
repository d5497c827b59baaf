#![no_main]

use libfuzzer_sys::fuzz_target;
use rehash::{JsonWire, RawWire, WireFormat};

// Both codecs must refuse arbitrary bodies with an error, never a panic.
fuzz_target!(|data: &[u8]| {
    let _ = JsonWire.decode_request(data);
    let _ = RawWire.decode_request(data);
});
