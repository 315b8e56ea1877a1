#![no_main]

use libfuzzer_sys::fuzz_target;
use gpu_timeline::trace::TraceTable;

fuzz_target!(|data: &[u8]| {
    // Parsing must reject malformed input with an error, never panic
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = TraceTable::parse(input);
    }
});
