#![no_main]
use herdtrace_core::{config::FieldLayout, extract::parse_sample};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = parse_sample(line, 1, &FieldLayout::default());
    }
});
