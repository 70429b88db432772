//! Fuzz target: validation of arbitrary `POST /api/artisans` bodies.
//!
//! Any byte sequence that parses as JSON must validate or fail cleanly,
//! and a rejected payload must name at least one field.

#![no_main]

use artisan_core::Artisan;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Err(e) = Artisan::from_json(&value) {
        assert!(!e.errors.is_empty(), "a validation error must list its fields");
    }
});
