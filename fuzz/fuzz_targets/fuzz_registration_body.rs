//! Fuzz target: validation of arbitrary `POST /api/register` bodies.

#![no_main]

use artisan_core::{is_valid_email, Registration};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    match Registration::from_json(&value) {
        // An accepted registration never carries a malformed email.
        Ok(reg) => assert!(reg.email.as_deref().map_or(true, is_valid_email)),
        Err(e) => assert!(!e.errors.is_empty()),
    }
});
