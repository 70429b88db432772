//! Fuzz target: the email address check on arbitrary UTF-8.
//!
//! Must never panic; any accepted address contains exactly one `@`.

#![no_main]

use artisan_core::is_valid_email;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if is_valid_email(s) {
        assert_eq!(s.matches('@').count(), 1);
    }
});
