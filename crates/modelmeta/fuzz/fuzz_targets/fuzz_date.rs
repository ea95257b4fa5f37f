//! Fuzz target for timestamp validation.
//!
//! This fuzzer tests that date validation:
//! 1. Never panics on any input string
//! 2. Agrees between `validate_date` and `DateStamp::parse`

#![no_main]

use libfuzzer_sys::fuzz_target;
use modelmeta::{DateStamp, validate_date};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let validated = validate_date(text).is_ok();
        let parsed = DateStamp::parse(text);
        assert_eq!(validated, parsed.is_ok());

        if let Ok(stamp) = parsed {
            assert_eq!(stamp.as_str(), text);
        }
    }
});
