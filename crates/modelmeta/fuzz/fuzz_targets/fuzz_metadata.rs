//! Fuzz target for coercing plain JSON into metadata.
//!
//! Arbitrary JSON must either be rejected with an error or produce metadata
//! whose plain form rebuilds an equal value.

#![no_main]

use libfuzzer_sys::fuzz_target;
use modelmeta::{FromRaw, History, MetaData};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    if let Ok(history) = History::from_raw(&value) {
        let plain = serde_json::to_value(&history).unwrap();
        assert_eq!(History::from_raw(&plain).unwrap(), history);
    }

    if let Ok(meta) = MetaData::from_raw(&value) {
        let plain = serde_json::to_value(&meta).unwrap();
        let rebuilt = MetaData::from_raw(&plain).unwrap();
        assert_eq!(rebuilt.annotations(), meta.annotations());
    }
});
