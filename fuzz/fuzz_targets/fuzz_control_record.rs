//! Fuzz target: postcard-encoded `ControlRecord` / `ControlPatch`
//!
//! Stored control blobs come back from the store as raw bytes. Corrupted
//! blobs must decode to an error, never a panic.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A decoded patch that validates never yields a threshold above 100
//! - Re-encoding a decoded record decodes back to the same record
//!
//! cargo fuzz run fuzz_control_record

#![no_main]

use greenhouse::controls::{ControlPatch, ControlRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(record) = postcard::from_bytes::<ControlRecord>(data) {
        let bytes = postcard::to_allocvec(&record).unwrap();
        let back: ControlRecord = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, record);
    }

    if let Ok(patch) = postcard::from_bytes::<ControlPatch>(data) {
        if patch.validate().is_ok() {
            let mut record = ControlRecord::default();
            record.apply(&patch);
            assert!(record.threshold_humidity <= 100);
        }
    }
});
