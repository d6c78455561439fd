//! Fuzz target: `jsonl::parse_line` → `Engine::try_derive`
//!
//! Feeds arbitrary bytes through the JSON-lines sample parser and derives
//! metrics for anything that parses.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A parsed sample has finite inputs and is never at a singular temperature
//! - Derived metrics are either finite or rejected
//! - Score stays within 10..=100
//!
//! cargo fuzz run fuzz_sample_line

#![no_main]

use greenhouse::adapters::jsonl::parse_line;
use greenhouse::engine::Engine;
use greenhouse::engine::psychrometrics::{AH_POLE_C, SVP_POLE_C};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(sample) = parse_line(line) else {
        return;
    };

    assert!(sample.temperature_c.is_finite());
    assert!(sample.humidity_pct.is_finite());
    assert!(sample.temperature_c != SVP_POLE_C && sample.temperature_c != AH_POLE_C);

    let engine = Engine::default();
    if let Ok(m) = engine.try_derive(&sample) {
        assert!(m.vpd_kpa.is_finite());
        assert!(m.absolute_humidity_g_m3.is_finite());
        assert!((10..=100).contains(&m.growth_score));
        assert_eq!(engine.derive(&sample), m, "derivation must be deterministic");
    }
});
