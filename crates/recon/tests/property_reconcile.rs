// Property-based tests for identifier decoding and cross-reference.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use padron_recon::decode::{decoder_for, DecoderOptions};
use padron_recon::model::{CanonicalRecord, FallbackRecord, SourceFormat};
use padron_recon::reconcile::reconcile;
use padron_recon::Diagnostics;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Identifiers drawn from a small pool so lists overlap and repeat.
fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (0u8..12).prop_map(|n| format!("2010074{:04}", n)),
        1 => r"[0-9]{11}",
    ]
}

fn record(id: &str) -> CanonicalRecord {
    CanonicalRecord::Fallback(FallbackRecord {
        identifier: id.to_string(),
        raw_line: format!("{id} REGISTRO"),
        display_text: "REGISTRO".to_string(),
    })
}

fn arb_records(max: usize) -> impl Strategy<Value = Vec<CanonicalRecord>> {
    proptest::collection::vec(arb_identifier(), 0..=max)
        .prop_map(|ids| ids.iter().map(|id| record(id)).collect())
}

fn ids(records: &[&CanonicalRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.identifier())
        .map(str::to_string)
        .collect()
}

// Test 1: result is exactly the primary records whose identifier is absent
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn result_is_filtered_primary(
        primary in arb_records(20),
        secondary in arb_records(20),
    ) {
        let known: HashSet<&str> = secondary.iter().filter_map(|r| r.identifier()).collect();
        let expected: Vec<&CanonicalRecord> = primary
            .iter()
            .filter(|r| !known.contains(r.identifier().unwrap()))
            .collect();

        let missing = reconcile(&primary, &secondary);
        prop_assert_eq!(missing.len(), expected.len());
        for (got, want) in missing.iter().zip(&expected) {
            prop_assert!(std::ptr::eq(*got, *want), "result must reference primary records in order");
        }
    }
}

// Test 2: ordering of the secondary list does not matter
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn secondary_order_is_irrelevant(
        primary in arb_records(20),
        secondary in arb_records(20),
        seed in any::<u64>(),
    ) {
        let mut shuffled = secondary.clone();
        // Deterministic rotation + reversal driven by the seed.
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
            if seed % 2 == 0 {
                shuffled.reverse();
            }
        }

        prop_assert_eq!(
            ids(&reconcile(&primary, &secondary)),
            ids(&reconcile(&primary, &shuffled))
        );
    }
}

// Test 3: identities on empty and self inputs
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn empty_and_self_identities(records in arb_records(20)) {
        prop_assert_eq!(reconcile(&records, &[]).len(), records.len());
        prop_assert!(reconcile(&[], &records).is_empty());
        prop_assert!(reconcile(&records, &records).is_empty());
    }
}

// Test 4: an identifier present in secondary removes every duplicate
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn duplicates_excluded_together(
        primary in arb_records(20),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!primary.is_empty());
        let chosen = primary[pick.index(primary.len())].identifier().unwrap().to_string();
        let secondary = vec![record(&chosen)];

        let missing = reconcile(&primary, &secondary);
        prop_assert!(missing.iter().all(|r| r.identifier() != Some(chosen.as_str())));
        let remaining = primary.iter().filter(|r| r.identifier() != Some(chosen.as_str())).count();
        prop_assert_eq!(missing.len(), remaining);
    }
}

// Test 5: identifier prefix lines always keep their identifier
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn identifier_prefix_survives_decoding(
        id in r"[0-9]{11}",
        rest in r"[A-Z0-9 ./-]{0,60}",
        format in prop_oneof![Just(SourceFormat::PositionalLedger), Just(SourceFormat::Generic)],
    ) {
        let line = format!("{id}{rest}");
        let decoder = decoder_for(format, &DecoderOptions::default());
        let mut diag = Diagnostics::default();
        let record = decoder.decode(&line, &mut diag);
        prop_assert!(record.is_some());
        let record = record.unwrap();
        prop_assert_eq!(record.identifier(), Some(id.as_str()));
    }
}
