use std::collections::HashMap;
use std::path::PathBuf;

use padron_recon::config::ReconConfig;
use padron_recon::engine::{load_source, run};
use padron_recon::model::{CanonicalRecord, ReconInput, RecordCategory};
use padron_recon::source::DecodeStats;
use padron_recon::MismatchReason;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_input(config: &ReconConfig) -> ReconInput {
    let dir = fixtures_dir();
    let mut sources = HashMap::new();
    for (name, source_config) in &config.sources {
        let path = dir.join(&source_config.file);
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
        let decoded = load_source(name, &text, source_config, config.diagnostics.max_samples);
        sources.insert(name.clone(), decoded);
    }
    ReconInput { sources }
}

fn fixture_config() -> ReconConfig {
    let toml = std::fs::read_to_string(fixtures_dir().join("arca-vs-sidrel.recon.toml")).unwrap();
    ReconConfig::from_toml(&toml).unwrap()
}

fn ids(records: &[CanonicalRecord]) -> Vec<&str> {
    records.iter().filter_map(|r| r.identifier()).collect()
}

// -------------------------------------------------------------------------
// Cross-reference
// -------------------------------------------------------------------------

#[test]
fn arca_employers_missing_from_sidrel() {
    let config = fixture_config();
    let result = run(&config, &load_input(&config)).unwrap();

    assert_eq!(
        ids(&result.missing),
        vec!["20041243393", "20100745683", "20111222333", "27222333444"]
    );
    assert_eq!(result.summary.primary_records, 7);
    assert_eq!(result.summary.secondary_records, 4);
    assert_eq!(result.summary.secondary_identifiers, 4);
    assert_eq!(result.summary.missing, 4);

    assert_eq!(result.missing[0].category(), RecordCategory::ExploitationAddress);
    assert_eq!(result.missing[0].display_text(), "LA CABAITA COLONA N 1 0");
    assert_eq!(result.missing[3].category(), RecordCategory::Fallback);
    assert_eq!(result.missing[3].display_text(), "REGISTRO SIN FORMATO");
}

#[test]
fn payroll_employers_missing_from_sidrel() {
    let mut config = fixture_config();
    config.cross.primary = "lsd".into();
    config.validate().unwrap();

    let result = run(&config, &load_input(&config)).unwrap();
    assert_eq!(ids(&result.missing), vec!["30712345678"]);
    match &result.missing[0] {
        CanonicalRecord::PayrollEmployer(r) => {
            assert_eq!(r.legal_name, "EMPRESA EJEMPLO S.A.");
            assert_eq!(r.location.full_address_text, "CETTOUR 2006, SAN JOSE, Entre Rios");
        }
        other => panic!("expected payroll employer, got {other:?}"),
    }
}

#[test]
fn sidrel_against_arca_reports_registry_only_employers() {
    let mut config = fixture_config();
    config.cross.primary = "sidrel".into();
    config.cross.secondary = "arca".into();

    let result = run(&config, &load_input(&config)).unwrap();
    assert_eq!(ids(&result.missing), vec!["30999888777"]);
    assert_eq!(result.missing[0].display_text(), "COOPERATIVA LA UNION LTDA");
}

#[test]
fn empty_secondary_file_reports_nothing() {
    let config = fixture_config();
    let mut input = load_input(&config);
    let empty = load_source("sidrel", "", &config.sources["sidrel"], 5);
    input.sources.insert("sidrel".into(), empty);

    let result = run(&config, &input).unwrap();
    assert!(result.missing.is_empty());
    assert_eq!(result.summary.primary_records, 7);
}

// -------------------------------------------------------------------------
// Per-source decoding
// -------------------------------------------------------------------------

#[test]
fn positional_fixture_stats() {
    let config = fixture_config();
    let input = load_input(&config);
    let arca = &input.sources["arca"];

    assert_eq!(
        arca.stats,
        DecodeStats {
            lines: 9,
            blank: 1,
            decoded: 7,
            dropped: 1,
            fallback: 1,
            errors: 0,
        }
    );
    assert_eq!(arca.diagnostics.count(MismatchReason::PositionalFallback), 1);

    let postal_codes: Vec<_> = arca
        .records
        .iter()
        .filter_map(|r| match r {
            CanonicalRecord::LedgerAddress(a) => Some(a.postal_code.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(postal_codes, vec!["3170", "3272", "3116", "3100", "3100", "100"]);
}

#[test]
fn delimited_fixture_with_crlf() {
    let config = fixture_config();
    let input = load_input(&config);
    let sidrel = &input.sources["sidrel"];

    assert_eq!(sidrel.records.len(), 4);
    assert_eq!(sidrel.stats.dropped, 2);
    assert_eq!(sidrel.diagnostics.count(MismatchReason::InvalidIdentifier), 1);
    assert_eq!(sidrel.diagnostics.count(MismatchReason::InsufficientColumns), 1);

    match &sidrel.records[0] {
        CanonicalRecord::Registry(r) => {
            assert_eq!(r.status.as_deref(), Some("ACTIVA"));
            assert!(!r.raw_line.contains('\r'));
        }
        other => panic!("expected registry record, got {other:?}"),
    }
    match &sidrel.records[2] {
        CanonicalRecord::Registry(r) => {
            assert_eq!(r.status, None);
            assert_eq!(r.activity.employee_count, 0);
            assert_eq!(r.location.street.as_deref(), Some("zona rural"));
            assert_eq!(r.location.house_number, None);
        }
        other => panic!("expected registry record, got {other:?}"),
    }
}

#[test]
fn payroll_fixture_categories() {
    let config = fixture_config();
    let input = load_input(&config);
    let lsd = &input.sources["lsd"];

    let categories: Vec<_> = lsd.records.iter().map(|r| r.category()).collect();
    use RecordCategory::*;
    assert_eq!(
        categories,
        vec![Employer, Employee, Concept, Concept, Familiar, Employer, Employee, Error, Employee]
    );
    assert_eq!(lsd.stats.errors, 1);
    assert_eq!(lsd.stats.dropped, 1);
    assert_eq!(lsd.diagnostics.count(MismatchReason::EmployerHeader), 1);
    assert_eq!(lsd.diagnostics.samples()[0].line_number, Some(8));
    assert_eq!(lsd.records[8].display_text(), "unknown");
    assert_eq!(lsd.keyed().count(), 2);
}

#[test]
fn result_reports_every_configured_source() {
    let config = fixture_config();
    let result = run(&config, &load_input(&config)).unwrap();
    let names: Vec<_> = result.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["arca", "lsd", "sidrel"]);
    assert_eq!(result.meta.config_name, "ARCA vs SIDREL");
    assert!(chrono::DateTime::parse_from_rfc3339(&result.meta.run_at).is_ok());
}
