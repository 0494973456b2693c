use crate::config::{ReconConfig, SourceConfig};
use crate::error::ReconError;
use crate::model::{ReconInput, ReconMeta, ReconResult, ReconSummary, SourceReport};
use crate::reconcile::{identifier_set, reconcile};
use crate::source::{decode_source, DecodedSource};

/// Run the cross-reference described by `config` over decoded sources.
///
/// When either side has no identified records the result is empty: a missing
/// or unreadable extract would otherwise report every employer of the other
/// side. Error records and payroll detail lines carry no identifier and do
/// not count.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let primary = lookup(input, &config.cross.primary, "primary")?;
    let secondary = lookup(input, &config.cross.secondary, "secondary")?;

    let missing: Vec<_> = if primary.keyed().next().is_none() || secondary.keyed().next().is_none() {
        tracing::warn!(
            primary = %primary.name,
            primary_keyed = primary.keyed().count(),
            secondary = %secondary.name,
            secondary_keyed = secondary.keyed().count(),
            "a source has no identified employers, skipping cross-reference"
        );
        Vec::new()
    } else {
        reconcile(&primary.records, &secondary.records)
            .into_iter()
            .cloned()
            .collect()
    };

    let summary = ReconSummary {
        primary_records: primary.records.len(),
        secondary_records: secondary.records.len(),
        primary_keyed: primary.keyed().count(),
        secondary_keyed: secondary.keyed().count(),
        secondary_identifiers: identifier_set(&secondary.records).len(),
        missing: missing.len(),
    };
    tracing::debug!(
        primary = %primary.name,
        secondary = %secondary.name,
        missing = summary.missing,
        "cross-reference complete"
    );

    let sources = config
        .sources
        .keys()
        .filter_map(|name| input.sources.get(name))
        .map(SourceReport::from)
        .collect();

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            primary: config.cross.primary.clone(),
            secondary: config.cross.secondary.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        sources,
        missing,
    })
}

/// Decode the text of one configured source.
pub fn load_source(
    name: &str,
    text: &str,
    source_config: &SourceConfig,
    max_samples: usize,
) -> DecodedSource {
    decode_source(
        name,
        text,
        source_config.format,
        &source_config.decoder_options(),
        max_samples,
    )
}

fn lookup<'a>(
    input: &'a ReconInput,
    name: &str,
    side: &str,
) -> Result<&'a DecodedSource, ReconError> {
    input.sources.get(name).ok_or_else(|| {
        ReconError::UnknownSource(format!("{side} source '{name}' has no data"))
    })
}
