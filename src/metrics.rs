use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

/// Metric name prefix for all film-resolver metrics
const PREFIX: &str = "film_resolver";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Candidate Metrics
    pub static ref CANDIDATES_ACCEPTED_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_candidates_accepted_total"), "Candidate pages accepted as the local film"),
        &["extractor"]
    ).expect("Failed to create candidates_accepted_total metric");

    pub static ref CANDIDATES_REJECTED_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_candidates_rejected_total"), "Candidate pages rejected by reason"),
        &["reason"]
    ).expect("Failed to create candidates_rejected_total metric");

    // Identity Metrics
    pub static ref IDENTITIES_RESOLVED_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_identities_resolved_total"), "Identities resolved by cascade step"),
        &["pool", "step"]
    ).expect("Failed to create identities_resolved_total metric");

    pub static ref IDENTITIES_NOT_FOUND_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_identities_not_found_total"), "Names left unresolved"),
        &["pool", "reason"]
    ).expect("Failed to create identities_not_found_total metric");

    // Reference Index Metrics
    pub static ref INDEX_FILM_LOOKUPS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_index_film_lookups_total"), "Attempts to locate a film in the reference index"),
        &["outcome"]
    ).expect("Failed to create index_film_lookups_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(CANDIDATES_ACCEPTED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CANDIDATES_REJECTED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(IDENTITIES_RESOLVED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(IDENTITIES_NOT_FOUND_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(INDEX_FILM_LOOKUPS_TOTAL.clone()));

    tracing::debug!("Metrics initialized");
}

pub fn record_candidate_accepted(extractor: &str) {
    CANDIDATES_ACCEPTED_TOTAL
        .with_label_values(&[extractor])
        .inc();
}

pub fn record_candidate_rejected(reason: &str) {
    CANDIDATES_REJECTED_TOTAL.with_label_values(&[reason]).inc();
}

pub fn record_identity_resolved(pool: &str, step: &str) {
    IDENTITIES_RESOLVED_TOTAL
        .with_label_values(&[pool, step])
        .inc();
}

pub fn record_identity_not_found(pool: &str, reason: &str) {
    IDENTITIES_NOT_FOUND_TOTAL
        .with_label_values(&[pool, reason])
        .inc();
}

pub fn record_index_film_lookup(outcome: &str) {
    INDEX_FILM_LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Text exposition of everything registered.
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => String::from_utf8(buffer).unwrap_or_default(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_value(name: &str, labels: &[(&str, &str)]) -> f64 {
        REGISTRY
            .gather()
            .iter()
            .find(|m| m.get_name() == name)
            .and_then(|family| {
                family.get_metric().iter().find(|metric| {
                    labels.iter().all(|(k, v)| {
                        metric
                            .get_label()
                            .iter()
                            .any(|l| l.get_name() == *k && l.get_value() == *v)
                    })
                })
            })
            .map(|metric| metric.get_counter().get_value())
            .unwrap_or(0.0)
    }

    #[test]
    fn test_metrics_initialization() {
        init_metrics();
        record_index_film_lookup("found");

        let metric_families = REGISTRY.gather();
        assert!(!metric_families.is_empty(), "Metrics should be registered");
    }

    #[test]
    fn test_record_candidate_rejected() {
        init_metrics();

        let before = counter_value(
            "film_resolver_candidates_rejected_total",
            &[("reason", "metrics_test")],
        );
        record_candidate_rejected("metrics_test");
        record_candidate_rejected("metrics_test");
        let after = counter_value(
            "film_resolver_candidates_rejected_total",
            &[("reason", "metrics_test")],
        );

        assert_eq!(after - before, 2.0);
    }

    #[test]
    fn test_record_identity_resolved() {
        init_metrics();

        record_identity_resolved("cast", "metrics_test_step");

        assert!(
            counter_value(
                "film_resolver_identities_resolved_total",
                &[("pool", "cast"), ("step", "metrics_test_step")]
            ) >= 1.0
        );
    }

    #[test]
    fn test_gather_text() {
        init_metrics();
        record_identity_not_found("directors", "metrics_test");

        let text = gather_text();
        assert!(text.contains("film_resolver_identities_not_found_total"));
    }
}
