use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub logins_total: IntCounterVec,
    pub access_denied_total: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Global metrics, registered on first use.
pub fn metrics() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let logins_total = IntCounterVec::new(
            Opts::new("helpdesk_logins_total", "Successful logins by role"),
            &["role"],
        )
        .expect("metric can be created");

        let access_denied_total = IntCounterVec::new(
            Opts::new(
                "helpdesk_access_denied_total",
                "Requests refused by an access gate",
            ),
            &["reason"],
        )
        .expect("metric can be created");

        for collector in [
            Box::new(http_requests_total.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(http_request_duration_seconds.clone()),
            Box::new(logins_total.clone()),
            Box::new(access_denied_total.clone()),
        ] {
            registry
                .register(collector)
                .expect("collector can be registered");
        }

        Metrics {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            logins_total,
            access_denied_total,
        }
    })
}

pub fn record_login(role: &str) {
    metrics().logins_total.with_label_values(&[role]).inc();
}

pub fn record_access_denied(reason: &str) {
    metrics()
        .access_denied_total
        .with_label_values(&[reason])
        .inc();
}

pub fn get_metrics() -> Result<String, anyhow::Error> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = metrics().registry.gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
