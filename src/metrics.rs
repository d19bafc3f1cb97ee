//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vyzo_http_requests_total", "Total number of HTTP requests"),
        &["method", "status"]
    ).expect("metric can be created");
    pub static ref HTTP_REQUEST_DURATION_SECONDS: prometheus::HistogramVec = prometheus::HistogramVec::new(
        HistogramOpts::new(
            "vyzo_http_request_duration_seconds",
            "HTTP request duration in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method"]
    ).expect("metric can be created");

    // Engagement Metrics
    pub static ref VIEWS_RECORDED_TOTAL: IntCounter = IntCounter::new(
        "vyzo_views_recorded_total",
        "Total number of recorded video views"
    ).expect("metric can be created");
    pub static ref LIKES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vyzo_likes_total", "Total number of like/unlike operations"),
        &["target", "action"]
    ).expect("metric can be created");
    pub static ref COMMENTS_CREATED_TOTAL: IntCounter = IntCounter::new(
        "vyzo_comments_created_total",
        "Total number of comments created"
    ).expect("metric can be created");
    pub static ref FOLLOWS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vyzo_follows_total", "Total number of follow/unfollow operations"),
        &["action"]
    ).expect("metric can be created");
    pub static ref NOTIFICATIONS_CREATED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vyzo_notifications_created_total", "Total number of notifications fanned out"),
        &["kind", "routed"]
    ).expect("metric can be created");
    pub static ref MESSAGES_SENT_TOTAL: IntCounter = IntCounter::new(
        "vyzo_messages_sent_total",
        "Total number of direct messages sent"
    ).expect("metric can be created");

    // Search Metrics
    pub static ref SEARCHES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vyzo_searches_total", "Total number of search queries"),
        &["category"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vyzo_errors_total", "Total number of errors"),
        &["kind"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
///
/// Safe to call more than once; only the first call registers.
pub fn init_metrics() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
            .expect("HTTP_REQUESTS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
            .expect("HTTP_REQUEST_DURATION_SECONDS can be registered");
        REGISTRY
            .register(Box::new(VIEWS_RECORDED_TOTAL.clone()))
            .expect("VIEWS_RECORDED_TOTAL can be registered");
        REGISTRY
            .register(Box::new(LIKES_TOTAL.clone()))
            .expect("LIKES_TOTAL can be registered");
        REGISTRY
            .register(Box::new(COMMENTS_CREATED_TOTAL.clone()))
            .expect("COMMENTS_CREATED_TOTAL can be registered");
        REGISTRY
            .register(Box::new(FOLLOWS_TOTAL.clone()))
            .expect("FOLLOWS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(NOTIFICATIONS_CREATED_TOTAL.clone()))
            .expect("NOTIFICATIONS_CREATED_TOTAL can be registered");
        REGISTRY
            .register(Box::new(MESSAGES_SENT_TOTAL.clone()))
            .expect("MESSAGES_SENT_TOTAL can be registered");
        REGISTRY
            .register(Box::new(SEARCHES_TOTAL.clone()))
            .expect("SEARCHES_TOTAL can be registered");
        REGISTRY
            .register(Box::new(ERRORS_TOTAL.clone()))
            .expect("ERRORS_TOTAL can be registered");

        tracing::info!("Metrics registry initialized");
    });
}

/// Record one finished HTTP request.
pub fn observe_http_request(method: &str, status: u16, elapsed: std::time::Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method])
        .observe(elapsed.as_secs_f64());
}
