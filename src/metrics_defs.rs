//! Metric definitions for the gateway, recorded through the `metrics` facade.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const REQUESTS: MetricDef = MetricDef {
    name: "gateway.requests",
    metric_type: MetricType::Counter,
    description: "Proxied requests served. Tagged with endpoint, status.",
};

pub const REQUEST_DURATION: MetricDef = MetricDef {
    name: "gateway.request.duration",
    metric_type: MetricType::Histogram,
    description: "Proxied request duration in seconds. Tagged with endpoint.",
};

pub const UPSTREAM_FAILURES: MetricDef = MetricDef {
    name: "gateway.upstream.failures",
    metric_type: MetricType::Counter,
    description: "Upstream fetch transport failures. Tagged with endpoint, kind.",
};

pub const ALL_METRICS: &[MetricDef] = &[REQUESTS, REQUEST_DURATION, UPSTREAM_FAILURES];
