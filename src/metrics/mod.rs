//! Hit/miss/eviction counters for the [`Cache`](crate::builder::Cache) facade.
//!
//! Enabled with the `metrics` feature. Recording, snapshotting and exporting
//! are separate traits so a bench can read snapshots directly while a
//! service pushes them to a monitoring backend.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider};
