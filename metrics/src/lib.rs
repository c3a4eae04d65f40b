use std::{env, sync::LazyLock};

use strum_macros::EnumIter;

// exporting stays off unless a collector is configured
static ENABLED: LazyLock<bool> = LazyLock::new(|| env::var("PROMETHEUS_HOST").is_ok());

static CONNECTION_URI: LazyLock<String> = LazyLock::new(|| {
    let host = env::var("PROMETHEUS_HOST").unwrap_or("localhost".into());
    let port = env::var("PROMETHEUS_PORT").unwrap_or("9090".into());

    format!("http://{host}:{port}/api/v1/otlp/v1/metrics")
});

const SERVICE_NAME: &str = "image_cache";

#[derive(Debug, EnumIter, Hash, Eq, PartialEq)]
pub enum Metrics {
    /// Counter for lookups answered from memory
    ImageCacheHit,
    /// Counter for lookups that had to go to the network
    ImageCacheMiss,
    /// Counter for downloaded images stored in memory
    ImageCacheStore,
    /// Counter for downloaded payloads that were not images
    ImageCacheRejected,
}

impl Metrics {
    fn name(&self) -> &'static str {
        match self {
            Metrics::ImageCacheHit => "IMAGE_CACHE_HIT",
            Metrics::ImageCacheMiss => "IMAGE_CACHE_MISS",
            Metrics::ImageCacheStore => "IMAGE_CACHE_STORE",
            Metrics::ImageCacheRejected => "IMAGE_CACHE_REJECTED",
        }
    }
}

/// Flushes pending counters, call once before the process exits
pub fn shutdown() {
    if *ENABLED {
        let _ = _private::PROVIDER.shutdown();
    }
}

pub fn enabled() -> bool {
    *ENABLED
}

pub mod _private {
    pub use opentelemetry::KeyValue;

    use std::{collections::HashMap, sync::LazyLock, time::Duration};

    use opentelemetry::{
        global,
        metrics::{Counter, Meter},
    };
    use opentelemetry_otlp::{MetricExporter, Protocol, WithExportConfig};
    use opentelemetry_sdk::{
        Resource,
        metrics::{PeriodicReader, SdkMeterProvider},
    };
    use strum::IntoEnumIterator;

    use crate::{CONNECTION_URI, Metrics, SERVICE_NAME};

    static OTEL_METER: LazyLock<Meter> = LazyLock::new(|| {
        global::set_meter_provider(PROVIDER.clone());
        global::meter(SERVICE_NAME)
    });

    pub static PROVIDER: LazyLock<SdkMeterProvider> = LazyLock::new(|| {
        let exporter = MetricExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(CONNECTION_URI.to_string())
            .build()
            .expect("Expect Prometheus exporter to build");

        let reader = PeriodicReader::builder(exporter)
            .with_interval(Duration::from_secs(10))
            .build();

        let resource = Resource::builder().with_service_name(SERVICE_NAME).build();

        SdkMeterProvider::builder()
            .with_reader(reader)
            .with_resource(resource)
            .build()
    });

    pub static COUNTERS: LazyLock<HashMap<Metrics, Counter<u64>>> = LazyLock::new(|| {
        let mut mapping: HashMap<Metrics, Counter<u64>> = HashMap::new();

        for metric in crate::Metrics::iter() {
            let metric_meter = OTEL_METER.u64_counter(metric.name()).build();

            mapping.insert(metric, metric_meter);
        }

        mapping
    });
}

#[macro_export]
macro_rules! put_metric {
    ($metric_name:expr, $added_value:expr $(, $key:literal => $value:expr)* $(,)?) => {{
        use $crate::_private::{KeyValue, COUNTERS};
        use $crate::Metrics;

        let metric_name: Metrics = $metric_name;
        let added_value: u64 = $added_value;

        let attributes: &[KeyValue] = &[
            $(KeyValue::new($key, $value),)*
        ];

        if $crate::enabled() {
            if let Some(counter) = COUNTERS.get(&metric_name) {
                counter.add(added_value, attributes);
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn counter_names_are_unique() {
        let names: HashSet<&str> = Metrics::iter().map(|metric| metric.name()).collect();

        assert_eq!(names.len(), Metrics::iter().count());
    }
}
