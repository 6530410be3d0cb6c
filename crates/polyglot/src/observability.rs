//! OpenTelemetry span export for development.

use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use polyglot_server::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber with an OpenTelemetry layer exporting spans to stdout.
///
/// Log filtering and formatting follow `logging`, so `--verbose` and
/// `--json-logs` behave as without the feature.
pub fn init_observability(logging: &LoggingConfig) -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let service_name = env!("CARGO_PKG_NAME");
    let resource = Resource::builder()
        .with_service_name(service_name)
        .with_attributes(vec![KeyValue::new(
            "service.version",
            env!("CARGO_PKG_VERSION"),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer(service_name);
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(logging.env_filter()?)
        .with(logging.fmt_layer())
        .with(otel_layer)
        .try_init()?;

    Ok(provider)
}

/// Flush pending spans.
pub fn shutdown_observability(provider: SdkTracerProvider) {
    if let Err(e) = provider.shutdown() {
        eprintln!("Failed to flush spans: {}", e);
    }
}
