use color_eyre::Result;
use color_eyre::eyre::Context;
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const SERVICE_NAME: &str = "fan-pages";

/// Keeps the span exporter alive. Call [`Telemetry::shutdown`] before exit
/// so batched spans are flushed.
pub struct Telemetry {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Telemetry {
    pub fn shutdown(self) {
        let Some(tracer_provider) = self.tracer_provider else {
            return;
        };
        if let Err(err) = tracer_provider.shutdown() {
            eprintln!("Failed to shut down tracer provider: {err}");
        }
    }
}

fn otlp_tracer_provider(endpoint: &str) -> Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .wrap_err("Failed to create OTLP span exporter")?;

    let resource = Resource::builder()
        .with_attributes([KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            SERVICE_NAME,
        )])
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}

/// Install the global subscriber: `filter` directives over a pretty console
/// layer, plus OTLP/gRPC span export when `otlp_endpoint` is given.
pub fn init_telemetry(otlp_endpoint: Option<&str>, filter: &str) -> Result<Telemetry> {
    let filter = EnvFilter::try_new(filter).wrap_err("Failed to create tracing filter")?;

    let tracer_provider = otlp_endpoint.map(otlp_tracer_provider).transpose()?;
    let otel_layer = tracer_provider.as_ref().map(|provider| {
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(otel_layer)
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;

    Ok(Telemetry { tracer_provider })
}
