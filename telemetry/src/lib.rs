use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporterBuilder, WithExportConfig};
use opentelemetry_sdk::trace::{Config, Tracer, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};
use serde::Deserialize;
use tracing::subscriber::set_global_default;
use tracing::{Span, Subscriber};
use tracing_actix_web::{DefaultRootSpanBuilder, Level, RootSpanBuilder};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

#[derive(Deserialize, Clone)]
pub struct TelemetrySettings {
    pub service_name: String,
    pub log_level: String,
    /// OTLP/HTTP collector. Spans are only exported when this is set.
    pub otlp_endpoint: Option<String>,
}

/// Compose multiple layers into a tracing subscriber.
///
/// `RUST_LOG` takes precedence over `env_filter` when it is set.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
    tracer: Option<Tracer>,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .with(tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer)))
}

/// Register a subscriber as global default to process span data.
///
/// Only the first call has an effect, later calls are ignored.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    let _ = LogTracer::init();
    let _ = set_global_default(subscriber);
}

/// Build a batching OTLP exporter when an endpoint is configured.
///
/// The batch processor runs on its own thread, so this works under the
/// single-threaded actix runtime. Keep the returned provider alive for as
/// long as spans should be exported.
pub fn init_tracer(settings: &TelemetrySettings) -> Result<Option<TracerProvider>, TraceError> {
    let Some(endpoint) = settings.otlp_endpoint.as_ref() else {
        return Ok(None);
    };

    let span_exporter = opentelemetry_otlp::new_exporter()
        .http()
        .with_endpoint(endpoint.clone())
        .with_http_client(reqwest::Client::default())
        .with_timeout(std::time::Duration::from_secs(2));

    let provider = TracerProvider::builder()
        .with_config(
            Config::default().with_resource(Resource::new(vec![KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                settings.service_name.clone(),
            )])),
        )
        .with_batch_exporter(
            SpanExporterBuilder::Http(span_exporter).build_span_exporter()?,
            runtime::TokioCurrentThread,
        )
        .build();

    Ok(Some(provider))
}

/// The tracer handed to `get_subscriber`, named after the service.
pub fn tracer_for(provider: &TracerProvider, settings: &TelemetrySettings) -> Tracer {
    provider.tracer(settings.service_name.clone())
}

pub struct CustomLevelRootSpanBuilder;

impl RootSpanBuilder for CustomLevelRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let paths_to_skip = ["/health_check"];

        let level = if paths_to_skip.contains(&request.path()) {
            Level::TRACE
        } else {
            Level::INFO
        };

        tracing_actix_web::root_span!(level = level, request)
    }

    fn on_request_end<B: MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
