use anyhow::Context;
use contact_relay::configuration::get_configuration;
use contact_relay::startup::Application;
use telemetry::{get_subscriber, init_subscriber, init_tracer, tracer_for};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;

    let tracer_provider =
        init_tracer(&configuration.telemetry).context("Failed to build the OTLP exporter")?;
    let subscriber = get_subscriber(
        configuration.telemetry.service_name.clone(),
        configuration.telemetry.log_level.clone(),
        std::io::stdout,
        tracer_provider
            .as_ref()
            .map(|provider| tracer_for(provider, &configuration.telemetry)),
    );
    init_subscriber(subscriber);

    let application = Application::build(configuration).await?;

    application.run_until_stopped().await?;

    if let Some(provider) = tracer_provider {
        provider.force_flush();
    }

    Ok(())
}
