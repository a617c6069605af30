use crate::adapters::EmailJsClient;
use crate::configuration::Settings;
use crate::domain::ContactSubmission;
use crate::routes::{contact, health_check};
use actix_web::dev::{Server, Service};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::Data;
use actix_web::{web, App, HttpMessage, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use telemetry::CustomLevelRootSpanBuilder;
use tracing_actix_web::{RequestId, TracingLogger};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host_name, configuration.application.application_port
        ))?;

        let port = listener.local_addr()?.port();

        let delivery = EmailJsClient::new(configuration.provider.base_url.clone());
        let submission =
            ContactSubmission::new(Arc::new(delivery), configuration.provider.credentials())
                .with_timeout(configuration.provider.timeout());

        tracing::info!(
            port,
            service_id = %configuration.provider.service_id,
            "Contact relay listening"
        );

        let server = run(listener, submission)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, submission: ContactSubmission) -> Result<Server, std::io::Error> {
    let submission = Data::new(submission);

    let server = HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                let request_id = req.extensions().get::<RequestId>().copied();
                let res = srv.call(req);
                async move {
                    let mut res = res.await?;
                    if let Some(request_id) = request_id {
                        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                            res.headers_mut()
                                .insert(HeaderName::from_static("x-request-id"), value);
                        }
                    }
                    Ok(res)
                }
            })
            .wrap(TracingLogger::<CustomLevelRootSpanBuilder>::new())
            .route("/health_check", web::get().to(health_check))
            .route("/contact", web::post().to(contact))
            .app_data(submission.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
