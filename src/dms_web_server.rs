use crate::core::config::{NotificationConfig, UploadConfig};
use crate::core::{AppConfig, Notifier};
use crate::db::{Directory, DocumentStore};
use crate::routes::dms_routes;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web::Data, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct DmsWebServer {
    port: u16,
    server: Server,
}

impl DmsWebServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", configuration.server.host, configuration.server.port);

        let store = DocumentStore::new(
            Directory::new(configuration.directory.users),
            configuration.directory.departments,
        );

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, store, configuration.notifications, configuration.uploads)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: DocumentStore,
    notifications: NotificationConfig,
    uploads: UploadConfig,
) -> Result<Server, anyhow::Error> {
    let store = Data::new(store);
    let notifier = Data::new(Notifier::new(notifications));
    let uploads = Data::new(uploads);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::HeaderName::from_static("x-user-id"),
            ]);
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .configure(dms_routes)
            .app_data(store.clone())
            .app_data(notifier.clone())
            .app_data(uploads.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
