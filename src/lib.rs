#[cfg(feature = "data")]
pub mod client;
#[cfg(feature = "data")]
pub mod controller;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::client::http::HttpTruckClient;
    use crate::models::config::ServerConfig;
    use crate::routes;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let client = HttpTruckClient::new(&server_config.backend_url, server_config.pagination_mode)
            .map_err(|e| std::io::Error::other(format!("Failed to build HTTP client: {e}")))?;

        log::info!(
            "Using truck backend at {} ({:?} pagination, {} per page)",
            client.base_url(),
            client.mode(),
            server_config.page_size
        );

        // Signing key for the flash message cookie.
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(routes::configure)
                .default_service(web::to(routes::not_found))
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(client.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
