//! HTTP handlers and the helpers they share.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

pub mod trucks;

/// Maps a flash message level to the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending alerts and the active nav entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Fallback for every unmatched path.
pub async fn not_found(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let context = base_context(&flash_messages, "not_found");
    let mut response = render_template(&tera, "main/not_found.html", &context);
    if response.status().is_success() {
        *response.status_mut() = StatusCode::NOT_FOUND;
    }
    response
}

/// Registers the truck views.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(trucks::show_trucks)
        .service(trucks::show_truck)
        .service(trucks::new_truck)
        .service(trucks::create_truck)
        .service(trucks::edit_truck)
        .service(trucks::update_truck)
        .service(trucks::delete_truck);
}
