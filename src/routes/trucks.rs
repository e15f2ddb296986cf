use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::client::http::HttpTruckClient;
use crate::dto::trucks::{TruckListQuery, status_options};
use crate::forms::trucks::TruckForm;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::trucks as trucks_service;

/// Renders the create (`truck_id` is `None`) or edit form. A `form_error`
/// re-renders the submitted values with the error and a 422 status.
fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    truck_id: Option<i64>,
    form: &TruckForm,
    form_error: Option<String>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, current_page);
    context.insert("truck_id", &truck_id);
    context.insert("form", form);
    context.insert("unsupported_status", &form.unsupported_status());
    context.insert("form_error", &form_error);
    context.insert("statuses", &status_options());

    let mut response = render_template(tera, "trucks/form.html", &context);
    if form_error.is_some() && response.status().is_success() {
        *response.status_mut() = StatusCode::UNPROCESSABLE_ENTITY;
    }
    response
}

#[get("/")]
pub async fn show_trucks(
    web::Query(query): web::Query<TruckListQuery>,
    client: web::Data<HttpTruckClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match trucks_service::load_truck_list(
        client.get_ref(),
        query,
        server_config.page_size,
    )
    .await
    {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to render truck list: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "index");
    context.insert("trucks", &data.trucks);
    context.insert("previous_page", &data.trucks.previous_page());
    context.insert("next_page", &data.trucks.next_page());
    context.insert("rejected_page", &data.rejected_page);

    render_template(&tera, "trucks/index.html", &context)
}

#[get("/trucks/{truck_id}")]
pub async fn show_truck(
    truck_id: web::Path<i64>,
    client: web::Data<HttpTruckClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match trucks_service::load_truck(client.get_ref(), truck_id.into_inner()).await {
        Ok(data) => data,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Truck not found.").send();
            return redirect("/");
        }
        Err(err) => {
            log::error!("Failed to render truck: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "index");
    context.insert("truck_id", &data.id);
    context.insert("truck", &data.truck);

    render_template(&tera, "trucks/show.html", &context)
}

#[get("/create")]
pub async fn new_truck(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &tera,
        &flash_messages,
        "create",
        None,
        &TruckForm::default(),
        None,
    )
}

#[post("/create")]
pub async fn create_truck(
    client: web::Data<HttpTruckClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<TruckForm>,
) -> impl Responder {
    match trucks_service::create_truck(client.get_ref(), &form).await {
        Ok(truck) => {
            FlashMessage::success("Truck added.").send();
            redirect(&format!("/trucks/{}", truck.id))
        }
        Err(ServiceError::Form(err)) => render_form(
            &tera,
            &flash_messages,
            "create",
            None,
            &form,
            Some(format!("Invalid truck: {err}")),
        ),
        Err(_) => {
            FlashMessage::error("Failed to add the truck.").send();
            redirect("/create")
        }
    }
}

#[get("/edit/{truck_id}")]
pub async fn edit_truck(
    truck_id: web::Path<i64>,
    client: web::Data<HttpTruckClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match trucks_service::load_truck_form(client.get_ref(), truck_id.into_inner()).await
    {
        Ok(data) => data,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Truck not found.").send();
            return redirect("/");
        }
        Err(_) => {
            FlashMessage::error("Failed to load the truck.").send();
            return redirect("/");
        }
    };

    render_form(
        &tera,
        &flash_messages,
        "index",
        Some(data.id.get()),
        &data.form,
        None,
    )
}

#[post("/edit/{truck_id}")]
pub async fn update_truck(
    truck_id: web::Path<i64>,
    client: web::Data<HttpTruckClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<TruckForm>,
) -> impl Responder {
    let truck_id = truck_id.into_inner();

    match trucks_service::update_truck(client.get_ref(), truck_id, &form).await {
        Ok(truck) => {
            FlashMessage::success("Truck updated.").send();
            redirect(&format!("/trucks/{}", truck.id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Truck not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(err)) => render_form(
            &tera,
            &flash_messages,
            "index",
            Some(truck_id),
            &form,
            Some(format!("Invalid truck: {err}")),
        ),
        Err(_) => {
            FlashMessage::error("Failed to update the truck.").send();
            redirect(&format!("/edit/{truck_id}"))
        }
    }
}

#[post("/trucks/{truck_id}/delete")]
pub async fn delete_truck(
    truck_id: web::Path<i64>,
    client: web::Data<HttpTruckClient>,
) -> impl Responder {
    match trucks_service::delete_truck(client.get_ref(), truck_id.into_inner()).await {
        Ok(()) => FlashMessage::success("Truck deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Truck not found.").send(),
        Err(_) => FlashMessage::error("Failed to delete the truck.").send(),
    }
    redirect("/")
}
