//! In-process truck backend used by the integration tests.
#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use fleet_web::domain::truck::{NewTruck, Truck};
use fleet_web::domain::types::TruckId;
use serde::Deserialize;
use serde_json::json;

pub struct BackendState {
    trucks: Mutex<Vec<Truck>>,
    send_total_header: bool,
}

pub struct StubBackend {
    pub base_url: String,
    state: web::Data<BackendState>,
    handle: ServerHandle,
}

pub fn truck(id: i64) -> Truck {
    Truck {
        id: TruckId::new(id).unwrap(),
        model: format!("Model #{id}"),
        status: if id % 2 == 0 {
            "IN_MAINTENANCE".to_string()
        } else {
            "OPERATIONAL".to_string()
        },
        details: format!("Details #{id}"),
    }
}

pub fn fleet(total: i64) -> Vec<Truck> {
    (1..=total).map(truck).collect()
}

impl StubBackend {
    pub async fn start(trucks: Vec<Truck>) -> Self {
        Self::start_with(trucks, true).await
    }

    /// Starts the backend; `send_total_header` controls whether offset/limit
    /// responses carry `x-total-count`.
    pub async fn start_with(trucks: Vec<Truck>, send_total_header: bool) -> Self {
        let state = web::Data::new(BackendState {
            trucks: Mutex::new(trucks),
            send_total_header,
        });

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/trucks", web::get().to(list_trucks))
                .route("/trucks", web::post().to(create_truck))
                .route("/trucks/paginated", web::get().to(paginated_trucks))
                .route("/trucks/{id}", web::get().to(get_truck))
                .route("/trucks/{id}", web::put().to(update_truck))
                .route("/trucks/{id}", web::delete().to(delete_truck))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    pub fn trucks(&self) -> Vec<Truck> {
        self.state.trucks.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

#[derive(Deserialize)]
struct WindowParams {
    #[serde(rename = "_start")]
    start: Option<usize>,
    #[serde(rename = "_limit")]
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct PageParams {
    page: usize,
    size: usize,
}

async fn list_trucks(
    state: web::Data<BackendState>,
    params: web::Query<WindowParams>,
) -> HttpResponse {
    let trucks = state.trucks.lock().unwrap().clone();
    match (params.start, params.limit) {
        (Some(start), Some(limit)) => {
            let total = trucks.len();
            let window: Vec<Truck> = trucks.into_iter().skip(start).take(limit).collect();
            let mut response = HttpResponse::Ok();
            if state.send_total_header {
                response.insert_header(("x-total-count", total.to_string()));
            }
            response.json(window)
        }
        _ => HttpResponse::Ok().json(trucks),
    }
}

async fn paginated_trucks(
    state: web::Data<BackendState>,
    params: web::Query<PageParams>,
) -> HttpResponse {
    let trucks = state.trucks.lock().unwrap().clone();
    let total = trucks.len();
    let content: Vec<Truck> = trucks
        .into_iter()
        .skip(params.page * params.size)
        .take(params.size)
        .collect();
    HttpResponse::Ok().json(json!({
        "content": content,
        "totalElements": total,
        "totalPages": total.div_ceil(params.size),
        "number": params.page,
        "size": params.size,
    }))
}

async fn get_truck(state: web::Data<BackendState>, id: web::Path<i64>) -> HttpResponse {
    let id = id.into_inner();
    let trucks = state.trucks.lock().unwrap();
    match trucks.iter().find(|truck| truck.id.get() == id) {
        Some(truck) => HttpResponse::Ok().json(truck),
        None => HttpResponse::NotFound().body(format!("Truck not found with ID: {id}")),
    }
}

async fn create_truck(
    state: web::Data<BackendState>,
    web::Json(new_truck): web::Json<NewTruck>,
) -> HttpResponse {
    let mut trucks = state.trucks.lock().unwrap();
    let next_id = trucks.iter().map(|truck| truck.id.get()).max().unwrap_or(0) + 1;
    let truck = Truck {
        id: TruckId::new(next_id).unwrap(),
        model: new_truck.model,
        status: new_truck.status.to_string(),
        details: new_truck.details,
    };
    trucks.push(truck.clone());
    HttpResponse::Ok().json(truck)
}

async fn update_truck(
    state: web::Data<BackendState>,
    id: web::Path<i64>,
    web::Json(updates): web::Json<NewTruck>,
) -> HttpResponse {
    let id = id.into_inner();
    let mut trucks = state.trucks.lock().unwrap();
    match trucks.iter_mut().find(|truck| truck.id.get() == id) {
        Some(truck) => {
            truck.model = updates.model;
            truck.status = updates.status.to_string();
            truck.details = updates.details;
            HttpResponse::Ok().json(truck.clone())
        }
        None => HttpResponse::NotFound().body(format!("Truck not found with ID: {id}")),
    }
}

async fn delete_truck(state: web::Data<BackendState>, id: web::Path<i64>) -> HttpResponse {
    let id = id.into_inner();
    let mut trucks = state.trucks.lock().unwrap();
    let before = trucks.len();
    trucks.retain(|truck| truck.id.get() != id);
    if trucks.len() == before {
        HttpResponse::NotFound().body(format!("Truck not found with ID: {id}"))
    } else {
        HttpResponse::Ok().body("Truck Deleted Successfully")
    }
}
