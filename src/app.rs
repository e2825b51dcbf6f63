use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{get, guard, web, App, HttpResponse, HttpServer, Responder};

use chrono::Utc;

use serde_json::json;

use tracing_actix_web::TracingLogger;

use crate::controller::assets::{self, StaticAssets};
use crate::controller::check::{self, SearchLead};
use crate::controller::error::RestError;
use crate::controller::{email, monitors};
use crate::repo::MonitorRepo;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
    }))
}

/// Permissive CORS headers, added to every response
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((
            header::ACCESS_CONTROL_ALLOW_METHODS,
            "GET, POST, DELETE, OPTIONS",
        ))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    repo: MonitorRepo,
    static_assets: StaticAssets,
    search_lead: SearchLead,
) -> anyhow::Result<Server> {
    // Wrap application data
    let repo = web::Data::new(repo);
    let static_assets = web::Data::new(static_assets);
    let search_lead = web::Data::new(search_lead);

    // Bodies are parsed as JSON whatever their content type, malformed ones
    // are client errors with a JSON message
    let json_config = web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, _req| RestError::BadRequest(err.to_string()).into());

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(TracingLogger::default())
            .app_data(json_config.clone())
            .app_data(repo.clone())
            .app_data(static_assets.clone())
            .app_data(search_lead.clone())
            .service(
                web::resource("/{tail:.*}")
                    .guard(guard::Options())
                    .to(assets::preflight),
            )
            .service(health_check)
            .service(monitors::scope())
            .service(check::check)
            .service(email::send)
            .default_service(web::to(assets::fallback))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
