use std::path::{Component, Path, PathBuf};

use actix_web::http::{header, Method};
use actix_web::{web, HttpRequest, HttpResponse};

use serde_json::json;

/// Directory the front-end is served from, if any
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    root: Option<PathBuf>,
}

impl StaticAssets {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Resolve a request path inside the root, refusing anything that leaves it
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let relative = match request_path.trim_start_matches('/') {
            "" => "index.html",
            other => other,
        };

        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }
        Some(root.join(relative))
    }
}

/// Catch-all route: static files for `GET`, JSON 404 for everything else
#[tracing::instrument(name = "Fallback route", skip(req, assets), fields(path = %req.path()))]
pub async fn fallback(req: HttpRequest, assets: web::Data<StaticAssets>) -> HttpResponse {
    if req.method() == Method::GET && assets.root.is_some() {
        return serve(&assets, req.path()).await;
    }

    not_found(req.path())
}

/// Preflight response for any path, CORS headers are added by middleware
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn serve(assets: &StaticAssets, request_path: &str) -> HttpResponse {
    let Some(file_path) = assets.resolve(request_path) else {
        return HttpResponse::NotFound().body("Not Found");
    };

    match tokio::fs::read(&file_path).await {
        Ok(contents) => {
            let content_type = mime_guess::from_path(&file_path).first_or_text_plain();
            HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, content_type.to_string()))
                .body(contents)
        }
        Err(error) => {
            tracing::debug!(error.cause_chain = ?error, "Static file not served");
            HttpResponse::NotFound().body("Not Found")
        }
    }
}

fn not_found(path: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not found", "path": path }))
}
