use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::json;

use crate::controller::error::RestResult;

#[derive(Debug, Deserialize)]
pub struct EmailBody {
    email: Option<String>,
    subject: Option<String>,
}

/// Placeholder send endpoint, the email is only logged
#[tracing::instrument(name = "Log an email send request", skip(body))]
#[post("/api/email")]
async fn send(body: web::Json<EmailBody>) -> RestResult<impl Responder> {
    let EmailBody { email, subject } = body.into_inner();

    tracing::info!(
        "[simulated] email {} → {}",
        subject.as_deref().unwrap_or_default(),
        email.as_deref().unwrap_or_default()
    );

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Email logged (simulated)",
        "preview": subject,
    })))
}
