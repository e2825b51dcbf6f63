use actix_web::{get, web, HttpResponse, Responder};

use chrono::Utc;

use serde::Serialize;
use serde_json::json;

use crate::controller::error::RestResult;
use crate::repo::MonitorRepo;
use crate::search;

/// How many days ahead the check links search for departures
#[derive(Debug, Clone, Copy)]
pub struct SearchLead {
    pub days: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckResult {
    id: String,
    from: String,
    to: String,
    email: String,
    search_url: String,
    checked_at: String,
    status: &'static str,
}

/// Summary of every active monitor with a flight search link.
///
/// No prices are fetched and no emails are sent.
#[tracing::instrument(name = "Check active monitors", skip(repo, lead))]
#[get("/api/check")]
async fn check(
    repo: web::Data<MonitorRepo>,
    lead: web::Data<SearchLead>,
) -> RestResult<impl Responder> {
    let now = Utc::now();
    let departure = search::departure_date(now.date_naive(), lead.days);
    let checked_at = now.to_rfc3339();

    let results: Vec<CheckResult> = repo
        .active()
        .await
        .into_iter()
        .map(|monitor| CheckResult {
            search_url: search::search_url(&monitor.from, &monitor.to, departure).into(),
            id: monitor.id,
            from: monitor.from,
            to: monitor.to,
            email: monitor.email,
            checked_at: checked_at.clone(),
            status: "ok",
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "checked": results.len(),
        "time": checked_at,
        "results": results,
    })))
}
