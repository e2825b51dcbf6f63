use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, web, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::{json, Value};

use crate::controller::error::{RestError, RestResult};
use crate::domain::{AirportCode, DayRange};
use crate::model::{MonitorRecord, NewMonitor};
use crate::repo::MonitorRepo;

/// JSON deserialization wrapper for parsing new monitors.
///
/// Day bounds and the notify time are accepted as numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonitorBody {
    from: Option<String>,
    to: Option<String>,
    email: Option<String>,
    days_min: Option<Value>,
    days_max: Option<Value>,
    notify_time: Option<Value>,
}

impl TryFrom<NewMonitorBody> for NewMonitor {
    type Error = RestError;

    fn try_from(body: NewMonitorBody) -> RestResult<Self> {
        let required = |field: Option<String>| field.filter(|value| !value.trim().is_empty());
        let (Some(from), Some(to), Some(email)) =
            (required(body.from), required(body.to), required(body.email))
        else {
            return Err(RestError::BadRequest("Missing required fields".into()));
        };

        let from: AirportCode = from.parse()?;
        let to: AirportCode = to.parse()?;
        if from.same_as(&to) {
            return Err(RestError::BadRequest(
                "Origin and destination cannot be the same".into(),
            ));
        }

        let days = DayRange::new(
            lenient_days(body.days_min.as_ref()),
            lenient_days(body.days_max.as_ref()),
        )?;

        let notify_time = body.notify_time.and_then(|value| match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(NewMonitor {
            from,
            to,
            days,
            email,
            notify_time,
        })
    }
}

/// Integer day count from a loosely typed value.
///
/// Strings contribute their leading integer, numbers are truncated. Zero and
/// anything unparseable count as absent.
fn lenient_days(value: Option<&Value>) -> Option<i64> {
    let days = match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }?;

    (days != 0).then_some(days)
}

fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    value[..end].parse().ok()
}

/// Create endpoint for new monitors
#[tracing::instrument(name = "Create a new monitor", skip(repo, body))]
#[post("")]
async fn create(
    repo: web::Data<MonitorRepo>,
    body: web::Json<NewMonitorBody>,
) -> RestResult<impl Responder> {
    let new_monitor: NewMonitor = body.into_inner().try_into()?;

    let monitor = MonitorRecord::create(new_monitor);
    let id = monitor.id.clone();
    tracing::info!("New monitor added: {} → {}", monitor.from, monitor.to);

    repo.append(monitor).await;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Monitor created",
        "id": id,
    })))
}

/// List endpoint, active monitors only
#[tracing::instrument(name = "List active monitors", skip(repo))]
#[get("")]
async fn list(repo: web::Data<MonitorRepo>) -> RestResult<impl Responder> {
    let monitors = repo.active().await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "monitors": monitors,
    })))
}

/// Delete endpoint, removes the monitor whether active or not
#[tracing::instrument(name = "Delete a monitor", skip(repo))]
#[delete("/{id}")]
async fn remove(
    repo: web::Data<MonitorRepo>,
    path: web::Path<(String,)>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();

    if !repo.remove_by_id(&id).await {
        return Err(RestError::NotFound("Monitor not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Monitor deleted",
    })))
}

/// Monitor API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/monitor")
        .service(create)
        .service(list)
        .service(remove)
}
