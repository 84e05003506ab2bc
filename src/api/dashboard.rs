use crate::{
    model::{attendance::parse_date, dashboard::DashboardQuery},
    service::aggregation,
    store::HrmStore,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;

/// Head-count summary for a day
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Counts for the requested day", body = DashboardSummary),
        (status = 400, description = "Malformed date", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_summary(
    store: web::Data<dyn HrmStore>,
    query: web::Query<DashboardQuery>,
) -> actix_web::Result<impl Responder> {
    let today = match query.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => parse_date("date", date)?,
        _ => Local::now().date_naive(),
    };

    let summary = aggregation::dashboard_summary(store.get_ref(), today).await?;
    Ok(HttpResponse::Ok().json(summary))
}
