use crate::{
    model::attendance::{AttendanceFilter, MarkAttendance},
    service::{filter, ledger},
    store::HrmStore,
};
use actix_web::{HttpResponse, Responder, web};

/// Mark attendance (creates or overwrites the record for that employee and date)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Malformed date, unknown status or empty employee_id", body = ErrorBody),
        (status = 404, description = "Employee not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    store: web::Data<dyn HrmStore>,
    payload: web::Json<MarkAttendance>,
) -> actix_web::Result<impl Responder> {
    let record = ledger::mark_attendance(store.get_ref(), &payload).await?;
    Ok(HttpResponse::Created().json(record))
}

/// All attendance records in an optional date window
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Records ordered by date, then employee_id", body = [AttendanceRecord]),
        (status = 400, description = "Malformed date filter", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn all_attendance(
    store: web::Data<dyn HrmStore>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let range = query.range()?;
    let records = filter::all_attendance(store.get_ref(), &range).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Attendance history for one employee in an optional date window
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID"),
        AttendanceFilter
    ),
    responses(
        (status = 200, description = "Records in ascending date order", body = [AttendanceRecord]),
        (status = 400, description = "Malformed date filter", body = ErrorBody),
        (status = 404, description = "Employee not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    store: web::Data<dyn HrmStore>,
    path: web::Path<String>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let range = query.range()?;
    let records = filter::attendance_for_employee(store.get_ref(), &path, &range).await?;
    Ok(HttpResponse::Ok().json(records))
}
