use crate::{
    model::employee::CreateEmployee,
    service::{aggregation, directory},
    store::HrmStore,
};
use actix_web::{HttpResponse, Responder, web};

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = EmployeeStats),
        (status = 400, description = "Invalid employee fields", body = ErrorBody),
        (status = 409, description = "Employee ID or email already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn HrmStore>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let created = directory::create_employee(store.get_ref(), &payload).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List employees with their attendance totals
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees ordered by employee_id", body = [EmployeeStats]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn HrmStore>) -> actix_web::Result<impl Responder> {
    let employees = directory::list_employees(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeStats),
        (status = 404, description = "Employee not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn HrmStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee = directory::get_employee_stats(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Present/absent totals for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/summary",
    params(
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance totals", body = EmployeeAggregate),
        (status = 404, description = "Employee not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn employee_summary(
    store: web::Data<dyn HrmStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let aggregate = aggregation::employee_aggregate(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(aggregate))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee and attendance deleted", body = DeletedEmployee),
        (status = 404, description = "Employee not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn HrmStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let deleted = directory::delete_employee(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(deleted))
}
