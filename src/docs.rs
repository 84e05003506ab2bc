use crate::error::ErrorBody;
use crate::model::attendance::{AttendanceFilter, AttendanceRecord, AttendanceStatus, MarkAttendance};
use crate::model::dashboard::{DashboardQuery, DashboardSummary};
use crate::model::employee::{CreateEmployee, Employee, EmployeeAggregate, EmployeeStats};
use crate::service::directory::DeletedEmployee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management admin API.

### Key Features
- **Employees**
  - Register, list, view and delete employees (deleting removes their attendance too)
- **Attendance**
  - Mark an employee Present or Absent for a date; marking again overwrites
  - Browse attendance per employee or for everyone, filtered by date range
- **Dashboard**
  - Daily head-count of present, absent and not-yet-marked employees

### Response Format
- JSON bodies, dates as `YYYY-MM-DD`
- Errors as `{"error": "<kind>", "message": "..."}` where kind is
  `ValidationError`, `NotFound`, `Conflict` or `InternalError`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::employee_summary,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::all_attendance,
        crate::api::attendance::employee_attendance,

        crate::api::dashboard::dashboard_summary
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            EmployeeAggregate,
            EmployeeStats,
            DeletedEmployee,
            AttendanceStatus,
            AttendanceRecord,
            MarkAttendance,
            AttendanceFilter,
            DashboardSummary,
            DashboardQuery,
            ErrorBody
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Dashboard", description = "Attendance summary APIs"),
    )
)]
pub struct ApiDoc;
