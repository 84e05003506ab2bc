use crate::error::{HrmError, HrmResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const EMPLOYEE_ID_MAX: usize = 20;
const FULL_NAME_MIN: usize = 2;
const FULL_NAME_MAX: usize = 100;
const DEPARTMENT_MAX: usize = 50;
const EMAIL_MAX: usize = 255;

/// local@label.tld, no whitespace, exactly one `@`, no empty domain labels.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP001",
        "full_name": "Asha Rao",
        "email": "asha@co.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "Asha Rao")]
    pub full_name: String,

    #[schema(example = "asha@co.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "Asha Rao", value_type = String)]
    pub full_name: String,
    #[schema(example = "asha@co.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

impl CreateEmployee {
    /// Trims every field and checks it, producing the employee to store.
    pub fn validate(&self) -> HrmResult<Employee> {
        let employee_id = required("employee_id", &self.employee_id, 1, EMPLOYEE_ID_MAX)?;
        let full_name = required("full_name", &self.full_name, FULL_NAME_MIN, FULL_NAME_MAX)?;
        let department = required("department", &self.department, 1, DEPARTMENT_MAX)?;
        let email = required("email", &self.email, 1, EMAIL_MAX)?;

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(HrmError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        Ok(Employee {
            employee_id,
            full_name,
            email,
            department,
        })
    }
}

fn required(field: &str, value: &str, min: usize, max: usize) -> HrmResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HrmError::Validation(format!("{} must not be empty", field)));
    }

    let len = value.chars().count();
    if len < min || len > max {
        return Err(HrmError::Validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }

    Ok(value.to_string())
}

/// Present/absent counts for one employee, computed on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeAggregate {
    #[schema(example = 1)]
    pub total_present: u64,
    #[schema(example = 1)]
    pub total_absent: u64,
}

impl EmployeeAggregate {
    pub fn total(&self) -> u64 {
        self.total_present + self.total_absent
    }

    /// Whole-number presence percentage, rounded half up. `None` with no records.
    pub fn attendance_rate(&self) -> Option<u8> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let rate = (self.total_present * 200 + total) / (total * 2);
        Some(rate as u8)
    }
}

/// Employee plus its aggregate, as the employee list and detail views return it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP001",
        "full_name": "Asha Rao",
        "email": "asha@co.com",
        "department": "Engineering",
        "total_present": 1,
        "total_absent": 1,
        "attendance_rate": 50
    })
)]
pub struct EmployeeStats {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub total_present: u64,
    pub total_absent: u64,
    /// Percentage of marked days present; null when nothing is marked yet
    #[schema(nullable = true)]
    pub attendance_rate: Option<u8>,
}

impl EmployeeStats {
    pub fn new(employee: Employee, aggregate: EmployeeAggregate) -> Self {
        Self {
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            total_present: aggregate.total_present,
            total_absent: aggregate.total_absent,
            attendance_rate: aggregate.attendance_rate(),
        }
    }
}
