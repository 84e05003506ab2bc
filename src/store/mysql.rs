use super::{DailyCounts, HrmStore};
use crate::error::{HrmError, HrmResult};
use crate::model::attendance::{AttendanceMark, AttendanceRecord, AttendanceStatus, DateRange};
use crate::model::employee::{Employee, EmployeeAggregate};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;
use tracing::{debug, error};

/// `HrmStore` backed by MySQL through a shared sqlx pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// -------------------- Rows --------------------

#[derive(FromRow)]
struct EmployeeStatsRow {
    employee_id: String,
    full_name: String,
    email: String,
    department: String,
    total_present: i64,
    total_absent: i64,
}

impl EmployeeStatsRow {
    fn into_domain(self) -> (Employee, EmployeeAggregate) {
        (
            Employee {
                employee_id: self.employee_id,
                full_name: self.full_name,
                email: self.email,
                department: self.department,
            },
            EmployeeAggregate {
                total_present: count(self.total_present),
                total_absent: count(self.total_absent),
            },
        )
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    employee_id: String,
    employee_name: String,
    attendance_date: NaiveDate,
    status: String,
}

impl AttendanceRow {
    fn into_domain(self) -> HrmResult<AttendanceRecord> {
        let status = AttendanceStatus::from_str(&self.status).map_err(|_| {
            HrmError::Internal(format!(
                "unknown attendance status '{}' stored for {} on {}",
                self.status, self.employee_id, self.attendance_date
            ))
        })?;

        Ok(AttendanceRecord {
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            date: self.attendance_date,
            status,
        })
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

const ATTENDANCE_SELECT: &str = r#"
    SELECT a.employee_id, e.full_name AS employee_name, a.attendance_date, a.status
    FROM attendance a
    JOIN employees e ON e.employee_id = a.employee_id
"#;

/// Builds the WHERE clause for an optional employee and an optional date window.
fn attendance_where(employee_id: Option<&str>, range: &DateRange) -> (String, Vec<FilterValue>) {
    let mut conditions = Vec::new();
    let mut args = Vec::new();

    if let Some(id) = employee_id {
        conditions.push("a.employee_id = ?");
        args.push(FilterValue::Str(id.to_string()));
    }
    if let Some(from) = range.from {
        conditions.push("a.attendance_date >= ?");
        args.push(FilterValue::Date(from));
    }
    if let Some(to) = range.to {
        conditions.push("a.attendance_date <= ?");
        args.push(FilterValue::Date(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, args)
}

// Helper enum for typed SQLx binding
enum FilterValue {
    Str(String),
    Date(NaiveDate),
}

impl MySqlStore {
    async fn fetch_attendance(
        &self,
        employee_id: Option<&str>,
        range: &DateRange,
    ) -> HrmResult<Vec<AttendanceRecord>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let (where_clause, args) = attendance_where(employee_id, range);
        let sql = format!(
            "{} {} ORDER BY a.attendance_date ASC, a.employee_id ASC",
            ATTENDANCE_SELECT, where_clause
        );
        debug!(sql = %sql, "Fetching attendance");

        let mut query = sqlx::query_as::<_, AttendanceRow>(&sql);
        for arg in args {
            query = match arg {
                FilterValue::Str(s) => query.bind(s),
                FilterValue::Date(d) => query.bind(d),
            };
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, sql = %sql, "Failed to fetch attendance");
            HrmError::from(e)
        })?;

        rows.into_iter().map(AttendanceRow::into_domain).collect()
    }
}

#[async_trait]
impl HrmStore for MySqlStore {
    async fn insert_employee(&self, employee: &Employee) -> HrmResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // Either the primary key or the email index; report whichever it was.
                let id_taken = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM employees WHERE employee_id = ?",
                )
                .bind(&employee.employee_id)
                .fetch_one(&self.pool)
                .await?;

                if id_taken > 0 {
                    Err(HrmError::duplicate_employee_id(&employee.employee_id))
                } else {
                    Err(HrmError::duplicate_email(&employee.email))
                }
            }
            Err(e) => {
                error!(error = %e, employee_id = %employee.employee_id, "Failed to insert employee");
                Err(e.into())
            }
        }
    }

    async fn find_employee(&self, employee_id: &str) -> HrmResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, full_name, email, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn find_employee_stats(
        &self,
        employee_id: &str,
    ) -> HrmResult<Option<(Employee, EmployeeAggregate)>> {
        let row = sqlx::query_as::<_, EmployeeStatsRow>(
            r#"
            SELECT
                e.employee_id,
                e.full_name,
                e.email,
                e.department,
                COUNT(CASE WHEN a.status = ? THEN 1 END) AS total_present,
                COUNT(CASE WHEN a.status = ? THEN 1 END) AS total_absent
            FROM employees e
            LEFT JOIN attendance a ON a.employee_id = e.employee_id
            WHERE e.employee_id = ?
            GROUP BY e.employee_id, e.full_name, e.email, e.department
            "#,
        )
        .bind(AttendanceStatus::Present.as_ref())
        .bind(AttendanceStatus::Absent.as_ref())
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeStatsRow::into_domain))
    }

    async fn list_employee_stats(&self) -> HrmResult<Vec<(Employee, EmployeeAggregate)>> {
        let rows = sqlx::query_as::<_, EmployeeStatsRow>(
            r#"
            SELECT
                e.employee_id,
                e.full_name,
                e.email,
                e.department,
                COUNT(CASE WHEN a.status = ? THEN 1 END) AS total_present,
                COUNT(CASE WHEN a.status = ? THEN 1 END) AS total_absent
            FROM employees e
            LEFT JOIN attendance a ON a.employee_id = e.employee_id
            GROUP BY e.employee_id, e.full_name, e.email, e.department
            ORDER BY e.employee_id ASC
            "#,
        )
        .bind(AttendanceStatus::Present.as_ref())
        .bind(AttendanceStatus::Absent.as_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmployeeStatsRow::into_domain).collect())
    }

    async fn delete_employee_cascade(&self, employee_id: &str) -> HrmResult<Option<u64>> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, String>(
            "SELECT employee_id FROM employees WHERE employee_id = ? FOR UPDATE",
        )
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let attendance = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(attendance.rows_affected()))
    }

    async fn upsert_attendance(&self, mark: &AttendanceMark) -> HrmResult<Option<AttendanceRecord>> {
        let mut tx = self.pool.begin().await?;

        // Share-lock the employee so a concurrent cascade delete waits for this commit.
        let employee_name = sqlx::query_scalar::<_, String>(
            "SELECT full_name FROM employees WHERE employee_id = ? LOCK IN SHARE MODE",
        )
        .bind(&mark.employee_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(employee_name) = employee_name else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, attendance_date, status)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status)
            "#,
        )
        .bind(&mark.employee_id)
        .bind(mark.date)
        .bind(mark.status.as_ref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(AttendanceRecord {
            employee_id: mark.employee_id.clone(),
            employee_name,
            date: mark.date,
            status: mark.status,
        }))
    }

    async fn employee_aggregate(&self, employee_id: &str) -> HrmResult<EmployeeAggregate> {
        let (present, absent) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(CASE WHEN status = ? THEN 1 END),
                COUNT(CASE WHEN status = ? THEN 1 END)
            FROM attendance
            WHERE employee_id = ?
            "#,
        )
        .bind(AttendanceStatus::Present.as_ref())
        .bind(AttendanceStatus::Absent.as_ref())
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(EmployeeAggregate {
            total_present: count(present),
            total_absent: count(absent),
        })
    }

    async fn attendance_for_employee(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> HrmResult<Vec<AttendanceRecord>> {
        self.fetch_attendance(Some(employee_id), range).await
    }

    async fn all_attendance(&self, range: &DateRange) -> HrmResult<Vec<AttendanceRecord>> {
        self.fetch_attendance(None, range).await
    }

    async fn daily_counts(&self, date: NaiveDate) -> HrmResult<DailyCounts> {
        // One statement, one read view: the three counts always agree with each other.
        let (total_employees, present, absent) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM employees),
                (SELECT COUNT(*) FROM attendance WHERE attendance_date = ? AND status = ?),
                (SELECT COUNT(*) FROM attendance WHERE attendance_date = ? AND status = ?)
            "#,
        )
        .bind(date)
        .bind(AttendanceStatus::Present.as_ref())
        .bind(date)
        .bind(AttendanceStatus::Absent.as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(DailyCounts {
            total_employees: count(total_employees),
            present: count(present),
            absent: count(absent),
        })
    }
}
