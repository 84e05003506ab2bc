use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "date": "2026-01-05",
    "total_employees": 12,
    "present_today": 9,
    "absent_today": 2,
    "not_marked_today": 1
}))]
pub struct DashboardSummary {
    /// Day the counts were taken for
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub total_employees: u64,
    pub present_today: u64,
    pub absent_today: u64,
    pub not_marked_today: u64,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Day to summarize (YYYY-MM-DD); defaults to the server's current date
    #[schema(example = "2026-01-05")]
    pub date: Option<String>,
}
