use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned by the Reports API for non-success responses.
///
/// The body has the form `{"error": {"message": ..., "tip": ..., "code": ...}}`.
/// When produced by the client, the HTTP status of the response is captured
/// as well.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReportsError {
    #[serde(rename = "error")]
    detail: ErrorDetail,
    #[serde(skip)]
    http_status: Option<u16>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    tip: String,
    code: u16,
}

impl ReportsError {
    /// Creates a new error from its parts, without an HTTP status.
    pub fn new(message: &str, tip: &str, code: u16) -> Self {
        Self {
            detail: ErrorDetail {
                message: message.to_string(),
                tip: tip.to_string(),
                code,
            },
            http_status: None,
        }
    }

    /// Attaches the HTTP status of the response this error was read from.
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.detail.message
    }

    /// A hint on how to resolve the error.
    pub fn tip(&self) -> &str {
        &self.detail.tip
    }

    /// The status code reported in the error body.
    pub fn code(&self) -> u16 {
        self.detail.code
    }

    /// The HTTP status of the response, if known.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// The HTTP status of the response, or the code from the body when the
    /// error was not read from a response.
    pub fn status_code(&self) -> u16 {
        self.http_status.unwrap_or(self.detail.code)
    }
}

impl fmt::Display for ReportsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP Status: {}\n{}\n\n{}\n",
            self.detail.code, self.detail.message, self.detail.tip
        )
    }
}

impl std::error::Error for ReportsError {}

/// Amount of money tracked in a single currency.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CurrencyTotal {
    /// ISO currency code, `null` for entries without a rate.
    pub currency: Option<String>,
    /// The amount earned.
    pub amount: Option<f64>,
}

/// Response of a detailed report request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DetailedReport {
    /// Total time tracked, in milliseconds.
    pub total_grand: Option<u64>,
    /// Total billable time tracked, in milliseconds.
    pub total_billable: Option<u64>,
    /// Earnings per currency.
    #[serde(default)]
    pub total_currencies: Vec<CurrencyTotal>,
    /// Total number of time entries matched by the query.
    #[serde(default)]
    pub total_count: u64,
    /// Number of time entries per page.
    #[serde(default)]
    pub per_page: u64,
    /// The time entries of the requested page.
    #[serde(default)]
    pub data: Vec<DetailedTimeEntry>,
}

/// A single time entry of a detailed report.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DetailedTimeEntry {
    /// Time entry ID.
    pub id: u64,
    /// Project ID.
    pub pid: Option<u64>,
    /// Task ID.
    pub tid: Option<u64>,
    /// User ID.
    pub uid: Option<u64>,
    /// Description of the time entry.
    #[serde(default)]
    pub description: String,
    /// Start of the time entry.
    pub start: Option<DateTime<FixedOffset>>,
    /// End of the time entry.
    pub end: Option<DateTime<FixedOffset>>,
    /// Last time the entry was updated.
    pub updated: Option<DateTime<FixedOffset>>,
    /// Duration in milliseconds.
    #[serde(default)]
    pub dur: u64,
    /// Full name of the user.
    pub user: Option<String>,
    /// Name of the client.
    pub client: Option<String>,
    /// Name of the project.
    pub project: Option<String>,
    /// Hex color of the project.
    pub project_hex_color: Option<String>,
    /// Name of the task.
    pub task: Option<String>,
    /// Billed amount.
    pub billable: Option<f64>,
    /// Whether the entry is billable.
    #[serde(default)]
    pub is_billable: bool,
    /// Currency of the billed amount.
    pub cur: Option<String>,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response of a summary report request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// Total time tracked, in milliseconds.
    pub total_grand: Option<u64>,
    /// Total billable time tracked, in milliseconds.
    pub total_billable: Option<u64>,
    /// Earnings per currency.
    #[serde(default)]
    pub total_currencies: Vec<CurrencyTotal>,
    /// Groups of the report, as selected by `grouping`.
    #[serde(default)]
    pub data: Vec<SummaryGroup>,
}

/// A group of a summary report.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SummaryGroup {
    /// ID of the grouped object.
    pub id: Option<u64>,
    /// Names describing the group; the keys depend on the grouping.
    pub title: Value,
    /// Time tracked in this group, in milliseconds.
    #[serde(default)]
    pub time: u64,
    /// Earnings per currency.
    #[serde(default)]
    pub total_currencies: Vec<CurrencyTotal>,
    /// Subgroups, as selected by `subgrouping`.
    #[serde(default)]
    pub items: Vec<SummaryItem>,
}

/// A subgroup of a summary report group.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SummaryItem {
    /// Names describing the subgroup; the keys depend on the subgrouping.
    pub title: Value,
    /// Time tracked in this subgroup, in milliseconds.
    #[serde(default)]
    pub time: u64,
    /// Currency of the amount.
    pub cur: Option<String>,
    /// Billed amount.
    pub sum: Option<f64>,
    /// Hourly rate.
    pub rate: Option<f64>,
}

/// Response of a weekly report request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    /// Total time tracked, in milliseconds.
    pub total_grand: Option<u64>,
    /// Total billable time tracked, in milliseconds.
    pub total_billable: Option<u64>,
    /// Totals per weekday, followed by the weekly total.
    #[serde(default)]
    pub week_totals: Vec<Option<f64>>,
    /// Rows of the report, as selected by `grouping`.
    #[serde(default)]
    pub data: Vec<WeeklyRow>,
}

/// A row of a weekly report.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WeeklyRow {
    /// Names describing the row; the keys depend on the grouping.
    pub title: Value,
    /// Project ID.
    pub pid: Option<u64>,
    /// User ID.
    pub uid: Option<u64>,
    /// Totals per weekday, followed by the weekly total.
    #[serde(default)]
    pub totals: Vec<Option<f64>>,
    /// Breakdown of the row.
    #[serde(default)]
    pub details: Vec<WeeklyDetail>,
}

/// A breakdown line of a weekly report row.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WeeklyDetail {
    /// User ID.
    pub uid: Option<u64>,
    /// Project ID.
    pub pid: Option<u64>,
    /// Names describing the line.
    pub title: Value,
    /// Totals per weekday, followed by the weekly total.
    #[serde(default)]
    pub totals: Vec<Option<f64>>,
}
