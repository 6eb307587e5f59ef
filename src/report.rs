use std::fmt;

use crate::params::{
    DetailedRequestParameters, SummaryRequestParameters, ToQueryParameters,
    WeeklyRequestParameters,
};

/// The reports offered by the Reports API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    /// Time entries, paginated.
    Detailed,
    /// Time aggregated by a grouping and subgrouping.
    Summary,
    /// Time per weekday, for a single week.
    Weekly,
}

impl Report {
    /// Path of the report endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Report::Detailed => "/reports/api/v2/details",
            Report::Summary => "/reports/api/v2/summary",
            Report::Weekly => "/reports/api/v2/weekly",
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Report::Detailed => "detailed",
            Report::Summary => "summary",
            Report::Weekly => "weekly",
        })
    }
}

/// Trait for the parameters of a report request.
pub trait ReportParameters: ToQueryParameters {
    /// The report these parameters are sent to.
    const REPORT: Report;
}

impl ReportParameters for DetailedRequestParameters {
    const REPORT: Report = Report::Detailed;
}

impl ReportParameters for SummaryRequestParameters {
    const REPORT: Report = Report::Summary;
}

impl ReportParameters for WeeklyRequestParameters {
    const REPORT: Report = Report::Weekly;
}
