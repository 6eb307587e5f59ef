#![warn(missing_docs)]
#![crate_name = "toggl_reports"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Toggl Reports Client
//!
//! `toggl_reports` is a client for the Toggl Reports API v2. It requests detailed, summary and
//! weekly reports and deserializes them into any type implementing `serde::Deserialize`.
//!
//! Every request is bound to a [`CancellationToken`]. Requests without a token are rejected
//! before anything is sent.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use toggl_reports::{
//!     CancellationToken, ReportsClient, StandardRequestParameters, SummaryReport,
//!     SummaryRequestParameters,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ReportsClient::builder()
//!         .api_token("my-api-token")
//!         .http_client(
//!             reqwest::Client::builder()
//!                 .timeout(std::time::Duration::from_secs(30))
//!                 .build()
//!                 .unwrap(),
//!         )
//!         .build()
//!         .expect("failed to build client");
//!
//!     let params = SummaryRequestParameters::builder()
//!         .standard(StandardRequestParameters::new("me@example.com", "123456"))
//!         .grouping("projects")
//!         .subgrouping("time_entries")
//!         .build();
//!
//!     let cancel = CancellationToken::new();
//!     match client.get_summary::<SummaryReport>(Some(&cancel), &params).await {
//!         Ok(report) => println!("{:#?}", report.data),
//!         Err(err) => match err.reports_error() {
//!             Some(reports_error) if reports_error.status_code() == 429 => {
//!                 println!("rate limited, try again later")
//!             }
//!             _ => println!("request failed: {}", err),
//!         },
//!     }
//! }
//! ```

/// Module containing the client.
pub mod client;
/// Module containing the error type.
pub mod error;
/// Module containing the request parameters.
pub mod params;
/// Module containing the report kinds.
pub mod report;
/// Module containing the response types.
pub mod responses;

pub use client::ReportsClient;
pub use error::ReportsClientError;
pub use params::{
    Billable, DetailedRequestParameters, QueryParameters, StandardRequestParameters,
    SummaryRequestParameters, ToQueryParameters, WeeklyRequestParameters,
};
pub use report::{Report, ReportParameters};
pub use responses::{DetailedReport, ReportsError, SummaryReport, WeeklyReport};
pub use serde_json::Value;
pub use tokio_util::sync::CancellationToken;

/// Result type for the toggl-reports crate.
pub type ReportsClientResult<T> = std::result::Result<T, error::ReportsClientError>;
