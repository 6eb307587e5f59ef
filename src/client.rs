use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use typed_builder::TypedBuilder;
use url::Url;

use crate::error::ReportsClientError;
use crate::params::{
    DetailedRequestParameters, SummaryRequestParameters, ToQueryParameters,
    WeeklyRequestParameters,
};
use crate::report::{Report, ReportParameters};
use crate::responses::ReportsError;
use crate::ReportsClientResult;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://toggl.com";

/// Password sent alongside the API token, as required by the Reports API.
const API_TOKEN_PASSWORD: &str = "api_token";

/// The internal builder for constructing a `ReportsClient`
#[derive(TypedBuilder)]
#[builder(build_method(into = ReportsClientResult::<ReportsClient>))]
pub struct InternalReportsClient {
    /// API token of the Toggl user
    #[builder(setter(transform = |api_token: &str| api_token.to_string()))]
    api_token: String,
    /// Scheme, host and port of the Reports API
    ///
    /// Example: `https://toggl.com`
    #[builder(
        default = DEFAULT_BASE_URL.to_string(),
        setter(transform = |base_url: &str| base_url.to_string())
    )]
    base_url: String,
    /// HTTP client used for the requests, e.g. to configure timeouts
    #[builder(default, setter(strip_option))]
    http_client: Option<reqwest::Client>,
}

/// A client for the detailed, summary and weekly reports of the Toggl Reports API v2.
///
/// The client is immutable once built. Cloning it is cheap and clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct ReportsClient {
    /// API token of the Toggl user
    api_token: String,
    /// Base URL of the Reports API
    base_url: Url,
    /// Headers sent with every request
    headers: HeaderMap,
    /// The client
    client: reqwest::Client,
}

impl TryFrom<InternalReportsClient> for ReportsClient {
    type Error = ReportsClientError;

    fn try_from(value: InternalReportsClient) -> Result<Self, Self::Error> {
        let base_url = Url::parse(&value.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ReportsClientError::InvalidBaseUrl(value.base_url));
        }

        let client = match value.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(ReportsClient {
            api_token: value.api_token,
            base_url,
            headers,
            client,
        })
    }
}

impl From<InternalReportsClient> for ReportsClientResult<ReportsClient> {
    fn from(value: InternalReportsClient) -> Self {
        ReportsClient::try_from(value)
    }
}

impl fmt::Debug for ReportsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportsClient")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl ReportsClient {
    /// Creates a builder for the client
    pub fn builder() -> InternalReportsClientBuilder {
        InternalReportsClient::builder()
    }

    /// Returns the base URL the report endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL of a report endpoint from the base URL and an encoded query.
    ///
    /// Scheme, host and port of the base URL are kept, its path is replaced.
    pub fn build_url(&self, report: Report, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(report.path());
        url.set_fragment(None);
        url.set_query((!query.is_empty()).then_some(query));
        url
    }

    /// Requests a detailed report and deserializes it to the type `T`.
    ///
    /// ## Example
    ///
    /// ```rust,no_run
    /// use toggl_reports::{
    ///     CancellationToken, DetailedReport, DetailedRequestParameters, ReportsClient,
    ///     StandardRequestParameters,
    /// };
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = ReportsClient::builder()
    ///         .api_token("my-api-token")
    ///         .build()
    ///         .expect("failed to build client");
    ///     let params = DetailedRequestParameters::new(StandardRequestParameters::new(
    ///         "me@example.com",
    ///         "123456",
    ///     ));
    ///     let cancel = CancellationToken::new();
    ///     let report: DetailedReport = client
    ///         .get_detailed(Some(&cancel), &params)
    ///         .await
    ///         .expect("request failed");
    ///     println!("{:#?}", report.data);
    /// }
    /// ```
    pub async fn get_detailed<T>(
        &self,
        cancel: Option<&CancellationToken>,
        params: &DetailedRequestParameters,
    ) -> ReportsClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_report(cancel, params).await
    }

    /// Requests a summary report and deserializes it to the type `T`.
    pub async fn get_summary<T>(
        &self,
        cancel: Option<&CancellationToken>,
        params: &SummaryRequestParameters,
    ) -> ReportsClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_report(cancel, params).await
    }

    /// Requests a weekly report and deserializes it to the type `T`.
    pub async fn get_weekly<T>(
        &self,
        cancel: Option<&CancellationToken>,
        params: &WeeklyRequestParameters,
    ) -> ReportsClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_report(cancel, params).await
    }

    /// Requests the report `P` belongs to and deserializes it to the type `T`.
    ///
    /// **NOTE:** The client does not validate the shape of the report. If `T` does not match
    /// the returned JSON, a `DecodeError` is returned.
    pub async fn get_report<T, P>(
        &self,
        cancel: Option<&CancellationToken>,
        params: &P,
    ) -> ReportsClientResult<T>
    where
        T: DeserializeOwned,
        P: ReportParameters,
    {
        let report = P::REPORT;
        let url = self.build_url(report, &params.to_query_string());
        tracing::debug!(
            %report,
            path = url.path(),
            query = url.query().unwrap_or_default(),
            "requesting report"
        );
        self.get_json(cancel, url).await
    }

    /// Performs an authenticated GET bound to `cancel` and deserializes the response.
    async fn get_json<T>(&self, cancel: Option<&CancellationToken>, url: Url) -> ReportsClientResult<T>
    where
        T: DeserializeOwned,
    {
        let cancel = cancel.ok_or(ReportsClientError::MissingCancellationToken)?;
        if cancel.is_cancelled() {
            tracing::trace!("token cancelled before the request was sent");
            return Err(ReportsClientError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::trace!("request cancelled while in flight");
                Err(ReportsClientError::Cancelled)
            }
            result = self.fetch(url) => result,
        }
    }

    async fn fetch<T>(&self, url: Url) -> ReportsClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .basic_auth(&self.api_token, Some(API_TOKEN_PASSWORD))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(
            status = status.as_u16(),
            length = body.len(),
            "received report response"
        );

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let error: ReportsError = serde_json::from_slice(&body)?;
        Err(error.with_http_status(status.as_u16()).into())
    }
}
