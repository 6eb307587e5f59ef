use std::collections::BTreeMap;

use chrono::NaiveDate;
use typed_builder::TypedBuilder;

/// Format of the `since` and `until` parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A collection of query parameters for a report request.
///
/// Keys are kept in lexicographic order, so the encoded query string is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    inner: BTreeMap<String, String>,
}

impl QueryParameters {
    /// Creates a new empty collection of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter to the collection
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.insert(key.into(), value.into());
        self
    }

    /// Adds a parameter to the collection, if a value is present
    pub fn param_opt<K, V>(self, key: K, value: Option<V>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Adds multiple parameters to the collection
    pub fn extend<I, K, V>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in iter {
            self.inner.insert(k.into(), v.into());
        }
        self
    }

    /// Returns the value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Returns whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns the parameter names, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` string
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.inner.iter())
            .finish()
    }

    /// Returns the inner map of parameters
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.inner
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Trait for converting a type to the query parameters of a report request.
pub trait ToQueryParameters {
    /// Converts the type to a collection of query parameters.
    fn to_query_parameters(&self) -> QueryParameters;

    /// Encodes the type as an `application/x-www-form-urlencoded` query string.
    fn to_query_string(&self) -> String {
        self.to_query_parameters().encode()
    }
}

/// Billable filter of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Billable {
    /// Only billable time entries.
    Yes,
    /// Only non-billable time entries.
    No,
    /// Both billable and non-billable time entries.
    Both,
}

impl Billable {
    /// The value sent to the Reports API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Billable::Yes => "yes",
            Billable::No => "no",
            Billable::Both => "both",
        }
    }
}

/// Parameters shared by all reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct StandardRequestParameters {
    /// Name of the application or an email address to contact the developer.
    #[builder(setter(into))]
    pub user_agent: String,
    /// Workspace whose data is requested.
    #[builder(setter(into))]
    pub workspace_id: String,
    /// First day of the report.
    #[builder(default, setter(strip_option))]
    pub since: Option<NaiveDate>,
    /// Last day of the report.
    #[builder(default, setter(strip_option))]
    pub until: Option<NaiveDate>,
    /// Billable filter.
    #[builder(default, setter(strip_option))]
    pub billable: Option<Billable>,
    /// Filter on client IDs.
    #[builder(default, setter(into))]
    pub client_ids: Vec<u64>,
    /// Filter on project IDs.
    #[builder(default, setter(into))]
    pub project_ids: Vec<u64>,
    /// Filter on user IDs.
    #[builder(default, setter(into))]
    pub user_ids: Vec<u64>,
    /// Filter on tag IDs.
    #[builder(default, setter(into))]
    pub tag_ids: Vec<u64>,
    /// Filter on task IDs.
    #[builder(default, setter(into))]
    pub task_ids: Vec<u64>,
    /// Matches time entries whose description contains this text.
    #[builder(default, setter(into))]
    pub description: String,
    /// Only time entries without a description.
    #[builder(default)]
    pub without_description: bool,
    /// Field to order the report by (`date`, `description`, `duration`, `user`, ...).
    #[builder(default, setter(into))]
    pub order_field: String,
    /// Order descending.
    #[builder(default)]
    pub order_desc: bool,
    /// Round durations according to the workspace settings.
    #[builder(default)]
    pub rounding: bool,
    /// Format of the durations (`decimal` or `minutes`).
    #[builder(default, setter(into))]
    pub display_hours: String,
}

impl StandardRequestParameters {
    /// Creates a new set of parameters with only the required fields set.
    pub fn new(user_agent: &str, workspace_id: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            workspace_id: workspace_id.to_string(),
            ..Default::default()
        }
    }
}

impl ToQueryParameters for StandardRequestParameters {
    fn to_query_parameters(&self) -> QueryParameters {
        QueryParameters::new()
            .param("user_agent", &self.user_agent)
            .param("workspace_id", &self.workspace_id)
            .param_opt("since", self.since.map(format_date))
            .param_opt("until", self.until.map(format_date))
            .param_opt("billable", self.billable.map(|b| b.as_str()))
            .param_opt("client_ids", join_ids(&self.client_ids))
            .param_opt("project_ids", join_ids(&self.project_ids))
            .param_opt("user_ids", join_ids(&self.user_ids))
            .param_opt("tag_ids", join_ids(&self.tag_ids))
            .param_opt("task_ids", join_ids(&self.task_ids))
            .param_opt("description", non_empty(&self.description))
            .param_opt("without_description", flag(self.without_description, "true"))
            .param_opt("order_field", non_empty(&self.order_field))
            .param_opt("order_desc", flag(self.order_desc, "on"))
            .param_opt("rounding", flag(self.rounding, "on"))
            .param_opt("display_hours", non_empty(&self.display_hours))
    }
}

/// Parameters of a detailed report.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct DetailedRequestParameters {
    /// Parameters shared by all reports.
    #[builder(setter(into))]
    pub standard: StandardRequestParameters,
    /// Page of the report, starting at 1. `0` requests the first page.
    #[builder(default)]
    pub page: u32,
}

impl DetailedRequestParameters {
    /// Creates a new set of parameters for the first page.
    pub fn new(standard: StandardRequestParameters) -> Self {
        Self { standard, page: 0 }
    }
}

impl ToQueryParameters for DetailedRequestParameters {
    fn to_query_parameters(&self) -> QueryParameters {
        self.standard
            .to_query_parameters()
            .param_opt("page", (self.page != 0).then(|| self.page.to_string()))
    }
}

/// Parameters of a summary report.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct SummaryRequestParameters {
    /// Parameters shared by all reports.
    #[builder(setter(into))]
    pub standard: StandardRequestParameters,
    /// Grouping of the report (`projects`, `clients` or `users`).
    #[builder(default, setter(into))]
    pub grouping: String,
    /// Subgrouping of the report (`time_entries`, `tasks`, `projects`, `users`, ...).
    #[builder(default, setter(into))]
    pub subgrouping: String,
    /// Include the IDs of the grouped time entries.
    #[builder(default)]
    pub grouped_time_entry_ids: bool,
    /// Include the IDs of the subgroups.
    #[builder(default)]
    pub subgrouping_ids: bool,
}

impl SummaryRequestParameters {
    /// Creates a new set of parameters with the default grouping.
    pub fn new(standard: StandardRequestParameters) -> Self {
        Self {
            standard,
            ..Default::default()
        }
    }
}

impl ToQueryParameters for SummaryRequestParameters {
    fn to_query_parameters(&self) -> QueryParameters {
        self.standard
            .to_query_parameters()
            .param_opt("grouping", non_empty(&self.grouping))
            .param_opt("subgrouping", non_empty(&self.subgrouping))
            .param_opt(
                "grouped_time_entry_ids",
                flag(self.grouped_time_entry_ids, "true"),
            )
            .param_opt("subgrouping_ids", flag(self.subgrouping_ids, "true"))
    }
}

/// Parameters of a weekly report.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct WeeklyRequestParameters {
    /// Parameters shared by all reports.
    #[builder(setter(into))]
    pub standard: StandardRequestParameters,
    /// Grouping of the report (`users` or `projects`).
    #[builder(default, setter(into))]
    pub grouping: String,
    /// What to total (`time` or `earnings`).
    #[builder(default, setter(into))]
    pub calculate: String,
}

impl WeeklyRequestParameters {
    /// Creates a new set of parameters with the default grouping.
    pub fn new(standard: StandardRequestParameters) -> Self {
        Self {
            standard,
            ..Default::default()
        }
    }
}

impl ToQueryParameters for WeeklyRequestParameters {
    fn to_query_parameters(&self) -> QueryParameters {
        self.standard
            .to_query_parameters()
            .param_opt("grouping", non_empty(&self.grouping))
            .param_opt("calculate", non_empty(&self.calculate))
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn flag(set: bool, value: &'static str) -> Option<&'static str> {
    set.then_some(value)
}

fn join_ids(ids: &[u64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> StandardRequestParameters {
        StandardRequestParameters::new("user_agent", "workspace_id")
    }

    fn keys(params: &impl ToQueryParameters) -> Vec<String> {
        params
            .to_query_parameters()
            .keys()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn required_fields_are_always_encoded() {
        assert_eq!(
            standard().to_query_string(),
            "user_agent=user_agent&workspace_id=workspace_id"
        );
        assert_eq!(
            StandardRequestParameters::default().to_query_string(),
            "user_agent=&workspace_id="
        );
    }

    #[test]
    fn dates_are_encoded_as_calendar_days() {
        let params = StandardRequestParameters::builder()
            .user_agent("user_agent")
            .workspace_id("workspace_id")
            .since(NaiveDate::from_ymd_opt(2021, 3, 7).unwrap())
            .until(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap())
            .build();
        let query = params.to_query_parameters();
        assert_eq!(query.get("since"), Some("2021-03-07"));
        assert_eq!(query.get("until"), Some("2021-12-31"));
        assert_eq!(query.get("since").map(str::len), Some(10));
    }

    #[test]
    fn page_is_encoded_only_when_set() {
        let mut params = DetailedRequestParameters::new(standard());
        params.page = 3;
        assert!(params.to_query_string().contains("page=3"));

        params.page = 0;
        assert!(!params.to_query_parameters().contains_key("page"));
    }

    #[test]
    fn summary_flags_are_encoded_only_when_true() {
        let params = SummaryRequestParameters::builder()
            .standard(standard())
            .grouped_time_entry_ids(true)
            .subgrouping_ids(false)
            .build();
        let query = params.to_query_parameters();
        assert_eq!(query.get("grouped_time_entry_ids"), Some("true"));
        assert!(!query.contains_key("subgrouping_ids"));
    }

    #[test]
    fn summary_with_every_field_set() {
        let params = SummaryRequestParameters {
            standard: standard(),
            grouping: "projects".to_string(),
            subgrouping: "time_entries".to_string(),
            grouped_time_entry_ids: true,
            subgrouping_ids: true,
        };
        assert_eq!(
            keys(&params),
            vec![
                "grouped_time_entry_ids",
                "grouping",
                "subgrouping",
                "subgrouping_ids",
                "user_agent",
                "workspace_id",
            ]
        );
    }

    #[test]
    fn empty_optional_strings_are_omitted() {
        assert_eq!(
            keys(&WeeklyRequestParameters::new(standard())),
            vec!["user_agent", "workspace_id"]
        );
        assert_eq!(
            keys(&SummaryRequestParameters::new(standard())),
            vec!["user_agent", "workspace_id"]
        );

        let weekly = WeeklyRequestParameters::builder()
            .standard(standard())
            .calculate("earnings")
            .build();
        assert_eq!(
            keys(&weekly),
            vec!["calculate", "user_agent", "workspace_id"]
        );
    }

    #[test]
    fn filters_are_encoded() {
        let params = StandardRequestParameters::builder()
            .user_agent("user_agent")
            .workspace_id("workspace_id")
            .billable(Billable::Both)
            .project_ids([12u64, 34])
            .tag_ids(vec![5u64])
            .order_desc(true)
            .rounding(false)
            .without_description(true)
            .build();
        let query = params.to_query_parameters();
        assert_eq!(query.get("billable"), Some("both"));
        assert_eq!(query.get("project_ids"), Some("12,34"));
        assert_eq!(query.get("tag_ids"), Some("5"));
        assert_eq!(query.get("order_desc"), Some("on"));
        assert_eq!(query.get("without_description"), Some("true"));
        assert!(!query.contains_key("rounding"));
        assert!(!query.contains_key("client_ids"));
        assert!(params.to_query_string().contains("project_ids=12%2C34"));
    }

    #[test]
    fn values_are_form_encoded() {
        let params = StandardRequestParameters::new("me@example.com", "1 2&3");
        assert_eq!(
            params.to_query_string(),
            "user_agent=me%40example.com&workspace_id=1+2%263"
        );
    }
}
