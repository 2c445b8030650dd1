use super::execution::Execution;
use super::{fmt_model, ApiModel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Struct that holds one page of the response when requesting
/// /api/v1/orchestrator/jobs/{id}/executions
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ListJobExecutionsResponse {
    #[serde(rename = "Items", skip_serializing_if = "Option::is_none")]
    items: Option<Vec<Execution>>,
    #[serde(rename = "NextToken", skip_serializing_if = "Option::is_none")]
    next_token: Option<String>,
}

impl ListJobExecutionsResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(mut self, items: Vec<Execution>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }

    pub fn items(&self) -> Option<&[Execution]> {
        self.items.as_deref()
    }

    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    /// The token to request the following page with. The server ends pagination with either a
    /// missing or an empty token.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token().filter(|token| !token.is_empty())
    }

    pub fn has_next_page(&self) -> bool {
        self.continuation().is_some()
    }

    /// Splits the page into its executions and its continuation token.
    pub fn into_parts(self) -> (Vec<Execution>, Option<String>) {
        let next_token = self.next_token.filter(|token| !token.is_empty());
        (self.items.unwrap_or_default(), next_token)
    }
}

impl ApiModel for ListJobExecutionsResponse {
    const MODEL_NAME: &'static str = "ApiListJobExecutionsResponse";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] =
        &[("items", "Items"), ("next_token", "NextToken")];
}

impl fmt::Display for ListJobExecutionsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}

/// Query parameters accepted by /api/v1/orchestrator/jobs/{id}/executions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListJobExecutionsRequest {
    pub namespace: Option<String>,
    pub limit: Option<u32>,
    pub next_token: Option<String>,
    pub order_by: Option<String>,
    pub reverse: bool,
}

impl ListJobExecutionsRequest {
    /// Returns the query as key/value pairs, leaving out everything that was not set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(namespace) = &self.namespace {
            pairs.push(("namespace", namespace.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(next_token) = &self.next_token {
            pairs.push(("next_token", next_token.clone()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("order_by", order_by.clone()));
        }
        if self.reverse {
            pairs.push(("reverse", "true".to_owned()));
        }
        pairs
    }

    /// Same query, pointed at the page behind `next_token`.
    pub fn page(&self, next_token: &str) -> Self {
        ListJobExecutionsRequest {
            next_token: Some(next_token.to_owned()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::state::{ExecutionStateRecord, ExecutionStateType};
    use crate::models::tests::read_json_from_file;
    use serde_json::{json, Map, Value};

    fn execution(id: &str) -> Execution {
        Execution {
            id: Some(id.to_owned()),
            compute_state: Some(ExecutionStateRecord::new(ExecutionStateType::BidAccepted)),
            ..Default::default()
        }
    }

    #[test]
    fn deserialize_list_job_executions_response() {
        let page: ListJobExecutionsResponse =
            read_json_from_file("test/test_list_job_executions_response.json").unwrap();

        let items = page.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_deref(), Some("e-0a1b2c3d"));
        assert_eq!(items[1].id.as_deref(), Some("e-4e5f6a7b"));
        assert_eq!(page.next_token(), Some("eyJPZmZzZXQiOjJ9"));
        assert!(page.has_next_page());
    }

    #[test]
    fn empty_items_without_token() {
        let page = ListJobExecutionsResponse::new().with_items(vec![]);

        assert_eq!(Value::Object(page.to_map().unwrap()), json!({ "Items": [] }));
        assert!(!page.has_next_page());
    }

    #[test]
    fn absent_items_differ_from_empty_items() {
        let absent = ListJobExecutionsResponse::new();
        let empty = ListJobExecutionsResponse::new().with_items(vec![]);

        assert_ne!(absent, empty);
        assert_eq!(absent.items(), None);
        assert_eq!(empty.items(), Some(&[][..]));
        assert_eq!(absent.to_map().unwrap(), Map::new());
    }

    #[test]
    fn token_without_items() {
        let page = ListJobExecutionsResponse::new().with_next_token("abc");

        assert_eq!(Value::Object(page.to_map().unwrap()), json!({ "NextToken": "abc" }));
        assert_eq!(page.into_parts(), (vec![], Some("abc".to_owned())));
    }

    #[test]
    fn empty_token_ends_pagination() {
        let page: ListJobExecutionsResponse =
            serde_json::from_value(json!({ "Items": [], "NextToken": "" })).unwrap();

        assert_eq!(page.next_token(), Some(""));
        assert_eq!(page.continuation(), None);
        assert_eq!(page.into_parts().1, None);
    }

    #[test]
    fn items_are_converted_element_by_element() {
        let page = ListJobExecutionsResponse::new()
            .with_items(vec![execution("e-1"), execution("e-2")])
            .with_next_token("t");

        assert_eq!(
            Value::Object(page.to_map().unwrap()),
            json!({
                "Items": [
                    { "ID": "e-1", "ComputeState": { "StateType": 5 } },
                    { "ID": "e-2", "ComputeState": { "StateType": 5 } }
                ],
                "NextToken": "t"
            })
        );
    }

    #[test]
    fn round_trips_every_field_combination() {
        let pages = vec![
            ListJobExecutionsResponse::new(),
            ListJobExecutionsResponse::new().with_items(vec![]),
            ListJobExecutionsResponse::new().with_next_token(""),
            ListJobExecutionsResponse::new().with_next_token("next"),
            ListJobExecutionsResponse::new()
                .with_items(vec![execution("e-1")])
                .with_next_token("next"),
        ];

        for page in pages {
            let map = page.to_map().unwrap();
            assert_eq!(ListJobExecutionsResponse::from_map(map).unwrap(), page);
        }
    }

    #[test]
    fn equality_is_structural() {
        let a = ListJobExecutionsResponse::new().with_items(vec![execution("e-1")]);
        let b = ListJobExecutionsResponse::new().with_items(vec![execution("e-1")]);
        let c = ListJobExecutionsResponse::new().with_items(vec![execution("e-2")]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.same_model(&b));
        assert!(!a.same_model(&ExecutionStateRecord::default()));
        assert!(!ListJobExecutionsResponse::new().same_model(&Map::<String, Value>::new()));
    }

    #[test]
    fn rejects_items_of_the_wrong_type() {
        let mut map = Map::new();
        map.insert("Items".to_owned(), json!("not a list"));

        let err = ListJobExecutionsResponse::from_map(map).unwrap_err();
        assert!(err.to_string().starts_with("ApiListJobExecutionsResponse"));
    }

    #[test]
    fn display_is_stable() {
        let page = ListJobExecutionsResponse::new()
            .with_items(vec![])
            .with_next_token("t");

        assert_eq!(page.to_string(), page.to_string());
        assert_eq!(page.to_string(), "{\n  \"Items\": [],\n  \"NextToken\": \"t\"\n}");
    }

    #[test]
    fn query_pairs_skip_unset_parameters() {
        let request = ListJobExecutionsRequest {
            limit: Some(5),
            reverse: true,
            ..Default::default()
        };

        assert_eq!(
            request.query_pairs(),
            vec![("limit", "5".to_owned()), ("reverse", "true".to_owned())]
        );
        assert!(ListJobExecutionsRequest::default().query_pairs().is_empty());
    }

    #[test]
    fn page_keeps_the_original_query() {
        let request = ListJobExecutionsRequest {
            namespace: Some("default".to_owned()),
            order_by: Some("created_at".to_owned()),
            ..Default::default()
        };
        let next = request.page("abc");

        assert_eq!(next.next_token.as_deref(), Some("abc"));
        assert_eq!(next.namespace, request.namespace);
        assert_eq!(next.order_by, request.order_by);
    }
}
