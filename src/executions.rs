use crate::client::BacalhauClient;
use crate::errors::{Error, Result};
use crate::models::execution::Execution;
use crate::models::executions::{ListJobExecutionsRequest, ListJobExecutionsResponse};
use log::debug;
use std::collections::HashSet;
use std::future::Future;

/// Retrieves one page of executions of a job.
///
/// # Arguments
///
/// * `client` - A reference to a BacalhauClient instance
/// * `job_id` - ID of the job
/// * `request` - Paging, ordering and namespace parameters
///
/// # Performed API Request
///
/// ```text
/// GET {base_url}/api/v1/orchestrator/jobs/{job_id}/executions
/// ```
pub async fn list_job_executions(
    client: &BacalhauClient,
    job_id: &str,
    request: &ListJobExecutionsRequest,
) -> Result<ListJobExecutionsResponse> {
    let url = client.url("/api/v1/orchestrator/jobs", &[job_id, "executions"])?;
    client.get_json(url, Some(request.query_pairs())).await
}

/// Retrieves all executions of a job by following the page tokens returned by the server.
///
/// Executions are returned in the order the pages were served.
pub async fn list_all_job_executions(
    client: &BacalhauClient,
    job_id: &str,
    request: &ListJobExecutionsRequest,
) -> Result<Vec<Execution>> {
    collect_pages(request, |page| async move {
        list_job_executions(client, job_id, &page).await
    })
    .await
}

async fn collect_pages<F, Fut>(
    request: &ListJobExecutionsRequest,
    mut fetch: F,
) -> Result<Vec<Execution>>
where
    F: FnMut(ListJobExecutionsRequest) -> Fut,
    Fut: Future<Output = Result<ListJobExecutionsResponse>>,
{
    let mut executions = Vec::new();
    let mut seen_tokens: HashSet<String> = request.next_token.iter().cloned().collect();
    let mut page_request = request.clone();

    loop {
        let (items, next_token) = fetch(page_request).await?.into_parts();
        debug!(
            "received {} executions, next token: {:?}",
            items.len(),
            next_token
        );
        executions.extend(items);

        match next_token {
            Some(token) => {
                if !seen_tokens.insert(token.clone()) {
                    return Err(Error::RepeatedPageToken(token));
                }
                page_request = request.page(&token);
            }
            None => return Ok(executions),
        }
    }
}
