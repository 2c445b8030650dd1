use crate::config::BacalhauConfig;
use crate::errors::{api_error, Error, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Model for the Bacalhau API client object
#[derive(Debug)]
pub struct BacalhauClient {
    pub config: BacalhauConfig,
    pub client: reqwest::Client,
}

/// A generic HTTP interface that leverages `reqwest`.
#[async_trait]
pub trait ApiConnector {
    async fn perform_request<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<T>,
        query: Option<Vec<(&'static str, String)>>,
    ) -> std::result::Result<Response, reqwest::Error>
    where
        T: Serialize + Send;
}

#[async_trait]
impl ApiConnector for BacalhauClient {
    /// Issues HTTP requests against the configured Bacalhau API.
    ///
    /// # Arguments
    ///
    /// * `&self`
    /// * `method` - One of reqwest::Method (GET, POST, ...)
    /// * `url` - Full request URL, see `BacalhauClient::url`
    /// * `body` - Optional body to be sent with the request
    /// * `query` - Optional query parameters
    async fn perform_request<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<T>,
        query: Option<Vec<(&'static str, String)>>,
    ) -> std::result::Result<Response, reqwest::Error>
    where
        T: Serialize + Send,
    {
        debug!("{} {} query={:?}", method, url, query);

        let mut req = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");

        if let Some(token) = &self.config.auth_token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(params) = query {
            req = req.query(&params);
        }

        match method {
            Method::POST | Method::PUT | Method::PATCH => {
                if let Some(b) = body {
                    req = req.json(&b);
                }
            }
            _ => {}
        }

        req.send().await
    }
}

impl BacalhauClient {
    /// Builds the URL of an API resource.
    ///
    /// # Arguments
    ///
    /// * `path` - Fixed API path, e.g. `/api/v1/agent/alive`
    /// * `segments` - Further path segments such as IDs, each one is percent-encoded
    pub fn url(&self, path: &str, segments: &[&str]) -> Result<Url> {
        let base = format!("{}{}", self.config.base_url(), path);
        let invalid = |reason: String| Error::InvalidUrl {
            url: base.clone(),
            reason,
        };

        let mut url = Url::parse(&base).map_err(|err| invalid(err.to_string()))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| invalid("URL cannot have a path".to_owned()))?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(url)
    }

    /// Performs a GET request and decodes the JSON response into `M`.
    ///
    /// Non-successful status codes are turned into `Error::Api`.
    pub async fn get_json<M>(
        &self,
        url: Url,
        query: Option<Vec<(&'static str, String)>>,
    ) -> Result<M>
    where
        M: DeserializeOwned,
    {
        let response = self
            .perform_request(Method::GET, url, None::<()>, query)
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, body));
        }
        serde_json::from_str(body.as_str()).map_err(|source| Error::Decode { body, source })
    }
}

impl From<BacalhauConfig> for BacalhauClient {
    fn from(config: BacalhauConfig) -> Self {
        let http_client = reqwest::Client::new();
        BacalhauClient {
            config,
            client: http_client,
        }
    }
}
