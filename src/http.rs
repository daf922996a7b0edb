//! The HTTP transport: base-URL resolution, client configuration, and the
//! request/response plumbing shared by every API module.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::{ClientError, ModelError};
use crate::validate::is_non_empty_string;

////////////////////////////////////////////// ApiName ////////////////////////////////////////////

/// The REST resource families exposed by the platform, each rooted at a
/// fixed path under the datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiName {
    /// The authorization-check API.
    Authorizations,
    /// The entity-data API.
    Data,
    /// The organizations API.
    Organizations,
}

impl ApiName {
    /// The fixed path prefix for this API, relative to the base URL.
    pub fn root(&self) -> &'static str {
        match self {
            ApiName::Authorizations => "datastore/authorizations",
            ApiName::Data => "datastore/data",
            ApiName::Organizations => "datastore/organizations",
        }
    }
}

//////////////////////////////////////////// Environment //////////////////////////////////////////

/// Well-known deployments with fixed base URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// A locally running platform.
    Local,
    /// The hosted production platform.
    Production,
}

impl Environment {
    /// The base URL of this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Local => "http://localhost:8080",
            Environment::Production => "https://api.loom.digital",
        }
    }
}

//////////////////////////////////////////// ClientConfig /////////////////////////////////////////

/// Configuration for a [`LatticeClient`]: where to send requests and which
/// bearer token, if any, to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    auth_token: Option<String>,
}

impl ClientConfig {
    /// Configuration pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if !is_non_empty_string(&base_url) {
            return Err(ClientError::Model(ModelError::invalid(
                "baseUrl",
                "must be a non-empty string",
            )));
        }
        Ok(ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Configuration pointing at a well-known environment.
    pub fn for_environment(environment: Environment) -> Self {
        ClientConfig {
            base_url: environment.base_url().to_string(),
            auth_token: None,
        }
    }

    /// Attaches a bearer token sent with every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Result<Self, ClientError> {
        let token = token.into();
        if !is_non_empty_string(&token) {
            return Err(ClientError::Model(ModelError::invalid(
                "authToken",
                "must be a non-empty string",
            )));
        }
        self.auth_token = Some(token);
        Ok(self)
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

//////////////////////////////////////////// LatticeClient ////////////////////////////////////////

/// The transport collaborator every API module delegates to.
///
/// Owns a `reqwest::Client` and the resolved base URL; assembles request
/// URLs as `{base_url}/{api root}/{path}` and unwraps JSON response bodies.
pub struct LatticeClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl LatticeClient {
    /// Creates a client from the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        LatticeClient {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Constructs a full URL for a path under the given API's root.
    pub fn url_for(&self, api: ApiName, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        if path.is_empty() {
            format!("{}/{}", self.config.base_url(), api.root())
        } else {
            format!("{}/{}/{}", self.config.base_url(), api.root(), path)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.config.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Makes a GET request and deserializes the response body.
    pub async fn get<T>(&self, api: ApiName, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(api, path);
        let response = self.request(Method::GET, &url).send().await?;
        handle_response("GET", &url, response).await
    }

    /// Makes a POST request with a JSON body and deserializes the response.
    pub async fn post<B, T>(&self, api: ApiName, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url_for(api, path);
        let response = self.request(Method::POST, &url).json(body).send().await?;
        handle_response("POST", &url, response).await
    }

    /// Makes a POST request with a JSON body, expecting no response body.
    pub async fn post_no_content<B>(&self, api: ApiName, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize,
    {
        let url = self.url_for(api, path);
        let response = self.request(Method::POST, &url).json(body).send().await?;
        handle_no_content("POST", &url, response).await
    }

    /// Makes a PUT request with a JSON body and deserializes the response.
    pub async fn put<B, T>(&self, api: ApiName, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url_for(api, path);
        let response = self.request(Method::PUT, &url).json(body).send().await?;
        handle_response("PUT", &url, response).await
    }

    /// Makes a PUT request with a JSON body, expecting no response body.
    pub async fn put_no_content<B>(&self, api: ApiName, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize,
    {
        let url = self.url_for(api, path);
        let response = self.request(Method::PUT, &url).json(body).send().await?;
        handle_no_content("PUT", &url, response).await
    }

    /// Makes a PUT request without a body, expecting no response body.
    pub async fn put_empty(&self, api: ApiName, path: &str) -> Result<(), ClientError> {
        let url = self.url_for(api, path);
        let response = self.request(Method::PUT, &url).send().await?;
        handle_no_content("PUT", &url, response).await
    }

    /// Makes a DELETE request, expecting no response body.
    pub async fn delete(&self, api: ApiName, path: &str) -> Result<(), ClientError> {
        let url = self.url_for(api, path);
        let response = self.request(Method::DELETE, &url).send().await?;
        handle_no_content("DELETE", &url, response).await
    }

    /// Makes a DELETE request with a JSON body, expecting no response body.
    pub async fn delete_with_body<B>(&self, api: ApiName, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize,
    {
        let url = self.url_for(api, path);
        let response = self.request(Method::DELETE, &url).json(body).send().await?;
        handle_no_content("DELETE", &url, response).await
    }
}

async fn handle_response<T>(
    method: &'static str,
    url: &str,
    response: Response,
) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(api_error(method, url, response).await)
    }
}

async fn handle_no_content(
    method: &'static str,
    url: &str,
    response: Response,
) -> Result<(), ClientError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(api_error(method, url, response).await)
    }
}

async fn api_error(method: &'static str, url: &str, response: Response) -> ClientError {
    let status = response.status().as_u16();
    let details = response.text().await.unwrap_or_default();
    let details = if details.is_empty() {
        "no error details".to_string()
    } else {
        details
    };
    tracing::warn!(method, url, status, "request failed");
    ClientError::Api {
        method,
        url: url.to_string(),
        status,
        details,
    }
}
