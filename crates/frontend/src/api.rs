use meem_shared::models::{Branch, Location};
use meem_shared::{Catalog, CatalogError};
use serde::{Deserialize, Serialize};

use crate::timeout::{with_timeout, CATALOG_TIMEOUT_MS};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    GraphQL(String),
    #[error("no data returned")]
    Empty,
    #[error("request timed out after {0} seconds")]
    Timeout(u32),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    /// The first reported error wins over any partial data.
    pub fn into_result(self) -> Result<T, ApiError> {
        if let Some(first) = self.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(ApiError::GraphQL(first.message));
        }
        self.data.ok_or(ApiError::Empty)
    }
}

fn api_url() -> Result<String, ApiError> {
    // Served from the same origin as the API.
    let origin = web_sys::window()
        .ok_or_else(|| ApiError::Transport("no browser window".to_string()))?
        .location()
        .origin()
        .map_err(|_| ApiError::Transport("page origin unavailable".to_string()))?;
    Ok(format!("{}/graphql", origin))
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, ApiError> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url()?)
        .json(&req)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let gql_resp: GraphQLResponse<T> = resp
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    gql_resp.into_result()
}

const CATALOG_QUERY: &str = r#"query {
    locations { id code flag name { en ar } }
    branches {
        id locationId
        name { en ar } address { en ar } city { en ar }
        coordinates { lat lng }
        phone
        hours { open close }
    }
}"#;

/// Matches [`CATALOG_QUERY`]; the record types deserialize straight from it.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub locations: Vec<Location>,
    pub branches: Vec<Branch>,
}

impl CatalogResponse {
    pub fn into_catalog(self) -> Result<Catalog, ApiError> {
        Ok(Catalog::new(self.locations, self.branches)?)
    }
}

/// Fetch every location and branch in one round trip.
pub async fn fetch_catalog() -> Result<Catalog, ApiError> {
    let resp: CatalogResponse = with_timeout(CATALOG_TIMEOUT_MS, query(CATALOG_QUERY, None))
        .await
        .map_err(|elapsed| ApiError::Timeout(elapsed.seconds()))??;
    resp.into_catalog()
}
