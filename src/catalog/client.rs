use crate::catalog::types::{Movie, Show};
use crate::error::{Result, StreamgateError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;

/// Query for a single movie with its transcoded video reference.
const MOVIE_QUERY: &str = "\
query getMovie($id: Int!) {
  movie(id: $id) {
    id titleTh titleEn
    video { transcodeUuid cdnHostname subtitleMetadata }
  }
}";

/// Query for a series with all episodes and their video references.
const SHOW_QUERY: &str = "\
query getShow($id: Int!) {
  show(id: $id) {
    id titleTh titleEn
    episodes {
      seasonNo episodeNo titleTh titleEn
      video { transcodeUuid cdnHostname subtitleMetadata }
    }
  }
}";

/// Source of movie/series metadata.
///
/// The production implementation talks GraphQL; the trait keeps handlers
/// decoupled from the catalog backend so other sources can be swapped in.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Look up a movie. `Ok(None)` means the catalog has no such id.
    async fn movie_by_id(&self, id: i64) -> Result<Option<Movie>>;

    /// Look up a series. `Ok(None)` means the catalog has no such id.
    async fn show_by_id(&self, id: i64) -> Result<Option<Show>>;
}

/// GraphQL catalog client: plain JSON POSTs against a single endpoint.
#[derive(Clone)]
pub struct GraphqlCatalog {
    client: Client,
    endpoint: String,
}

/// Standard GraphQL response envelope. Errors-only responses carry no
/// `data` member, which collapses to a not-found result.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Deserialize)]
struct MovieData {
    movie: Option<Movie>,
}

#[derive(Deserialize)]
struct ShowData {
    show: Option<Show>,
}

impl GraphqlCatalog {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn post<T: DeserializeOwned>(&self, query: &str, id: i64) -> Result<Option<T>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": { "id": id } }))
            .send()
            .await?
            .error_for_status()?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| StreamgateError::CatalogDecode(e.to_string()))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogProvider for GraphqlCatalog {
    async fn movie_by_id(&self, id: i64) -> Result<Option<Movie>> {
        info!("Catalog lookup: movie {}", id);
        let data: Option<MovieData> = self.post(MOVIE_QUERY, id).await?;
        Ok(data.and_then(|d| d.movie))
    }

    async fn show_by_id(&self, id: i64) -> Result<Option<Show>> {
        info!("Catalog lookup: show {}", id);
        let data: Option<ShowData> = self.post(SHOW_QUERY, id).await?;
        Ok(data.and_then(|d| d.show))
    }
}
