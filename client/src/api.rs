//! Talking to the catalog service.
//!
//! [`CatalogApi`] is the seam the state store is written against, [`HttpCatalogClient`] is the
//! implementation that goes over the network.

use std::future::Future;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use songbook_types::{Envelope, MetadataInfo, NewSong, PaginationInfo, SongBrief, SongChangeSet};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("{status}: {message}")]
    Status { status: u16, message: String },
    /// The request never got an answer.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered, but not with what we asked for.
    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One page of the catalog, as returned by `GET /songs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongPage {
    pub songs: Vec<SongBrief>,
    pub pagination: PaginationInfo,
}

/// The operations the client side of songbook needs from the catalog.
pub trait CatalogApi: Send + Sync + 'static {
    fn list(&self, page: u64, limit: u64) -> impl Future<Output = ApiResult<SongPage>> + Send;

    fn create(&self, song: NewSong) -> impl Future<Output = ApiResult<SongBrief>> + Send;

    fn delete(&self, id: String) -> impl Future<Output = ApiResult<()>> + Send;

    fn update(
        &self,
        id: String,
        changes: SongChangeSet,
    ) -> impl Future<Output = ApiResult<SongBrief>> + Send;

    fn metadata(&self) -> impl Future<Output = ApiResult<MetadataInfo>> + Send;
}

/// [`CatalogApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    base_url: String,
    http: reqwest::Client,
}

/// The part of an error envelope we care about.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpCatalogClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    #[must_use]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request, and unwrap the envelope of the response.
    ///
    /// `fallback` is used as the error message when a failed response doesn't carry one.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> ApiResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        log::debug!("{method} {url}");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, &response.text().await?, fallback));
        }

        Ok(response.json().await?)
    }
}

fn error_from_response(status: StatusCode, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_owned());

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

impl CatalogApi for HttpCatalogClient {
    #[tracing::instrument(skip(self))]
    async fn list(&self, page: u64, limit: u64) -> ApiResult<SongPage> {
        let envelope: Envelope<Vec<SongBrief>> = self
            .request::<_, ()>(
                Method::GET,
                &format!("/songs?page={page}&limit={limit}"),
                None,
                "Failed to fetch songs",
            )
            .await?;

        Ok(SongPage {
            songs: envelope.data.unwrap_or_default(),
            pagination: envelope
                .pagination
                .ok_or(ApiError::Malformed("list response without pagination"))?,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, song: NewSong) -> ApiResult<SongBrief> {
        self.request(Method::POST, "/songs", Some(&song), "Failed to create song")
            .await?
            .data
            .ok_or(ApiError::Malformed("created song missing from response"))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: String) -> ApiResult<()> {
        self.request::<serde::de::IgnoredAny, ()>(
            Method::DELETE,
            &format!("/songs/{id}"),
            None,
            "Failed to delete song",
        )
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: String, changes: SongChangeSet) -> ApiResult<SongBrief> {
        self.request(
            Method::PUT,
            &format!("/songs/{id}"),
            Some(&changes),
            "Failed to update song",
        )
        .await?
        .data
        .ok_or(ApiError::Malformed("updated song missing from response"))
    }

    #[tracing::instrument(skip(self))]
    async fn metadata(&self) -> ApiResult<MetadataInfo> {
        self.request::<_, ()>(
            Method::GET,
            "/songs/metadata",
            None,
            "Failed to fetch metadata",
        )
        .await?
        .data
        .ok_or(ApiError::Malformed("metadata missing from response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::envelope(
        StatusCode::CONFLICT,
        r#"{"timestamp":"2024-01-01T00:00:00Z","isError":true,"message":"ALREADY_EXISTS","data":null}"#,
        "409: ALREADY_EXISTS"
    )]
    #[case::not_json(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>", "502: Failed to create song")]
    #[case::empty_message(StatusCode::BAD_REQUEST, r#"{"message":""}"#, "400: Failed to create song")]
    #[case::no_body(StatusCode::INTERNAL_SERVER_ERROR, "", "500: Failed to create song")]
    fn test_error_from_response(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        let error = error_from_response(status, body, "Failed to create song");
        assert_eq!(error.to_string(), expected);
        assert_eq!(error.status(), Some(status.as_u16()));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = HttpCatalogClient::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }
}
