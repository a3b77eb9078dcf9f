use gloo_net::http::Request;
use log::debug;

use fitdex_domain as domain;

const QUOTABLE_URL: &str = "https://api.quotable.io/random";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    /// Performs a GET request and returns the body of a successful response.
    async fn get(&self, url: &str) -> Result<String, RequestError>;
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("no connection")]
    NoConnection,
    #[error("{0} {1}")]
    Status(u16, String),
    #[error("failed to read response: {0}")]
    Body(String),
}

impl From<RequestError> for domain::ReadError {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NoConnection => {
                domain::ReadError::Storage(domain::StorageError::NoConnection)
            }
            err => domain::ReadError::Other(Box::new(err)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn get(&self, url: &str) -> Result<String, RequestError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|_| RequestError::NoConnection)?;
        if !response.ok() {
            return Err(RequestError::Status(
                response.status(),
                response.status_text(),
            ));
        }
        response
            .text()
            .await
            .map_err(|err| RequestError::Body(err.to_string()))
    }
}

/// Quotes served by the public Quotable API.
#[derive(Debug, Clone)]
pub struct Quotable<S: SendRequest> {
    sender: S,
    url: String,
}

impl Quotable<GlooNetSendRequest> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_sender(GlooNetSendRequest)
    }
}

impl Default for Quotable<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> Quotable<S> {
    pub fn with_sender(sender: S) -> Self {
        Self {
            sender,
            url: QUOTABLE_URL.to_string(),
        }
    }
}

#[derive(serde::Deserialize, Debug)]
struct QuoteResponse {
    content: String,
    author: String,
}

impl<S: SendRequest> domain::QuoteRepository for Quotable<S> {
    async fn read_random_quote(&self) -> Result<domain::Quote, domain::ReadError> {
        let body = self.sender.get(&self.url).await?;
        let quote = serde_json::from_str::<QuoteResponse>(&body).map_err(|err| {
            debug!("unexpected quote response: {body}");
            domain::ReadError::Other(Box::new(err))
        })?;
        Ok(domain::Quote {
            content: quote.content,
            author: quote.author,
        })
    }
}
