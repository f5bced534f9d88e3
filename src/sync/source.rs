//! Where pulled documents come from.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::io::Write;

use crate::config::Settings;
use crate::core::error::{Result, TldrError};
use crate::core::types::DocumentRef;

/// Remote repository of documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Every document reference the repository currently offers, in listing order.
    async fn list(&self) -> Result<Vec<DocumentRef>>;

    /// Start retrieving one document's content.
    async fn fetch(&self, name: &str, url: &str) -> Result<Box<dyn DocumentBody>>;
}

/// Content of a document being retrieved
#[async_trait]
pub trait DocumentBody: Send {
    /// Copy the remaining content into `sink`, returning the number of bytes written.
    async fn copy_to(&mut self, sink: &mut (dyn Write + Send)) -> Result<u64>;
}

/// Documents served over HTTP, listed by a single JSON endpoint.
pub struct HttpSource {
    client: reqwest::Client,
    listing_url: String,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder()
            .redirect(Policy::limited(10))
            .user_agent(settings.user_agent.as_str())
            // Every request gets its own connection
            .pool_max_idle_per_host(0);

        if let Some(timeout) = settings.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(Self {
            client: client_builder.build()?,
            listing_url: settings.listing_url.clone(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn list(&self) -> Result<Vec<DocumentRef>> {
        let url = &self.listing_url;
        let listing_error = |e: reqwest::Error| TldrError::ListingFetch(url.clone(), e);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(listing_error)?;
        let body = response.bytes().await.map_err(listing_error)?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch(&self, name: &str, url: &str) -> Result<Box<dyn DocumentBody>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TldrError::DocumentFetch(name.to_string(), e))?;

        Ok(Box::new(HttpBody {
            name: name.to_string(),
            response,
        }))
    }
}

struct HttpBody {
    name: String,
    response: reqwest::Response,
}

#[async_trait]
impl DocumentBody for HttpBody {
    async fn copy_to(&mut self, sink: &mut (dyn Write + Send)) -> Result<u64> {
        let mut written = 0u64;
        while let Some(chunk) = self
            .response
            .chunk()
            .await
            .map_err(|e| TldrError::DocumentFetch(self.name.clone(), e))?
        {
            sink.write_all(&chunk)
                .map_err(|e| TldrError::DocumentWrite(self.name.clone(), e))?;
            written += chunk.len() as u64;
        }
        sink.flush()
            .map_err(|e| TldrError::DocumentWrite(self.name.clone(), e))?;
        Ok(written)
    }
}
