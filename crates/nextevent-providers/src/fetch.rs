//! FeedFetcher trait definition.
//!
//! This module defines the [`FeedFetcher`] trait, the capability that turns a
//! feed URL into raw feed text, along with two in-memory implementations
//! used for tests and offline runs.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tracing::trace;

use crate::error::{ProviderError, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so fetchers can be swapped
/// behind `dyn FeedFetcher`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fetches raw feed text.
///
/// # Example Implementation
///
/// ```ignore
/// struct FileFetcher { root: PathBuf }
///
/// impl FeedFetcher for FileFetcher {
///     fn name(&self) -> &str { "file" }
///
///     fn fetch(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>> {
///         let path = self.root.join(url);
///         Box::pin(async move {
///             std::fs::read_to_string(path).map_err(|e| ProviderError::network(e.to_string()))
///         })
///     }
/// }
/// ```
pub trait FeedFetcher: Send + Sync {
    /// Returns the name of this fetcher (e.g., "http", "static").
    fn name(&self) -> &str;

    /// Fetches the raw text at `url`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` coded [`ProviderError`] on transport failure,
    /// and other codes for HTTP-level failures.
    fn fetch(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>>;
}

impl<T: FeedFetcher + ?Sized> FeedFetcher for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>> {
        (**self).fetch(url)
    }
}

impl<T: FeedFetcher + ?Sized> FeedFetcher for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>> {
        (**self).fetch(url)
    }
}

/// A fetcher serving canned bodies from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    fallback: Option<String>,
}

impl StaticFetcher {
    /// Creates an empty fetcher; every URL is not found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher that returns `body` for any URL.
    pub fn always(body: impl Into<String>) -> Self {
        Self {
            bodies: HashMap::new(),
            fallback: Some(body.into()),
        }
    }

    /// Builder method to serve `body` at `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Builder method to set the body for URLs without their own entry.
    pub fn with_fallback(mut self, body: impl Into<String>) -> Self {
        self.fallback = Some(body.into());
        self
    }
}

impl FeedFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>> {
        trace!(url = %url, "Serving canned feed");
        let result = self
            .bodies
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| {
                ProviderError::not_found(format!("no canned feed for {}", url)).with_provider("static")
            });
        Box::pin(async move { result })
    }
}

/// A fetcher that always returns an error.
///
/// This is useful for testing or as a placeholder when a fetcher
/// fails to initialize.
#[derive(Debug)]
pub struct ErrorFetcher {
    name: String,
    error: ProviderError,
}

impl ErrorFetcher {
    /// Creates a new error fetcher.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl FeedFetcher for ErrorFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, _url: &str) -> BoxFuture<'_, ProviderResult<String>> {
        // Clone the error details since we can't clone ProviderError directly
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}
