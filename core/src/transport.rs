//! The transport seam.
//!
//! A transport takes a finished `HttpRequest`, performs the round-trip, and
//! returns the raw `HttpResponse`. Connection pooling, retries, timeouts,
//! TLS, and status handling all belong to the implementation; the clients
//! forward whatever it returns.

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{HttpRequest, HttpResponse};

/// Blocking transport used by `Client`.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// Non-blocking transport used by `AsyncClient`.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        (**self).perform_request(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Error = T::Error;

    fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        (**self).perform_request(request)
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    type Error = T::Error;

    async fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        (**self).perform_request(request).await
    }
}
