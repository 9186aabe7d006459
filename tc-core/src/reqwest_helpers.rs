use anyhow::{Context, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use http::Extensions;
use log::{debug, error};
use reqwest::{Client, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

/// No retry middleware: every request goes out exactly once.
pub fn create_client(requests_per_second: NonZeroU32) -> Result<ClientWithMiddleware> {
    let reqwest_client = Client::builder()
        .user_agent(concat!("trade-companion/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build http client")?;

    let limiter = RateLimiter::direct(Quota::per_second(requests_per_second));
    let rate_limiting_middleware = RateLimitingMiddleware { limiter: Arc::new(limiter) };

    Ok(ClientBuilder::new(reqwest_client)
        .with(ErrorLoggingMiddleware)
        .with(rate_limiting_middleware)
        .build())
}

struct RateLimitingMiddleware {
    limiter: Arc<DefaultDirectRateLimiter>,
}

#[async_trait::async_trait]
impl Middleware for RateLimitingMiddleware {
    async fn handle(&self, req: Request, extensions: &mut Extensions, next: Next<'_>) -> reqwest_middleware::Result<Response> {
        self.limiter.until_ready().await;
        next.run(req, extensions).await
    }
}

pub struct ErrorLoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for ErrorLoggingMiddleware {
    async fn handle(&self, req: Request, extensions: &mut Extensions, next: Next<'_>) -> reqwest_middleware::Result<Response> {
        let start = Instant::now();
        let method = req.method().clone();
        let url = req.url().clone();

        let result = next.run(req, extensions).await;

        let duration = start.elapsed();

        match &result {
            Ok(resp) if !resp.status().is_success() => {
                error!("Request failed: {} {} - Status: {}, Duration: {:?}", method, url, resp.status(), duration);
            }
            Err(e) => {
                error!("Request error: {} {} - Error: {}, Duration: {:?}", method, url, e, duration);
            }
            _ => {
                debug!("Request succeeded: {} {} - Duration: {:?}", method, url, duration);
            }
        }

        result
    }
}
