use async_trait::async_trait;
use bytes::Bytes;
use mydns_application::ports::{DohTransport, UpstreamReply};
use mydns_domain::{DomainError, Endpoint, ErrorCategory};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::debug;

/// Content type for DNS-over-HTTPS messages (RFC 8484 §6)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// DNS-over-HTTPS transport (RFC 8484) over one pooled HTTP/2 client.
pub struct HttpsTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, timeout }
    }

    fn transport_error(endpoint: &Endpoint, is_network: bool, message: String) -> DomainError {
        DomainError::UpstreamTransport {
            provider: endpoint.hostname.to_string(),
            category: ErrorCategory::classify(is_network, &message),
            message,
        }
    }

    fn from_reqwest(endpoint: &Endpoint, err: reqwest::Error) -> DomainError {
        // The URL path would read as a DNS failure during classification
        let err = err.without_url();
        let message = error_chain(&err);
        if err.is_timeout() {
            return DomainError::UpstreamTransport {
                provider: endpoint.hostname.to_string(),
                category: ErrorCategory::Timeout,
                message,
            };
        }
        Self::transport_error(endpoint, err.is_connect(), message)
    }
}

#[async_trait]
impl DohTransport for HttpsTransport {
    async fn exchange(
        &self,
        endpoint: &Endpoint,
        query: Bytes,
    ) -> Result<UpstreamReply, DomainError> {
        debug!(
            url = %endpoint.url,
            message_len = query.len(),
            "Sending DoH query"
        );

        // POST with application/dns-message (RFC 8484 §4.1)
        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(&*endpoint.url)
                .header(reqwest::header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
                .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .body(query)
                .send(),
        )
        .await
        .map_err(|_| Self::transport_error(endpoint, false, "request timed out".to_string()))?
        .map_err(|e| Self::from_reqwest(endpoint, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            debug!(url = %endpoint.url, status, "DoH upstream rejected query");
            return Ok(UpstreamReply {
                status,
                body: Bytes::new(),
            });
        }

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| {
                Self::transport_error(endpoint, false, "response body timed out".to_string())
            })?
            .map_err(|e| Self::from_reqwest(endpoint, e))?;

        debug!(
            url = %endpoint.url,
            response_len = body.len(),
            "DoH response received"
        );

        Ok(UpstreamReply { status, body })
    }
}

/// `error: cause: cause` so classification sees nested resolver errors.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
