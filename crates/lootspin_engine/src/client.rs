use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use lootspin_core::{CredentialTriple, ProxyDescriptor, SpinSettings};
use lootspin_logging::engine_debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::{TransportError, TransportFailure};

pub const DEFAULT_ENDPOINT: &str =
    "https://1vpveb4uje.execute-api.us-east-2.amazonaws.com/loot/open/solana/monad-box1";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub network: String,
    pub slug: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            network: "solana".to_string(),
            slug: "monad-box1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The per-session part of a spin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinRequest {
    pub wallet: String,
    pub token: String,
    pub quantity: u32,
    pub price: u32,
}

impl SpinRequest {
    pub fn new(credentials: &CredentialTriple, settings: &SpinSettings) -> Self {
        Self {
            wallet: credentials.wallet.clone(),
            token: credentials.token.clone(),
            quantity: settings.quantity,
            price: settings.price,
        }
    }
}

/// One round trip to the loot-box endpoint.
///
/// `Ok` carries the decoded body of a 2xx response; a body that is not JSON
/// is returned as a JSON string.
#[async_trait::async_trait]
pub trait SpinTransport: Send + Sync {
    async fn open_box(&self, request: &SpinRequest) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSpinClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestSpinClient {
    /// Builds a client routed through `proxy`. Without a proxy, environment
    /// proxy settings are ignored too.
    pub fn new(
        settings: ClientSettings,
        proxy: Option<&ProxyDescriptor>,
    ) -> Result<Self, TransportError> {
        reqwest::Url::parse(&settings.endpoint).map_err(|err| {
            TransportError::new(TransportFailure::InvalidEndpoint, err.to_string())
        })?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout);
        builder = match proxy {
            Some(proxy) => {
                let proxy = reqwest::Proxy::all(proxy.url())
                    .map_err(|err| {
                        TransportError::new(TransportFailure::InvalidProxy, err.to_string())
                    })?
                    .basic_auth(&proxy.username, &proxy.password);
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };
        let client = builder
            .build()
            .map_err(|err| TransportError::new(TransportFailure::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }

    fn payload(&self, request: &SpinRequest) -> Value {
        json!({
            "network": self.settings.network,
            "slug": self.settings.slug,
            "access_token": request.token,
            "wallet": request.wallet,
            "qnt": request.quantity,
            "price": request.price,
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<BytesMut, TransportError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl SpinTransport for ReqwestSpinClient {
    async fn open_box(&self, request: &SpinRequest) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&request.token)
            .body(self.payload(request).to_string())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        engine_debug!("spin response for {}: {}", request.wallet, status);
        let body = self.read_body(response).await?;
        let decoded = serde_json::from_slice::<Value>(&body).ok();

        if !status.is_success() {
            return Err(TransportError::new(
                TransportFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            )
            .with_payload(decoded));
        }

        Ok(decoded.unwrap_or_else(|| Value::String(String::from_utf8_lossy(&body).into_owned())))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> TransportError {
    TransportError::new(
        TransportFailure::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailure::Timeout, err.to_string());
    }
    if err.is_connect() {
        return TransportError::new(TransportFailure::Connect, err.to_string());
    }
    TransportError::new(TransportFailure::Network, err.to_string())
}
