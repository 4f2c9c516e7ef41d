//! Portal API client over plain HTTP/1.1.
//!
//! Every request opens its own connection and is bounded by the client's
//! timeout. Only `http://` base URLs are supported.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST, USER_AGENT};
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use hostgen_alloc::{BackendResult, HostnameBackend, HostnameRegistry};
use hostgen_api::wire::*;
use hostgen_core::AllocationRequest;
use hostgen_state::{HostnameRecord, NewHostname};

use crate::error::{ClientError, ClientResult};

/// Characters escaped when a value is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a `hostgend` instance.
#[derive(Debug, Clone)]
pub struct PortalClient {
    /// `host:port` to connect to.
    authority: String,
    /// Path prefix of the API, e.g. `/api`, without a trailing slash.
    base_path: String,
    timeout: Duration,
}

impl PortalClient {
    /// Create a client for a base URL such as `http://localhost:3001/api`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let uri: http::Uri = base_url
            .parse()
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if uri.scheme_str() != Some("http") {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url}: only http:// is supported"
            )));
        }
        let authority = uri
            .authority()
            .ok_or_else(|| ClientError::InvalidUrl(format!("{base_url}: missing host")))?;
        let authority = match authority.port_u16() {
            Some(_) => authority.to_string(),
            None => format!("{}:80", authority.host()),
        };
        Ok(Self {
            authority,
            base_path: uri.path().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // ── Endpoints ──────────────────────────────────────────────────

    /// GET /test. A reachable server with a broken store still answers.
    pub async fn test_connection(&self) -> ClientResult<ConnectionStatus> {
        let (_, body) = self.send(Method::GET, "/test", None).await?;
        decode(&body)
    }

    pub async fn hostname_exists(&self, hostname: &str) -> ClientResult<bool> {
        let segment = encode_segment(hostname);
        let resp: ExistsResponse = self.get(&format!("/hostname/exists/{segment}")).await?;
        Ok(resp.exists)
    }

    pub async fn count(&self) -> ClientResult<u64> {
        let resp: CountResponse = self.get("/hostname/count").await?;
        Ok(resp.total)
    }

    pub async fn list_hostnames(&self, limit: Option<usize>) -> ClientResult<Vec<HostnameRecord>> {
        let path = match limit {
            Some(n) => format!("/hostname/all?limit={n}"),
            None => "/hostname/all".to_string(),
        };
        let resp: HostnamesResponse = self.get(&path).await?;
        Ok(resp.hostnames)
    }

    pub async fn save_hostname(&self, new: &NewHostname) -> ClientResult<HostnameRecord> {
        let resp: RecordResponse = self.post("/hostname/save", new).await?;
        Ok(resp.hostname)
    }

    /// Allocate on the server without storing anything.
    pub async fn generate(&self, request: &AllocationRequest) -> ClientResult<String> {
        let resp: GeneratedResponse = self.post("/hostname/generate", request).await?;
        Ok(resp.hostname)
    }

    /// Allocate and store on the server in one step.
    pub async fn register(
        &self,
        request: &AllocationRequest,
        details: NewHostname,
    ) -> ClientResult<HostnameRecord> {
        let body = RegisterRequest {
            request: request.clone(),
            details,
        };
        let resp: RecordResponse = self.post("/hostname/register", &body).await?;
        Ok(resp.hostname)
    }

    // ── Transport ──────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let (status, body) = self.send(Method::GET, path, None).await?;
        expect_success(status, &body)?;
        decode(&body)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let payload = serde_json::to_vec(body).map_err(|e| ClientError::Http(e.to_string()))?;
        let (status, body) = self.send(Method::POST, path, Some(payload)).await?;
        expect_success(status, &body)?;
        decode(&body)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<(StatusCode, Bytes)> {
        let target = format!("{}{path}", self.base_path);
        debug!(%method, authority = %self.authority, %target, "portal request");

        let exchange = async {
            let stream = tokio::net::TcpStream::connect(&self.authority)
                .await
                .map_err(|e| ClientError::Connect(format!("{}: {e}", self.authority)))?;

            let io = hyper_util::rt::TokioIo::new(stream);
            let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
                .await
                .map_err(|e| ClientError::Http(e.to_string()))?;

            // Drive the connection in the background.
            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    debug!(error = %e, "portal connection closed with error");
                }
            });

            let req = http::Request::builder()
                .method(method)
                .uri(&target)
                .header(HOST, &self.authority)
                .header(USER_AGENT, "hostgen-client/0.1")
                .header(CONTENT_TYPE, "application/json")
                .body(Full::new(Bytes::from(body.unwrap_or_default())))
                .map_err(|e| ClientError::Http(e.to_string()))?;

            let resp = sender
                .send_request(req)
                .await
                .map_err(|e| ClientError::Http(e.to_string()))?;
            let status = resp.status();
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| ClientError::Http(e.to_string()))?
                .to_bytes();
            Ok::<_, ClientError>((status, bytes))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }
}

fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn expect_success(status: StatusCode, body: &[u8]) -> ClientResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl HostnameBackend for PortalClient {
    async fn list_hostnames(&self) -> BackendResult<Vec<HostnameRecord>> {
        Ok(PortalClient::list_hostnames(self, None).await?)
    }

    async fn hostname_exists(&self, candidate: &str) -> BackendResult<bool> {
        Ok(PortalClient::hostname_exists(self, candidate).await?)
    }
}

#[async_trait]
impl HostnameRegistry for PortalClient {
    async fn insert_if_absent(&self, record: NewHostname) -> BackendResult<Option<HostnameRecord>> {
        match self.save_hostname(&record).await {
            Ok(saved) => Ok(Some(saved)),
            Err(ClientError::Status { status: 409, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
