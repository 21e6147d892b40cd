use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE, HOST};
use reqwest::{Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::signer::RequestSigner;
use crate::ports::{ApiError, AuthError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const NEXT_PAGE_HEADER: &str = "opc-next-page";

/// Base URLs of the services the tool talks to
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub compute: Url,
    pub monitoring: Url,
    pub notification: Url,
}

impl ServiceEndpoints {
    pub fn for_region(region: &str) -> Result<Self, AuthError> {
        let service = |name: &str| {
            Url::parse(&format!("https://{name}.{region}.oraclecloud.com"))
                .map_err(|e| AuthError::Client(format!("invalid region '{region}': {e}")))
        };

        Ok(Self {
            compute: service("iaas")?,
            monitoring: service("telemetry")?,
            notification: service("notification")?,
        })
    }

    /// Route every service to one base URL
    #[cfg(test)]
    pub fn uniform(base: &str) -> Self {
        let url = Url::parse(base).expect("valid base url");
        Self {
            compute: url.clone(),
            monitoring: url.clone(),
            notification: url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Signed JSON client shared by the compute, monitoring and notification adapters
pub struct OciClient {
    http: reqwest::Client,
    signer: RequestSigner,
    endpoints: ServiceEndpoints,
}

impl OciClient {
    pub fn new(signer: RequestSigner, endpoints: ServiceEndpoints) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("oci-vm-alarms/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;

        Ok(Self {
            http,
            signer,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.send(Method::GET, &url, None).await?;
        decode(response).await
    }

    /// GET a list resource, following `opc-next-page` until exhausted
    pub async fn list_json<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut page_url = url.clone();
            if let Some(token) = &page {
                page_url.query_pairs_mut().append_pair("page", token);
            }

            let response = self.send(Method::GET, &page_url, None).await?;
            let next = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let batch: Vec<T> = decode(response).await?;
            items.extend(batch);

            match next {
                Some(token) if !token.is_empty() => page = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.send(Method::POST, &url, Some(body)).await?;
        decode(response).await
    }

    async fn send(&self, method: Method, url: &Url, body: Option<Vec<u8>>) -> Result<Response, ApiError> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let host = host_header(url)?;

        let mut signed = vec![
            ("date", date.clone()),
            ("(request-target)", request_target(&method, url)),
            ("host", host.clone()),
        ];

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(DATE, date)
            .header(HOST, host)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            let digest = STANDARD.encode(Sha256::digest(&body));
            signed.push(("content-length", body.len().to_string()));
            signed.push(("content-type", "application/json".to_string()));
            signed.push(("x-content-sha256", digest.clone()));

            request = request
                .header(CONTENT_LENGTH, body.len())
                .header(CONTENT_TYPE, "application/json")
                .header("x-content-sha256", digest)
                .body(body);
        }

        let request = request.header(AUTHORIZATION, self.signer.authorization(&signed));

        debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Append path segments to a service base URL
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::Transport(format!("cannot use {base} as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn host_header(url: &Url) -> Result<String, ApiError> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::Transport(format!("URL has no host: {url}")))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

fn request_target(method: &Method, url: &Url) -> String {
    let method = method.as_str().to_lowercase();
    match url.query() {
        Some(query) => format!("{method} {}?{query}", url.path()),
        None => format!("{method} {}", url.path()),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: Option<ServiceErrorBody> = serde_json::from_str(&text).ok();

    let code = body
        .as_ref()
        .and_then(|b| b.code.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
    let message = body
        .and_then(|b| b.message)
        .unwrap_or(text);

    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound { message }
    } else {
        ApiError::Service {
            status: status.as_u16(),
            code,
            message,
        }
    }
}
