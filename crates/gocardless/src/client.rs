//! HTTP plumbing shared by every resource operation.

use std::time::Duration;

use common_utils::errors::CustomResult;
use error_stack::{report, Report, ResultExt};
use masking::{Mask, Maskable, PeekInterface};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{consts, errors::ApiError, settings::Settings};

/// Client for the provider's REST API.
///
/// All operations are independent request/response calls; the only per-call
/// state is the freshly generated idempotency key attached to each create.
#[derive(Clone, Debug)]
pub struct Gocardless {
    pub(crate) settings: Settings,
    http_client: reqwest::Client,
}

impl Gocardless {
    /// Build a client from settings, applying the bounded per-call timeout.
    pub fn new(settings: Settings) -> CustomResult<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .build()
            .change_context(ApiError::ClientConstructionFailed)?;
        Ok(Self {
            settings,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Headers common to every call; the authorization value stays masked
    /// until the request is actually built.
    fn build_headers(&self) -> Vec<(String, Maskable<String>)> {
        vec![
            (
                consts::GOCARDLESS_VERSION_HEADER.to_string(),
                consts::GOCARDLESS_VERSION.to_string().into(),
            ),
            (
                reqwest::header::AUTHORIZATION.to_string(),
                format!("Bearer {}", self.settings.access_token.peek()).into_masked(),
            ),
        ]
    }

    fn apply_headers(
        mut request: reqwest::RequestBuilder,
        headers: Vec<(String, Maskable<String>)>,
    ) -> reqwest::RequestBuilder {
        tracing::debug!(?headers, "outgoing provider request headers");
        for (name, value) in headers {
            request = request.header(name, value.into_inner());
        }
        request
    }

    /// Issue a create call with a fresh idempotency key.
    pub(crate) async fn post<Req, Res>(&self, path: &str, body: &Req) -> CustomResult<Res, ApiError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let idempotency_key = common_utils::generate_idempotency_key();
        let request = Self::apply_headers(self.http_client.post(self.url(path)), self.build_headers())
            .header(consts::IDEMPOTENCY_KEY_HEADER, &idempotency_key)
            .json(body);
        let response = request.send().await.map_err(transport_error)?;
        Self::handle_response(response).await
    }

    pub(crate) async fn get<Res>(&self, path: &str) -> CustomResult<Res, ApiError>
    where
        Res: DeserializeOwned,
    {
        let request =
            Self::apply_headers(self.http_client.get(self.url(path)), self.build_headers());
        let response = request.send().await.map_err(transport_error)?;
        Self::handle_response(response).await
    }

    async fn handle_response<Res>(response: reqwest::Response) -> CustomResult<Res, ApiError>
    where
        Res: DeserializeOwned,
    {
        let status_code = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if status_code.is_success() {
            serde_json::from_slice(&body)
                .change_context(ApiError::ResponseDeserializationFailed)
                .attach_printable_lazy(|| String::from_utf8_lossy(&body).into_owned())
        } else {
            Err(build_error_response(status_code, &body))
        }
    }
}

fn transport_error(error: reqwest::Error) -> Report<ApiError> {
    let kind = if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport
    };
    report!(error).change_context(kind)
}

/// Translate a non-success provider response into the error taxonomy,
/// preserving the provider message for diagnostics.
fn build_error_response(status_code: reqwest::StatusCode, body: &[u8]) -> Report<ApiError> {
    if status_code == reqwest::StatusCode::NOT_FOUND {
        return report!(ApiError::NotFound)
            .attach_printable(String::from_utf8_lossy(body).into_owned());
    }
    if !status_code.is_client_error() {
        return report!(ApiError::Transport).attach_printable(format!(
            "provider returned {}: {}",
            status_code,
            String::from_utf8_lossy(body)
        ));
    }

    let reason = match serde_json::from_slice::<GocardlessErrorResponse>(body) {
        Ok(response) => {
            tracing::info!(provider_error = ?response, "provider rejected the request");
            let mut error_reason: Vec<String> = Vec::new();
            for error in &response.error.errors {
                let reason = error
                    .field
                    .clone()
                    .map_or(error.message.clone(), |field| {
                        format!("{} {}", field, error.message)
                    });
                error_reason.push(reason);
            }
            if error_reason.is_empty() {
                response.error.message
            } else {
                error_reason.join("; ")
            }
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };

    report!(ApiError::Rejected {
        status_code: status_code.as_u16(),
        reason,
    })
}

/// Error envelope returned by the provider on rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GocardlessErrorResponse {
    pub error: GocardlessErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GocardlessErrorBody {
    pub code: i64,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GocardlessFieldError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GocardlessFieldError {
    pub message: String,
    #[serde(default)]
    pub field: Option<String>,
}
