//! Typed HTTP calls to the forecasting service

use crate::{ApiConfig, ClientError, FORECAST_PATH, SKUS_PATH, UPLOAD_PATH};
use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use iq_core::{ApiResponse, FileMeta, ForecastRequest, ForecastResult, SkuCatalog};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

/// Name and size of a browser file
pub fn file_meta(file: &File) -> FileMeta {
    FileMeta::new(file.name(), file.size().max(0.0) as u64)
}

/// Decode a response body into its payload or a typed error
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    let parsed: ApiResponse<T> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !(200..300).contains(&status) => {
            return Err(ClientError::Server {
                status,
                message: format!("Request failed with status {status}"),
            });
        }
        Err(e) => return Err(ClientError::Decode(e.to_string())),
    };

    match parsed {
        ApiResponse::Success(value) if (200..300).contains(&status) => Ok(value),
        ApiResponse::Success(_) => Err(ClientError::Server {
            status,
            message: format!("Request failed with status {status}"),
        }),
        ApiResponse::Failure(body) => Err(ClientError::Server {
            status,
            message: body.error,
        }),
    }
}

/// Client for the forecasting service
#[derive(Debug, Clone)]
pub struct ForecastClient {
    config: ApiConfig,
}

impl ForecastClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `POST /upload`; the file must already have passed `validate_upload`
    pub async fn upload(&self, file: &File) -> Result<SkuCatalog, ClientError> {
        let form = FormData::new().map_err(|e| ClientError::Network(format!("{e:?}")))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ClientError::Network(format!("{e:?}")))?;

        let request = Request::post(&self.config.endpoint(UPLOAD_PATH))
            .body(form)
            .map_err(|e| ClientError::Network(e.to_string()))?;

        self.execute(request).await
    }

    /// `POST /forecast`
    pub async fn forecast(&self, body: &ForecastRequest) -> Result<ForecastResult, ClientError> {
        let request = Request::post(&self.config.endpoint(FORECAST_PATH))
            .json(body)
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let result: ForecastResult = self.execute(request).await?;
        Ok(result.with_sku(&body.sku))
    }

    /// `GET /skus`
    pub async fn skus(&self) -> Result<SkuCatalog, ClientError> {
        let request = Request::get(&self.config.endpoint(SKUS_PATH))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        self.execute(request).await
    }

    /// Send with the configured timeout and decode the body
    async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, ClientError> {
        let url = request.url();
        tracing::debug!(%url, "sending request");

        let exchange = async move {
            let response = request
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            Ok::<_, ClientError>((status, body))
        };

        let timeout_ms = self.config.request_timeout_ms;
        let (status, body) = if timeout_ms == 0 {
            exchange.await?
        } else {
            match future::select(Box::pin(exchange), Box::pin(TimeoutFuture::new(timeout_ms))).await {
                Either::Left((outcome, _)) => outcome?,
                Either::Right(_) => {
                    tracing::warn!(%url, timeout_ms, "request timed out");
                    return Err(ClientError::Timeout(timeout_ms));
                }
            }
        };

        tracing::debug!(%url, status, bytes = body.len(), "response received");
        decode_body(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let catalog: SkuCatalog = decode_body(200, r#"{"skus": ["A"], "global_stats": null}"#).unwrap();
        assert_eq!(catalog.skus.len(), 1);
    }

    #[test]
    fn test_decode_error_body_with_ok_status() {
        let err = decode_body::<ForecastResult>(
            200,
            r#"{"error": "Insufficient data for forecasting (min 14 days required)"}"#,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ClientError::Server {
                status: 200,
                message: "Insufficient data for forecasting (min 14 days required)".into(),
            }
        );
    }

    #[test]
    fn test_decode_server_error() {
        let err = decode_body::<SkuCatalog>(500, r#"{"error": "no such table"}"#).unwrap_err();
        assert_eq!(err.to_string(), "no such table");
    }

    #[test]
    fn test_decode_non_json_failure() {
        let err = decode_body::<SkuCatalog>(404, "").unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 404, .. }));
    }

    #[test]
    fn test_decode_garbage_with_ok_status() {
        let err = decode_body::<SkuCatalog>(200, "<html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
