use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::connection::ApiConnection;
use super::error::GatewayError;
use super::protocol::ApiResponse;
use super::RecordGateway;
use crate::models::FuelRecord;

/// Gateway backed by the REST API over HTTP.
///
/// No request timeout is set; a hung connection holds up only the call that
/// is waiting on it.
#[derive(Debug, Clone)]
pub struct HttpRecordGateway {
    connection: Arc<ApiConnection>,
}

impl HttpRecordGateway {
    pub fn new(connection: Arc<ApiConnection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<ApiConnection> {
        &self.connection
    }

    fn record_url(&self, id: &str) -> String {
        self.connection.url(&format!("/records/{}", id))
    }
}

#[async_trait]
impl RecordGateway for HttpRecordGateway {
    async fn list_all(&self) -> Result<Vec<FuelRecord>, GatewayError> {
        let response = self
            .connection
            .client()
            .get(self.connection.url("/records"))
            .send()
            .await?;

        expect_data(response, None).await
    }

    async fn create(&self, record: &FuelRecord) -> Result<FuelRecord, GatewayError> {
        let response = self
            .connection
            .client()
            .post(self.connection.url("/records"))
            .json(record)
            .send()
            .await?;

        expect_data(response, None).await
    }

    async fn update(&self, id: &str, record: &FuelRecord) -> Result<FuelRecord, GatewayError> {
        let response = self
            .connection
            .client()
            .put(self.record_url(id))
            .json(record)
            .send()
            .await?;

        expect_data(response, Some(id)).await
    }

    async fn remove(&self, id: &str) -> Result<(), GatewayError> {
        let response = self
            .connection
            .client()
            .delete(self.record_url(id))
            .send()
            .await?;

        let envelope: ApiResponse<serde_json::Value> = read_envelope(response, Some(id)).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(backend_error(envelope.error))
        }
    }
}

/// Reads the envelope and insists on a `data` payload.
async fn expect_data<T: DeserializeOwned>(
    response: Response,
    id: Option<&str>,
) -> Result<T, GatewayError> {
    let envelope: ApiResponse<T> = read_envelope(response, id).await?;

    if !envelope.success {
        return Err(backend_error(envelope.error));
    }

    envelope
        .data
        .ok_or_else(|| GatewayError::MalformedResponse("response has no data".to_string()))
}

/// Maps the HTTP status and decodes the body.
async fn read_envelope<T: DeserializeOwned>(
    response: Response,
    id: Option<&str>,
) -> Result<ApiResponse<T>, GatewayError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| status.to_string());

        return Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => GatewayError::NotFound(id.to_string()),
            _ => GatewayError::Status {
                status: status.as_u16(),
                message,
            },
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

fn backend_error(error: Option<String>) -> GatewayError {
    GatewayError::Backend(error.unwrap_or_else(|| "request was not successful".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_url() {
        let gateway = HttpRecordGateway::new(Arc::new(ApiConnection::new("localhost:8080")));
        assert_eq!(
            gateway.record_url("1735171200000"),
            "http://localhost:8080/records/1735171200000"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Grab a free port, then close it so nothing is listening there.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpRecordGateway::new(Arc::new(ApiConnection::new(format!(
            "http://{}",
            addr
        ))));

        let err = gateway.list_all().await.unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)), "{:?}", err);

        let err = gateway.remove("1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)), "{:?}", err);
    }
}
