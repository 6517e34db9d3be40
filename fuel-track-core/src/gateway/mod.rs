//! Remote record gateway.
//!
//! Translates record CRUD intents into calls against the backend's REST API:
//!
//! | Method | Path            |
//! |--------|-----------------|
//! | GET    | `/records`      |
//! | POST   | `/records`      |
//! | PUT    | `/records/{id}` |
//! | DELETE | `/records/{id}` |
//!
//! Every response carries a `success` flag; failures carry an `error` string.

mod connection;
mod error;
mod http;
mod protocol;

use async_trait::async_trait;

use crate::models::FuelRecord;

pub use connection::ApiConnection;
pub use error::GatewayError;
pub use http::HttpRecordGateway;
pub use protocol::ApiResponse;

/// Backend operations the repository relies on.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn list_all(&self) -> Result<Vec<FuelRecord>, GatewayError>;

    async fn create(&self, record: &FuelRecord) -> Result<FuelRecord, GatewayError>;

    async fn update(&self, id: &str, record: &FuelRecord) -> Result<FuelRecord, GatewayError>;

    async fn remove(&self, id: &str) -> Result<(), GatewayError>;
}
