use serde::{Deserialize, Serialize};

/// Response envelope shared by every records endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FuelRecord, ServiceType};

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::error("Missing required fields")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Missing required fields"})
        );
    }

    #[test]
    fn test_parse_without_data() {
        let parsed: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "message": "Record deleted"}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.data.is_none());
        assert_eq!(parsed.message.as_deref(), Some("Record deleted"));
    }

    #[test]
    fn test_parse_record_list() {
        let body = r#"{
            "success": true,
            "data": [{
                "id": "1735171200000",
                "date": "2025-12-26T00:00:00.000Z",
                "gasStationName": "Puma",
                "serviceType": "Self Service",
                "pricePerGallon": 32.5,
                "gallons": 10,
                "totalAmount": 325,
                "odometerReading": 15000,
                "kmSinceLastVisit": 0
            }]
        }"#;

        let parsed: ApiResponse<Vec<FuelRecord>> = serde_json::from_str(body).unwrap();
        let records = parsed.data.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].service_type, ServiceType::SelfService);
        assert_eq!(records[0].odometer_reading, 15000.0);
    }

    #[test]
    fn test_parse_error_without_data() {
        let parsed: ApiResponse<FuelRecord> =
            serde_json::from_str(r#"{"success": false, "error": "Record not found"}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
    }
}
