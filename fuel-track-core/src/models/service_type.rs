use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "Full Service")]
    FullService,
    #[serde(rename = "Self Service")]
    SelfService,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::FullService => write!(f, "Full Service"),
            ServiceType::SelfService => write!(f, "Self Service"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "full service" | "full-service" => Ok(ServiceType::FullService),
            "self" | "self service" | "self-service" => Ok(ServiceType::SelfService),
            _ => Err(format!(
                "Invalid service type '{}'. Valid options: full, self",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_display() {
        assert_eq!(format!("{}", ServiceType::FullService), "Full Service");
        assert_eq!(format!("{}", ServiceType::SelfService), "Self Service");
    }

    #[test]
    fn test_service_type_from_str() {
        assert_eq!(
            ServiceType::from_str("full").unwrap(),
            ServiceType::FullService
        );
        assert_eq!(
            ServiceType::from_str("Self Service").unwrap(),
            ServiceType::SelfService
        );
        assert_eq!(
            ServiceType::from_str("SELF-SERVICE").unwrap(),
            ServiceType::SelfService
        );
    }

    #[test]
    fn test_service_type_from_str_invalid() {
        assert!(ServiceType::from_str("valet").is_err());
        assert!(ServiceType::from_str("").is_err());
    }

    #[test]
    fn test_service_type_wire_names() {
        let json = serde_json::to_string(&ServiceType::SelfService).unwrap();
        assert_eq!(json, "\"Self Service\"");

        let parsed: ServiceType = serde_json::from_str("\"Full Service\"").unwrap();
        assert_eq!(parsed, ServiceType::FullService);
    }
}
