//! Tenant Credential Model
//!
//! Secret bundles exchanged with the control service. The sidecar treats
//! them as opaque: transported byte-for-byte through JSON, never
//! validated, never persisted here.

use serde::{Deserialize, Serialize};

/// Message-broker access for one tenant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kafka {
    pub api_key: String,
    pub admin_url: String,
    pub rest_url: String,
    pub brokers: Vec<String>,
    pub user: String,
    pub password: String,
    pub sasl: bool,
}

/// Artifact-registry access for one tenant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub url: String,
    pub token: String,
}

/// The credential bundle the control service holds for a tenant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantCredentials {
    pub kafka: Kafka,
    pub registry: Registry,
}

/// Outbound registration payload: tenant identity, its credentials, and
/// the local proxy listen port. Built fresh on every registration call.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct TenantRegistration {
    pub id: String,
    pub credentials: TenantCredentials,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_credentials() -> TenantCredentials {
        TenantCredentials {
            kafka: Kafka {
                api_key: "kafka-key".to_string(),
                admin_url: "https://kafka-admin.local".to_string(),
                rest_url: "https://kafka-rest.local".to_string(),
                brokers: vec![
                    "broker-0.local:9093".to_string(),
                    "broker-1.local:9093".to_string(),
                ],
                user: "svc-acme".to_string(),
                password: "hunter2".to_string(),
                sasl: true,
            },
            registry: Registry {
                url: "https://registry.local".to_string(),
                token: "reg-token".to_string(),
            },
        }
    }

    #[test]
    fn test_credentials_round_trip() {
        let creds = sample_credentials();
        let json = serde_json::to_string(&creds).unwrap();
        let decoded: TenantCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, creds);
    }

    #[test]
    fn test_credentials_wire_fields() {
        let value = serde_json::to_value(sample_credentials()).unwrap();
        assert_eq!(value["kafka"]["api_key"], "kafka-key");
        assert_eq!(value["kafka"]["user"], "svc-acme");
        assert_eq!(value["kafka"]["sasl"], true);
        assert_eq!(value["kafka"]["brokers"][1], "broker-1.local:9093");
        assert_eq!(value["registry"]["token"], "reg-token");
    }

    #[test]
    fn test_registration_wire_shape() {
        let reg = TenantRegistration {
            id: "acme".to_string(),
            credentials: sample_credentials(),
            port: 8181,
        };
        let value = serde_json::to_value(&reg).unwrap();
        assert_eq!(value["id"], "acme");
        assert_eq!(value["port"], 8181);
        assert_eq!(value["credentials"]["kafka"]["user"], "svc-acme");
    }
}
