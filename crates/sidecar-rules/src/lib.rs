//! Routing Rule Model
//!
//! Declarative routing policy shapes carried inside tenant proxy
//! configuration payloads. These are pure data contracts: the sync client
//! ships configuration as opaque text, and downstream renderers decode it
//! against this schema. Nothing here validates or executes a rule.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An individual routing rule for a destination service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub destination: String,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_criteria: Option<Match>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

/// Source-service constraint of a match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Request constraints gating a rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

/// Weighted backend set a rule routes to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub backends: Vec<Backend>,
}

/// URI matching and rewriting for a backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Uri {
    pub path: String,
    pub prefix: String,
    pub prefix_rewrite: String,
}

/// A single routing target.
///
/// Weights across a route's backends are relative proportions; they are
/// not validated here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Backend {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Uri>,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub timeout: f64,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub retries: i32,
}

/// Fault-injection, delay, or logging directive attached to a rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: String,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub return_code: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_value: String,
}

/// Rules grouped by destination service, in evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesByService {
    pub services: HashMap<String, Vec<Rule>>,
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule_json() -> &'static str {
        r#"{
            "id": "rule-1",
            "priority": 10,
            "tags": ["canary"],
            "destination": "reviews",
            "match": {
                "source": { "name": "productpage", "tags": ["v1"] },
                "headers": { "Cookie": "user=tester" }
            },
            "route": {
                "backends": [
                    {
                        "name": "reviews",
                        "tags": ["v2"],
                        "uri": { "path": "/reviews", "prefix": "/api", "prefix_rewrite": "/" },
                        "weight": 0.25,
                        "timeout": 2.5,
                        "retries": 3
                    },
                    { "tags": ["v1"], "weight": 0.75 }
                ]
            },
            "actions": [
                { "action": "delay", "duration": 7.5, "probability": 0.1, "tags": ["v1"] },
                { "action": "abort", "probability": 0.05, "return_code": 503 },
                { "action": "trace", "log_key": "trace_id", "log_value": "abc" }
            ]
        }"#
    }

    #[test]
    fn test_rule_round_trip() {
        let rule: Rule = serde_json::from_str(sample_rule_json()).unwrap();
        assert_eq!(rule.id, "rule-1");
        assert_eq!(rule.priority, 10);

        let m = rule.match_criteria.as_ref().unwrap();
        assert_eq!(m.source.as_ref().unwrap().name, "productpage");
        assert_eq!(m.headers["Cookie"], "user=tester");

        let backends = &rule.route.as_ref().unwrap().backends;
        assert_eq!(backends.len(), 2);
        assert_eq!(backends[0].retries, 3);
        assert_eq!(backends[0].uri.as_ref().unwrap().prefix_rewrite, "/");
        assert_eq!(backends[1].weight, 0.75);

        assert_eq!(rule.actions[1].return_code, 503);
        assert_eq!(rule.actions[2].log_key, "trace_id");

        let encoded = serde_json::to_string(&rule).unwrap();
        let decoded: Rule = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, rule);
    }

    #[test]
    fn test_minimal_rule_omits_optional_fields() {
        let rule = Rule {
            id: "rule-2".to_string(),
            priority: 1,
            destination: "ratings".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&rule).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("id"));
        assert!(object.contains_key("destination"));
        assert!(!object.contains_key("match"));
        assert!(!object.contains_key("route"));
        assert!(!object.contains_key("tags"));
        assert!(!object.contains_key("actions"));
    }

    #[test]
    fn test_backend_omits_zero_numerics() {
        let backend = Backend {
            tags: vec!["v1".to_string()],
            ..Default::default()
        };

        let value = serde_json::to_value(&backend).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("tags"));
        assert!(!object.contains_key("name"));
        assert!(!object.contains_key("weight"));
        assert!(!object.contains_key("timeout"));
        assert!(!object.contains_key("retries"));
    }

    #[test]
    fn test_rules_by_service() {
        let doc = format!(
            r#"{{ "services": {{ "reviews": [{}], "ratings": [] }} }}"#,
            sample_rule_json()
        );

        let rules: RulesByService = serde_json::from_str(&doc).unwrap();
        assert_eq!(rules.services.len(), 2);
        assert_eq!(rules.services["reviews"][0].destination, "reviews");
        assert!(rules.services["ratings"].is_empty());

        let encoded = serde_json::to_string(&rules).unwrap();
        let decoded: RulesByService = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, rules);
    }
}
