use std::fmt;

use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::validation::{Fields, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Block,
    ActionLog,
}

impl RecordKind {
    /// Collection a record of this kind is persisted in.
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::ActionLog => "actionlog",
        }
    }
}

/// A record that is written to the document store.
pub trait Persisted {
    const KIND: RecordKind;
}

/// A record kind that can be validated from a raw JSON payload.
pub trait Record: Sized {
    fn read(fields: &mut Fields<'_>) -> Self;

    fn validate(payload: &JsonValue) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(payload);
        let record = Self::read(&mut fields);
        fields.finish(record)
    }
}

fn default_block_source() -> String {
    "manual".to_owned()
}

fn default_actor() -> String {
    "system".to_owned()
}

/// An IP address blocked from the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub ip: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default = "default_block_source")]
    pub source: String,
}

impl Persisted for Block {
    const KIND: RecordKind = RecordKind::Block;
}

impl Record for Block {
    fn read(fields: &mut Fields<'_>) -> Self {
        Self {
            ip: fields.required_non_empty_string("ip"),
            reason: fields.optional_string("reason"),
            source: fields
                .optional_string("source")
                .unwrap_or_else(default_block_source),
        }
    }
}

/// An IDS alert. Alerts are only ever exported, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
    pub time: String,
    pub src: String,
    pub dest: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
}

impl Alert {
    pub const COLUMNS: [&'static str; 6] = ["alert_id", "time", "src", "dest", "type", "severity"];

    /// Field values in [`Alert::COLUMNS`] order.
    pub fn values(&self) -> [&str; 6] {
        [
            self.alert_id.as_str(),
            self.time.as_str(),
            self.src.as_str(),
            self.dest.as_str(),
            self.kind.as_str(),
            self.severity.as_str(),
        ]
    }
}

impl Record for Alert {
    fn read(fields: &mut Fields<'_>) -> Self {
        Self {
            alert_id: fields.required_string("alert_id"),
            time: fields.required_string("time"),
            src: fields.required_string("src"),
            dest: fields.required_string("dest"),
            kind: fields.required_string("type"),
            severity: fields.required_string("severity"),
        }
    }
}

/// Audit trail entry written after every mutating request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    pub action: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default = "default_actor")]
    pub actor: String,
}

impl ActionLog {
    pub const BLOCK_IP: &'static str = "block_ip";
    pub const EXPORT_CSV: &'static str = "export_csv";
    pub const ANALYZE: &'static str = "analyze";

    pub fn new(action: &str, details: String) -> Self {
        Self {
            action: action.to_owned(),
            details: Some(details),
            actor: default_actor(),
        }
    }

    pub fn blocked(block: &Block) -> Self {
        let reason = block.reason.as_deref().unwrap_or("no reason given");
        Self::new(Self::BLOCK_IP, format!("Blocked {} ({reason})", block.ip))
    }

    pub fn exported(count: usize) -> Self {
        Self::new(Self::EXPORT_CSV, format!("Exported {count} alerts"))
    }

    pub fn analyzed(risk: RiskLevel) -> Self {
        Self::new(Self::ANALYZE, format!("Risk {risk}"))
    }
}

impl Persisted for ActionLog {
    const KIND: RecordKind = RecordKind::ActionLog;
}

impl Record for ActionLog {
    fn read(fields: &mut Fields<'_>) -> Self {
        Self {
            action: fields.required_string("action"),
            details: fields.optional_string("details"),
            actor: fields.optional_string("actor").unwrap_or_else(default_actor),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl Record for AnalyzeRequest {
    fn read(fields: &mut Fields<'_>) -> Self {
        Self {
            text: fields.required_string("text"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Enum)]
#[oai(rename_all = "PascalCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Object)]
pub struct AnalyzeResponse {
    pub risk: RiskLevel,
    pub summary: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::{validate_list, ViolationKind};

    #[test]
    fn block_defaults_source_and_ignores_extras() {
        let block = Block::validate(&json!({ "ip": "10.0.0.5", "unexpected": true })).unwrap();
        assert_eq!(
            block,
            Block {
                ip: "10.0.0.5".into(),
                reason: None,
                source: "manual".into(),
            }
        );
    }

    #[test]
    fn block_rejects_empty_ip() {
        let err = Block::validate(&json!({ "ip": "" })).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "ip");
        assert_eq!(err.violations[0].kind, ViolationKind::OutOfRange);
    }

    #[test]
    fn block_reports_all_bad_fields() {
        let err = Block::validate(&json!({ "reason": 5, "source": false })).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["ip", "reason", "source"]);
    }

    #[test]
    fn alert_list_reports_indexed_fields() {
        let payload = json!([
            {
                "alert_id": "a1", "time": "t", "src": "s", "dest": "d",
                "type": "scan", "severity": "High"
            },
            { "alert_id": "a2", "time": "t", "src": "s", "dest": "d", "type": "scan" },
            "garbage",
        ]);
        let err = validate_list::<Alert>(&payload).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["[1].severity", "[2]"]);
    }

    #[test]
    fn alert_list_requires_array() {
        let err = validate_list::<Alert>(&json!({ "alert_id": "a1" })).unwrap_err();
        assert_eq!(err.violations[0].field, "body");
        assert_eq!(err.violations[0].kind, ViolationKind::WrongType);
    }

    #[test]
    fn alert_type_field_is_renamed() {
        let alert = Alert::validate(&json!({
            "alert_id": "a1", "time": "t", "src": "s", "dest": "d",
            "type": "xss", "severity": "Low"
        }))
        .unwrap();
        assert_eq!(alert.kind, "xss");
        assert_eq!(serde_json::to_value(&alert).unwrap()["type"], "xss");
    }

    #[test]
    fn analyze_request_requires_text() {
        assert!(AnalyzeRequest::validate(&json!({ "text": "" })).is_ok());
        let err = AnalyzeRequest::validate(&json!({ "text": null })).unwrap_err();
        assert_eq!(err.violations[0].kind, ViolationKind::Missing);
    }

    #[test]
    fn action_log_details() {
        let block = Block {
            ip: "1.2.3.4".into(),
            reason: Some("ssh brute force".into()),
            source: "manual".into(),
        };
        let entry = ActionLog::blocked(&block);
        assert_eq!(entry.action, "block_ip");
        assert_eq!(entry.actor, "system");
        assert_eq!(entry.details.as_deref(), Some("Blocked 1.2.3.4 (ssh brute force)"));

        assert_eq!(
            ActionLog::exported(3).details.as_deref(),
            Some("Exported 3 alerts")
        );
        assert_eq!(
            ActionLog::analyzed(RiskLevel::Medium).details.as_deref(),
            Some("Risk Medium")
        );
    }

    #[test]
    fn block_without_reason_is_logged_explicitly() {
        let block = Block::validate(&json!({ "ip": "198.51.100.4", "reason": null })).unwrap();
        assert_eq!(
            ActionLog::blocked(&block).details.as_deref(),
            Some("Blocked 198.51.100.4 (no reason given)")
        );
    }

    #[test]
    fn persisted_collections() {
        assert_eq!(Block::KIND.collection(), "block");
        assert_eq!(ActionLog::KIND.collection(), "actionlog");
    }

    #[test]
    fn risk_level_serializes_as_pascal_case() {
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), json!("High"));
    }
}
