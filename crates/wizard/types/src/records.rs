//! Records collected and carried by the wizard: the account on file, the
//! legal representatives, and the task payload that admits the user into
//! the flow.
//!
//! Field names serialize in the wire spellings the session cache uses
//! (`accountInfo`-style camelCase), so stored JSON matches the documented
//! key contract.

use serde::{Deserialize, Serialize};

// ── Session Identifier ───────────────────────────────────────────────

/// Unique identifier for one wizard session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── User Level ───────────────────────────────────────────────────────

/// Privilege level of the signed-in representative. Standard users build
/// the representative list themselves; elevated users arrive with one
/// pre-populated record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "u8", into = "u8")]
pub enum UserLevel {
    #[default]
    Standard,
    Elevated,
}

impl From<u8> for UserLevel {
    fn from(level: u8) -> Self {
        // Anything unrecognized falls back to the standard path.
        match level {
            3 => Self::Elevated,
            _ => Self::Standard,
        }
    }
}

impl From<UserLevel> for u8 {
    fn from(level: UserLevel) -> Self {
        match level {
            UserLevel::Standard => 2,
            UserLevel::Elevated => 3,
        }
    }
}

// ── Flow Type ────────────────────────────────────────────────────────

/// The trust flow variant; decides which representative roles are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    Intervivos,
    Testamentary,
}

impl FlowType {
    /// Role options offered in the representative role dropdowns.
    pub fn role_options(&self) -> &'static [&'static str] {
        match self {
            Self::Intervivos => &["Trustee", "Other"],
            Self::Testamentary => &[
                "Trustee",
                "Executor",
                "Liquidator",
                "Administrator",
                "Other",
            ],
        }
    }
}

// ── Account Info ─────────────────────────────────────────────────────

/// The trust account on file, as delivered by the task payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// "Estate of" name.
    pub name: String,
    pub trust_type: String,
    pub trust_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sin: Option<String>,
    /// Mailing address of the deceased.
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,
}

// ── Legal Representative ─────────────────────────────────────────────

/// One legal representative of the deceased.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegalRep {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Only the pre-populated elevated-path record carries an address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl LegalRep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            phone: None,
            email: None,
            address: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

// ── Selected Task ────────────────────────────────────────────────────

/// The entry-precondition payload: must exist in the longer-lived cache
/// before the wizard initializes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTask {
    pub account_info: AccountInfo,
    pub user_level: UserLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rac_user_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_level_wire_format() {
        let json = serde_json::to_value(UserLevel::Elevated).unwrap();
        assert_eq!(json, serde_json::json!(3));

        let level: UserLevel = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(level, UserLevel::Standard);

        // Unknown levels degrade to the standard path instead of failing.
        let level: UserLevel = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(level, UserLevel::Standard);
    }

    #[test]
    fn test_role_options_per_flow() {
        assert_eq!(FlowType::Intervivos.role_options().len(), 2);
        assert!(FlowType::Testamentary.role_options().contains(&"Executor"));
    }

    #[test]
    fn test_account_info_camel_case() {
        let account = AccountInfo {
            name: "Estate of J. Doe".into(),
            trust_type: "Testamentary".into(),
            trust_number: "T-123".into(),
            sin: None,
            address: "1 Main St".into(),
            flow_type: Some(FlowType::Testamentary),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("trustNumber").is_some());
        assert_eq!(json["flowType"], serde_json::json!("testamentary"));
    }

    #[test]
    fn test_legal_rep_builder() {
        let rep = LegalRep::new("Ann Smith")
            .with_role("Executor")
            .with_phone("555-0100")
            .with_email("ann@example.com");
        assert_eq!(rep.role.as_deref(), Some("Executor"));
        assert!(rep.address.is_none());
    }

    #[test]
    fn test_session_id() {
        let id = SessionId::generate();
        assert!(!id.0.is_empty());
        assert!(id.short().len() <= 8);
    }
}
