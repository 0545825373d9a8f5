//! Sample context documents users can copy as a starting point.

use super::ContextKind;

/// A built-in sample context document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextTemplate {
    /// Short identifier (`json`, `yaml`, `plain-text`).
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Context kind the sample is written for.
    pub kind: ContextKind,
    /// Template body.
    pub content: &'static str,
}

const JSON_TEMPLATE: &str = r#"{
  "appName": "SmartBank",
  "overview": "Mobile banking app for managing accounts, transfers, and bill payments.",
  "uiScreens": [
    {
      "screenName": "Login Screen",
      "description": "User login via credentials or biometrics.",
      "keyElements": ["Username field", "Password field", "Login button"],
      "navigation": "First screen; leads to Dashboard on success."
    }
  ],
  "functionality": [
    {
      "featureName": "Fund Transfer",
      "description": "Transfer money between accounts.",
      "relatedScreens": ["Dashboard", "Transfer Screen"],
      "businessRules": ["OTP required for transfers > $10,000"]
    }
  ],
  "userRoles": [
    {
      "roleName": "Standard User",
      "permissions": ["View accounts", "Transfer funds"],
      "featureAccess": ["Login Screen", "Dashboard", "Transfer"]
    }
  ],
  "edgeCasesAndConstraints": [
    "Login fails after 5 incorrect attempts"
  ],
  "testDataGuidelines": [
    "Use usernames like user001",
    "Test transfer amounts: $0, $10,000, $10,001"
  ],
  "additionalNotes": "Biometric login supported only on compatible devices."
}"#;

const YAML_TEMPLATE: &str = "appName: SmartBank
overview: Mobile banking app for managing accounts, transfers, and bill payments.
uiScreens:
  - screenName: Login Screen
    description: User login via credentials or biometrics.
    keyElements: [Username field, Password field, Login button]
    navigation: First screen; leads to Dashboard on success.
functionality:
  - featureName: Fund Transfer
    description: Transfer money between accounts.
    relatedScreens: [Dashboard, Transfer Screen]
    businessRules: [OTP required for transfers > $10,000]
userRoles:
  - roleName: Standard User
    permissions: [View accounts, Transfer funds]
    featureAccess: [Login Screen, Dashboard, Transfer]
edgeCasesAndConstraints:
  - Login fails after 5 incorrect attempts
testDataGuidelines:
  - Use usernames like user001
  - Test transfer amounts: $0, $10,000, $10,001
additionalNotes: Biometric login supported only on compatible devices.";

const PLAIN_TEXT_TEMPLATE: &str = "• App Name: SmartBank
• Overview: Mobile banking app for managing accounts, transfers, and bill payments
• UI Screens:
  o Login Screen
    ▪ Description: User login via credentials or biometrics
    ▪ Key Elements: Username field, Password field, Login button
    ▪ Navigation: Leads to Dashboard on success
• Functionality:
  o Fund Transfer
    ▪ Description: Transfer money between accounts
    ▪ Related Screens: Dashboard, Transfer Screen
    ▪ Business Rules: OTP required for transfers > $10,000
• User Roles:
  o Standard User
    ▪ Permissions: View accounts, Transfer funds
    ▪ Feature Access: Login Screen, Dashboard, Transfer
• Edge Cases & Constraints: Login fails after 5 incorrect attempts
• Test Data Guidelines: Use usernames like user001; Test transfer amounts: $0, $10,000, $10,001
• Additional Notes: Biometric login supported only on compatible devices";

const TEMPLATES: [ContextTemplate; 3] = [
    ContextTemplate {
        id: "json",
        title: "JSON",
        kind: ContextKind::Json,
        content: JSON_TEMPLATE,
    },
    ContextTemplate {
        id: "yaml",
        title: "YAML",
        kind: ContextKind::Yaml,
        content: YAML_TEMPLATE,
    },
    ContextTemplate {
        id: "plain-text",
        title: "Plain Text",
        kind: ContextKind::PlainText,
        content: PLAIN_TEXT_TEMPLATE,
    },
];

/// All built-in templates, in display order.
#[must_use]
pub const fn built_in_templates() -> &'static [ContextTemplate] {
    &TEMPLATES
}

/// Looks up a template by id, case-insensitively.
#[must_use]
pub fn find_template(id: &str) -> Option<&'static ContextTemplate> {
    TEMPLATES
        .iter()
        .find(|template| template.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::{built_in_templates, find_template};
    use crate::context::ContextKind;

    #[test]
    fn json_template_is_valid_json() {
        let template = find_template("JSON").expect("json template exists");

        let parsed: serde_json::Value =
            serde_json::from_str(template.content).expect("template should parse");

        assert_eq!(
            parsed.get("appName").and_then(serde_json::Value::as_str),
            Some("SmartBank")
        );
    }

    #[test]
    fn every_template_targets_a_file_kind() {
        for template in built_in_templates() {
            assert!(template.kind.is_file_upload(), "{}", template.id);
        }
        assert_eq!(
            find_template("plain-text").map(|template| template.kind),
            Some(ContextKind::PlainText)
        );
        assert!(find_template("xml").is_none());
    }
}
