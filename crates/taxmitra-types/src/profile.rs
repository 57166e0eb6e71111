//! Business profile record.

use serde::{Deserialize, Serialize};

/// Flat business-profile record attached to the chat session.
///
/// Every field is free-form text where the empty string means "unset"; the
/// GST-number field is not validated either. The record is wholesale-replaced
/// on each profile-edit submission (no partial merge) and persisted after
/// every change. Serialized with camelCase keys to match the persisted slot
/// layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub business_type: String,
    pub industry: String,
    pub revenue_range: String,
    pub gst_number: String,
    pub location: String,
}

impl BusinessProfile {
    /// True when no field has been filled in.
    pub fn is_unset(&self) -> bool {
        self.business_type.is_empty()
            && self.industry.is_empty()
            && self.revenue_range.is_empty()
            && self.gst_number.is_empty()
            && self.location.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let profile = BusinessProfile::default();
        assert!(profile.is_unset());
        assert_eq!(profile.business_type, "");
    }

    #[test]
    fn test_wire_layout_uses_camel_case() {
        let profile = BusinessProfile {
            business_type: "Freelancer".to_string(),
            industry: "Design".to_string(),
            revenue_range: "Under ₹20 lakh".to_string(),
            gst_number: "29ABCDE1234F1Z5".to_string(),
            location: "Bengaluru".to_string(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"businessType\":\"Freelancer\""));
        assert!(json.contains("\"revenueRange\""));
        assert!(json.contains("\"gstNumber\""));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let profile: BusinessProfile =
            serde_json::from_str(r#"{"businessType":"Retailer"}"#).unwrap();
        assert_eq!(profile.business_type, "Retailer");
        assert_eq!(profile.industry, "");
        assert!(!profile.is_unset());
    }

    #[test]
    fn test_serde_roundtrip() {
        let profile = BusinessProfile {
            business_type: "Partnership".to_string(),
            location: "Pune".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: BusinessProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, parsed);
    }
}
