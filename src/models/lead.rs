use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::Entity;

const REQUIRED_FIELDS: &str = "Name, Email, and Status are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Website,
    Social,
    Referral,
    Advertisement,
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Social => "social",
            LeadSource::Referral => "referral",
            LeadSource::Advertisement => "advertisement",
            LeadSource::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: LeadStatus,
    pub source: LeadSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

impl Lead {
    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLeadRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub notes: Option<String>,
}

impl Entity for Lead {
    type Draft = NewLeadRequest;
    type Patch = UpdateLeadRequest;

    const KEY: &'static str = "leads";
    const KIND: &'static str = "lead";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(draft: NewLeadRequest) -> Result<Self, StoreError> {
        let Some(status) = draft.status else {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        };

        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            status,
            source: draft.source.unwrap_or(LeadSource::Other),
            notes: draft.notes,
            created_at: Utc::now().to_rfc3339(),
        };
        lead.validate()?;
        Ok(lead)
    }

    fn merge(&self, patch: UpdateLeadRequest) -> Result<Self, StoreError> {
        let mut merged = self.clone();
        if let Some(name) = patch.name {
            merged.name = name;
        }
        if let Some(email) = patch.email {
            merged.email = email;
        }
        if let Some(phone) = patch.phone {
            merged.phone = Some(phone);
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        if let Some(source) = patch.source {
            merged.source = source;
        }
        if let Some(notes) = patch.notes {
            merged.notes = Some(notes);
        }
        merged.validate()?;
        Ok(merged)
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
            || self.status.as_str().contains(&query)
    }

    fn seed() -> Vec<Self> {
        vec![
            Lead {
                id: "l1".to_string(),
                name: "David Smith".to_string(),
                email: "david@example.com".to_string(),
                phone: Some("123-456-7890".to_string()),
                status: LeadStatus::New,
                source: LeadSource::Website,
                notes: Some("Interested in React courses".to_string()),
                created_at: Utc::now().to_rfc3339(),
            },
            Lead {
                id: "l2".to_string(),
                name: "Emma Wilson".to_string(),
                email: "emma@example.com".to_string(),
                phone: None,
                status: LeadStatus::Contacted,
                source: LeadSource::Social,
                notes: None,
                created_at: Utc::now().to_rfc3339(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_stamps_creation_time() {
        let draft = NewLeadRequest {
            name: "Frank".to_string(),
            email: "frank@example.com".to_string(),
            status: Some(LeadStatus::New),
            source: Some(LeadSource::Referral),
            ..Default::default()
        };

        let lead = Lead::build(draft).expect("draft should be valid");
        assert!(chrono::DateTime::parse_from_rfc3339(&lead.created_at).is_ok());
    }

    #[test]
    fn build_requires_status() {
        let draft = NewLeadRequest {
            name: "Frank".to_string(),
            email: "frank@example.com".to_string(),
            status: None,
            ..Default::default()
        };

        assert!(Lead::build(draft).is_err());
    }

    #[test]
    fn merge_keeps_creation_time() {
        let lead = &Lead::seed()[0];
        let patch = UpdateLeadRequest {
            status: Some(LeadStatus::Qualified),
            notes: Some("Followed up by phone".to_string()),
            ..Default::default()
        };

        let merged = lead.merge(patch).expect("patch should be valid");
        assert_eq!(merged.status, LeadStatus::Qualified);
        assert_eq!(merged.created_at, lead.created_at);
        assert_eq!(merged.phone, lead.phone);
    }

    #[test]
    fn matches_searches_status_label() {
        let leads = Lead::seed();
        assert!(leads[1].matches("contacted"));
        assert!(leads[1].matches("Emma"));
        assert!(!leads[1].matches("qualified"));
    }

    #[test]
    fn persisted_shape_uses_camel_case() {
        let json = serde_json::to_string(&Lead::seed()[0]).expect("encode failed");
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"status\":\"new\""));
        assert!(json.contains("\"source\":\"website\""));
    }
}
