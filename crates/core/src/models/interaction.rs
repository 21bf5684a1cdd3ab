//! Customer enquiries logged against a unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EnquiryStatus, InteractionId, Rate};

/// A logged customer enquiry or negotiation event.
///
/// `date` is set once at creation and never changes. Only `status` is
/// mutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: InteractionId,
    pub agent_name: String,
    pub agent_phone: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub offered_rate: Rate,
    pub date: DateTime<Utc>,
    pub status: EnquiryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Form data for logging an enquiry.
///
/// Missing numeric fields default to zero and the status to `ACTIVE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewInteraction {
    pub agent_name: String,
    pub agent_phone: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub offered_rate: Rate,
    pub status: EnquiryStatus,
    pub notes: Option<String>,
}

impl Interaction {
    /// Build an interaction from form data with a fresh ID.
    ///
    /// Blank notes are dropped.
    #[must_use]
    pub fn create(draft: NewInteraction, now: DateTime<Utc>) -> Self {
        Self {
            id: InteractionId::generate(),
            agent_name: draft.agent_name,
            agent_phone: draft.agent_phone,
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone,
            offered_rate: draft.offered_rate,
            date: now,
            status: draft.status,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Notes as displayed: empty when absent.
    #[must_use]
    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }
}
