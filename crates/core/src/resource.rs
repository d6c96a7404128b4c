//! Resource entities managed through the CRUD views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{require, same_email};
use crate::{DomainError, DomainResult, Entity, EntityId};

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub enroll_number: String,
    pub date_of_admission: NaiveDate,
}

impl Student {
    /// Check the form-level invariants before the record is sent anywhere.
    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(DomainError::validation("email must contain '@'"));
        }
        require("enroll number", &self.enroll_number)?;
        Ok(())
    }

    /// Reject an email already used by a *different* student.
    pub fn ensure_unique_email(&self, existing: &[Student]) -> DomainResult<()> {
        let clash = existing
            .iter()
            .filter(|s| self.id.is_none() || s.id != self.id)
            .any(|s| same_email(&s.email, &self.email));
        if clash {
            return Err(DomainError::conflict(format!(
                "a student with email '{}' already exists",
                self.email
            )));
        }
        Ok(())
    }
}

impl Entity for Student {
    const COLLECTION: &'static str = "students";

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }
}

/// A fee payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub payment_schedule: String,
    pub bill_number: String,
    pub amount_paid: u64,
    pub balance_amount: u64,
    pub date: NaiveDate,
}

impl Payment {
    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("bill number", &self.bill_number)?;
        Ok(())
    }
}

impl Entity for Payment {
    const COLLECTION: &'static str = "payments";

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }
}
