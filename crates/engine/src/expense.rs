//! Expense line items and the form-field boundary.
//!
//! Expenses arrive from forms as free text. [`ExpenseDraft::parse`] is the
//! single place where that text becomes typed values: every field is
//! validated before any mutation happens, so an update is all-or-nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Category of an expense line item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Repair,
    BrokerFee,
    Travel,
    Documentation,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Repair => "REPAIR",
            Self::BrokerFee => "BROKER_FEE",
            Self::Travel => "TRAVEL",
            Self::Documentation => "DOCUMENTATION",
            Self::Other => "OTHER",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "REPAIR" => Ok(Self::Repair),
            "BROKER_FEE" => Ok(Self::BrokerFee),
            "TRAVEL" => Ok(Self::Travel),
            "DOCUMENTATION" => Ok(Self::Documentation),
            "OTHER" => Ok(Self::Other),
            _ => Err(EngineError::validation(
                "category",
                "category must be one of REPAIR, BROKER_FEE, TRAVEL, DOCUMENTATION, OTHER",
            )),
        }
    }
}

/// A cost line item attributed to one vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    /// Whether the line item may appear on the customer-facing certificate.
    /// Stored and passed through; the engine never filters by it.
    pub is_public: bool,
}

impl Expense {
    pub fn new(vehicle_id: Uuid, fields: ExpenseFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            description: fields.description,
            amount: fields.amount,
            date: fields.date,
            category: fields.category,
            is_public: fields.is_public,
        }
    }

    /// Replaces every editable field at once.
    pub fn apply(&mut self, fields: ExpenseFields) {
        self.description = fields.description;
        self.amount = fields.amount;
        self.date = fields.date;
        self.category = fields.category;
        self.is_public = fields.is_public;
    }
}

/// Raw expense form fields, exactly as submitted.
#[derive(Clone, Debug, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub is_public: bool,
}

/// Parsed and validated expense field values.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseFields {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub is_public: bool,
}

impl ExpenseDraft {
    /// Parses the raw form fields into typed values.
    ///
    /// Fails on the first invalid field with a message naming it; nothing is
    /// mutated on failure.
    pub fn parse(self) -> ResultEngine<ExpenseFields> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(EngineError::validation(
                "description",
                "description must not be empty",
            ));
        }

        let amount: Money = self.amount.parse().map_err(|_| {
            EngineError::validation(
                "amount",
                "amount must be a non-negative number with at most two decimals",
            )
        })?;

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            EngineError::validation("date", "date must be a valid calendar date (YYYY-MM-DD)")
        })?;

        let category = ExpenseCategory::try_from(self.category.as_str())?;

        Ok(ExpenseFields {
            description,
            amount,
            date,
            category,
            is_public: self.is_public,
        })
    }
}
