use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod common {
    use super::*;

    /// Outcome envelope for form-style mutations.
    ///
    /// These endpoints answer `200 OK` even when validation fails; the
    /// `success` flag carries the verdict and `message` the field-level
    /// explanation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActionResponse {
        pub success: bool,
        pub message: String,
    }

    impl ActionResponse {
        pub fn ok(message: impl Into<String>) -> Self {
            Self {
                success: true,
                message: message.into(),
            }
        }

        pub fn fail(message: impl Into<String>) -> Self {
            Self {
                success: false,
                message: message.into(),
            }
        }
    }
}

pub mod vehicle {
    use super::*;

    /// Request body for creating a vehicle.
    ///
    /// Price and date are raw form strings; parsing happens server side so
    /// the validation messages can name the offending field.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleNew {
        pub make: String,
        pub model: String,
        pub year: i32,
        pub reg_number: String,
        pub vin: Option<String>,
        pub purchase_price: String,
        pub purchase_date: String,
        #[serde(default)]
        pub images: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleCreated {
        pub id: Uuid,
    }

    /// Request body for updating the advisory margin target.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MarginUpdate {
        pub id: Uuid,
        pub profit_margin: f64,
    }

    /// Request body for marking a vehicle as sold.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SellRequest {
        pub id: Uuid,
        pub sold_price: String,
        pub sold_date: String,
    }

    /// One vehicle with its expenses and the recomputed cost figures.
    ///
    /// Monetary fields are exact integer cents; clients format them.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleView {
        pub id: Uuid,
        pub make: String,
        pub model: String,
        pub year: i32,
        pub reg_number: String,
        pub vin: Option<String>,
        pub status: String,
        pub purchase_price_cents: i64,
        pub purchase_date: NaiveDate,
        pub sold_price_cents: Option<i64>,
        pub sold_date: Option<NaiveDate>,
        pub profit_margin: f64,
        pub images: Vec<String>,
        pub created_at: DateTime<Utc>,
        pub expenses: Vec<super::expense::ExpenseView>,
        pub total_expenses_cents: i64,
        pub total_cost_cents: i64,
        /// Present only for sold vehicles, never zero-filled.
        pub profit_loss_cents: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleListResponse {
        pub vehicles: Vec<VehicleView>,
    }
}

pub mod expense {
    use super::*;

    /// Request body for adding an expense to a vehicle.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub vehicle_id: Uuid,
        pub description: String,
        pub amount: String,
        pub date: String,
        pub category: String,
        #[serde(default)]
        pub is_public: bool,
    }

    /// Request body for replacing every editable field of an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub id: Uuid,
        pub vehicle_id: Uuid,
        pub description: String,
        pub amount: String,
        pub date: String,
        pub category: String,
        #[serde(default)]
        pub is_public: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub vehicle_id: Uuid,
        pub description: String,
        pub amount_cents: i64,
        pub date: NaiveDate,
        pub category: String,
        pub is_public: bool,
    }
}
