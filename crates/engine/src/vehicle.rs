//! Vehicle record and lifecycle policy.
//!
//! A vehicle is bought for resale, accumulates expenses while it sits in the
//! inventory, and is optionally sold. The only modelled transition is
//! `Available -> Sold`; there is no way back (a sale retraction rule was
//! never specified upstream and is deliberately not invented here).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Lifecycle state of a vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    #[default]
    Available,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Sold => "SOLD",
        }
    }
}

impl TryFrom<&str> for VehicleStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "AVAILABLE" => Ok(Self::Available),
            "SOLD" => Ok(Self::Sold),
            other => Err(EngineError::validation(
                "status",
                format!("invalid vehicle status: {other}"),
            )),
        }
    }
}

/// A vehicle in the resale inventory.
///
/// Sold fields travel together: `sold_price` and `sold_date` are both set iff
/// `status` is [`VehicleStatus::Sold`]. The profit margin is an advisory
/// target only; the cost aggregator never reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Stable identifier, generated once at creation.
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Registration number, unique within the inventory.
    pub reg_number: String,
    pub vin: Option<String>,
    pub status: VehicleStatus,
    pub purchase_price: Money,
    pub purchase_date: NaiveDate,
    pub sold_price: Option<Money>,
    pub sold_date: Option<NaiveDate>,
    /// Target margin in tenths of a percent (0..=1000), advisory only.
    pub profit_margin_tenths: u16,
    /// Ordered image references, opaque to the engine.
    pub images: Vec<String>,
    /// Default display/export ordering key (descending).
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        make: String,
        model: String,
        year: i32,
        reg_number: String,
        vin: Option<String>,
        purchase_price: Money,
        purchase_date: NaiveDate,
        images: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            make,
            model,
            year,
            reg_number,
            vin,
            status: VehicleStatus::Available,
            purchase_price,
            purchase_date,
            sold_price: None,
            sold_date: None,
            profit_margin_tenths: 0,
            images,
            created_at: Utc::now(),
        }
    }

    /// Target margin as a percentage.
    #[must_use]
    pub fn profit_margin(&self) -> f64 {
        f64::from(self.profit_margin_tenths) / 10.0
    }

    /// Marks the vehicle as sold.
    ///
    /// This is the single atomic `Available -> Sold` mutation: sold price and
    /// sold date are set together with the status, never one at a time. The
    /// sold price must be strictly positive. Selling an already sold vehicle
    /// is rejected.
    pub fn mark_sold(&mut self, sold_price: Money, sold_date: NaiveDate) -> ResultEngine<()> {
        if self.status == VehicleStatus::Sold {
            return Err(EngineError::validation(
                "status",
                "vehicle is already sold",
            ));
        }
        if !sold_price.is_positive() {
            return Err(EngineError::validation(
                "sold_price",
                "sold price must be greater than zero",
            ));
        }

        self.status = VehicleStatus::Sold;
        self.sold_price = Some(sold_price);
        self.sold_date = Some(sold_date);
        Ok(())
    }

    /// Sets the advisory margin target.
    ///
    /// Pure field set, independent of status, no other side effect.
    pub fn set_margin(&mut self, percent: f64) -> ResultEngine<()> {
        self.profit_margin_tenths = margin_tenths_from_percent(percent)?;
        Ok(())
    }
}

/// Raw vehicle form fields, exactly as submitted.
#[derive(Clone, Debug, Deserialize)]
pub struct VehicleDraft {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub reg_number: String,
    pub vin: Option<String>,
    pub purchase_price: String,
    pub purchase_date: String,
    pub images: Vec<String>,
}

impl VehicleDraft {
    /// Parses the raw form fields into a fresh [`Vehicle`].
    ///
    /// Fails on the first invalid field with a message naming it.
    pub fn parse(self) -> ResultEngine<Vehicle> {
        let make = self.make.trim().to_string();
        if make.is_empty() {
            return Err(EngineError::validation("make", "make must not be empty"));
        }

        let model = self.model.trim().to_string();
        if model.is_empty() {
            return Err(EngineError::validation("model", "model must not be empty"));
        }

        let reg_number = self.reg_number.trim().to_string();
        if reg_number.is_empty() {
            return Err(EngineError::validation(
                "reg_number",
                "registration number must not be empty",
            ));
        }

        let purchase_price: Money = self.purchase_price.parse().map_err(|_| {
            EngineError::validation(
                "purchase_price",
                "purchase price must be a non-negative number with at most two decimals",
            )
        })?;

        let purchase_date =
            NaiveDate::parse_from_str(&self.purchase_date, "%Y-%m-%d").map_err(|_| {
                EngineError::validation(
                    "purchase_date",
                    "purchase date must be a valid calendar date (YYYY-MM-DD)",
                )
            })?;

        Ok(Vehicle::new(
            make,
            model,
            self.year,
            reg_number,
            self.vin.filter(|vin| !vin.trim().is_empty()),
            purchase_price,
            purchase_date,
            self.images,
        ))
    }
}

/// Validates a margin percentage and converts it to tenths.
///
/// Accepts `[0, 100]` with a step resolution of 0.1 (the boundary values 0
/// and 100 included).
pub fn margin_tenths_from_percent(percent: f64) -> ResultEngine<u16> {
    if !percent.is_finite() {
        return Err(EngineError::validation(
            "profit_margin",
            "profit margin must be a number",
        ));
    }
    if !(0.0..=100.0).contains(&percent) {
        return Err(EngineError::validation(
            "profit_margin",
            "profit margin must be between 0 and 100",
        ));
    }

    let tenths = (percent * 10.0).round();
    if (percent * 10.0 - tenths).abs() > 1e-6 {
        return Err(EngineError::validation(
            "profit_margin",
            "profit margin must be a multiple of 0.1",
        ));
    }

    Ok(tenths as u16)
}
