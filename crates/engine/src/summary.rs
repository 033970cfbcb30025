//! The cost aggregator.
//!
//! Pure computation turning one vehicle and its expense list into totals and
//! profit/loss. Aggregates are never stored; callers recompute on every read
//! so there is no staleness to manage.

use serde::Serialize;

use crate::{Expense, Money, Vehicle, VehicleStatus};

/// Computed cost picture for one vehicle.
///
/// `profit_loss` is a tagged absence for vehicles that are still available:
/// it is never coerced to zero here. Rendering an empty value (or a zero, if
/// a display insists) is a presentation decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CostSummary {
    pub total_expenses: Money,
    pub total_cost: Money,
    pub profit_loss: Option<Money>,
}

/// Aggregates a vehicle and its expenses.
///
/// The caller supplies exactly the expenses belonging to the vehicle; no
/// re-filtering happens here. The sum is exact integer-cent addition, so the
/// order of the expense list is irrelevant. Total over well-formed inputs:
/// this function has no error conditions.
pub fn aggregate<'a, I>(vehicle: &Vehicle, expenses: I) -> CostSummary
where
    I: IntoIterator<Item = &'a Expense>,
{
    let total_expenses: Money = expenses.into_iter().map(|expense| expense.amount).sum();
    let total_cost = vehicle.purchase_price + total_expenses;
    let profit_loss = match vehicle.status {
        VehicleStatus::Sold => vehicle.sold_price.map(|sold| sold - total_cost),
        VehicleStatus::Available => None,
    };

    CostSummary {
        total_expenses,
        total_cost,
        profit_loss,
    }
}
