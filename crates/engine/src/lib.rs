//! In-memory engine for a vehicle resale inventory.
//!
//! The engine owns the inventory state (vehicles and their expenses) and
//! every rule over it: the money boundary, the `Available -> Sold` lifecycle,
//! the all-or-nothing expense editor, the pure cost aggregator and the CSV
//! report exporter. Persistence, authentication and rendering live with the
//! callers; all operations here are synchronous and deterministic.

use std::collections::HashMap;

use uuid::Uuid;

pub use error::EngineError;
pub use expense::{Expense, ExpenseCategory, ExpenseDraft, ExpenseFields};
pub use money::Money;
pub use report::{CSV_COLUMNS, CsvExport, InventorySource, export_csv};
pub use summary::{CostSummary, aggregate};
pub use vehicle::{Vehicle, VehicleDraft, VehicleStatus, margin_tenths_from_percent};

mod error;
pub mod expense;
mod money;
pub mod report;
pub mod summary;
pub mod vehicle;

pub type ResultEngine<T> = Result<T, EngineError>;

/// The inventory store.
///
/// Vehicles and expenses are kept in maps keyed by id; a vehicle is the sole
/// owner of its expenses, so deleting one cascades. Aggregates are never
/// cached: [`Engine::summary`] and the exporter recompute from the live
/// records on every call.
#[derive(Debug, Default)]
pub struct Engine {
    vehicles: HashMap<Uuid, Vehicle>,
    expenses: HashMap<Uuid, Expense>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn vehicle_mut(&mut self, vehicle_id: Uuid) -> ResultEngine<&mut Vehicle> {
        self.vehicles
            .get_mut(&vehicle_id)
            .ok_or_else(|| EngineError::KeyNotFound("vehicle not exists".to_string()))
    }

    /// Returns a vehicle by id.
    pub fn vehicle(&self, vehicle_id: Uuid) -> ResultEngine<&Vehicle> {
        self.vehicles
            .get(&vehicle_id)
            .ok_or_else(|| EngineError::KeyNotFound("vehicle not exists".to_string()))
    }

    /// Parses and stores a new vehicle from raw form fields.
    ///
    /// The registration number must be unique within the inventory.
    pub fn add_vehicle(&mut self, draft: VehicleDraft) -> ResultEngine<Uuid> {
        let vehicle = draft.parse()?;
        self.insert_vehicle(vehicle)
    }

    /// Stores an already built vehicle (uniqueness still enforced).
    pub fn insert_vehicle(&mut self, vehicle: Vehicle) -> ResultEngine<Uuid> {
        if self
            .vehicles
            .values()
            .any(|existing| existing.reg_number == vehicle.reg_number)
        {
            return Err(EngineError::ExistingKey(vehicle.reg_number));
        }

        let id = vehicle.id;
        self.vehicles.insert(id, vehicle);
        Ok(id)
    }

    /// Deletes a vehicle and every expense attached to it.
    pub fn delete_vehicle(&mut self, vehicle_id: Uuid) -> ResultEngine<()> {
        if self.vehicles.remove(&vehicle_id).is_none() {
            return Err(EngineError::KeyNotFound("vehicle not exists".to_string()));
        }
        self.expenses
            .retain(|_, expense| expense.vehicle_id != vehicle_id);
        Ok(())
    }

    /// All vehicles, newest first (creation time descending).
    #[must_use]
    pub fn vehicles_by_created_desc(&self) -> Vec<&Vehicle> {
        let mut vehicles: Vec<&Vehicle> = self.vehicles.values().collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        vehicles
    }

    /// Expenses belonging to one vehicle.
    pub fn expenses_for(&self, vehicle_id: Uuid) -> ResultEngine<Vec<&Expense>> {
        self.vehicle(vehicle_id)?;
        Ok(self
            .expenses
            .values()
            .filter(|expense| expense.vehicle_id == vehicle_id)
            .collect())
    }

    /// Parses and stores a new expense under a vehicle.
    pub fn add_expense(&mut self, vehicle_id: Uuid, draft: ExpenseDraft) -> ResultEngine<Uuid> {
        self.vehicle(vehicle_id)?;
        let fields = draft.parse()?;
        let expense = Expense::new(vehicle_id, fields);
        let id = expense.id;
        self.expenses.insert(id, expense);
        Ok(id)
    }

    /// Updates every editable field of an expense at once.
    ///
    /// All fields are parsed and validated before the record is touched, so
    /// a failure leaves the stored expense exactly as it was.
    pub fn update_expense(
        &mut self,
        expense_id: Uuid,
        vehicle_id: Uuid,
        draft: ExpenseDraft,
    ) -> ResultEngine<()> {
        let fields = draft.parse()?;

        let expense = self
            .expenses
            .get_mut(&expense_id)
            .filter(|expense| expense.vehicle_id == vehicle_id)
            .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;

        expense.apply(fields);
        Ok(())
    }

    /// Deletes one expense.
    pub fn delete_expense(&mut self, expense_id: Uuid) -> ResultEngine<()> {
        self.expenses
            .remove(&expense_id)
            .map(|_| ())
            .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))
    }

    /// Marks a vehicle as sold; price and date are parsed at this boundary
    /// and applied atomically with the status change.
    pub fn mark_sold(
        &mut self,
        vehicle_id: Uuid,
        sold_price: &str,
        sold_date: &str,
    ) -> ResultEngine<()> {
        let price: Money = sold_price.parse().map_err(|_| {
            EngineError::validation(
                "sold_price",
                "sold price must be a non-negative number with at most two decimals",
            )
        })?;
        let date = chrono::NaiveDate::parse_from_str(sold_date, "%Y-%m-%d").map_err(|_| {
            EngineError::validation(
                "sold_date",
                "sold date must be a valid calendar date (YYYY-MM-DD)",
            )
        })?;

        self.vehicle_mut(vehicle_id)?.mark_sold(price, date)
    }

    /// Sets the advisory margin target of a vehicle.
    pub fn set_margin(&mut self, vehicle_id: Uuid, percent: f64) -> ResultEngine<()> {
        self.vehicle_mut(vehicle_id)?.set_margin(percent)
    }

    /// Recomputes the cost summary for one vehicle.
    pub fn summary(&self, vehicle_id: Uuid) -> ResultEngine<CostSummary> {
        let vehicle = self.vehicle(vehicle_id)?;
        let expenses = self.expenses_for(vehicle_id)?;
        Ok(summary::aggregate(vehicle, expenses.into_iter()))
    }
}

impl InventorySource for Engine {
    fn vehicles_with_expenses(&self) -> ResultEngine<Vec<(Vehicle, Vec<Expense>)>> {
        let inventory = self
            .vehicles_by_created_desc()
            .into_iter()
            .map(|vehicle| {
                let expenses = self
                    .expenses
                    .values()
                    .filter(|expense| expense.vehicle_id == vehicle.id)
                    .cloned()
                    .collect();
                (vehicle.clone(), expenses)
            })
            .collect();
        Ok(inventory)
    }
}
