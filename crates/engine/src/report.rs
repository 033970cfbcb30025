//! The CSV report exporter.
//!
//! Serializes the whole inventory into a single CSV document with a fixed
//! 14-column layout. The format is pinned to what downstream spreadsheets
//! already ingest: the header row is unquoted, every data cell is wrapped in
//! double quotes, rows are joined with `\n` and there is no trailing
//! newline.
//!
//! Known defect, kept on purpose: embedded double quotes inside a cell are
//! NOT escaped, so a `"` in a make/model/description produces a malformed
//! document. Consumers of the existing format depend on the bytes as they
//! are; fixing the quoting is a coordinated format change, not a code fix.

use chrono::NaiveDate;

use crate::{Expense, ResultEngine, Vehicle, summary};

/// Read interface over the vehicle/expense store, consumed by the exporter.
///
/// Implementations return every vehicle paired with exactly its own
/// expenses, ordered by creation time descending. The read is a single
/// all-or-nothing call: if it fails, no partial export is produced.
pub trait InventorySource {
    fn vehicles_with_expenses(&self) -> ResultEngine<Vec<(Vehicle, Vec<Expense>)>>;
}

/// Fixed header of the export, in column order.
pub const CSV_COLUMNS: [&str; 14] = [
    "ID",
    "Make",
    "Model",
    "Year",
    "Reg Number",
    "VIN",
    "Status",
    "Purchase Price",
    "Purchase Date",
    "Sold Price",
    "Sold Date",
    "Total Expenses",
    "Total Cost",
    "Profit/Loss",
];

/// A finished export: the document and the advertised attachment name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Exports the full inventory as CSV.
///
/// One row per vehicle in the order the source returns them, one header row,
/// aggregates recomputed from scratch for every row. `exported_on` is the
/// calendar date stamped into the attachment filename.
pub fn export_csv<S: InventorySource>(
    source: &S,
    exported_on: NaiveDate,
) -> ResultEngine<CsvExport> {
    let inventory = source.vehicles_with_expenses()?;

    let mut lines = Vec::with_capacity(inventory.len() + 1);
    lines.push(CSV_COLUMNS.join(","));

    for (vehicle, expenses) in &inventory {
        let summary = summary::aggregate(vehicle, expenses);

        let cells: [String; 14] = [
            vehicle.id.to_string(),
            vehicle.make.clone(),
            vehicle.model.clone(),
            vehicle.year.to_string(),
            vehicle.reg_number.clone(),
            vehicle.vin.clone().unwrap_or_default(),
            vehicle.status.as_str().to_string(),
            vehicle.purchase_price.to_string(),
            short_date(vehicle.purchase_date),
            vehicle
                .sold_price
                .map(|price| price.to_string())
                .unwrap_or_default(),
            vehicle.sold_date.map(short_date).unwrap_or_default(),
            summary.total_expenses.to_string(),
            summary.total_cost.to_string(),
            summary
                .profit_loss
                .map(|amount| amount.to_string())
                .unwrap_or_default(),
        ];

        let row = cells
            .iter()
            .map(|cell| format!("\"{cell}\""))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    Ok(CsvExport {
        filename: format!("inventory-export-{}.csv", exported_on.format("%Y-%m-%d")),
        content: lines.join("\n"),
    })
}

/// Short date form used in the report cells (`6/1/2024`, no leading zeros).
fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::str::FromStr;

    use super::*;
    use crate::{Engine, EngineError, Money, expense::ExpenseDraft, vehicle::VehicleDraft};

    struct FailingSource;

    impl InventorySource for FailingSource {
        fn vehicles_with_expenses(&self) -> ResultEngine<Vec<(Vehicle, Vec<Expense>)>> {
            Err(EngineError::Store("connection refused".to_string()))
        }
    }

    fn draft(reg: &str, price: &str) -> VehicleDraft {
        VehicleDraft {
            make: "Toyota".to_string(),
            model: "Aqua".to_string(),
            year: 2018,
            reg_number: reg.to_string(),
            vin: None,
            purchase_price: price.to_string(),
            purchase_date: "2024-01-10".to_string(),
            images: Vec::new(),
        }
    }

    fn expense_draft(amount: &str) -> ExpenseDraft {
        ExpenseDraft {
            description: "work".to_string(),
            amount: amount.to_string(),
            date: "2024-02-01".to_string(),
            category: "REPAIR".to_string(),
            is_public: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn header_plus_one_row_per_vehicle_with_14_columns() {
        let mut engine = Engine::new();
        engine.add_vehicle(draft("A-1", "1000000")).unwrap();
        engine.add_vehicle(draft("A-2", "2000000")).unwrap();

        let export = export_csv(&engine, today()).unwrap();
        let lines: Vec<&str> = export.content.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_COLUMNS.join(","));
        for row in &lines[1..] {
            assert_eq!(row.matches(',').count(), 13);
            assert!(row.starts_with('"') && row.ends_with('"'));
        }
        assert!(!export.content.ends_with('\n'));
    }

    #[test]
    fn available_vehicle_exports_empty_sold_and_profit_cells() {
        let mut engine = Engine::new();
        let id = engine.add_vehicle(draft("A-1", "1000000")).unwrap();
        engine.add_expense(id, expense_draft("250000")).unwrap();
        engine.add_expense(id, expense_draft("50000")).unwrap();

        let export = export_csv(&engine, today()).unwrap();
        let row = export.content.split('\n').nth(1).unwrap();
        let cells: Vec<&str> = row.split(',').collect();

        assert_eq!(cells[5], "\"\""); // VIN
        assert_eq!(cells[6], "\"AVAILABLE\"");
        assert_eq!(cells[9], "\"\""); // Sold Price
        assert_eq!(cells[10], "\"\""); // Sold Date
        assert_eq!(cells[11], "\"300000.00\"");
        assert_eq!(cells[12], "\"1300000.00\"");
        assert_eq!(cells[13], "\"\""); // Profit/Loss
    }

    #[test]
    fn sold_vehicle_exports_profit_and_short_dates() {
        let mut engine = Engine::new();
        let id = engine.add_vehicle(draft("A-1", "1000000")).unwrap();
        engine.add_expense(id, expense_draft("250000")).unwrap();
        engine.add_expense(id, expense_draft("50000")).unwrap();
        engine.mark_sold(id, "1500000", "2024-06-01").unwrap();

        let export = export_csv(&engine, today()).unwrap();
        let row = export.content.split('\n').nth(1).unwrap();
        let cells: Vec<&str> = row.split(',').collect();

        assert_eq!(cells[6], "\"SOLD\"");
        assert_eq!(cells[8], "\"1/10/2024\"");
        assert_eq!(cells[9], "\"1500000.00\"");
        assert_eq!(cells[10], "\"6/1/2024\"");
        assert_eq!(cells[13], "\"200000.00\"");
    }

    #[test]
    fn total_cost_column_round_trips_exactly() {
        let mut engine = Engine::new();
        let id = engine.add_vehicle(draft("A-1", "1234567.89")).unwrap();
        engine.add_expense(id, expense_draft("0.01")).unwrap();
        engine.add_expense(id, expense_draft("99999.99")).unwrap();

        let export = export_csv(&engine, today()).unwrap();
        let row = export.content.split('\n').nth(1).unwrap();
        let cell = row.split(',').nth(12).unwrap().trim_matches('"');

        let expected = engine.summary(id).unwrap().total_cost;
        assert_eq!(Money::from_str(cell).unwrap(), expected);
    }

    #[test]
    fn embedded_quotes_are_not_escaped() {
        let mut engine = Engine::new();
        let mut draft = draft("A-1", "1000000");
        draft.model = "Aqua \"S\"".to_string();
        engine.add_vehicle(draft).unwrap();

        let export = export_csv(&engine, today()).unwrap();

        // The defective-but-pinned format: the inner quotes come through raw.
        assert!(export.content.contains("\"Aqua \"S\"\""));
        assert!(!export.content.contains("\"\"S\"\""));
    }

    #[test]
    fn filename_carries_the_export_date() {
        let engine = Engine::new();
        let export = export_csv(&engine, today()).unwrap();
        assert_eq!(export.filename, "inventory-export-2024-07-01.csv");
    }

    #[test]
    fn failed_read_fails_the_whole_export() {
        let err = export_csv(&FailingSource, today()).unwrap_err();
        assert!(matches!(err, EngineError::Store(_)));
    }
}
