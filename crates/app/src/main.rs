use engine::{Engine, ExpenseDraft, VehicleDraft};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "motorstock={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let mut engine = Engine::new();
    if settings.app.demo {
        match seed_demo(&mut engine) {
            Ok(count) => tracing::info!("Seeded {count} demo vehicles"),
            Err(err) => tracing::error!("failed to seed demo inventory: {err}"),
        }
    }

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

/// Puts a couple of vehicles into the inventory so the API has something to
/// serve out of the box.
fn seed_demo(engine: &mut Engine) -> engine::ResultEngine<usize> {
    let sold = engine.add_vehicle(VehicleDraft {
        make: "Toyota".to_string(),
        model: "Aqua".to_string(),
        year: 2018,
        reg_number: "CAB-1234".to_string(),
        vin: None,
        purchase_price: "1000000".to_string(),
        purchase_date: "2024-01-10".to_string(),
        images: Vec::new(),
    })?;
    engine.add_expense(
        sold,
        ExpenseDraft {
            description: "Replaced brake pads".to_string(),
            amount: "250000".to_string(),
            date: "2024-02-15".to_string(),
            category: "REPAIR".to_string(),
            is_public: true,
        },
    )?;
    engine.mark_sold(sold, "1500000", "2024-06-01")?;

    engine.add_vehicle(VehicleDraft {
        make: "Honda".to_string(),
        model: "Vezel".to_string(),
        year: 2019,
        reg_number: "KA-5151".to_string(),
        vin: None,
        purchase_price: "1500000".to_string(),
        purchase_date: "2024-03-01".to_string(),
        images: Vec::new(),
    })?;

    Ok(2)
}
