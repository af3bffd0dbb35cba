//! # Beverage Machine Demo
//!
//! Starts a three-outlet machine with the sample inventory, serves the sample menu as one
//! concurrent batch, then reports what ran out and refills it.

use beverage_machine::lifecycle::{setup_tracing, BeverageMachine, MachineConfig};
use std::collections::BTreeMap;
use tracing::{info, warn, Instrument};

fn sample_config() -> MachineConfig {
    let stock = BTreeMap::from([
        ("hot_water".to_string(), 500),
        ("hot_milk".to_string(), 500),
        ("ginger_syrup".to_string(), 100),
        ("sugar_syrup".to_string(), 100),
        ("tea_leaves_syrup".to_string(), 100),
    ]);
    let mut config = MachineConfig::new(3, stock);

    let menu: [(&str, &[(&str, u32)]); 4] = [
        (
            "hot_tea",
            &[
                ("hot_water", 200),
                ("hot_milk", 100),
                ("ginger_syrup", 10),
                ("sugar_syrup", 10),
                ("tea_leaves_syrup", 30),
            ],
        ),
        (
            "hot_coffee",
            &[
                ("hot_water", 100),
                ("ginger_syrup", 30),
                ("hot_milk", 400),
                ("sugar_syrup", 50),
                ("tea_leaves_syrup", 30),
            ],
        ),
        (
            "black_tea",
            &[
                ("hot_water", 300),
                ("ginger_syrup", 30),
                ("sugar_syrup", 50),
                ("tea_leaves_syrup", 30),
            ],
        ),
        (
            "green_tea",
            &[("hot_water", 100), ("ginger_syrup", 30), ("sugar_syrup", 50), ("green_mixture", 30)],
        ),
    ];
    for (beverage, ingredients) in menu {
        let recipe = ingredients
            .iter()
            .map(|(ingredient, qty)| (ingredient.to_string(), *qty))
            .collect();
        config.beverages.insert(beverage.to_string(), recipe);
    }
    config
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting beverage machine");

    let config = sample_config();
    let menu = config.beverages();
    let machine = BeverageMachine::new();
    machine.init(config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("batch");
    let lines = async {
        info!(beverages = menu.len(), "Serving menu");
        machine.process_lines(menu).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    for line in &lines {
        info!("{line}");
    }

    let empty = machine.low_running_items().map_err(|e| e.to_string())?;
    for ingredient in &empty {
        warn!(ingredient = %ingredient, "Running low");
        let quantity = machine.refill(ingredient, 200).map_err(|e| e.to_string())?;
        info!(ingredient = %ingredient, quantity, "Refilled");
    }

    machine.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
