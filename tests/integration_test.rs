use beverage_machine::error::MachineError;
use beverage_machine::ledger::InitializationError;
use beverage_machine::lifecycle::{BeverageMachine, MachineConfig, MachineInput};
use beverage_machine::model::{Beverage, Outcome};
use std::collections::{BTreeMap, BTreeSet, HashMap};

fn load_fixture() -> MachineConfig {
    let raw = include_str!("fixtures/machine_input.json");
    let input: MachineInput = serde_json::from_str(raw).expect("Failed to parse fixture");
    input.machine
}

fn config(outlets: usize, stock: &[(&str, i64)]) -> MachineConfig {
    let stock: BTreeMap<String, i64> = stock
        .iter()
        .map(|(ingredient, qty)| (ingredient.to_string(), *qty))
        .collect();
    MachineConfig::new(outlets, stock)
}

/// Full end-to-end run of the sample input on a single outlet, where the order of
/// evaluation is fixed.
#[tokio::test]
async fn test_sample_input_single_outlet() {
    let mut config = load_fixture();
    config.outlets.count_n = 1;
    let menu = config.beverages();

    let machine = BeverageMachine::new();
    machine.init(config).expect("Failed to init machine");

    let initial = machine.item_quantities().unwrap();
    assert_eq!(initial["hot_water"], 500);
    assert_eq!(initial["hot_milk"], 500);
    assert_eq!(initial["ginger_syrup"], 100);
    assert_eq!(initial["sugar_syrup"], 100);
    assert_eq!(initial["tea_leaves_syrup"], 100);

    let lines: BTreeSet<String> = machine
        .process_lines(menu)
        .await
        .expect("Batch failed")
        .into_iter()
        .collect();
    let expected: BTreeSet<String> = [
        "black_tea is prepared",
        "green_tea is prepared",
        "hot_coffee cannot be prepared because sugar_syrup is not sufficient",
        "hot_tea cannot be prepared because hot_water is not sufficient",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(lines, expected);

    let after = machine.item_quantities().unwrap();
    assert_eq!(after["hot_water"], 100);
    assert_eq!(after["hot_milk"], 500, "Failed beverages must return their milk");
    assert_eq!(after["ginger_syrup"], 40);
    assert_eq!(after["sugar_syrup"], 0);
    assert_eq!(after["tea_leaves_syrup"], 70);
    assert_eq!(
        machine.low_running_items().unwrap(),
        BTreeSet::from(["sugar_syrup".to_string()])
    );

    machine.shutdown().await.expect("Failed to shutdown machine");
}

/// The sample input on three outlets: which beverages win depends on scheduling, but the
/// books must always balance.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sample_input_concurrent_conserves_inventory() {
    let config = load_fixture();
    let menu = config.beverages();
    let recipes: HashMap<String, Beverage> =
        menu.iter().map(|b| (b.name.clone(), b.clone())).collect();

    let machine = BeverageMachine::new();
    machine.init(config.clone()).unwrap();

    let reports = machine.process(menu).await.unwrap();
    assert_eq!(reports.len(), 4);

    let after = machine.item_quantities().unwrap();
    for (ingredient, start) in &config.total_items_quantity {
        let consumed: i64 = reports
            .iter()
            .filter(|r| r.outcome.is_prepared())
            .filter_map(|r| recipes[&r.beverage].required(ingredient))
            .map(i64::from)
            .sum();
        assert_eq!(
            start - after[ingredient] as i64,
            consumed,
            "{ingredient} not conserved"
        );
    }

    for report in &reports {
        if let Outcome::Insufficient { ingredient } = &report.outcome {
            assert!(recipes[&report.beverage].required(ingredient).is_some());
            assert!(after.contains_key(ingredient), "Untracked ingredients never fail a beverage");
        }
    }

    machine.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_disjoint_demand_both_prepared() {
    let machine = BeverageMachine::new();
    machine
        .init(config(2, &[("water", 500), ("milk", 500), ("sugar", 100)]))
        .unwrap();

    let tea = Beverage::new("tea")
        .with_ingredient("water", 200)
        .with_ingredient("sugar", 100);
    let coffee = Beverage::new("coffee")
        .with_ingredient("water", 200)
        .with_ingredient("milk", 50);

    let mut lines = machine.process_lines(vec![tea, coffee]).await.unwrap();
    lines.sort();
    assert_eq!(lines, vec!["coffee is prepared", "tea is prepared"]);

    let after = machine.item_quantities().unwrap();
    assert_eq!(after["sugar"], 0);
    assert_eq!(after["water"], 100);
    assert_eq!(after["milk"], 450);
    assert!(machine.low_running_items().unwrap().contains("sugar"));

    machine.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contended_ingredient_exactly_one_winner() {
    let machine = BeverageMachine::new();
    machine.init(config(2, &[("sugar", 50)])).unwrap();

    let a = Beverage::new("a").with_ingredient("sugar", 30);
    let b = Beverage::new("b").with_ingredient("sugar", 30);
    let reports = machine.process(vec![a, b]).await.unwrap();

    let winners: Vec<_> = reports.iter().filter(|r| r.outcome.is_prepared()).collect();
    assert_eq!(winners.len(), 1, "Expected exactly one winner: {reports:?}");
    let loser = reports.iter().find(|r| !r.outcome.is_prepared()).unwrap();
    assert_eq!(
        loser.to_string(),
        format!("{} cannot be prepared because sugar is not sufficient", loser.beverage)
    );
    assert_eq!(machine.item_quantities().unwrap()["sugar"], 20);

    machine.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_refill_after_depletion() {
    let machine = BeverageMachine::new();
    machine.init(config(1, &[("sugar", 100), ("water", 100)])).unwrap();

    let syrup = Beverage::new("syrup").with_ingredient("sugar", 100);
    machine.process(vec![syrup]).await.unwrap();
    assert!(machine.low_running_items().unwrap().contains("sugar"));

    let quantity = machine.refill("sugar", 200).unwrap();
    assert_eq!(quantity, 200);
    assert_eq!(machine.item_quantities().unwrap()["sugar"], 200);
    assert!(machine.low_running_items().unwrap().is_empty());

    // Refilling nothing changes nothing; unknown ingredients are ignored.
    assert_eq!(machine.refill("sugar", 0).unwrap(), 200);
    assert_eq!(machine.refill("cocoa", 50).unwrap(), 0);
    assert!(!machine.item_quantities().unwrap().contains_key("cocoa"));

    machine.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_operations_before_init_fail() {
    let machine = BeverageMachine::new();
    assert!(!machine.is_ready());

    let result = machine.process(vec![Beverage::new("tea")]).await;
    assert_eq!(result, Err(MachineError::NotReady));
    assert_eq!(machine.item_quantities(), Err(MachineError::NotReady));
    assert_eq!(machine.low_running_items(), Err(MachineError::NotReady));
    assert_eq!(machine.refill("sugar", 1), Err(MachineError::NotReady));
    assert!(machine.ledger().is_err());

    machine.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_init_rejects_bad_config_and_second_call() {
    let machine = BeverageMachine::new();

    assert_eq!(
        machine.init(config(0, &[("water", 1)])),
        Err(MachineError::Initialization(InitializationError::InvalidOutletCount(0)))
    );
    assert_eq!(
        machine.init(config(1, &[("water", -5)])),
        Err(MachineError::Initialization(InitializationError::NegativeQuantity {
            ingredient: "water".into(),
            quantity: -5
        }))
    );
    assert!(!machine.is_ready());

    machine.init(config(1, &[("water", 1)])).unwrap();
    assert_eq!(
        machine.init(config(1, &[("water", 1)])),
        Err(MachineError::Initialization(InitializationError::AlreadyInitialized))
    );

    machine.shutdown().await.unwrap();
}
