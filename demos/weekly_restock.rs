//! # Weekly Restock Example
//!
//! This example demonstrates the full pantry-tracking loop: seed a canonical
//! ingredient set, ingest a couple of parsed receipts, advance the daily
//! decay tick for a week, and derive the resulting shopping list. It finishes
//! by saving the store to a temporary directory and loading it back.

use chrono::NaiveDate;
use pantry::pantry::Pantry;
use pantry::pantry_model::{ParsedReceipt, ReceiptItem};
use pantry::persistence;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("🛒 Weekly Restock Example");
    println!("=========================\n");

    let canonical = [
        "Milk", "Eggs", "Rice", "Butter", "Coffee", "Pasta", "Tomatoes",
    ];
    let mut pantry = Pantry::new(canonical, ["Milk", "Coffee"]);

    // Week 1 shop
    let receipt = ParsedReceipt {
        purchased_on: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        items: vec![
            line("Organic Whole Milk 1L", 4.50),
            line("Free Range Eggs x12", 5.25),
            line("Ground Coffee 500g", 9.80),
            line("Paper Towels", 3.99),
        ],
    };
    report("Week 1 receipt", &pantry.record_receipt(&receipt));

    // Week 2 shop: repeat purchases establish consumption rates
    let receipt = ParsedReceipt {
        purchased_on: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        items: vec![
            line("Milk 2%", 5.00),
            line("Ground Coffee 500g", 9.80),
            line("Basmati Rice 5kg", 7.40),
        ],
    };
    report("Week 2 receipt", &pantry.record_receipt(&receipt));

    // A week of daily decay ticks
    for _ in 0..7 {
        pantry.update_amount();
    }

    println!("\nShopping list after one week:");
    for name in pantry.make_shopping_list() {
        let record = pantry.record(&name).expect("listed names have records");
        println!(
            "  - {} (on hand: {:.2}, rate: {:.2}/day)",
            name,
            record.current_amount,
            record.rate.unwrap_or(0.0)
        );
    }

    // Round-trip the store through disk
    let dir = std::env::temp_dir().join("pantry-weekly-restock");
    persistence::save(&pantry, &dir)?;
    let restored = persistence::load(&dir)?;
    println!(
        "\nSaved and reloaded {} ingredients from {}",
        restored.len(),
        dir.display()
    );

    Ok(())
}

fn line(description: &str, price: f64) -> ReceiptItem {
    ReceiptItem {
        description: description.to_string(),
        price,
    }
}

fn report(label: &str, outcomes: &[pantry::pantry_model::AddOutcome]) {
    let recorded = outcomes.iter().filter(|o| o.is_recorded()).count();
    println!(
        "{}: {} of {} line items recorded",
        label,
        recorded,
        outcomes.len()
    );
}
