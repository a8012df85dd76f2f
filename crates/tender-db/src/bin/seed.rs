//! # Seed Data Generator
//!
//! Fills the transaction log with sample batches for dashboard development.
//!
//! ## Usage
//! ```bash
//! cargo run -p tender-db --bin seed
//!
//! # Specify database path
//! cargo run -p tender-db --bin seed -- --db ./data/tender.db
//! ```
//!
//! Outputs are computed by the change engine with the default rules, so
//! the log always matches what the API would have returned. Batches are
//! stamped one hour apart, oldest first, ending an hour before now.

use chrono::{Duration, Utc};
use std::env;
use tender_core::ChangeCalculator;
use tender_db::{Database, DbConfig};

/// Sample batches, oldest first.
const SAMPLE_BATCHES: &[&str] = &[
    "2.12,3.00\n\n1.97,2.00\n\n3.33,5.00",
    "5.00,10.00",
    "1.50,2.00\n3.25,5.00",
    "0.99,1.00",
    "7.77,10.00\n12.34,15.00",
    "4.50,5.00",
    "9.99,20.00",
    "0.01,1.00\n15.00,20.00\n2.50,3.00",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./tender_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tender Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./tender_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tender Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.transactions().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} transactions", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let calculator = ChangeCalculator::default();
    let now = Utc::now();
    let total = SAMPLE_BATCHES.len() as i64;

    for (index, batch) in SAMPLE_BATCHES.iter().enumerate() {
        let input = batch.trim();
        let output = calculator.process_batch(input);
        let created_at = now - Duration::hours(total - index as i64);

        db.transactions().insert_at(input, &output, created_at).await?;
        println!("  {} → {:?}", input.replace('\n', " | "), output);
    }

    println!();
    println!("✓ Seeded {} transactions", SAMPLE_BATCHES.len());

    db.close().await;
    Ok(())
}
