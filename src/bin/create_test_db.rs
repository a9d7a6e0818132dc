use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use tenge_categories::{
    CategoryTitle, NewCategory, NewTransaction, create_category, create_transaction, format_amount,
    initialize_db,
};

/// A utility for creating a test database with sample categories and transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// (title, raw amount, icon, color, row)
const CATEGORIES: [(&str, &str, &str, &str, i64); 6] = [
    ("Salary", "450000", "briefcase", "green", 1),
    ("Freelance", "85000", "coins", "purple", 1),
    ("Wallet", "32500", "wallet", "blue", 2),
    ("Card", "120000.5", "credit-card", "pink", 2),
    ("Groceries", "64000", "shopping-cart", "orange", 3),
    ("Transport", "12000", "car", "red", 3),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");

    for (title, amount, icon, color, row) in CATEGORIES {
        create_category(
            NewCategory {
                title: CategoryTitle::new(title)?,
                amount: format_amount(amount),
                icon: icon.to_owned(),
                color: color.to_owned(),
                row: Some(row),
            },
            &conn,
        )?;
    }

    println!("Creating transactions...");

    let transactions = [
        ("Salary", "Card", 450000.0, date!(2025 - 03 - 01)),
        ("Freelance", "Wallet", 85000.0, date!(2025 - 03 - 04)),
        ("Card", "Groceries", 21500.0, date!(2025 - 03 - 06)),
        ("Wallet", "Transport", 4000.0, date!(2025 - 03 - 07)),
        ("Card", "Wallet", 30000.0, date!(2025 - 03 - 10)),
        ("Wallet", "Groceries", 18250.5, date!(2025 - 03 - 12)),
    ];

    for (from_user, to_user, amount, date) in transactions {
        create_transaction(
            NewTransaction {
                from_user: from_user.to_owned(),
                to_user: to_user.to_owned(),
                amount,
                date,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
