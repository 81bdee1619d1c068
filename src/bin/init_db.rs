use std::error::Error;
use std::path::Path;

use clap::Parser;
use rusqlite::Connection;

use ledger_rs::initialize_db;

/// Create the ledger database and its transactions table if they do not exist.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database.
    #[arg(long, short, default_value = "transactions.db")]
    db_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);

    println!("Opening database at {db_path:#?}");
    let conn = Connection::open(db_path)?;

    initialize_db(&conn)?;
    println!("Transactions table created or already exists.");

    conn.close().map_err(|(_, error)| error)?;
    println!("Database connection closed.");

    Ok(())
}
