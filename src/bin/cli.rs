//! rosterdb CLI
//!
//! One-shot and interactive commands over an employee data file.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use rosterdb::{DataFile, EmployeeRecord, RosterError, Store, StoreBuilder};

/// rosterdb CLI
#[derive(Parser, Debug)]
#[command(name = "rosterdb")]
#[command(about = "Random-access employee record store")]
#[command(version)]
struct Args {
    /// Path to the employee data file
    #[arg(short, long, default_value = "employeeData.dat")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all employee ids in file order
    List,

    /// Print one employee record
    Get {
        /// The employee id to read
        id: i32,
    },

    /// Raise an employee's salary in place
    Raise {
        /// The employee id to update
        id: i32,

        /// Amount added to the current salary
        #[arg(long, default_value_t = 10_000.0)]
        amount: f64,
    },

    /// Write a synthetic data file for trying the store out
    Seed {
        /// Number of records to generate
        #[arg(default_value_t = 10)]
        count: u32,
    },

    /// Prompt for ids and raise salaries until a non-positive id is entered
    Interactive {
        /// Amount added per accepted id
        #[arg(long, default_value_t = 10_000.0)]
        amount: f64,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rosterdb=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> rosterdb::Result<()> {
    match args.command {
        Commands::List => {
            let store = Store::open(&args.file)?;
            if store.is_empty() {
                println!("Zero records found in file.");
                return Ok(());
            }
            for id in store.ids() {
                println!("{}", id);
            }
        }

        Commands::Get { id } => {
            let mut store = Store::open(&args.file)?;
            print_record(&store.read_record(id)?);
        }

        Commands::Raise { id, amount } => {
            let mut store = Store::open(&args.file)?;
            raise(&mut store, id, amount)?;
        }

        Commands::Seed { count } => {
            let data_file = seed(&args.file, count)?;
            println!(
                "Wrote {} records ({} bytes) to {}",
                data_file.record_count,
                data_file.file_size,
                data_file.path.display()
            );
        }

        Commands::Interactive { amount } => {
            let mut store = Store::open(&args.file)?;
            interactive(&mut store, amount)?;
        }
    }

    Ok(())
}

/// The original interactive session: print ids, prompt for one, raise its
/// salary, re-read to show the patch landed. Non-numeric input is a
/// recoverable prompt error; any non-positive id is the quit sentinel.
fn interactive(store: &mut Store, amount: f64) -> rosterdb::Result<()> {
    if store.is_empty() {
        println!("Zero records found in file. Terminating");
        return Ok(());
    }

    println!("Printing all employee IDs:");
    for id in store.ids() {
        println!("{}", id);
    }
    println!("Enter an employee ID to modify that employee's salary, or 0 to quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        let id = match input.parse::<i32>() {
            Ok(id) => id,
            Err(_) => {
                println!("invalid input given \"{}\"", input);
                continue;
            }
        };

        if id <= 0 {
            println!("0 entered or invalid ID. Terminating");
            break;
        }

        match raise(store, id, amount) {
            Ok(()) => {}
            Err(RosterError::RecordNotFound { id }) => {
                println!("No employee with ID {}", id);
            }
            Err(e) => return Err(e),
        }

        println!("Enter another ID or 0 to quit");
    }

    Ok(())
}

/// Raise one salary and print before/after snapshots, re-reading the file
/// after the patch for verification
fn raise(store: &mut Store, id: i32, amount: f64) -> rosterdb::Result<()> {
    let before = store.read_record(id)?;
    println!("Employee data before modification:");
    print_record(&before);

    store.update_salary(id, before.salary + amount)?;

    let after = store.read_record(id)?;
    println!("Employee data after modification:");
    print_record(&after);

    Ok(())
}

/// Generate a deterministic synthetic data file
fn seed(path: &Path, count: u32) -> rosterdb::Result<DataFile> {
    const FIRST_NAMES: [&str; 8] = [
        "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Margaret", "Tony",
    ];
    const LAST_NAMES: [&str; 8] = [
        "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Hamilton", "Hoare",
    ];

    let mut builder = StoreBuilder::new();
    for i in 0..count {
        let id = 101 + i as i32;
        let salary = 40_000.0 + f64::from(i % 20) * 1_375.0;
        let first = FIRST_NAMES[i as usize % FIRST_NAMES.len()];
        let last = LAST_NAMES[(i as usize / FIRST_NAMES.len()) % LAST_NAMES.len()];
        builder.add(EmployeeRecord::new(id, salary, first, last))?;
    }

    builder.finish(path)
}

fn print_record(record: &EmployeeRecord) {
    println!(
        "ID: {}, Salary: {:.2}, FirstName: {}, LastName: {}",
        record.id, record.salary, record.first_name, record.last_name
    );
}
