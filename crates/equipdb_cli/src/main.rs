//! EquipDB CLI
//!
//! Command-line front end for an equipment inventory file.
//!
//! # Commands
//!
//! - `add` / `update` / `delete` - Manage records
//! - `show` / `list` / `search` - Read records
//! - `log-maintenance` - Append to a record's maintenance history
//! - `export` - Write a copy of the inventory elsewhere
//! - `inspect` - Display inventory statistics
//! - `verify` - Check the inventory file for invariant violations

mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use commands::records::FieldArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Default backing file, as used by existing installations.
const DEFAULT_PATH: &str = "equipments_data.json";

/// EquipDB equipment inventory tools.
#[derive(Parser)]
#[command(name = "equipdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the inventory file
    #[arg(global = true, short, long, default_value = DEFAULT_PATH)]
    path: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Editable record fields as command-line flags.
#[derive(Args)]
struct FieldFlags {
    /// Equipment name
    #[arg(long)]
    name: Option<String>,

    /// Equipment category
    #[arg(long)]
    category: Option<String>,

    /// Manufacturer
    #[arg(long)]
    manufacturer: Option<String>,

    /// Serial number
    #[arg(long)]
    serial_number: Option<String>,

    /// Purchase date (free text)
    #[arg(long)]
    purchase_date: Option<String>,

    /// Status (operational, under-maintenance, out-of-service, calibrating)
    #[arg(long)]
    status: Option<String>,

    /// Location
    #[arg(long)]
    location: Option<String>,
}

impl From<FieldFlags> for FieldArgs {
    fn from(flags: FieldFlags) -> Self {
        Self {
            name: flags.name,
            category: flags.category,
            manufacturer: flags.manufacturer,
            serial_number: flags.serial_number,
            purchase_date: flags.purchase_date,
            status: flags.status,
            location: flags.location,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new record
    Add {
        #[command(flatten)]
        fields: FieldFlags,
    },

    /// Update a record; omitted fields keep their current values
    Update {
        /// Record id
        id: u64,

        #[command(flatten)]
        fields: FieldFlags,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: u64,
    },

    /// Show a single record
    Show {
        /// Record id
        id: u64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List all records
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search name, category and manufacturer (case-insensitive)
    Search {
        /// Text to look for
        term: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Append an entry to a record's maintenance history
    LogMaintenance {
        /// Record id
        id: u64,

        /// What was done
        note: String,

        /// When it was done (free text)
        #[arg(short, long, default_value = "")]
        date: String,
    },

    /// Write a copy of the inventory to another file
    Export {
        /// Destination file
        output: PathBuf,
    },

    /// Display inventory statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check the inventory file for invariant violations
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = cli.path.as_path();
    match cli.command {
        Commands::Add { fields } => commands::records::add(path, fields.into())?,
        Commands::Update { id, fields } => commands::records::update(path, id, fields.into())?,
        Commands::Delete { id } => commands::records::delete(path, id)?,
        Commands::Show { id, format } => commands::records::show(path, id, &format)?,
        Commands::List { format } => commands::records::list(path, &format)?,
        Commands::Search { term, format } => commands::records::search(path, &term, &format)?,
        Commands::LogMaintenance { id, note, date } => {
            commands::records::log_maintenance(path, id, &note, &date)?;
        }
        Commands::Export { output } => commands::export::run(path, &output)?,
        Commands::Inspect { format } => commands::inspect::run(path, &format)?,
        Commands::Verify => commands::verify::run(path)?,
        Commands::Version => {
            println!("EquipDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("EquipDB Core v{}", equipdb_core::VERSION);
        }
    }

    Ok(())
}
