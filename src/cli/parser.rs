use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};

/// Command-line interface definition for healthtwin
#[derive(Parser)]
#[command(
    name = "healthtwin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log health events, track medication adherence and compute a digital twin risk score",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor")]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add or list timeline events
    Event {
        #[command(subcommand)]
        action: EventCommand,
    },

    /// Manage medication schedules and daily adherence
    Med {
        #[command(subcommand)]
        action: MedCommand,
    },

    /// Compute or show the digital twin
    Twin {
        #[command(subcommand)]
        action: TwinCommand,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup into a .zip
        #[arg(long)]
        compress: bool,
    },

    /// Export timeline events or medications
    Export {
        /// Collection to export
        #[arg(long, value_enum, default_value = "events")]
        what: ExportTarget,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Log a new timeline event
    Add {
        /// Event id (random UUID when omitted)
        #[arg(long)]
        id: Option<String>,

        /// appointment, plate_scan, soap_note, emergency or chat
        #[arg(long)]
        kind: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        summary: Option<String>,

        /// chat, voice, system or manual
        #[arg(long, default_value = "manual")]
        source: String,

        /// When the event happened (RFC 3339, default: now)
        #[arg(long, value_name = "TIMESTAMP")]
        at: Option<String>,
    },

    /// List the most recently logged events
    List {
        /// How many events to show (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Only events of this kind
        #[arg(long)]
        kind: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MedCommand {
    /// Add a medication schedule
    Add {
        /// Medication id (random UUID when omitted)
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        name: String,

        #[arg(long)]
        dosage: String,

        #[arg(long)]
        frequency: String,

        /// Comma separated dose times, e.g. 08:00,20:00
        #[arg(long)]
        times: String,

        /// Store the medication as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// List medication schedules
    List,

    /// Remove a medication and its reminders
    Remove { id: String },

    /// Toggle today's "taken" flag
    Take { id: String },

    /// Activate a medication (reschedules reminders)
    Activate { id: String },

    /// Deactivate a medication (cancels reminders)
    Deactivate { id: String },

    /// Mark every medication as not taken today
    Reset,

    /// List scheduled reminders
    Reminders,
}

#[derive(Subcommand)]
pub enum TwinCommand {
    /// Recompute the twin from stored events and medications
    Recompute,

    /// Show the last computed twin
    Show,
}
