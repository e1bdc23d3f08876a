use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for worktimer
#[derive(Parser)]
#[command(
    name = "worktimer",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal worktime tracker: start/stop a timer, edit entries and review monthly totals",
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
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start the work timer
    Start {
        #[arg(long, short, default_value = "", help = "What you are working on")]
        comment: String,
    },

    /// Stop the running timer
    Stop,

    /// Show the running timer and refresh its end time
    Status,

    /// Add a finished entry
    Add {
        #[arg(long = "date", help = "Date of the entry (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long = "in", help = "Start time (HH:MM, default now)")]
        start: Option<String>,

        #[arg(long = "out", help = "End time (HH:MM, default start)")]
        end: Option<String>,

        #[arg(long, short, default_value = "", help = "Comment")]
        comment: String,
    },

    /// Edit cells of an entry
    Edit {
        /// Record id, as shown by `list`
        id: i64,

        #[arg(long = "date", help = "New date (YYYY-MM-DD), times are kept")]
        date: Option<String>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long, short, help = "New comment")]
        comment: Option<String>,
    },

    /// Delete an entry
    Del {
        /// Record id, as shown by `list`
        id: i64,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show the monthly grid
    List {
        #[arg(long, short, help = "Month to show (YYYY-MM, default current month)")]
        month: Option<String>,
    },

    /// Export the rows of a month
    Export {
        #[arg(long, value_enum, help = "Output format")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(long, short, help = "Month to export (YYYY-MM, default current month)")]
        month: Option<String>,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },
}
