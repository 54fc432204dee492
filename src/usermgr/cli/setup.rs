use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use usermgr::api::LOCATION;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Templated terminal output
    #[default]
    Text,
    /// The listing view as JSON, the way a host renderer receives it
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "usermgr", bin_name = "usermgr", version)]
#[command(about = "List, filter and delete file-backed user accounts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Accounts directory (overrides USERMGR_ACCOUNTS and the config file)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub accounts: Option<PathBuf>,

    /// Cache directory (overrides USERMGR_CACHE)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub cache: Option<PathBuf>,

    /// Directory holding config.json (overrides USERMGR_CONFIG)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List accounts (default)
    #[command(alias = "ls")]
    List {
        /// Filter expression, evaluated with the account bound as `user`
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Page to show; out of range values are clamped
        #[arg(short, long, allow_hyphen_values = true)]
        page: Option<String>,

        /// Layout: grid or list (defaults to the configured style)
        #[arg(long, value_name = "STYLE")]
        list_style: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Delete an account
    #[command(alias = "rm")]
    Delete {
        username: String,

        /// Where to send the caller afterwards
        #[arg(long, default_value = LOCATION)]
        referrer: String,
    },

    /// Print all usernames, one per line
    Usernames,

    /// Print the admin navigation entry as JSON
    Nav,

    /// Print the effective configuration as JSON
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::List {
            filter: String::new(),
            page: None,
            list_style: None,
            output: OutputFormat::Text,
        }
    }
}
