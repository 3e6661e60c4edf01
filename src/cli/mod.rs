pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::EntryId;

#[derive(Parser)]
#[command(name = "radiation")]
#[command(about = "A terminal reader for unread feed entries", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/radiation/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse and read unread entries (default)
    Read,
    /// Print the unread list and exit
    List,
    /// Render a single entry without marking it read
    Show {
        /// Server-assigned entry id
        id: EntryId,
    },
    /// Write a config template to fill in
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["radiation"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_show_with_global_config() {
        let cli = Cli::try_parse_from(["radiation", "show", "42", "--config", "/tmp/r.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Show { id: 42 }));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/r.toml")));
    }

    #[test]
    fn test_show_requires_numeric_id() {
        assert!(Cli::try_parse_from(["radiation", "show", "abc"]).is_err());
    }
}
