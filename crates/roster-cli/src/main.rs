//! # roster CLI entry point
//!
//! Parses command-line arguments, loads the configuration, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roster_cli::contacts::{run_contacts, ContactsArgs};
use roster_cli::group_diff::{run_group_diff, GroupDiffArgs};
use roster_cli::load_config;

/// Roster CLI
///
/// Resolves address books against a directory of network identities and
/// describes changes between group snapshots.
#[derive(Parser, Debug)]
#[command(name = "roster", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize, sort and resolve an address book; print JSON.
    Contacts(ContactsArgs),

    /// Describe the change between two snapshots of a group.
    GroupDiff(GroupDiffArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("roster CLI starting");

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Contacts(args) => run_contacts(args, &config),
        Commands::GroupDiff(args) => run_group_diff(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_contacts() {
        let cli = Cli::try_parse_from([
            "roster",
            "contacts",
            "--contacts",
            "book.yaml",
            "--directory",
            "dir.yaml",
            "--ordering",
            "last-first",
            "--region",
            "GB",
        ])
        .unwrap();
        let Commands::Contacts(args) = cli.command else {
            panic!("expected contacts subcommand");
        };
        assert_eq!(args.contacts, PathBuf::from("book.yaml"));
        assert_eq!(args.directory, PathBuf::from("dir.yaml"));
        assert_eq!(
            args.ordering,
            Some(roster_cli::contacts::OrderingArg::LastFirst)
        );
        assert_eq!(args.region.as_deref(), Some("GB"));
        assert!(args.local_number.is_none());
    }

    #[test]
    fn cli_parse_contacts_requires_files() {
        assert!(Cli::try_parse_from(["roster", "contacts", "--contacts", "book.yaml"]).is_err());
    }

    #[test]
    fn cli_parse_group_diff() {
        let cli = Cli::try_parse_from([
            "roster",
            "group-diff",
            "--old",
            "old.json",
            "--new",
            "new.json",
            "--local-member",
            "me",
            "--info",
        ])
        .unwrap();
        let Commands::GroupDiff(args) = cli.command else {
            panic!("expected group-diff subcommand");
        };
        assert_eq!(args.old, Some(PathBuf::from("old.json")));
        assert_eq!(args.new, PathBuf::from("new.json"));
        assert_eq!(args.local_member.as_deref(), Some("me"));
        assert!(args.info);
        assert!(args.names.is_none());
    }

    #[test]
    fn cli_parse_group_diff_requires_new() {
        assert!(Cli::try_parse_from(["roster", "group-diff", "--old", "old.json"]).is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let base = ["roster", "group-diff", "--new", "n.json"];
        assert_eq!(Cli::try_parse_from(base).unwrap().verbose, 0);
        let cli = Cli::try_parse_from(["roster", "-vv", "group-diff", "--new", "n.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "roster",
            "group-diff",
            "--new",
            "n.json",
            "--config",
            "roster.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("roster.yaml")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["roster"]).is_err());
    }
}
