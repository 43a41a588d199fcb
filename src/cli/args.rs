//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::NodeId;

/// List the employees who share an employee's office
#[derive(Parser, Debug)]
#[command(name = "officemates")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Employee id to look up
    pub employee_id: NodeId,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// SQLite database file (`:memory:` for a throwaway store)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    /// JSON file with the hierarchy records to import
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "skip_import")]
    pub data: Option<PathBuf>,

    /// Query the existing store without importing first
    #[arg(long)]
    pub skip_import: bool,

    /// Also print the office subtree
    #[arg(long)]
    pub tree: bool,
}
