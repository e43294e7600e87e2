//! CLI command definitions for tasky
//!
//! `serve` runs the API; the other subcommands are a terminal client for a
//! running server.

pub mod serve;
pub mod tasks;

use clap::{Parser, Subcommand, ValueEnum};
use serve::ServeArgs;
use tasks::{AddArgs, DeleteArgs, ListArgs, ShowArgs, StatusArgs, UpdateArgs};

use crate::types::{TaskPriority, TaskStatus};
use crate::view::{OutputFormat, Selection, SortColumn};

/// Task status as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Todo,
    InProgress,
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Completed => TaskStatus::Completed,
        }
    }
}

/// Task priority as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => TaskPriority::Low,
            PriorityArg::Medium => TaskPriority::Medium,
            PriorityArg::High => TaskPriority::High,
        }
    }
}

/// Convert an optional CLI filter value into a table filter.
pub fn selection<A, T: From<A>>(arg: Option<A>) -> Selection<T> {
    arg.map_or(Selection::All, |a| Selection::Only(T::from(a)))
}

/// Sortable column as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Title,
    Description,
    Status,
    Priority,
    Created,
    Updated,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SortColumn::Title,
            SortArg::Description => SortColumn::Description,
            SortArg::Status => SortColumn::Status,
            SortArg::Priority => SortColumn::Priority,
            SortArg::Created => SortColumn::CreatedAt,
            SortArg::Updated => SortColumn::UpdatedAt,
        }
    }
}

/// Output format for list and show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// In-memory task manager: API server and terminal client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API root for client commands (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the API server (default if no subcommand given)
    Serve(ServeArgs),

    /// List tasks with optional filters and sorting
    List(ListArgs),

    /// Show one task
    Show(ShowArgs),

    /// Create a task
    Add(AddArgs),

    /// Edit a task's fields
    Update(UpdateArgs),

    /// Change a task's status
    Status(StatusArgs),

    /// Delete a task (asks for confirmation)
    Delete(DeleteArgs),
}
