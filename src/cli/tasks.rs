//! Client subcommands: list, show, add, update, status, delete.
//!
//! Each command talks to a running server through [`HttpClient`], using the
//! same shell and table state the interactive view uses.

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use tracing::debug;

use super::{FormatArg, PriorityArg, SortArg, StatusArg, selection};
use crate::client::{ClientError, HttpClient, TaskApi};
use crate::shell::Shell;
use crate::types::TaskStatus;
use crate::view::render::{format_json, format_task_detail};
use crate::view::{
    DeleteConfirmation, OutputFormat, SortColumn, SortDirection, SortState, TaskFilter, TaskTable,
};

/// Arguments for the list subcommand
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show tasks with this status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only show tasks with this priority
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Case-insensitive text to match in title or description
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Column to sort by (default: created, newest first)
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: FormatArg,
}

impl ListArgs {
    /// Table state described by the flags.
    pub fn table(&self) -> TaskTable {
        let mut filter = TaskFilter::new()
            .with_status(selection(self.status))
            .with_priority(selection(self.priority));
        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }

        let sort = match self.sort.map(SortColumn::from) {
            None if !self.asc && !self.desc => SortState::default(),
            column => {
                let column = column.unwrap_or(SortState::default().column);
                let direction = if self.asc {
                    SortDirection::Asc
                } else if self.desc {
                    SortDirection::Desc
                } else {
                    column.first_direction()
                };
                SortState::new(column, direction)
            }
        };

        TaskTable::new().with_filter(filter).with_sort(sort)
    }
}

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task id
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: FormatArg,
}

/// Arguments for the add subcommand
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Priority (default: medium)
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Status (default: todo)
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,
}

/// Arguments for the update subcommand
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task id
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description (pass "" to clear)
    #[arg(short, long)]
    pub description: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// New priority
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
}

impl UpdateArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Arguments for the status subcommand
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Task id
    pub id: String,

    /// New status
    #[arg(value_enum)]
    pub status: StatusArg,
}

/// Arguments for the delete subcommand
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Task id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Shell over the API at `api_url`, without loading the list.
///
/// Single-task commands only need the server's answer; the shell merges it
/// into whatever list it holds.
fn shell(api_url: &str) -> Result<Shell<HttpClient>> {
    let client = HttpClient::new(api_url)?;
    debug!(api_url = %client.base_url(), "Connecting to task API");
    Ok(Shell::new(client))
}

/// Shell over the API at `api_url`, with the list loaded.
async fn connect(api_url: &str) -> Result<Shell<HttpClient>> {
    let mut shell = shell(api_url)?;
    if let Err(e) = shell.load().await {
        return Err(failure(&shell, e));
    }
    Ok(shell)
}

/// The shell's banner as an error, falling back to the client error.
fn failure<A: TaskApi>(shell: &Shell<A>, err: ClientError) -> anyhow::Error {
    match shell.error() {
        Some(banner) => anyhow!("{}", banner),
        None => request_error(err),
    }
}

fn request_error(err: ClientError) -> anyhow::Error {
    match err.detail() {
        Some(detail) => anyhow!("{}: {}", err, detail),
        None => anyhow::Error::new(err),
    }
}

pub async fn list(api_url: &str, args: &ListArgs) -> Result<()> {
    let shell = connect(api_url).await?;
    let table = args.table();

    match OutputFormat::from(args.format) {
        OutputFormat::Json => println!("{}", format_json(&table.rows(shell.tasks()))?),
        OutputFormat::Table => print!("{}", table.render(shell.tasks())),
    }
    Ok(())
}

pub async fn show(api_url: &str, args: &ShowArgs) -> Result<()> {
    let client = HttpClient::new(api_url)?;
    let task = client.get_task(&args.id).await.map_err(request_error)?;

    match OutputFormat::from(args.format) {
        OutputFormat::Json => println!("{}", format_json(&task)?),
        OutputFormat::Table => print!("{}", format_task_detail(&task)),
    }
    Ok(())
}

pub async fn add(api_url: &str, args: &AddArgs) -> Result<()> {
    let mut shell = shell(api_url)?;

    let form = shell.form_mut();
    form.title = args.title.clone();
    form.description = args.description.clone().unwrap_or_default();
    form.priority = args.priority.map(Into::into).unwrap_or_default();
    form.status = args.status.map(Into::into).unwrap_or_default();

    let task = match shell.submit_form().await {
        None => bail!("Title is required"),
        Some(Ok(task)) => task,
        Some(Err(e)) => return Err(failure(&shell, e)),
    };

    println!("Created task {}", task.id);
    Ok(())
}

/// Edit through the edit modal: open it on the current record, overwrite
/// the given fields, and submit the full record.
pub async fn update(api_url: &str, args: &UpdateArgs) -> Result<()> {
    if args.is_empty() {
        bail!("Nothing to update: pass at least one of --title, --description, --status, --priority");
    }

    let mut shell = shell(api_url)?;
    let task = shell
        .api()
        .get_task(&args.id)
        .await
        .map_err(request_error)?;

    let mut table = TaskTable::new();
    table.start_edit(&task);
    if let Some(form) = table.edit_form_mut() {
        if let Some(title) = &args.title {
            form.title = title.clone();
        }
        if let Some(description) = &args.description {
            form.description = description.clone();
        }
        if let Some(status) = args.status {
            form.status = status.into();
        }
        if let Some(priority) = args.priority {
            form.priority = priority.into();
        }
    }

    let action = table
        .submit_edit()
        .context("Title cannot be empty")?;
    if let Err(e) = shell.apply(action).await {
        return Err(failure(&shell, e));
    }

    println!("Updated task {}", args.id);
    Ok(())
}

pub async fn status(api_url: &str, args: &StatusArgs) -> Result<()> {
    let mut shell = shell(api_url)?;
    let status = TaskStatus::from(args.status);
    let action = TaskTable::new().change_status(args.id.clone(), status);
    if let Err(e) = shell.apply(action).await {
        return Err(failure(&shell, e));
    }

    println!("Task {} is now {}", args.id, status.label());
    Ok(())
}

pub async fn delete(api_url: &str, args: &DeleteArgs) -> Result<()> {
    let mut shell = shell(api_url)?;
    let mut table = TaskTable::new();
    table.request_delete(args.id.clone());

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "{}: {}",
                DeleteConfirmation::TITLE,
                DeleteConfirmation::MESSAGE
            ))
            .default(false)
            .interact()?;

    if !confirmed {
        table.cancel_delete();
        println!("Cancelled");
        return Ok(());
    }

    if let Some(action) = table.confirm_delete() {
        if let Err(e) = shell.apply(action).await {
            return Err(failure(&shell, e));
        }
    }

    println!("Deleted task {}", args.id);
    Ok(())
}
