//! `tasklane`: command-line client for a Tasklane server.
//!
//! Usage:
//!
//! ```text
//! tasklane register --name Ada --email ada@example.com --password ...
//! tasklane list --filter pending
//! tasklane add "Write report" --priority high --deadline 2024-06-01
//! tasklane toggle <task-id>
//! ```
//!
//! The session from `register` or `login` is kept in `--session-dir` and
//! reused by later invocations until `logout`.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr, bail};
use tasklane::client::{
    SessionFile, SessionHolder, TaskApiClient, TaskBoard, TaskDraft, TaskPatch, TaskRecord,
};
use tasklane::config::{ClientConfig, status_filter_parser};
use tasklane::projection::StatusFilter;
use tasklane::task::domain::TaskStatus;
use tasklane::telemetry;
use uuid::Uuid;

/// Tasklane command-line client.
#[derive(Debug, Parser)]
#[command(name = "tasklane", about = "Manage your Tasklane tasks")]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and sign in.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Login email address.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long, env = "TASKLANE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in to an existing account.
    Login {
        /// Login email address.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long, env = "TASKLANE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show tasks by priority, deadline, then newest.
    List {
        /// Which tasks to show.
        #[arg(long, default_value = "all", value_parser = status_filter_parser())]
        filter: StatusFilter,
    },
    /// Add a task.
    Add {
        /// Task title.
        title: String,
        /// Longer description.
        #[arg(long)]
        description: Option<String>,
        /// Priority: low, medium, or high.
        #[arg(long)]
        priority: Option<String>,
        /// Category label.
        #[arg(long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Deadline (YYYY-MM-DD).
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Change fields of a task.
    Edit {
        /// Task identifier.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New status: pending or completed.
        #[arg(long)]
        status: Option<String>,
        /// New priority: low, medium, or high.
        #[arg(long)]
        priority: Option<String>,
        /// New category label.
        #[arg(long)]
        category: Option<String>,
        /// New start date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// New deadline (YYYY-MM-DD).
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Flip a task between pending and completed.
    Toggle {
        /// Task identifier.
        id: Uuid,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init("warn");
    let cli = Cli::parse();

    let file = SessionFile::open(&cli.config.session_dir).wrap_err("cannot open session directory")?;
    let holder = SessionHolder::new(file);
    let mut client = TaskApiClient::new(cli.config.server.as_str())?;
    if let Some(session) = holder.restore()? {
        client.set_token(Some(session.token));
    }

    let mut out = io::stdout().lock();
    run(cli.command, &client, &holder, &mut out).await
}

async fn run(
    command: Command,
    client: &TaskApiClient,
    holder: &SessionHolder,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let session = client.register(&name, &email, &password).await?;
            writeln!(out, "Welcome, {}! You are signed in.", session.user.name)?;
            holder.establish(session)?;
        }
        Command::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            writeln!(out, "Signed in as {}.", session.user.name)?;
            holder.establish(session)?;
        }
        Command::Logout => {
            holder.clear()?;
            writeln!(out, "Signed out.")?;
        }
        Command::Whoami => match holder.current()? {
            Some(session) => writeln!(
                out,
                "{} <{}> ({})",
                session.user.name, session.user.email, session.user.id
            )?,
            None => writeln!(out, "Not signed in.")?,
        },
        Command::List { filter } => list(client, filter, out).await?,
        Command::Add {
            title,
            description,
            priority,
            category,
            start_date,
            deadline,
        } => {
            let draft = TaskDraft {
                title,
                description,
                priority,
                category,
                start_date,
                deadline,
            };
            let task = client.create_task(&draft).await?;
            writeln!(out, "Added {}", task.id)?;
        }
        Command::Edit {
            id,
            title,
            description,
            status,
            priority,
            category,
            start_date,
            deadline,
        } => {
            let patch = TaskPatch {
                title,
                description,
                status,
                priority,
                category,
                start_date,
                deadline,
            };
            if patch == TaskPatch::default() {
                bail!("nothing to change; pass at least one field");
            }
            let task = client.update_task(id, &patch).await?;
            write_task(out, &task)?;
        }
        Command::Toggle { id } => {
            let task = client.toggle_task(id).await?;
            write_task(out, &task)?;
        }
        Command::Delete { id } => {
            client.delete_task(id).await?;
            writeln!(out, "Task removed")?;
        }
    }
    Ok(())
}

async fn list(client: &TaskApiClient, filter: StatusFilter, out: &mut impl Write) -> Result<()> {
    let mut board = TaskBoard::new();
    board.set_filter(filter);
    let ticket = board.begin_refresh();
    let snapshot = client.list_tasks().await.wrap_err("failed to fetch tasks")?;
    board.apply(ticket, snapshot);

    let visible = board.visible();
    if visible.is_empty() {
        writeln!(out, "No tasks found. Add one!")?;
    }
    for task in &visible {
        write_task(out, task)?;
    }
    Ok(())
}

fn write_task(out: &mut impl Write, task: &TaskRecord) -> io::Result<()> {
    let done = if task.status == Some(TaskStatus::Completed) {
        'x'
    } else {
        ' '
    };
    let priority = task.priority.map_or("?", |priority| priority.as_str());
    let due = task
        .deadline
        .map_or_else(|| "No Deadline".to_owned(), |date| format!("Due: {date}"));
    writeln!(
        out,
        "[{done}] {priority:<6} {title}  ({due})  {id}",
        title = task.title,
        id = task.id
    )?;
    if let Some(category) = task.category.as_deref().filter(|category| !category.is_empty()) {
        writeln!(out, "           #{category}")?;
    }
    Ok(())
}
