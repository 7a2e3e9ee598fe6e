use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{categorize, write_export, BoardState, GatewayClient};
use shared::{
    domain::{DragEnd, TaskSet},
    export::{export_json, import_json, ExportFormat},
};
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(name = "taskboard", about = "Prioritize free-text tasks through the prompt gateway")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Categorize newline-separated tasks into high/medium/low buckets.
    Categorize {
        #[arg(long, env = "TASKBOARD_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server_url: String,
        /// Task file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: String,
        #[arg(long)]
        json_out: Option<PathBuf>,
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
    /// Move a task onto another task's position within its bucket.
    Reorder {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        active: String,
        #[arg(long)]
        over: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Convert an exported tasks.json to JSON or CSV.
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Categorize {
            server_url,
            input,
            json_out,
            csv_out,
        } => {
            let raw_tasks = read_input(&input)?;
            let tasks = run_categorize(&server_url, &raw_tasks).await?;
            if let Some(path) = json_out {
                write_export(&path, ExportFormat::Json, &tasks)?;
            }
            if let Some(path) = csv_out {
                write_export(&path, ExportFormat::Csv, &tasks)?;
            }
            println!("{}", export_json(&tasks)?);
        }
        Command::Reorder {
            input,
            active,
            over,
            out,
        } => {
            let tasks = run_reorder(&input, DragEnd { active, over })?;
            emit(&tasks, ExportFormat::Json, out.as_deref())?;
        }
        Command::Export { input, format, out } => {
            let tasks = load_tasks(&input)?;
            emit(&tasks, format.into(), out.as_deref())?;
        }
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    let raw = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read tasks from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read '{input}'"))?
    };
    if raw.trim().is_empty() {
        bail!("no tasks given; enter one task per line");
    }
    Ok(raw)
}

async fn run_categorize(server_url: &str, raw_tasks: &str) -> Result<TaskSet> {
    let client = GatewayClient::new(server_url)?;
    let state = BoardState::default().begin_submission();
    let outcome = categorize(&client, raw_tasks).await;
    let state = state.finish_submission(outcome);
    if let Some(error) = state.error {
        bail!(error);
    }
    Ok(state.tasks)
}

fn load_tasks(path: &Path) -> Result<TaskSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    import_json(&raw).with_context(|| format!("'{}' is not a tasks.json export", path.display()))
}

fn run_reorder(input: &Path, event: DragEnd) -> Result<TaskSet> {
    Ok(load_tasks(input)?.reorder(&event))
}

fn emit(tasks: &TaskSet, format: ExportFormat, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            write_export(path, format, tasks)?;
        }
        None => println!("{}", format.render(tasks)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("taskboard_cli_{suffix}_{name}"));
        fs::write(&path, contents).expect("write");
        path
    }

    #[test]
    fn parses_categorize_arguments() {
        let cli = Cli::try_parse_from([
            "taskboard",
            "categorize",
            "--server-url",
            "http://localhost:4000",
            "--csv-out",
            "tasks.csv",
        ])
        .expect("parse");
        let Command::Categorize {
            server_url,
            input,
            json_out,
            csv_out,
        } = cli.command
        else {
            panic!("expected categorize");
        };
        assert_eq!(server_url, "http://localhost:4000");
        assert_eq!(input, "-");
        assert!(json_out.is_none());
        assert_eq!(csv_out, Some(PathBuf::from("tasks.csv")));
    }

    #[test]
    fn export_requires_known_format() {
        let parsed = Cli::try_parse_from([
            "taskboard", "export", "--input", "t.json", "--format", "xml",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn reorder_reads_export_and_moves_task() {
        let path = temp_file(
            "reorder.json",
            r#"{"highPriority":["a","b","c"],"mediumPriority":[],"lowPriority":["z"]}"#,
        );
        let tasks = run_reorder(&path, DragEnd::new("c", Some("a"))).expect("reorder");
        assert_eq!(tasks.high_priority, vec!["c", "a", "b"]);
        assert_eq!(tasks.low_priority, vec!["z"]);
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn load_tasks_rejects_non_export_files() {
        let path = temp_file("bad.json", "High,A");
        assert!(load_tasks(&path).is_err());
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn blank_task_file_is_rejected() {
        let path = temp_file("blank.txt", "  \n\n");
        let err = read_input(path.to_str().expect("utf8 path")).expect_err("should fail");
        assert!(err.to_string().contains("no tasks"));
        fs::remove_file(path).expect("cleanup");
    }

    #[tokio::test]
    async fn categorize_against_unreachable_gateway_reports_failure() {
        let err = run_categorize("http://127.0.0.1:9", "a task")
            .await
            .expect_err("should fail");
        assert_eq!(err.to_string(), client_core::REQUEST_FAILED_MESSAGE);
    }
}
