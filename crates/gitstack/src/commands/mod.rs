//! CLI command implementations
//!
//! Every stack command runs inside one session: load the stack file, apply the
//! command, prune and write back, then print the stack. The write-back happens
//! even when the command fails.

pub mod add;
pub mod drop;
pub mod select;
pub mod show;

use std::path::PathBuf;

use gitstack_core::{FileStore, GitCli, GitStackError, Session, Stack, StackLine, render_view};
use owo_colors::OwoColorize;

use crate::cli::COMMAND_NAMES;
use crate::colors::{COLORS, stderr_colors, stdout_colors};
use crate::output::{JsonIssue, JsonResponse, StackData};

pub use add::run_add;
pub use drop::run_drop;
pub use select::run_select;
pub use show::run_show;

/// Stack type every command operates on
pub type CliStack<'a> = Stack<&'a GitCli, &'a FileStore>;

/// Settings shared by all commands
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved stack file
    pub store_path: PathBuf,
    /// Git adapter
    pub git: GitCli,
    /// Output in JSON format
    pub json: bool,
    /// Suppress the stack listing
    pub quiet: bool,
}

/// What a command reports besides the stack itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Report {
    /// Set by `select` to whether git switched branches
    pub switched: Option<bool>,
}

/// Parse a positional stack index
pub fn parse_index(arg: &str) -> Result<i64, GitStackError> {
    arg.trim()
        .parse::<i64>()
        .map_err(|_| GitStackError::InvalidArgument("required integer index".to_string()))
}

/// Report an unknown command word without touching the stack
pub fn run_unrecognized(args: &[String], json_output: bool) -> Result<i32, String> {
    let err = GitStackError::UnrecognizedCommand {
        command: args.first().cloned().unwrap_or_default(),
        available: COMMAND_NAMES.join(", "),
    };
    if json_output {
        let response = JsonResponse::new("unrecognized", (), vec![JsonIssue::from(&err)]);
        print_json(&response)?;
    } else {
        print_error(&err);
    }
    Ok(err.exit_code())
}

/// Run `op` inside a session and print the resulting stack
pub fn run_in_session<F>(command: &str, ctx: &Context, op: F) -> Result<i32, String>
where
    F: FnOnce(&mut CliStack<'_>) -> Result<Report, GitStackError>,
{
    let store = FileStore::new(&ctx.store_path);
    tracing::debug!("{} using stack file {}", command, store.path().display());

    let mut session = match Session::open(&ctx.git, &store) {
        Ok(session) => session,
        Err(e) => {
            let code = e.exit_code();
            report(command, ctx, Vec::new(), Report::default(), &[e])?;
            return Ok(code);
        }
    };

    let outcome = op(session.stack_mut());
    let closed = session.close();

    let mut errors = Vec::new();
    let report_data = match outcome {
        Ok(data) => data,
        Err(e) => {
            errors.push(e);
            Report::default()
        }
    };
    if let Err(e) = closed.persisted {
        record_error(&mut errors, e);
    }
    let lines = match closed.stack.view() {
        Ok(lines) => lines,
        Err(e) => {
            record_error(&mut errors, e);
            Vec::new()
        }
    };

    report(command, ctx, lines, report_data, &errors)?;

    let code = match errors.first() {
        Some(e) => e.exit_code(),
        None if report_data.switched == Some(false) => 1,
        None => 0,
    };
    Ok(code)
}

/// Collect an error, keeping only the first report of an unreachable repository
fn record_error(errors: &mut Vec<GitStackError>, err: GitStackError) {
    let repeated = matches!(err, GitStackError::VcsUnavailable { .. })
        && errors
            .iter()
            .any(|e| matches!(e, GitStackError::VcsUnavailable { .. }));
    if repeated {
        tracing::debug!("suppressing repeated error: {}", err);
    } else {
        errors.push(err);
    }
}

fn report(
    command: &str,
    ctx: &Context,
    lines: Vec<StackLine>,
    data: Report,
    errors: &[GitStackError],
) -> Result<(), String> {
    if ctx.json {
        let payload = StackData {
            store: ctx.store_path.display().to_string(),
            branches: lines,
            switched: data.switched,
        };
        let issues = errors.iter().map(JsonIssue::from).collect();
        return print_json(&JsonResponse::new(command, payload, issues));
    }

    for e in errors {
        print_error(e);
    }
    if data.switched == Some(false) {
        print_warning("checkout failed; the working copy was not switched");
    }

    if !ctx.quiet && !lines.is_empty() {
        if stdout_colors() {
            let painted: Vec<String> = lines
                .iter()
                .map(|line| {
                    let text = line.render();
                    if line.current {
                        text.style(COLORS.current).to_string()
                    } else {
                        text
                    }
                })
                .collect();
            println!("{}", painted.join("\n"));
        } else {
            println!("{}", render_view(&lines));
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(response: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(response).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

fn print_error(err: &GitStackError) {
    if stderr_colors() {
        eprintln!("{}: {}", "error".style(COLORS.fail), err);
    } else {
        eprintln!("error: {}", err);
    }
}

fn print_warning(message: &str) {
    if stderr_colors() {
        eprintln!("{}: {}", "warning".style(COLORS.warning), message);
    } else {
        eprintln!("warning: {}", message);
    }
}
