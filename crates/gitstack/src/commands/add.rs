//! Implementation of the `gitstack add` command

use super::{Context, Report, run_in_session};

/// Run the add command
///
/// # Arguments
/// * `name` - Branch to track; the current branch when `None`
/// * `ctx` - Shared command settings
pub fn run_add(name: Option<String>, ctx: &Context) -> Result<i32, String> {
    run_in_session("add", ctx, |stack| {
        match name.as_deref() {
            Some(name) => stack.add(name)?,
            None => stack.add_current()?,
        }
        Ok(Report::default())
    })
}
