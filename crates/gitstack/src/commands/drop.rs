//! Implementation of the `gitstack drop` command

use super::{Context, Report, parse_index, run_in_session};

/// Run the drop command
///
/// With an index the entry at that position is dropped; without one the
/// current branch is. The index is parsed inside the session so a bad
/// argument still lets the stack be reconciled and written.
pub fn run_drop(index: Option<String>, ctx: &Context) -> Result<i32, String> {
    run_in_session("drop", ctx, |stack| {
        let removed = match index.as_deref() {
            Some(arg) => stack.drop(parse_index(arg)?)?,
            None => stack.drop_current()?,
        };
        tracing::debug!("dropped {}", removed);
        Ok(Report::default())
    })
}
