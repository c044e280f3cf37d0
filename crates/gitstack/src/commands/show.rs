//! Implementation of the `gitstack show` command

use super::{Context, Report, run_in_session};

/// Run the show command
///
/// The session itself renders the stack, so the operation does nothing.
pub fn run_show(ctx: &Context) -> Result<i32, String> {
    run_in_session("show", ctx, |_| Ok(Report::default()))
}
