//! Implementation of the `gitstack select` command

use super::{Context, Report, parse_index, run_in_session};

/// Run the select command
///
/// A checkout that git refuses is reported as a warning with exit code 1,
/// not as an error.
pub fn run_select(index: String, ctx: &Context) -> Result<i32, String> {
    run_in_session("select", ctx, |stack| {
        let switched = stack.select(parse_index(&index)?)?;
        Ok(Report {
            switched: Some(switched),
        })
    })
}
