//! The `schedule` command.

use std::io::{self, BufRead, Write};

use campusnavi_core::{ScheduleItem, planner_context};

use crate::cli::ScheduleArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::review::review_items;

/// Text printed when the export holds no usable entries.
pub const EMPTY_SCHEDULE_TEXT: &str = "No upcoming schedule items.";

/// Fetches the linked schedule and prints it.
///
/// Review prompts go to stderr so `--json` and `--prompt` output stays clean.
pub async fn schedule(config: &ClientConfig, args: ScheduleArgs) -> ClientResult<()> {
    let store = super::credential_store(config);
    let items = super::pipeline(config, store)?.fetch_schedule().await?;

    present(
        items,
        args,
        io::stdin().lock(),
        &mut io::stderr(),
        &mut io::stdout().lock(),
    )
}

/// Optionally reviews `items`, then renders them in the requested format.
pub fn present<R: BufRead, P: Write, W: Write>(
    mut items: Vec<ScheduleItem>,
    args: ScheduleArgs,
    input: R,
    prompts: &mut P,
    out: &mut W,
) -> ClientResult<()> {
    if args.review {
        review_items(&mut items, input, &mut *prompts)?;
    }

    if args.prompt {
        let context =
            planner_context(&items).map_err(|e| ClientError::Output(e.to_string()))?;
        writeln!(out, "{context}")?;
    } else if args.json {
        serde_json::to_writer_pretty(&mut *out, &items)
            .map_err(|e| ClientError::Output(e.to_string()))?;
        writeln!(out)?;
    } else {
        render_table(&items, out)?;
    }

    Ok(())
}

/// Renders items as aligned text, one line per item plus an indented
/// description line when present.
pub fn render_table<W: Write>(items: &[ScheduleItem], out: &mut W) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "{EMPTY_SCHEDULE_TEXT}");
    }

    for item in items {
        let code = item.course_code.as_deref().unwrap_or("-");
        writeln!(out, "{}  {:<7}  {}", item.date_string(), code, item.title)?;
        if !item.desc.is_empty() {
            writeln!(out, "{:21}{}", "", item.desc)?;
        }
    }
    Ok(())
}
