//! Interactive course-code review.
//!
//! Entries whose titles carry no course code are shown one by one and the
//! user may type a code for each. An empty answer leaves the entry as is.

use std::io::{self, BufRead, Write};

use tracing::debug;

use campusnavi_core::ScheduleItem;

/// Prompts for every item that [needs review](ScheduleItem::needs_review).
///
/// Stops early at end of input. Returns the number of items that received a
/// course code.
pub fn review_items<R: BufRead, W: Write>(
    items: &mut [ScheduleItem],
    mut input: R,
    mut output: W,
) -> io::Result<usize> {
    let pending = items.iter().filter(|i| i.needs_review()).count();
    if pending == 0 {
        return Ok(0);
    }

    writeln!(output, "{pending} item(s) have no course code. Press Enter to skip.")?;

    let mut updated = 0;
    let mut line = String::new();
    for item in items.iter_mut().filter(|i| i.needs_review()) {
        write!(output, "{}  {}\n  course code: ", item.date_string(), item.title)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        item.set_course_code(&line);
        if let Some(ref code) = item.course_code {
            debug!(title = %item.title, course_code = %code, "Course code set during review");
            updated += 1;
        }
    }

    Ok(updated)
}
