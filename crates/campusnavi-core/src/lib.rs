//! Core types: schedule items, date coercion, course codes, personas

pub mod date;
pub mod persona;
pub mod schedule;
pub mod tracing;

pub use date::{DateValue, coerce_date, extract_yyyymmdd};
pub use persona::{DEFAULT_SYSTEM_PROMPT, Persona, UnknownPersona, planner_context, system_prompt_for};
pub use schedule::{
    DESCRIPTION_LIMIT, ScheduleItem, UNTITLED, extract_course_code, sort_by_date, truncate_chars,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
