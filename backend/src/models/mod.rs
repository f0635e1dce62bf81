//! Domain models shared by the calculators, the preference store and the
//! HTTP layer.

pub mod schedule;
pub mod time;
pub mod tool;

pub use schedule::{BusinessWindow, Schedule, ScheduleError, SchedulePreset, SCHEDULE_PRESETS};
pub use time::{format_instant, parse_instant, Instant, TimeParseError};
pub use tool::{build_menu, find_tool, MenuSection, Tool, ToolCategory, TOOLS};
