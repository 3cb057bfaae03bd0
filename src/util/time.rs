use std::fmt::{Display, Write};

use chrono::{DateTime, Local, TimeZone};

/// Formats `dt` with a strftime-style `format`, or `None` when the format
/// contains an unknown specifier.
pub fn format_datetime<Tz>(dt: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rendered = String::new();
    write!(rendered, "{}", dt.format(format)).ok()?;
    Some(rendered)
}

pub fn format_local_now(format: &str) -> Option<String> {
    format_datetime(&Local::now(), format)
}
