//! Match-day calendar built from a cached fixture list
//!
//! Collapses same-day fixtures into one entry per day, in kickoff order,
//! and points at "today or the next upcoming match day" so templates can
//! open the calendar in the right place.

use crate::sportsapi::models::{display_offset, Fixture};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use std::collections::HashSet;
use tracing::debug;

/// Day label shown in the calendar strip, e.g. "Sat, Jan 3".
pub const DAY_LABEL_FORMAT: &str = "%a, %b %-d";
/// Wire format of the `date` request parameter.
pub const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct StatsCalendarEntry {
    pub date_time: DateTime<FixedOffset>,
    pub next_or_today: bool,
    pub idx: usize,
}

impl StatsCalendarEntry {
    /// Day label for display; the walk also uses it for deduplication,
    /// so the same format must be used everywhere dates are compared.
    pub fn day_label(&self) -> String {
        self.date_time.format(DAY_LABEL_FORMAT).to_string()
    }

    /// The entry's value for the `date` request parameter.
    pub fn href_parameter(&self) -> String {
        self.date_time.format(DATE_PARAM_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsCalendar {
    pub date_parameter: String,
    pub date_parameter_time: DateTime<FixedOffset>,
    pub entries: Vec<StatsCalendarEntry>,
    pub today_or_next_idx: usize,
    pub count: usize,
}

/// Walk options: an optional team filter (season calendar) or the
/// synthetic-today splice (all-competitions calendar).
pub(crate) struct CalendarWalk<'a> {
    pub team_ids: &'a [u32],
    pub synthesize_today: bool,
}

pub(crate) fn build_calendar(
    mut fixtures: Vec<Fixture>,
    date_param: Option<String>,
    walk: CalendarWalk<'_>,
    today: DateTime<FixedOffset>,
) -> StatsCalendar {
    fixtures.sort_by_key(|f| f.start_time());

    let team_filter: HashSet<u32> = walk.team_ids.iter().copied().collect();
    let today_label = today.format(DAY_LABEL_FORMAT).to_string();

    let mut date_param = date_param.unwrap_or_default();
    let mut entries: Vec<StatsCalendarEntry> = Vec::new();
    let mut prev_day = String::new();
    let mut switched_past_today = false;
    let mut next_or_today_idx = 0usize;
    let mut idx = 0usize;

    for fixture in &fixtures {
        let start = fixture.start_time();
        let day_label = start.format(DAY_LABEL_FORMAT).to_string();

        // collapse same-day fixtures into one entry
        if prev_day == day_label {
            continue;
        }
        if !team_filter.is_empty()
            && !team_filter.contains(&fixture.localteam_id)
            && !team_filter.contains(&fixture.visitorteam_id)
        {
            continue;
        }
        prev_day = day_label.clone();

        let mut entry = StatsCalendarEntry {
            date_time: start,
            next_or_today: false,
            idx,
        };

        if !switched_past_today {
            if today_label == day_label {
                // found today
                switched_past_today = true;
                entry.next_or_today = true;
                next_or_today_idx = idx;
                if date_param.is_empty() {
                    date_param = entry.href_parameter();
                }
            } else if start > today {
                // not today, but the first day after it
                switched_past_today = true;
                if walk.synthesize_today {
                    // slot in an entry for today ahead of the next match day
                    let today_entry = StatsCalendarEntry {
                        date_time: today,
                        next_or_today: true,
                        idx,
                    };
                    next_or_today_idx = idx;
                    if date_param.is_empty() {
                        date_param = today_entry.href_parameter();
                    }
                    entries.push(today_entry);
                    idx += 1;
                    entry = StatsCalendarEntry {
                        date_time: start,
                        next_or_today: false,
                        idx,
                    };
                } else {
                    entry.next_or_today = true;
                    next_or_today_idx = idx;
                    if date_param.is_empty() {
                        date_param = entry.href_parameter();
                    }
                }
            }
        }

        entries.push(entry);
        idx += 1;
    }

    if entries.is_empty() {
        // nothing to point at; hand back an empty calendar rather than
        // indexing a last entry that doesn't exist
        return StatsCalendar {
            date_parameter_time: parse_date_param(&date_param, today),
            date_parameter: date_param,
            entries,
            today_or_next_idx: 0,
            count: 0,
        };
    }

    if date_param.is_empty() {
        // every match day is in the past; fall back to the last one
        date_param = entries[idx - 1].href_parameter();
        next_or_today_idx = idx - 1;
    }
    if next_or_today_idx == 0 {
        // the first pass didn't place the index; re-scan for an exact
        // date match against the caller-supplied parameter
        for (i, entry) in entries.iter().enumerate() {
            if entry.href_parameter() == date_param {
                next_or_today_idx = i;
            }
        }
    }
    debug!("calendar date_param: {} today_or_next_idx: {}", date_param, next_or_today_idx);

    StatsCalendar {
        date_parameter_time: parse_date_param(&date_param, today),
        date_parameter: date_param,
        count: entries.len(),
        entries,
        today_or_next_idx: next_or_today_idx,
    }
}

/// Parse a `date` request parameter back into an instant at midnight in
/// the display timezone; an unparsable value defaults to "now".
fn parse_date_param(date_param: &str, fallback: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    NaiveDate::parse_from_str(date_param, DATE_PARAM_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| display_offset().from_local_datetime(&naive).single())
        .unwrap_or(fallback)
}
