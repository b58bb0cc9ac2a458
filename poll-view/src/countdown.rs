use crate::{derive_status, PollStatus};
use poll_abi::{Poll, Timestamp};

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Words used to render a countdown.
///
/// Units are appended right after the number, so they carry their own
/// leading space when the language wants one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLabels {
    pub ended: &'static str,
    pub day: &'static str,
    pub hour: &'static str,
    pub minute: &'static str,
}

impl TimeLabels {
    pub const ENGLISH: TimeLabels = TimeLabels {
        ended: "Ended",
        day: "d",
        hour: "h",
        minute: "m",
    };

    pub const VIETNAMESE: TimeLabels = TimeLabels {
        ended: "Đã kết thúc",
        day: " ngày",
        hour: " giờ",
        minute: " phút",
    };
}

impl Default for TimeLabels {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// seconds until `poll` opens (upcoming) or closes (active)
///
/// `None` once it has ended, and also when the countdown would be zero or
/// negative: the chain clock may disagree with ours.
pub fn seconds_remaining(poll: &Poll, now: Timestamp) -> Option<u64> {
    let target = match derive_status(poll, now) {
        PollStatus::Upcoming => poll.start_time,
        PollStatus::Active => poll.end_time,
        PollStatus::Ended => return None,
    };
    target.checked_sub(now).filter(|remaining| *remaining > 0)
}

/// render `seconds` with its two most significant units
///
/// days and hours, else hours and minutes, else minutes alone. Every unit is
/// rounded down.
pub fn format_duration(seconds: u64, labels: &TimeLabels) -> String {
    let days = seconds / SECONDS_PER_DAY;
    let hours = seconds % SECONDS_PER_DAY / SECONDS_PER_HOUR;
    let minutes = seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{}{} {}{}", days, labels.day, hours, labels.hour)
    } else if hours > 0 {
        format!("{}{} {}{}", hours, labels.hour, minutes, labels.minute)
    } else {
        format!("{}{}", minutes, labels.minute)
    }
}

/// countdown text shown next to a poll
pub fn format_time_remaining(poll: &Poll, now: Timestamp, labels: &TimeLabels) -> String {
    match seconds_remaining(poll, now) {
        Some(seconds) => format_duration(seconds, labels),
        None => labels.ended.to_owned(),
    }
}
