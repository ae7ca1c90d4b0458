//! Human-readable rendering of note timestamps.
//!
//! Recent timestamps are shown relative to now ("Hace 5 minutos"), anything
//! a week or older as a long-form calendar date ("17 de octubre de 2026").

use chrono::{Datelike, Local, TimeZone};
use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Language used for rendered dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Es => write!(f, "es"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "es-es" | "spanish" => Ok(Locale::Es),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            _ => Err(format!("Invalid locale: {}", s)),
        }
    }
}

#[derive(Clone, Copy)]
enum Unit {
    Minute,
    Hour,
    Day,
}

/// Format `timestamp` (epoch ms) against the current time in the local
/// time zone.
pub fn format_date(timestamp: i64, locale: Locale) -> String {
    let now = chrono::Utc::now().timestamp_millis();
    format_date_in(timestamp, now, locale, &Local)
}

/// Format `timestamp` against `now` (both epoch ms), rendering absolute
/// dates in `tz`.
pub fn format_date_in<Tz: TimeZone>(timestamp: i64, now: i64, locale: Locale, tz: &Tz) -> String {
    let elapsed = now.saturating_sub(timestamp);

    if elapsed < MINUTE_MS {
        return just_now(locale).to_string();
    }
    if elapsed < HOUR_MS {
        return relative(elapsed / MINUTE_MS, Unit::Minute, locale);
    }
    if elapsed < DAY_MS {
        return relative(elapsed / HOUR_MS, Unit::Hour, locale);
    }
    if elapsed < WEEK_MS {
        return relative(elapsed / DAY_MS, Unit::Day, locale);
    }

    absolute(timestamp, locale, tz)
}

fn just_now(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "Hace un momento",
        Locale::En => "just now",
    }
}

/// Unit words are always plural, including for a count of one.
fn relative(n: i64, unit: Unit, locale: Locale) -> String {
    match locale {
        Locale::Es => {
            let word = match unit {
                Unit::Minute => "minutos",
                Unit::Hour => "horas",
                Unit::Day => "días",
            };
            format!("Hace {} {}", n, word)
        }
        Locale::En => {
            let word = match unit {
                Unit::Minute => "minutes",
                Unit::Hour => "hours",
                Unit::Day => "days",
            };
            format!("{} {} ago", n, word)
        }
    }
}

fn absolute<Tz: TimeZone>(timestamp: i64, locale: Locale, tz: &Tz) -> String {
    let Some(date) = tz.timestamp_millis_opt(timestamp).single() else {
        // Out of chrono's range; nothing sensible to show but the raw value.
        return timestamp.to_string();
    };
    let month = date.month0() as usize;

    match locale {
        Locale::Es => format!("{} de {} de {}", date.day(), MONTHS_ES[month], date.year()),
        Locale::En => format!("{} {} {}", date.day(), MONTHS_EN[month], date.year()),
    }
}
