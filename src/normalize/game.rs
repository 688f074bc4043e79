use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use tracing::debug;

use super::location::lookup_location;
use super::parse_count;
use crate::model::{Game, GameDate, LineScore, RawBoxScore, RawGame, Scheduled};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Typed scores for one side of a box score.
///
/// `None` in gives `None` out: the league has no quarters. Otherwise either
/// every period parses or the whole side becomes zeros; an absent overtime
/// cell counts as zero.
pub fn normalize_box_score(raw: Option<&RawBoxScore>) -> Option<LineScore> {
    let raw = raw?;
    let score = parse_line_score(raw).unwrap_or_else(|| {
        debug!(?raw, "incomplete box score, using zeros");
        LineScore::default()
    });
    debug!(?score, "normalized box score");
    Some(score)
}

fn parse_line_score(raw: &RawBoxScore) -> Option<LineScore> {
    let cell = |value: &Option<String>| value.as_deref()?.trim().parse::<u32>().ok();
    let [q1, q2, q3, q4] = &raw.quarters;
    let overtime = match &raw.overtime {
        Some(_) => cell(&raw.overtime)?,
        None => 0,
    };
    Some(LineScore {
        quarters: [cell(q1)?, cell(q2)?, cell(q3)?, cell(q4)?],
        overtime,
        total: cell(&raw.total)?,
    })
}

/// Everything before the first comma of a game timestamp.
pub fn normalize_game_time(timestamp: &str) -> Scheduled<String> {
    let time = timestamp.split(',').next().unwrap_or_default().trim();
    let normalized = if time.is_empty() {
        Scheduled::Tbd
    } else {
        Scheduled::Known(time.to_string())
    };
    debug!(timestamp, ?normalized, "normalized game time");
    normalized
}

/// Month, day and year from the `<Month> <day>, <year>` part that follows the
/// first comma of a game timestamp. Anything after the year, such as a kickoff
/// time, is ignored.
pub fn normalize_game_date(timestamp: &str) -> GameDate {
    let normalized = parse_game_date(timestamp).unwrap_or_default();
    debug!(timestamp, ?normalized, "normalized game date");
    normalized
}

fn parse_game_date(timestamp: &str) -> Option<GameDate> {
    let (_, date) = timestamp.split_once(',')?;
    let (month_name, day, year) = date.split_whitespace().next_tuple()?;

    let month = month_number(month_name)?;
    let day: u32 = day.trim_end_matches(',').parse().ok()?;
    let year: i32 = year.trim_end_matches(',').parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?;

    Some(GameDate {
        date: Scheduled::Known(format!("{month_name} {day}, {year}")),
        month: Scheduled::Known(month),
        day: Scheduled::Known(day),
        year: Scheduled::Known(year),
    })
}

/// 1-based month number of an English month name, ignoring case.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|i| i as u32 + 1)
}

/// Attendance count, or 0 when the text holds no number.
pub fn normalize_attendance(raw: &str) -> u32 {
    let attendance = parse_count(raw).unwrap_or_default();
    debug!(raw, attendance, "normalized attendance");
    attendance
}

/// Build the typed game row; `locations` maps stadium names to location ids.
pub fn normalize_game(raw: &RawGame, locations: &HashMap<String, u32>) -> Game {
    debug!(game_id = %raw.game_id, league = %raw.league, "normalizing game");

    let away = normalize_box_score(raw.away_box_score.as_ref());
    let home = normalize_box_score(raw.home_box_score.as_ref());
    let quarter = |score: Option<LineScore>, i: usize| score.map(|s| s.quarters[i]);
    let game_date = normalize_game_date(&raw.game_timestamp);

    Game {
        game_id: raw.game_id.clone(),
        league: raw.league,
        away_team_id: raw.away_team_id.clone(),
        home_team_id: raw.home_team_id.clone(),
        away_quarter1: quarter(away, 0),
        away_quarter2: quarter(away, 1),
        away_quarter3: quarter(away, 2),
        away_quarter4: quarter(away, 3),
        away_overtime: away.map(|s| s.overtime),
        away_total: away.map(|s| s.total),
        home_quarter1: quarter(home, 0),
        home_quarter2: quarter(home, 1),
        home_quarter3: quarter(home, 2),
        home_quarter4: quarter(home, 3),
        home_overtime: home.map(|s| s.overtime),
        home_total: home.map(|s| s.total),
        location_id: lookup_location(&raw.stadium, locations),
        game_time: normalize_game_time(&raw.game_timestamp),
        game_date: game_date.date,
        game_month: game_date.month,
        game_day: game_date.day,
        game_year: game_date.year,
        tv_coverage: raw.tv_coverage.clone(),
        betting_line: raw.betting_line.clone(),
        betting_over_under: raw.betting_over_under.clone(),
        attendance: normalize_attendance(&raw.attendance),
        away_win_pct: raw.away_win_pct.clone(),
        home_win_pct: raw.home_win_pct.clone(),
    }
}
