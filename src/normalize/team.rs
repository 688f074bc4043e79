use tracing::debug;

use crate::model::{RawTeam, Team, WinLossTie, TBD};

const STANDINGS_SUFFIX: &str = "Standings";

/// Conference name from a standings header such as `"2024 Big Ten Standings"`.
///
/// A leading year token and a trailing `Standings` word are dropped; a header
/// with nothing left is `"TBD"`.
pub fn normalize_conference_name(header: &str) -> String {
    let mut tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.first().is_some_and(|token| is_year(token)) {
        tokens.remove(0);
    }
    if tokens.last() == Some(&STANDINGS_SUFFIX) {
        tokens.pop();
    }
    let name = if tokens.is_empty() {
        TBD.to_string()
    } else {
        tokens.join(" ")
    };
    debug!(header, name = %name, "normalized conference name");
    name
}

fn is_year(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

/// Wins, losses and ties from a `W-L` or `W-L-T` record.
///
/// Missing, malformed or non-numeric records count as all zeros.
pub fn normalize_record(record: Option<&str>) -> WinLossTie {
    let normalized = record.and_then(parse_record).unwrap_or_default();
    debug!(?record, ?normalized, "normalized record");
    normalized
}

fn parse_record(record: &str) -> Option<WinLossTie> {
    let parts = record
        .trim()
        .split('-')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [wins, losses] => Some(WinLossTie {
            wins: *wins,
            losses: *losses,
            ties: 0,
        }),
        [wins, losses, ties] => Some(WinLossTie {
            wins: *wins,
            losses: *losses,
            ties: *ties,
        }),
        _ => None,
    }
}

pub fn normalize_team(raw: &RawTeam) -> Team {
    debug!(team_id = %raw.team_id, league = %raw.league, "normalizing team");
    let conference = normalize_record(raw.conference_record.as_deref());
    let overall = normalize_record(raw.overall_record.as_deref());

    Team {
        team_id: raw.team_id.clone(),
        league: raw.league,
        name: raw.name.clone(),
        mascot: raw.mascot.clone(),
        logo_url: raw.logo_url.clone(),
        primary_color: raw.primary_color.clone(),
        secondary_color: raw.secondary_color.clone(),
        accent_color: raw.accent_color.clone(),
        conference_name: normalize_conference_name(&raw.conference_header),
        conference_wins: conference.wins,
        conference_losses: conference.losses,
        conference_ties: conference.ties,
        overall_wins: overall.wins,
        overall_losses: overall.losses,
        overall_ties: overall.ties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::League;

    fn record(wins: u32, losses: u32, ties: u32) -> WinLossTie {
        WinLossTie { wins, losses, ties }
    }

    #[test]
    fn test_conference_name() {
        assert_eq!(normalize_conference_name("2024 Big Ten Standings"), "Big Ten");
        assert_eq!(normalize_conference_name("2024 SEC Standings"), "SEC");
        assert_eq!(
            normalize_conference_name("2024-25 Eastern Conference Standings"),
            "Eastern Conference"
        );
        assert_eq!(normalize_conference_name("Big Ten Standings"), "Big Ten");
        assert_eq!(normalize_conference_name(""), TBD);
        assert_eq!(normalize_conference_name("Standings"), TBD);
        assert_eq!(normalize_conference_name("2024 Standings"), TBD);
    }

    #[test]
    fn test_conference_name_keeps_words_other_than_standings() {
        assert_eq!(normalize_conference_name("2024 SEC"), "SEC");
        assert_eq!(
            normalize_conference_name("2024 Big Ten Conference"),
            "Big Ten Conference"
        );
    }

    #[test]
    fn test_record() {
        assert_eq!(normalize_record(Some("8-4")), record(8, 4, 0));
        assert_eq!(normalize_record(Some("8-4-1")), record(8, 4, 1));
        assert_eq!(normalize_record(Some(" 0-0 ")), record(0, 0, 0));
    }

    #[test]
    fn test_unreadable_record_is_zero() {
        for raw in ["bye", "", "8", "1-2-3-4", "8-x", "-4"] {
            assert_eq!(normalize_record(Some(raw)), WinLossTie::default(), "{raw}");
        }
        assert_eq!(normalize_record(None), WinLossTie::default());
    }

    #[test]
    fn test_normalize_team() {
        let raw = RawTeam {
            team_id: "333".to_string(),
            league: League::Cfb,
            name: "Alabama".to_string(),
            mascot: "Crimson Tide".to_string(),
            logo_url: "https://a.espncdn.com/combiner/i?img=/i/teamlogos/ncaa/500/333.png"
                .to_string(),
            primary_color: String::new(),
            secondary_color: String::new(),
            accent_color: String::new(),
            conference_header: "2024 SEC Standings".to_string(),
            conference_record: Some("5-3".to_string()),
            overall_record: None,
        };

        let team = normalize_team(&raw);

        assert_eq!(team.conference_name, "SEC");
        assert_eq!(team.conference_wins, 5);
        assert_eq!(team.conference_losses, 3);
        assert_eq!(team.conference_ties, 0);
        assert_eq!(team.overall_wins, 0);
        assert_eq!(team.overall_losses, 0);
        assert_eq!(team.mascot, "Crimson Tide");
        assert_eq!(team.logo_url, raw.logo_url);
    }
}
