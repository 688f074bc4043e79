use std::time::Duration;

use chrono::NaiveDate;

use crate::model::League;

pub(crate) const BASE_URL: &str = "https://www.espn.com";
pub(crate) const LOGO_BASE_URL: &str = "https://a.espncdn.com/combiner/i?img=/i/teamlogos";
pub(crate) const GEOCODE_URL: &str = "https://geocode.maps.co/search";

/// Browser user agent sent with every page request; ESPN rejects bare clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/80.0.3987.149 Safari/537.36";

/// Pause between consecutive page requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Regular-season weeks scraped when no explicit count is given.
pub const DEFAULT_WEEKS: u32 = 15;

const SEASON_START_MONTH: u32 = 8;
const SEASON_START_DAY: u32 = 24;

/// The dates that decide whether standings are meaningful yet.
///
/// Both dates are explicit so extraction never consults the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    pub today: NaiveDate,
    pub season_start: NaiveDate,
}

impl SeasonWindow {
    pub fn new(today: NaiveDate, season_start: NaiveDate) -> Self {
        Self {
            today,
            season_start,
        }
    }

    /// A window whose season starts on the default kickoff date of `year`.
    pub fn for_year(today: NaiveDate, year: i32) -> Self {
        // Out-of-range years fall back to treating the season as already open.
        let season_start =
            NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, SEASON_START_DAY).unwrap_or(today);
        Self::new(today, season_start)
    }

    pub fn has_started(&self) -> bool {
        self.today >= self.season_start
    }
}

/// Everything one extraction run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub league: League,
    pub year: i32,
    pub weeks: u32,
    pub season: SeasonWindow,
    pub request_delay: Duration,
}

impl ExtractConfig {
    pub fn new(league: League, year: i32, today: NaiveDate) -> Self {
        Self {
            league,
            year,
            weeks: DEFAULT_WEEKS,
            season: SeasonWindow::for_year(today, year),
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }

    pub fn with_weeks(mut self, weeks: u32) -> Self {
        self.weeks = weeks;
        self
    }

    pub fn with_season_start(mut self, season_start: NaiveDate) -> Self {
        self.season.season_start = season_start;
        self
    }

    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_window_boundaries() {
        let start = date(2024, 8, 24);
        assert!(!SeasonWindow::new(date(2024, 8, 23), start).has_started());
        assert!(SeasonWindow::new(date(2024, 8, 24), start).has_started());
        assert!(SeasonWindow::new(date(2024, 11, 2), start).has_started());
    }

    #[test]
    fn test_config_defaults() {
        let config = ExtractConfig::new(League::Cfb, 2024, date(2024, 9, 1));
        assert_eq!(config.weeks, DEFAULT_WEEKS);
        assert_eq!(config.season.season_start, date(2024, 8, 24));
        assert_eq!(config.request_delay, DEFAULT_REQUEST_DELAY);

        let config = config
            .with_weeks(3)
            .with_request_delay(Duration::ZERO)
            .with_season_start(date(2024, 9, 5));
        assert_eq!(config.weeks, 3);
        assert_eq!(config.request_delay, Duration::ZERO);
        assert!(!config.season.has_started());
    }
}
