pub mod client;
pub mod normalize;
pub mod store;
pub mod teams;
pub mod wire;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the feed's wire format
// ---------------------------------------------------------------------------

pub const DEFAULT_PRIMARY_COLOR: &str = "#182B49";
pub const DEFAULT_SECONDARY_COLOR: &str = "#FFCD00";
pub const DEFAULT_LOGO: &str = "/images/default-logo.png";

/// Team identity and branding, unique per `(team_name, sport)` within one
/// feed snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamInfo {
    pub team_name: String,
    pub logo_url: String,
    pub primary_color: String,   // hex, e.g. "#182B49"
    pub secondary_color: String, // hex, e.g. "#FFCD00"
    pub sport: String,
    pub conference: Option<String>,
}

/// Decided result of a game. A pending or unrecognized outcome is modeled as
/// `None` on the game itself, never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Tie,
}

impl GameOutcome {
    /// Case-insensitive parse of the feed's one-letter outcome strings.
    /// Anything else — "Pending" in any spelling included — is pending.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "W" => Some(GameOutcome::Win),
            "L" => Some(GameOutcome::Loss),
            "T" => Some(GameOutcome::Tie),
            _ => None,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            GameOutcome::Win => "W",
            GameOutcome::Loss => "L",
            GameOutcome::Tie => "T",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HomeAway {
    Home,
    #[default]
    Away,
}

impl HomeAway {
    pub fn label(&self) -> &'static str {
        match self {
            HomeAway::Home => "Home",
            HomeAway::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub team_name: String,
    pub opponent_name: String,
    /// Start time as delivered by the feed (ISO-8601 string).
    pub date: String,
    /// `None` = pending (not yet played, or outcome not reported).
    pub outcome: Option<GameOutcome>,
    pub team_score: Option<u32>,
    pub opponent_score: Option<u32>,
    pub home_away: HomeAway,
    pub sport: String,
    pub location: Option<String>,
    pub opponent_logo_url: Option<String>,
}

impl Game {
    pub fn is_pending(&self) -> bool {
        self.outcome.is_none()
    }

    /// Parsed start time, tolerant of the feed's date-only records.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standing {
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    /// wins / (wins + losses); exactly 0.0 when no games have been played.
    pub win_percentage: f64,
    pub rank: Option<u32>,
    pub sport: String,
    pub conf_wins: Option<String>,
    pub conf_losses: Option<String>,
    /// Conference or grouping label the row belongs to.
    pub standing_type: Option<String>,
    pub streak: Option<String>,
}

impl Standing {
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }
}

/// The normalized triple produced from one feed fetch.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub teams: Vec<TeamInfo>,
    pub games: Vec<Game>,
    pub standings: Vec<Standing>,
}

impl FeedSnapshot {
    pub fn team(&self, name: &str) -> Option<&TeamInfo> {
        self.teams.iter().find(|t| t.team_name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.games.is_empty() && self.standings.is_empty()
    }
}
