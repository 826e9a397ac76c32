//! Classification of raw feed items into the three normalized record kinds.
//!
//! Classification is non-exclusive: a single raw item may contribute a team
//! entry, a game, and a standing row. Items that match nothing are skipped
//! silently — a heuristic miss is not an error.
use crate::wire::{self, RawItem};
use crate::{
    DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, FeedSnapshot, Game, GameOutcome, HomeAway,
    Standing, TeamInfo,
};
use tracing::debug;

pub fn normalize_feed(items: Vec<RawItem>) -> FeedSnapshot {
    // (dedup key, entry, came from an explicit TeamInfo record)
    let mut teams: Vec<(String, TeamInfo, bool)> = Vec::new();
    let mut games: Vec<Game> = Vec::new();
    let mut standings: Vec<Standing> = Vec::new();

    for item in &items {
        let data_type = item.data_type();
        let sport = normalize_sport(item.text(wire::SPORT).as_deref());

        // Team info: logo + name is enough, but an explicit TeamInfo record
        // is authoritative for colors and replaces a heuristic-only entry.
        // Heuristic items never overwrite an existing entry.
        if let (Some(name), Some(_)) = (item.text(wire::TEAM_NAME), item.text(wire::TEAM_LOGO_URL))
        {
            let explicit = is_team_info_tag(&data_type);
            let key = format!("{name}|{sport}");
            match teams.iter().position(|(k, ..)| *k == key) {
                Some(i) if explicit => {
                    teams[i].1 = map_team_info(item, &sport);
                    teams[i].2 = true;
                }
                Some(_) => {}
                None => teams.push((key, map_team_info(item, &sport), explicit)),
            }
        }

        // Games: a start time and an opponent.
        if let (Some(start), Some(opponent)) =
            (item.text(wire::START_TIME), item.text(wire::OPPONENT_NAME))
        {
            games.push(map_game(item, start, opponent, &sport));
        }

        // Standings: an explicit tag, or any win/loss field in any spelling.
        if data_type.contains("stand") || has_record_fields(item) {
            standings.push(map_standing(item));
        }
    }

    debug!(
        teams = teams.len(),
        games = games.len(),
        standings = standings.len(),
        "normalized feed snapshot"
    );

    FeedSnapshot {
        teams: teams.into_iter().map(|(_, team, _)| team).collect(),
        games,
        standings,
    }
}

/// Fold free-text sport labels into the canonical set. Unrecognized labels
/// pass through unchanged; an absent or empty label defaults to Baseball.
pub fn normalize_sport(label: Option<&str>) -> String {
    let Some(raw) = label else {
        return "Baseball".to_owned();
    };
    match raw.trim().to_lowercase().as_str() {
        "" => "Baseball".to_owned(),
        "basketball" | "men's basketball" | "mens basketball" | "m basketball" => {
            "Basketball".to_owned()
        }
        "golf" | "men's golf" | "mens golf" | "m golf" => "Golf".to_owned(),
        "baseball" | "men's baseball" | "m baseball" => "Baseball".to_owned(),
        _ => raw.trim().to_owned(),
    }
}

pub fn win_percentage(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total)
    }
}

fn is_team_info_tag(data_type: &str) -> bool {
    // Covers both `dataType: "TeamInfo"` and sort keys like `TeamInfo#ucsd`.
    data_type.starts_with("teaminfo")
}

fn has_record_fields(item: &RawItem) -> bool {
    item.has_any(wire::OVERALL_WINS)
        || item.has_any(wire::OVERALL_LOSSES)
        || item.has_any(wire::CONF_WINS)
        || item.has_any(wire::CONF_LOSSES)
}

fn map_team_info(item: &RawItem, sport: &str) -> TeamInfo {
    TeamInfo {
        team_name: item.text(wire::TEAM_NAME).unwrap_or_default(),
        logo_url: item.text(wire::TEAM_LOGO_URL).unwrap_or_default(),
        primary_color: item
            .text(wire::PRIMARY_COLOR)
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_owned()),
        secondary_color: item
            .text(wire::SECONDARY_COLOR)
            .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_owned()),
        sport: sport.to_owned(),
        conference: item.text(wire::CONFERENCE_NAME),
    }
}

fn map_game(item: &RawItem, start: String, opponent: String, sport: &str) -> Game {
    let team_name = item.text(wire::TEAM_NAME).unwrap_or_default();
    let location = item.text(wire::GAME_LOCATION);
    let home_away = match &location {
        Some(loc) if loc.to_lowercase().contains("home") => HomeAway::Home,
        _ => HomeAway::Away,
    };

    Game {
        id: item
            .text(wire::GAME_ID)
            .unwrap_or_else(|| format!("{team_name}-{start}-{opponent}")),
        team_name,
        opponent_name: opponent,
        date: start,
        outcome: item
            .text(wire::GAME_OUTCOME)
            .as_deref()
            .and_then(GameOutcome::parse),
        team_score: item.number(wire::TEAM_SCORE),
        opponent_score: item.number(wire::OPPONENT_SCORE),
        home_away,
        sport: sport.to_owned(),
        location,
        opponent_logo_url: item.text(wire::OPPONENT_LOGO_URL),
    }
}

fn map_standing(item: &RawItem) -> Standing {
    let wins = item.number(wire::OVERALL_WINS).unwrap_or(0);
    let losses = item.number(wire::OVERALL_LOSSES).unwrap_or(0);

    Standing {
        team_name: item.text(wire::TEAM_NAME).unwrap_or_default(),
        wins,
        losses,
        win_percentage: win_percentage(wins, losses),
        rank: item.number(wire::RANK).filter(|r| *r > 0),
        sport: normalize_sport(item.text(wire::SPORT).as_deref()),
        conf_wins: item.text(wire::CONF_WINS),
        conf_losses: item.text(wire::CONF_LOSSES),
        standing_type: item.text(wire::STANDING_TYPE),
        streak: item.text(wire::STREAK),
    }
}
