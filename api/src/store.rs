//! Cached access to the normalized feed.
//!
//! The store owns the client, a TTL, and a clock; the cache entry is replaced
//! wholesale on refresh so readers never observe a partial update. Fetch
//! failures are absorbed here: callers always get data, at worst the embedded
//! fallback, and a failed fetch is never cached so the next caller
//! re-attempts.
use crate::client::{fallback_snapshot, FeedClient};
use crate::normalize::normalize_sport;
use crate::{FeedSnapshot, Game, Standing, TeamInfo};
use chrono::{DateTime, TimeDelta, Utc};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_TEAM: &str = "UCSD Baseball";
const RECENT_GAMES_LIMIT: usize = 10;

/// Injectable time source so cache expiry is testable without sleeps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry {
    snapshot: Arc<FeedSnapshot>,
    fetched_at: DateTime<Utc>,
}

pub struct FeedStore {
    client: FeedClient,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    cache: Mutex<Option<CacheEntry>>,
    current_team: Mutex<String>,
}

impl FeedStore {
    pub fn new(client: FeedClient) -> Self {
        Self::with_clock(client, Arc::new(SystemClock))
    }

    pub fn with_clock(client: FeedClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            ttl: TimeDelta::seconds(DEFAULT_CACHE_TTL.as_secs() as i64),
            clock,
            cache: Mutex::new(None),
            current_team: Mutex::new(DEFAULT_TEAM.to_owned()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = TimeDelta::seconds(ttl.as_secs() as i64);
        self
    }

    /// The normalized feed, fetched on demand and cached for the TTL.
    ///
    /// Never fails: on a fetch error the embedded fallback is returned
    /// uncached. Callers racing a cache miss serialize on the store lock, so
    /// a single fetch serves all of them.
    pub async fn snapshot(&self) -> Arc<FeedSnapshot> {
        let mut cache = self.cache.lock().await;
        let now = self.clock.now();

        if let Some(entry) = cache.as_ref()
            && now - entry.fetched_at < self.ttl
        {
            debug!("serving cached feed snapshot");
            return Arc::clone(&entry.snapshot);
        }

        match self.client.fetch_snapshot().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *cache = Some(CacheEntry {
                    snapshot: Arc::clone(&snapshot),
                    fetched_at: now,
                });
                snapshot
            }
            Err(err) => {
                warn!("feed fetch failed, serving fallback: {err}");
                Arc::new(fallback_snapshot())
            }
        }
    }

    pub async fn current_team(&self) -> String {
        self.current_team.lock().await.clone()
    }

    pub async fn set_current_team(&self, name: impl Into<String>) {
        *self.current_team.lock().await = name.into();
    }

    async fn target_team(&self, team: Option<&str>) -> String {
        match team {
            Some(name) => name.to_owned(),
            None => self.current_team().await,
        }
    }

    /// Branding for a team, falling back to the embedded entry for that team
    /// and finally to the first embedded team.
    pub async fn team_info(&self, team: Option<&str>) -> TeamInfo {
        let target = self.target_team(team).await;
        let snapshot = self.snapshot().await;
        if let Some(info) = snapshot.team(&target) {
            return info.clone();
        }

        debug!(team = %target, "team not present in feed, using fallback branding");
        let fallback = fallback_snapshot();
        fallback
            .team(&target)
            .cloned()
            .or_else(|| fallback.teams.first().cloned())
            .unwrap_or_default()
    }

    pub async fn all_teams(&self) -> Vec<TeamInfo> {
        self.snapshot().await.teams.clone()
    }

    /// Games without a decided outcome, soonest first.
    pub async fn upcoming_games(&self, team: Option<&str>) -> Vec<Game> {
        let target = self.target_team(team).await;
        let snapshot = self.snapshot().await;
        let mut games: Vec<Game> = snapshot
            .games
            .iter()
            .filter(|g| g.team_name == target && g.is_pending())
            .cloned()
            .collect();
        // Unparseable dates sort to the end.
        games.sort_by_key(|g| {
            let start = g.start_time();
            (start.is_none(), start)
        });
        games
    }

    /// Games with a decided outcome, most recent first, capped.
    pub async fn recent_games(&self, team: Option<&str>) -> Vec<Game> {
        let target = self.target_team(team).await;
        let snapshot = self.snapshot().await;
        let mut games: Vec<Game> = snapshot
            .games
            .iter()
            .filter(|g| g.team_name == target && !g.is_pending())
            .cloned()
            .collect();
        games.sort_by_key(|g| {
            let start = g.start_time();
            (start.is_some(), start)
        });
        games.reverse();
        games.truncate(RECENT_GAMES_LIMIT);
        games
    }

    /// Standings for one canonical sport, best win percentage first.
    pub async fn standings(&self, sport: &str) -> Vec<Standing> {
        let wanted = normalize_sport(Some(sport));
        let snapshot = self.snapshot().await;
        let mut rows: Vec<Standing> = snapshot
            .standings
            .iter()
            .filter(|s| normalize_sport(Some(&s.sport)) == wanted)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.win_percentage
                .partial_cmp(&a.win_percentage)
                .unwrap_or(Ordering::Equal)
        });
        rows
    }

    /// (primary, secondary) theme colors for a team.
    pub async fn team_colors(&self, team: Option<&str>) -> (String, String) {
        let info = self.team_info(team).await;
        (info.primary_color, info.secondary_color)
    }

    pub async fn team_logo(&self, team: Option<&str>) -> String {
        self.team_info(team).await.logo_url
    }
}
