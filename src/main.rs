mod prefs;
mod theme;
mod universities;

use crate::prefs::{NotificationPrefs, PrefsClient, UserPreferences};
use crate::theme::ThemeColors;
use alumni_api::client::FeedClient;
use alumni_api::store::FeedStore;
use alumni_api::teams;
use alumni_api::{Game, HomeAway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();
    tracing_subscriber::fmt::init();

    match parse_cli_args() {
        Command::Help => println!("{}", usage_text()),
        Command::Version => println!("alumnihub {}", env!("CARGO_PKG_VERSION")),
        Command::Dashboard { team } => run_dashboard(team).await,
        Command::Notifications { user, settings } => run_notifications(&user, &settings).await,
        Command::ResetPassword { email } => run_reset_password(&email).await,
        Command::Sports { university } => run_sports(&university),
    }

    Ok(())
}

enum Command {
    Dashboard { team: Option<String> },
    Notifications { user: String, settings: Vec<String> },
    ResetPassword { email: String },
    Sports { university: String },
    Help,
    Version,
}

fn parse_cli_args() -> Command {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Command::Dashboard { team: None };
    };

    match arg.as_str() {
        "-h" | "--help" => Command::Help,
        "-V" | "--version" => Command::Version,
        "notifications" => match args.next() {
            Some(user) => Command::Notifications { user, settings: args.collect() },
            None => {
                eprintln!("notifications requires a user id\n\n{}", usage_text());
                std::process::exit(2);
            }
        },
        "reset-password" => match args.next() {
            Some(email) => Command::ResetPassword { email },
            None => {
                eprintln!("reset-password requires an email address\n\n{}", usage_text());
                std::process::exit(2);
            }
        },
        "sports" => match args.next() {
            Some(university) => Command::Sports { university },
            None => {
                eprintln!("sports requires a university slug\n\n{}", usage_text());
                std::process::exit(2);
            }
        },
        _ if arg.starts_with('-') => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
        _ => Command::Dashboard { team: Some(arg) },
    }
}

fn usage_text() -> &'static str {
    "alumnihub - university sports alumni hub dashboard

Usage:
  alumnihub [team-id]
  alumnihub notifications <user-id> [setting=on|off ...]
  alumnihub reset-password <email>
  alumnihub sports <university>
  alumnihub --help
  alumnihub --version

Team ids are short slugs like `ucsd` or `sf-state`; other ids are matched
against the team names present in the live feed. University slugs are
`ucsd`, `sfsu`, `usd`, or `usf`. Notification settings are game-reminders,
game-results, standings-updates, email-notifications, and reminder-hours=<n>.

Environment:
  ALUMNIHUB_FEED_URL    Override the sports-events feed endpoint
  ALUMNIHUB_FEED_JSON   Path to a local raw-feed JSON snapshot (skips the network)
  ALUMNIHUB_PREFS_URL   Override the preferences API base URL
  ALUMNIHUB_DATA_DIR    Directory for the local preferences mirror
  RUST_LOG              Log filter (e.g. alumni_api=debug)"
}

async fn run_dashboard(team_id: Option<String>) {
    let store = FeedStore::new(FeedClient::new());

    if let Some(id) = team_id {
        let snapshot = store.snapshot().await;
        let name = teams::resolve_team_id(&id, &snapshot);
        store.set_current_team(name).await;
    }

    let team = store.team_info(None).await;
    let theme = ThemeColors::from_team(&team);

    println!("{}", team.team_name);
    match &team.conference {
        Some(conference) => println!("{} | {conference}", team.sport),
        None => println!("{}", team.sport),
    }
    println!("Colors: {} / {}", theme.primary, theme.secondary);
    println!("Logo:   {}", team.logo_url);

    let upcoming = store.upcoming_games(None).await;
    println!("\nUpcoming games");
    if upcoming.is_empty() {
        println!("  (none scheduled)");
    }
    for game in &upcoming {
        println!("  {}", game_line(game));
    }

    let recent = store.recent_games(None).await;
    println!("\nRecent games");
    if recent.is_empty() {
        println!("  (none played)");
    }
    for game in &recent {
        println!("  {}", game_line(game));
    }

    let standings = store.standings(&team.sport).await;
    println!("\n{} standings", team.sport);
    if standings.is_empty() {
        println!("  (no standings reported)");
    }
    for (i, row) in standings.iter().enumerate() {
        let rank = row.rank.unwrap_or(i as u32 + 1);
        println!(
            "  {rank:>2}. {:<28} {:>6}  {:.3}  {}",
            row.team_name,
            row.record(),
            row.win_percentage,
            row.streak.as_deref().unwrap_or("")
        );
    }
}

async fn run_notifications(user_id: &str, settings: &[String]) {
    let client = PrefsClient::new();

    if !settings.is_empty() {
        let current = client
            .get_preferences(user_id)
            .await
            .and_then(|p| p.notifications)
            .unwrap_or_default();
        let notifications = match apply_settings(current, settings) {
            Ok(n) => n,
            Err(msg) => {
                eprintln!("{msg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        };
        let delta = UserPreferences {
            notifications: Some(notifications),
            ..Default::default()
        };
        let saved = client.save_preferences(user_id, delta).await;
        print_preferences(user_id, &saved);
        return;
    }

    let Some(prefs) = client.get_preferences(user_id).await else {
        println!("No stored preferences for {user_id}");
        return;
    };
    print_preferences(user_id, &prefs);
}

fn apply_settings(
    mut prefs: NotificationPrefs,
    settings: &[String],
) -> Result<NotificationPrefs, String> {
    for setting in settings {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| format!("expected setting=value, got: {setting}"))?;
        match key {
            "game-reminders" => prefs.game_reminders = parse_switch(value)?,
            "game-results" => prefs.game_results = parse_switch(value)?,
            "standings-updates" => prefs.standings_updates = parse_switch(value)?,
            "email-notifications" => prefs.email_notifications = parse_switch(value)?,
            "reminder-hours" => {
                prefs.reminder_hours = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid reminder-hours value: {value}"))?,
                );
            }
            _ => return Err(format!("unknown setting: {key}")),
        }
    }
    Ok(prefs)
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(format!("expected on or off, got: {value}")),
    }
}

async fn run_reset_password(email: &str) {
    PrefsClient::new().request_password_reset(email).await;
    println!("Password reset requested for {email}");
}

fn print_preferences(user_id: &str, prefs: &UserPreferences) {
    println!("Preferences for {user_id}");
    if let Some(account) = &prefs.account {
        println!("{} {} <{}>", account.first_name, account.last_name, account.email);
        if !account.affiliation.is_empty() {
            println!("Affiliation: {}", account.affiliation);
        }
    }

    match &prefs.notifications {
        Some(n) => {
            println!("Game reminders:     {}", flag(n.game_reminders));
            println!("Game results:       {}", flag(n.game_results));
            println!("Standings updates:  {}", flag(n.standings_updates));
            println!("Email notifications: {}", flag(n.email_notifications));
            if let Some(hours) = n.reminder_hours {
                println!("Reminder lead time: {hours}h");
            }
        }
        None => println!("No notification preferences set"),
    }

    if let Some(updated) = &prefs.updated_at {
        println!("Last updated: {updated}");
    }
}

fn run_sports(slug: &str) {
    let uni = universities::university_by_slug(Some(slug));
    let theme = ThemeColors::from_palette(uni.primary_color, uni.secondary_color);

    println!("{} ({})", uni.name, uni.slug);
    println!("Colors: {} / {}", theme.primary, theme.secondary);
    if let Some(overlay) = uni.background_overlay {
        println!("Overlay: {overlay}");
    }
    if let Some(prefix) = uni.team_prefix {
        println!("Team prefix: {prefix}");
    }

    let groups = universities::sports_groups(uni);
    println!("\nMen's sports");
    for sport in &groups.mens {
        println!("  {sport}");
    }
    println!("\nWomen's sports");
    for sport in &groups.womens {
        println!("  {sport}");
    }

    println!("\nTheme variables");
    for (name, value) in theme.css_variables() {
        println!("  {name}: {value}");
    }
}

fn flag(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn game_line(game: &Game) -> String {
    let date = game
        .start_time()
        .map(|dt| dt.format("%b %e %Y").to_string())
        .unwrap_or_else(|| game.date.clone());
    let venue = match game.home_away {
        HomeAway::Home => "vs",
        HomeAway::Away => "at",
    };

    let mut line = format!("{date}  {venue} {}", game.opponent_name);
    if let Some(outcome) = game.outcome {
        line.push_str(&format!("  [{}", outcome.letter()));
        if let (Some(us), Some(them)) = (game.team_score, game.opponent_score) {
            line.push_str(&format!(" {us}-{them}"));
        }
        line.push(']');
    }
    line
}
