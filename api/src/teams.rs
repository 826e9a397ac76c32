//! Short team identifiers, as used in share links and routing.
//!
//! Resolution is a three-step fallback: the static alias table, a slug match
//! against whatever teams the current snapshot carries, and finally the raw
//! identifier unchanged.
use crate::FeedSnapshot;

#[derive(Debug, Clone, Copy)]
pub struct TeamAlias {
    pub id: &'static str,
    pub name: &'static str,
    pub conference: Option<&'static str>,
}

pub const TEAM_ALIASES: &[TeamAlias] = &[
    TeamAlias { id: "ucsd", name: "UCSD Baseball", conference: None },
    TeamAlias {
        id: "ucsd-mens-basketball",
        name: "UCSD Men's Basketball",
        conference: Some("Big West"),
    },
    TeamAlias { id: "sf-state", name: "SF State Baseball", conference: Some("CCAA") },
    TeamAlias { id: "chico-state", name: "Chico State Baseball", conference: None },
    TeamAlias { id: "cal-poly-pomona", name: "Cal Poly Pomona Baseball", conference: None },
    TeamAlias {
        id: "usd-baseball",
        name: "USD Baseball",
        conference: Some("West Coast Conference"),
    },
    TeamAlias {
        id: "usf-basketball",
        name: "USF Basketball",
        conference: Some("West Coast Conference"),
    },
];

pub fn alias(id: &str) -> Option<&'static TeamAlias> {
    let id = id.trim().to_lowercase();
    TEAM_ALIASES.iter().find(|a| a.id == id)
}

pub fn team_name_from_id(id: &str) -> Option<&'static str> {
    alias(id).map(|a| a.name)
}

pub fn conference_from_id(id: &str) -> Option<&'static str> {
    alias(id).and_then(|a| a.conference)
}

pub fn all_team_ids() -> Vec<&'static str> {
    TEAM_ALIASES.iter().map(|a| a.id).collect()
}

/// URL-safe slug: lowercase, apostrophes dropped, any other run of
/// non-alphanumerics becomes a single dash. "UCSD Men's Golf" → "ucsd-mens-golf".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c != '\'' {
            pending_dash = true;
        }
    }
    slug
}

/// Canonical team name for a short identifier: alias table, then slug match
/// against the snapshot's team names, then the identifier itself.
pub fn resolve_team_id(id: &str, snapshot: &FeedSnapshot) -> String {
    if let Some(name) = team_name_from_id(id) {
        return name.to_owned();
    }
    let slug = slugify(id);
    if !slug.is_empty()
        && let Some(team) = snapshot.teams.iter().find(|t| slugify(&t.team_name) == slug)
    {
        return team.team_name.clone();
    }
    id.to_owned()
}

/// Reverse mapping: alias table first, otherwise the slug of the name.
pub fn team_id_from_name(name: &str) -> String {
    TEAM_ALIASES
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.id.to_owned())
        .unwrap_or_else(|| slugify(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TeamInfo;

    fn snapshot_with(names: &[&str]) -> FeedSnapshot {
        FeedSnapshot {
            teams: names
                .iter()
                .map(|n| TeamInfo { team_name: (*n).to_owned(), ..Default::default() })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn alias_lookup_is_case_insensitive() {
        assert_eq!(team_name_from_id("SF-State"), Some("SF State Baseball"));
        assert_eq!(conference_from_id("sf-state"), Some("CCAA"));
        assert_eq!(conference_from_id("ucsd"), None);
    }

    #[test]
    fn slugify_drops_apostrophes_and_collapses_separators() {
        assert_eq!(slugify("UCSD Men's Golf"), "ucsd-mens-golf");
        assert_eq!(slugify("Cal Poly  Pomona"), "cal-poly-pomona");
        assert_eq!(slugify("  trailing "), "trailing");
    }

    #[test]
    fn resolution_prefers_the_alias_table() {
        let snapshot = snapshot_with(&["UCSD Baseball"]);
        assert_eq!(resolve_team_id("ucsd", &snapshot), "UCSD Baseball");
    }

    #[test]
    fn resolution_falls_back_to_slug_matching_the_snapshot() {
        let snapshot = snapshot_with(&["UCSD Men's Golf", "UCSD Baseball"]);
        assert_eq!(resolve_team_id("ucsd-mens-golf", &snapshot), "UCSD Men's Golf");
    }

    #[test]
    fn unknown_identifier_passes_through_unchanged() {
        let snapshot = snapshot_with(&["UCSD Baseball"]);
        assert_eq!(resolve_team_id("nowhere-state", &snapshot), "nowhere-state");
        assert_eq!(resolve_team_id("nowhere-state", &FeedSnapshot::default()), "nowhere-state");
    }

    #[test]
    fn reverse_mapping_uses_aliases_then_slugs() {
        assert_eq!(team_id_from_name("SF State Baseball"), "sf-state");
        assert_eq!(team_id_from_name("Stanford Baseball"), "stanford-baseball");
    }

    #[test]
    fn every_alias_id_is_already_in_slug_form() {
        for a in TEAM_ALIASES {
            assert_eq!(slugify(a.id), a.id, "alias id {} must be a slug", a.id);
        }
        assert_eq!(all_team_ids().len(), TEAM_ALIASES.len());
    }
}
