//! Static university catalog: branding and sports offerings per campus.
//!
//! Slugs come from onboarding links; an unknown or missing slug lands on the
//! default hub branding.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportsGroupsRef {
    pub mens: &'static [&'static str],
    pub womens: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportsGroups {
    pub mens: Vec<String>,
    pub womens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversityConfig {
    pub slug: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_overlay: Option<&'static str>,
    pub team_prefix: Option<&'static str>,
    pub sports_groups: Option<SportsGroupsRef>,
    /// Flat list used when explicit groups are not configured; entries may
    /// carry "(Men's)" / "(Women's)" suffixes.
    pub sports: &'static [&'static str],
}

pub const UNIVERSITIES: &[UniversityConfig] = &[
    UniversityConfig {
        slug: "ucsd",
        name: "UC San Diego",
        logo: "/images/ucsd-trident.svg",
        primary_color: "#182B49",
        secondary_color: "#FFCD00",
        background_overlay: Some("rgba(24, 43, 73, 0.85)"),
        team_prefix: Some("UCSD"),
        sports_groups: Some(SportsGroupsRef {
            mens: &[
                "Baseball",
                "Basketball",
                "Cross Country",
                "Fencing",
                "Golf",
                "Rowing",
                "Soccer",
                "Swimming",
                "Tennis",
                "Track & Field",
                "Volleyball",
                "Water Polo",
            ],
            womens: &[
                "Basketball",
                "Cross Country",
                "Fencing",
                "Indoor Track",
                "Rowing",
                "Soccer",
                "Softball",
                "Swimming",
                "Tennis",
                "Track & Field",
                "Volleyball",
                "Water Polo",
            ],
        }),
        sports: &[],
    },
    UniversityConfig {
        slug: "sfsu",
        name: "San Francisco State",
        logo: "/images/sfsu-gators.svg",
        primary_color: "#3A1A6A",
        secondary_color: "#FDB515",
        background_overlay: Some("rgba(35, 20, 60, 0.85)"),
        team_prefix: Some("SF State"),
        sports_groups: Some(SportsGroupsRef {
            mens: &["Basketball", "Cross Country", "Track & Field", "Wrestling"],
            womens: &[
                "Basketball",
                "Cross Country",
                "Soccer",
                "Softball",
                "Track & Field",
                "Volleyball",
            ],
        }),
        sports: &[],
    },
    UniversityConfig {
        slug: "usd",
        name: "University of San Diego",
        logo: "/images/default-logo.png",
        primary_color: "#0C5DA5",
        secondary_color: "#7FB1E0",
        background_overlay: Some("rgba(12, 93, 165, 0.85)"),
        team_prefix: Some("USD"),
        sports_groups: Some(SportsGroupsRef {
            mens: &[
                "Baseball",
                "Basketball",
                "Cross Country",
                "Football",
                "Golf",
                "Rowing",
                "Soccer",
                "Tennis",
            ],
            womens: &[
                "Basketball",
                "Beach Volleyball",
                "Cross Country",
                "Rowing",
                "Soccer",
                "Softball",
                "Swimming & Diving",
                "Tennis",
                "Track",
                "Volleyball",
            ],
        }),
        sports: &[],
    },
    UniversityConfig {
        slug: "usf",
        name: "University of San Francisco",
        logo: "/images/default-logo.png",
        primary_color: "#006747",
        secondary_color: "#FDBB30",
        background_overlay: Some("rgba(0, 103, 71, 0.85)"),
        team_prefix: Some("USF"),
        sports_groups: Some(SportsGroupsRef {
            mens: &["Baseball", "Basketball", "Cross Country", "Golf", "Soccer", "Track & Field"],
            womens: &[
                "Basketball",
                "Beach Volleyball",
                "Cross Country",
                "Golf",
                "Soccer",
                "Track & Field",
                "Triathlon",
                "Volleyball",
            ],
        }),
        sports: &[],
    },
];

pub const DEFAULT_UNIVERSITY: UniversityConfig = UniversityConfig {
    slug: "default",
    name: "Alumni Hub",
    logo: "/images/ucsd-trident.svg",
    primary_color: "#182B49",
    secondary_color: "#FFCD00",
    background_overlay: Some("rgba(24, 43, 73, 0.85)"),
    team_prefix: None,
    sports_groups: Some(SportsGroupsRef {
        mens: &["Baseball", "Basketball", "Soccer"],
        womens: &["Basketball", "Soccer", "Softball"],
    }),
    sports: &[
        "Baseball",
        "Basketball (Men's)",
        "Basketball (Women's)",
        "Soccer (Men's)",
        "Soccer (Women's)",
        "Softball",
    ],
};

/// Case-insensitive slug lookup; unknown or absent slugs get the default.
pub fn university_by_slug(slug: Option<&str>) -> &'static UniversityConfig {
    let Some(slug) = slug else {
        return &DEFAULT_UNIVERSITY;
    };
    let key = slug.trim().to_lowercase();
    UNIVERSITIES
        .iter()
        .find(|u| u.slug == key)
        .unwrap_or(&DEFAULT_UNIVERSITY)
}

/// Explicit groups when configured, otherwise derived from the flat list:
/// "(Men's)" / "(Women's)" suffixes are recognized and stripped, and
/// unmarked sports land in the mens bucket.
pub fn sports_groups(uni: &UniversityConfig) -> SportsGroups {
    if let Some(groups) = &uni.sports_groups {
        return SportsGroups {
            mens: groups.mens.iter().map(|s| (*s).to_owned()).collect(),
            womens: groups.womens.iter().map(|s| (*s).to_owned()).collect(),
        };
    }

    let mut mens = Vec::new();
    let mut womens = Vec::new();
    for raw in uni.sports {
        let Some((base, is_womens)) = split_sport_label(raw) else {
            continue;
        };
        if is_womens {
            womens.push(base);
        } else {
            mens.push(base);
        }
    }
    SportsGroups { mens, womens }
}

fn split_sport_label(raw: &str) -> Option<(String, bool)> {
    let label = raw.trim();
    if label.is_empty() {
        return None;
    }

    let lower = label.to_lowercase();
    let is_womens = lower.ends_with("(women's)") || lower.ends_with("(women)");
    let is_mens = lower.ends_with("(men's)") || lower.ends_with("(men)");

    let base = if is_womens || is_mens {
        label
            .rfind('(')
            .map(|i| label[..i].trim_end())
            .unwrap_or(label)
    } else {
        label
    };
    Some((base.to_owned(), is_womens))
}
