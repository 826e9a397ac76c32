//! Team color theming.
//!
//! Produces the CSS custom-property map the web layer applies per team. The
//! defaults are the UCSD palette, used whenever a team carries no colors.
use alumni_api::{DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, TeamInfo};

const DEFAULT_TEXT_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_COLOR.to_owned(),
            secondary: DEFAULT_SECONDARY_COLOR.to_owned(),
            background: DEFAULT_PRIMARY_COLOR.to_owned(),
            text: DEFAULT_TEXT_COLOR.to_owned(),
            accent: DEFAULT_SECONDARY_COLOR.to_owned(),
        }
    }
}

impl ThemeColors {
    /// Theme for a team: primary drives the background, secondary the accents.
    pub fn from_team(team: &TeamInfo) -> Self {
        Self::from_palette(&team.primary_color, &team.secondary_color)
    }

    pub fn from_palette(primary: &str, secondary: &str) -> Self {
        let primary = non_empty_or(primary, DEFAULT_PRIMARY_COLOR);
        let secondary = non_empty_or(secondary, DEFAULT_SECONDARY_COLOR);
        Self {
            background: primary.clone(),
            accent: secondary.clone(),
            text: DEFAULT_TEXT_COLOR.to_owned(),
            primary,
            secondary,
        }
    }

    /// The CSS variable map consumed by the presentation layer. Overlay
    /// variants append an alpha nibble to the primary; hover states shift
    /// brightness by 20%.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary-color", self.primary.clone()),
            ("--secondary-color", self.secondary.clone()),
            ("--background-overlay", format!("{}dd", self.primary)),
            ("--background-overlay-light", format!("{}aa", self.primary)),
            ("--background-overlay-dark", format!("{}ee", self.primary)),
            ("--fab-color", self.secondary.clone()),
            ("--fab-hover-color", adjust_brightness(&self.secondary, 20)),
            ("--accent-color", self.accent.clone()),
            ("--accent-hover-color", adjust_brightness(&self.accent, -20)),
            ("--border-accent-color", self.secondary.clone()),
            ("--progress-color", self.secondary.clone()),
            ("--highlight-color", self.secondary.clone()),
        ]
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

/// Lighten (positive percent) or darken (negative) a `#rrggbb` color,
/// scaling each channel by its own value and clamping to 0..=255. Inputs
/// that are not six-digit hex pass through unchanged.
pub fn adjust_brightness(color: &str, percent: i32) -> String {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return color.to_owned();
    }

    let channel = |slice: &str| -> u8 {
        // Slice is validated hex above.
        let value = u8::from_str_radix(slice, 16).unwrap_or(0);
        let adjusted = f64::from(value) * (1.0 + f64::from(percent) / 100.0);
        adjusted.round().clamp(0.0, 255.0) as u8
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        channel(&hex[0..2]),
        channel(&hex[2..4]),
        channel(&hex[4..6])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_scales_each_channel_by_its_own_value() {
        // 0xcd = 205; +20% → 246 = 0xf6. Zero channels stay zero.
        assert_eq!(adjust_brightness("#FFCD00", 20), "#fff600");
        assert_eq!(adjust_brightness("#000000", 50), "#000000");
    }

    #[test]
    fn brightness_darkens_and_clamps() {
        assert_eq!(adjust_brightness("#ffffff", -50), "#808080");
        assert_eq!(adjust_brightness("#ffffff", 300), "#ffffff");
    }

    #[test]
    fn invalid_colors_pass_through_unchanged() {
        assert_eq!(adjust_brightness("teal", 20), "teal");
        assert_eq!(adjust_brightness("#12", 20), "#12");
    }

    #[test]
    fn empty_team_colors_fall_back_to_the_default_palette() {
        let theme = ThemeColors::from_palette("", "");
        assert_eq!(theme, ThemeColors::default());
    }

    #[test]
    fn css_variables_cover_the_full_presentation_set() {
        let theme = ThemeColors::from_palette("#182B49", "#FFCD00");
        let vars = theme.css_variables();
        assert_eq!(vars.len(), 12);

        let get = |name: &str| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        assert_eq!(get("--background-overlay"), "#182B49dd");
        assert_eq!(get("--accent-hover-color"), adjust_brightness("#FFCD00", -20));
        assert_eq!(get("--progress-color"), "#FFCD00");
    }
}
