use ratatui::style::Color;
use serde::Deserialize;

/// All semantic color slots for the mmerge UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,
    pub selection_bg: Color,

    // Conflict panels
    pub context_fg: Color,
    pub diff_add_fg: Color,
    pub diff_del_fg: Color,
    pub diff_equal_fg: Color,

    // Conflict list
    pub resolved: Color,
    pub unresolved: Color,

    pub syntax: SyntaxColors,
}

/// Syntax highlighting color slots.
#[derive(Debug, Clone)]
pub struct SyntaxColors {
    pub comment: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub function: Color,
    pub type_name: Color,
    pub variable: Color,
    pub operator: Color,
    pub property: Color,
    pub punctuation: Color,
    pub default_fg: Color,
}

pub const THEME_NAMES: &[&str] = &["one-dark", "github-dark", "dracula", "solarized-dark"];

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" => github_dark(),
            "dracula" => dracula(),
            "solarized-dark" => solarized_dark(),
            _ => one_dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        one_dark()
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Serde-compatible override struct ──────────────────────────────

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub surface: Option<String>,
    pub selection_bg: Option<String>,
    pub context_fg: Option<String>,
    pub diff_add_fg: Option<String>,
    pub diff_del_fg: Option<String>,
    pub diff_equal_fg: Option<String>,
    pub resolved: Option<String>,
    pub unresolved: Option<String>,
}

pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(ref hex) = overrides.$field {
                if let Some(c) = parse_hex_color(hex) {
                    theme.$field = c;
                }
            }
        };
    }
    apply!(accent);
    apply!(text);
    apply!(text_muted);
    apply!(surface);
    apply!(selection_bg);
    apply!(context_fg);
    apply!(diff_add_fg);
    apply!(diff_del_fg);
    apply!(diff_equal_fg);
    apply!(resolved);
    apply!(unresolved);
}

// ── Built-in themes ──────────────────────────────────────────────

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Cyan,
        text: Color::White,
        text_muted: Color::DarkGray,
        surface: Color::Rgb(30, 30, 30),
        selection_bg: Color::Rgb(40, 40, 50),
        context_fg: Color::Rgb(92, 99, 112),
        diff_add_fg: Color::Green,
        diff_del_fg: Color::Red,
        diff_equal_fg: Color::Rgb(171, 178, 191),
        resolved: Color::Green,
        unresolved: Color::Red,
        syntax: SyntaxColors {
            comment: Color::Rgb(106, 115, 125),
            keyword: Color::Rgb(198, 120, 221),
            string: Color::Rgb(152, 195, 121),
            number: Color::Rgb(209, 154, 102),
            function: Color::Rgb(97, 175, 239),
            type_name: Color::Rgb(229, 192, 123),
            variable: Color::Rgb(171, 178, 191),
            operator: Color::Rgb(86, 182, 194),
            property: Color::Rgb(224, 108, 117),
            punctuation: Color::Rgb(140, 140, 140),
            default_fg: Color::Rgb(171, 178, 191),
        },
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        accent: Color::Rgb(88, 166, 255),
        text: Color::Rgb(230, 237, 243),
        text_muted: Color::Rgb(125, 133, 144),
        surface: Color::Rgb(22, 27, 34),
        selection_bg: Color::Rgb(38, 50, 72),
        context_fg: Color::Rgb(110, 118, 129),
        diff_add_fg: Color::Rgb(63, 185, 80),
        diff_del_fg: Color::Rgb(248, 81, 73),
        diff_equal_fg: Color::Rgb(230, 237, 243),
        resolved: Color::Rgb(63, 185, 80),
        unresolved: Color::Rgb(248, 81, 73),
        syntax: SyntaxColors {
            comment: Color::Rgb(125, 133, 144),
            keyword: Color::Rgb(255, 123, 114),
            string: Color::Rgb(165, 214, 255),
            number: Color::Rgb(121, 192, 255),
            function: Color::Rgb(210, 168, 255),
            type_name: Color::Rgb(255, 166, 87),
            variable: Color::Rgb(230, 237, 243),
            operator: Color::Rgb(255, 123, 114),
            property: Color::Rgb(121, 192, 255),
            punctuation: Color::Rgb(125, 133, 144),
            default_fg: Color::Rgb(230, 237, 243),
        },
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(139, 233, 253),
        text: Color::Rgb(248, 248, 242),
        text_muted: Color::Rgb(98, 114, 164),
        surface: Color::Rgb(40, 42, 54),
        selection_bg: Color::Rgb(68, 71, 90),
        context_fg: Color::Rgb(98, 114, 164),
        diff_add_fg: Color::Rgb(80, 250, 123),
        diff_del_fg: Color::Rgb(255, 85, 85),
        diff_equal_fg: Color::Rgb(248, 248, 242),
        resolved: Color::Rgb(80, 250, 123),
        unresolved: Color::Rgb(255, 85, 85),
        syntax: SyntaxColors {
            comment: Color::Rgb(98, 114, 164),
            keyword: Color::Rgb(255, 121, 198),
            string: Color::Rgb(241, 250, 140),
            number: Color::Rgb(189, 147, 249),
            function: Color::Rgb(80, 250, 123),
            type_name: Color::Rgb(139, 233, 253),
            variable: Color::Rgb(248, 248, 242),
            operator: Color::Rgb(255, 121, 198),
            property: Color::Rgb(189, 147, 249),
            punctuation: Color::Rgb(248, 248, 242),
            default_fg: Color::Rgb(248, 248, 242),
        },
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "solarized-dark".to_string(),
        accent: Color::Rgb(38, 139, 210),
        text: Color::Rgb(147, 161, 161),
        text_muted: Color::Rgb(88, 110, 117),
        surface: Color::Rgb(0, 34, 43),
        selection_bg: Color::Rgb(7, 54, 66),
        context_fg: Color::Rgb(88, 110, 117),
        diff_add_fg: Color::Rgb(133, 153, 0),
        diff_del_fg: Color::Rgb(220, 50, 47),
        diff_equal_fg: Color::Rgb(147, 161, 161),
        resolved: Color::Rgb(133, 153, 0),
        unresolved: Color::Rgb(220, 50, 47),
        syntax: SyntaxColors {
            comment: Color::Rgb(88, 110, 117),
            keyword: Color::Rgb(133, 153, 0),
            string: Color::Rgb(42, 161, 152),
            number: Color::Rgb(211, 54, 130),
            function: Color::Rgb(38, 139, 210),
            type_name: Color::Rgb(181, 137, 0),
            variable: Color::Rgb(147, 161, 161),
            operator: Color::Rgb(133, 153, 0),
            property: Color::Rgb(38, 139, 210),
            punctuation: Color::Rgb(88, 110, 117),
            default_fg: Color::Rgb(147, 161, 161),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
        assert_eq!(parse_hex_color("aébcd"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_one_dark() {
        assert_eq!(Theme::from_name("nope").name, "one-dark");
        for name in THEME_NAMES {
            assert_eq!(Theme::from_name(name).name, *name);
        }
    }

    #[test]
    fn test_apply_overrides_ignores_bad_hex() {
        let mut theme = Theme::from_name("one-dark");
        let overrides = ThemeOverrides {
            resolved: Some("#010203".into()),
            unresolved: Some("not-a-color".into()),
            ..Default::default()
        };
        apply_overrides(&mut theme, &overrides);
        assert_eq!(theme.resolved, Color::Rgb(1, 2, 3));
        assert_eq!(theme.unresolved, Color::Red);
    }
}
