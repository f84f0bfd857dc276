use super::{ResolvedTheme, Theme, ThemeColor, ThemeColors, ThemeVariant};

pub fn all_themes() -> Vec<Theme> {
    vec![default_dark(), default_light(), nord()]
}

pub fn by_name(name: &str) -> Option<Theme> {
    all_themes().into_iter().find(|t| t.name == name)
}

pub fn default_for_variant(variant: ThemeVariant) -> ResolvedTheme {
    match variant {
        ThemeVariant::Dark => default_dark().into(),
        ThemeVariant::Light => default_light().into(),
    }
}

fn named(s: &str) -> ThemeColor {
    ThemeColor::Named(s.to_string())
}

fn hex(s: &str) -> ThemeColor {
    ThemeColor::Hex(s.to_string())
}

fn default_dark() -> Theme {
    Theme {
        name: "default-dark".to_string(),
        description: "Terminal colors on a dark background".to_string(),
        variant: ThemeVariant::Dark,
        colors: ThemeColors {
            foreground: named("white"),
            foreground_dim: hex("#6A9A9A"),
            border: hex("#6A9A9A"),
            selection_bg: named("darkgray"),
            primary: named("yellow"),
            error: named("red"),
            item_title: named("white"),
            item_source: named("cyan"),
            item_time: hex("#6A9A9A"),
            status_bar_bg: named("blue"),
            status_bar_fg: named("white"),
            spinner: named("yellow"),
        },
    }
}

fn default_light() -> Theme {
    Theme {
        name: "default-light".to_string(),
        description: "Terminal colors on a light background".to_string(),
        variant: ThemeVariant::Light,
        colors: ThemeColors {
            foreground: named("black"),
            foreground_dim: named("darkgray"),
            border: named("darkgray"),
            selection_bg: named("lightblue"),
            primary: named("blue"),
            error: named("red"),
            item_title: named("black"),
            item_source: named("blue"),
            item_time: named("darkgray"),
            status_bar_bg: named("blue"),
            status_bar_fg: named("white"),
            spinner: named("blue"),
        },
    }
}

fn nord() -> Theme {
    Theme {
        name: "nord".to_string(),
        description: "Arctic, north-bluish palette".to_string(),
        variant: ThemeVariant::Dark,
        colors: ThemeColors {
            foreground: hex("#ECEFF4"),
            foreground_dim: hex("#4C566A"),
            border: hex("#4C566A"),
            selection_bg: hex("#3B4252"),
            primary: hex("#88C0D0"),
            error: hex("#BF616A"),
            item_title: hex("#ECEFF4"),
            item_source: hex("#81A1C1"),
            item_time: hex("#4C566A"),
            status_bar_bg: hex("#5E81AC"),
            status_bar_fg: hex("#ECEFF4"),
            spinner: hex("#88C0D0"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_are_unique() {
        let themes = all_themes();
        let mut names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), themes.len());
    }

    #[test]
    fn lookup_by_name() {
        assert!(by_name("nord").is_some());
        assert!(by_name("monokai").is_none());
    }

    #[test]
    fn default_matches_variant() {
        assert_eq!(default_for_variant(ThemeVariant::Dark).variant, ThemeVariant::Dark);
        assert_eq!(default_for_variant(ThemeVariant::Light).variant, ThemeVariant::Light);
    }
}
