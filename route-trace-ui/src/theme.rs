pub const DEFAULT_THEME: &str = "light";
const THEME_KEY: &str = "themeMode";

pub fn next_theme(current_theme: &str) -> String {
    if current_theme == "dark" {
        "light".to_string()
    } else {
        "dark".to_string()
    }
}

pub fn is_known_theme(theme: &str) -> bool {
    matches!(theme, "light" | "dark")
}

pub fn apply_theme_to_document(theme: &str) {
    if !is_known_theme(theme) {
        return;
    }

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme);
        }
    }
}

pub fn get_cached_theme_preference() -> Option<String> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(THEME_KEY).ok().flatten())
        .filter(|theme| is_known_theme(theme))
}

pub fn set_cached_theme_preference(theme: &str) {
    if !is_known_theme(theme) {
        return;
    }

    if let Some(storage) =
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    {
        let _ = storage.set_item(THEME_KEY, theme);
    }
}

/// Cached preference, else the default.
pub fn initial_theme() -> String {
    get_cached_theme_preference().unwrap_or_else(|| DEFAULT_THEME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_between_light_and_dark() {
        assert_eq!(next_theme("light"), "dark");
        assert_eq!(next_theme("dark"), "light");
        assert_eq!(next_theme("sepia"), "dark");
    }

    #[test]
    fn only_two_themes_are_known() {
        assert!(is_known_theme("light"));
        assert!(is_known_theme("dark"));
        assert!(!is_known_theme("Dark"));
    }
}
