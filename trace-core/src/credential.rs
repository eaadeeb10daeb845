//! The stored session token.
//!
//! The browser keeps it in a root-scoped cookie that lives for one day; the
//! cookie strings are built here so the format is testable off the browser.

use std::cell::RefCell;

pub const COOKIE_NAME: &str = "authToken";
pub const COOKIE_PATH: &str = "/";
pub const COOKIE_MAX_AGE_SECS: u64 = 24 * 60 * 60;

pub trait CredentialStore {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RefCell<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

/// Value of `name` in a `document.cookie` style header, still encoded.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `encoded_value` must already be URI-component encoded.
pub fn set_cookie_string(name: &str, encoded_value: &str) -> String {
    format!("{name}={encoded_value}; path={COOKIE_PATH}; max-age={COOKIE_MAX_AGE_SECS}; SameSite=Lax")
}

pub fn clear_cookie_string(name: &str) -> String {
    format!("{name}=; path={COOKIE_PATH}; max-age=0; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_cookie_among_others() {
        let header = "themeMode=dark; authToken=abc%3D123; other=1";
        assert_eq!(cookie_value(header, COOKIE_NAME), Some("abc%3D123"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("authToken=", COOKIE_NAME), None);
        assert_eq!(cookie_value("", COOKIE_NAME), None);
    }

    #[test]
    fn cookie_strings_are_root_scoped_for_a_day() {
        let set = set_cookie_string(COOKIE_NAME, "abc");
        assert!(set.starts_with("authToken=abc;"));
        assert!(set.contains("path=/"));
        assert!(set.contains("max-age=86400"));
        assert!(clear_cookie_string(COOKIE_NAME).contains("max-age=0"));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentials::new();
        assert_eq!(store.load(), None);
        store.store("t0k3n");
        assert_eq!(store.load().as_deref(), Some("t0k3n"));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
