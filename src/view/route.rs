use crate::source::is_valid_site_code;
use serde::Serialize;
use std::fmt;

/// The two pages of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Home,
    /// Detail page of one site, by code.
    Site(String),
}

impl Route {
    /// Parses a dashboard path such as `/` or `/spot/474`.
    ///
    /// ```
    /// use shanghai_tourist::Route;
    ///
    /// assert_eq!(Route::parse("/"), Some(Route::Home));
    /// assert_eq!(Route::parse("/spot/474"), Some(Route::Site("474".into())));
    /// assert_eq!(Route::parse("/about"), None);
    /// ```
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(Route::Home);
        }
        match path.strip_prefix("/spot/") {
            Some(code) if is_valid_site_code(code) => {
                Some(Route::Site(code.to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Site(code) => write!(f, "/spot/{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_home() {
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/?date=1"), Some(Route::Home));
    }

    #[test]
    fn test_parse_site() {
        assert_eq!(Route::parse("/spot/6/"), Some(Route::Site("6".to_string())));
        assert_eq!(Route::parse("/spot/6#top"), Some(Route::Site("6".to_string())));
        assert_eq!(Route::parse("/spot/"), None);
        assert_eq!(Route::parse("/spot/6/extra"), None);
        assert_eq!(Route::parse("spot/6"), None);
        assert_eq!(Route::parse("/spot/.."), None);
        assert_eq!(Route::parse("/spot/a%2F..%2Fb"), None);
    }

    #[test]
    fn test_display_matches_parse() {
        for route in [Route::Home, Route::Site("474".to_string())] {
            assert_eq!(Route::parse(&route.to_string()), Some(route));
        }
    }
}
