/// Runtime configuration for the page navigation host
use std::path::PathBuf;

/// Environment variable naming the SQLite database file
pub const DATABASE_ENV: &str = "PAGE_NAV_DATABASE";

/// Environment variable holding the fallback log filter
pub const LOG_ENV: &str = "PAGE_NAV_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNavConfig {
    /// SQLite database file. `None` keeps everything in memory.
    pub database_path: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for PageNavConfig {
    fn default() -> Self {
        PageNavConfig {
            database_path: None,
            log_filter: "page_nav=info".to_string(),
        }
    }
}

impl PageNavConfig {
    /// Defaults overridden by `PAGE_NAV_DATABASE` and `PAGE_NAV_LOG`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = PageNavConfig::default();

        if let Some(path) = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        config
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PageNavConfig::default();
        assert!(config.database_path.is_none());
        assert_eq!(config.log_filter, "page_nav=info");
    }

    #[test]
    fn test_config_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(DATABASE_ENV, "/tmp/pages.db"), (LOG_ENV, "page_nav=debug")]);

        let config = PageNavConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/pages.db")));
        assert_eq!(config.log_filter, "page_nav=debug");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = PageNavConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, PageNavConfig::default());
    }
}
