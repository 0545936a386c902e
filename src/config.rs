use std::str::FromStr;

use anyhow::{bail, Context};

use crate::domain::{BoardRules, BoardState, Column};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub frontend_dir: String,
    pub cors_origin: String,
    /// New cards must come with a checklist.
    pub require_checklist: bool,
    /// Capacity of the first column, `None` for unbounded.
    pub planned_max_cards: Option<usize>,
    /// Capacity of the second column, `None` for unbounded.
    pub in_progress_max_cards: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Reads each setting through `lookup`. A malformed value is logged and
    /// replaced by its default; the other settings are kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: setting(&lookup, "PORT", defaults.port, |v| {
                u16::from_str(v.trim()).context("expected a port number")
            }),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            frontend_dir: lookup("FRONTEND_DIR").unwrap_or(defaults.frontend_dir),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            require_checklist: setting(
                &lookup,
                "REQUIRE_CHECKLIST",
                defaults.require_checklist,
                parse_flag,
            ),
            planned_max_cards: setting(
                &lookup,
                "PLANNED_MAX_CARDS",
                defaults.planned_max_cards,
                parse_capacity,
            ),
            in_progress_max_cards: setting(
                &lookup,
                "IN_PROGRESS_MAX_CARDS",
                defaults.in_progress_max_cards,
                parse_capacity,
            ),
        }
    }

    pub fn board_rules(&self) -> BoardRules {
        BoardRules {
            require_checklist: self.require_checklist,
            ..BoardRules::default()
        }
    }

    /// Empty board with the configured columns.
    pub fn board_layout(&self) -> BoardState {
        BoardState::new(Column::defaults(
            self.planned_max_cards,
            self.in_progress_max_cards,
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 21547,
            database_url: "sqlite:kanban.db".into(),
            frontend_dir: "../frontend/dist".into(),
            cors_origin: "http://localhost:21548,http://127.0.0.1:21548".into(),
            require_checklist: true,
            planned_max_cards: Some(3),
            in_progress_max_cards: Some(5),
        }
    }
}

fn setting<T: std::fmt::Debug>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    parse: impl Fn(&str) -> Result<T, anyhow::Error>,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };

    match parse(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring invalid {}={:?} ({:#}), using {:?}", key, raw, e, default);
            default
        }
    }
}

fn parse_flag(value: &str) -> Result<bool, anyhow::Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

/// `none`, `unbounded` or an empty value lift the limit; otherwise a
/// positive integer.
fn parse_capacity(value: &str) -> Result<Option<usize>, anyhow::Error> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("unbounded") {
        return Ok(None);
    }

    let capacity: usize = value
        .parse()
        .with_context(|| format!("expected a positive integer, got '{value}'"))?;
    if capacity == 0 {
        bail!("capacity must be positive");
    }
    Ok(Some(capacity))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag(" off ").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("4").unwrap(), Some(4));
        assert_eq!(parse_capacity("none").unwrap(), None);
        assert_eq!(parse_capacity("").unwrap(), None);
        assert!(parse_capacity("0").is_err());
        assert!(parse_capacity("-2").is_err());
    }

    #[test]
    fn test_bad_value_keeps_other_settings() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite:/data/prod.db"),
            ("REQUIRE_CHECKLIST", "maybe"),
            ("PLANNED_MAX_CARDS", "7"),
            ("IN_PROGRESS_MAX_CARDS", "0"),
            ("PORT", "not-a-port"),
        ]);

        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_url, "sqlite:/data/prod.db");
        assert!(config.require_checklist);
        assert_eq!(config.planned_max_cards, Some(7));
        assert_eq!(config.in_progress_max_cards, Some(5));
        assert_eq!(config.port, 21547);
    }

    #[test]
    fn test_valid_values_are_used() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "8080"),
            ("REQUIRE_CHECKLIST", "off"),
            ("IN_PROGRESS_MAX_CARDS", "none"),
        ]);

        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.port, 8080);
        assert!(!config.board_rules().require_checklist);
        assert_eq!(config.in_progress_max_cards, None);
        assert_eq!(config.database_url, "sqlite:kanban.db");
    }

    #[test]
    fn test_default_layout() {
        let config = Config::default();
        let board = config.board_layout();
        assert_eq!(board.columns.len(), 4);
        assert_eq!(board.columns[0].max_cards, Some(3));
        assert_eq!(board.columns[1].max_cards, Some(5));
        assert!(config.board_rules().require_checklist);
    }
}
