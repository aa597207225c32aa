//! Runtime configuration.
//!
//! ```bash
//! TRANSIT_DEBUG=1 TRANSIT_PRINT_ON_END=1 RUST_LOG=transit=debug cargo run --example pager
//! ```

use std::env;

/// Configuration shared by a transition and the controller sets it creates
#[derive(Clone, Debug, PartialEq)]
pub struct TransitConfig {
    /// Record duplicate registrations and controller state changes in the
    /// set's [`StateLog`](crate::diagnostics::StateLog)
    pub debug: bool,
    /// Dump the state log through `log::debug!` when a set ends
    pub print_on_end: bool,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            debug: cfg!(debug_assertions),
            print_on_end: false,
        }
    }
}

impl TransitConfig {
    /// Defaults overridden by `TRANSIT_DEBUG` and `TRANSIT_PRINT_ON_END`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(debug) = env_flag("TRANSIT_DEBUG") {
            config.debug = debug;
        }
        if let Some(print) = env_flag("TRANSIT_PRINT_ON_END") {
            config.print_on_end = print;
        }
        config
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn print_on_end(mut self, print_on_end: bool) -> Self {
        self.print_on_end = print_on_end;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("ignoring unrecognised flag value {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_builder_style_overrides() {
        let config = TransitConfig::default().debug(false).print_on_end(true);
        assert!(!config.debug);
        assert!(config.print_on_end);
    }
}
