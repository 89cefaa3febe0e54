//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose output a bare config level applies to
const LOG_TARGETS: [&str; 3] = ["velvet_fr", "velvet_common", "tower_http"];

/// Filter directives for the `[logging] level` config value
///
/// A bare level ("debug") is applied to the service's own crates. A value
/// containing `=` is already a directive list and is used unchanged.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') {
        return level.to_string();
    }

    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber; `RUST_LOG` wins over the config value
pub fn init(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_expands_to_targets() {
        assert_eq!(
            filter_directives("debug"),
            "velvet_fr=debug,velvet_common=debug,tower_http=debug"
        );
        assert!(EnvFilter::try_new(filter_directives(" warn ")).is_ok());
    }

    #[test]
    fn test_directive_used_unchanged() {
        let directives = filter_directives("velvet_fr=debug,tower_http=warn");
        assert_eq!(directives, "velvet_fr=debug,tower_http=warn");

        let filter = EnvFilter::try_new(&directives).unwrap();
        let rendered = filter.to_string().to_lowercase();
        assert!(rendered.contains("velvet_fr=debug"), "{}", rendered);
        assert!(!rendered.contains("velvet_fr=velvet_fr"), "{}", rendered);
    }
}
