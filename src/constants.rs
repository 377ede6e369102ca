//! Central constants for the ghrepo application

/// GitHub settings not covered by `ghrepo_github::types::constants`
pub mod github {
    /// Environment variable consulted when no token is configured
    pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "ghrepo.yaml";
}

/// Default values for logging
pub mod logging {
    /// Filter used when `RUST_LOG` is unset
    pub const DEFAULT_FILTER: &str = "warn";

    /// Filter used with `--verbose`
    pub const VERBOSE_FILTER: &str = "ghrepo=debug,ghrepo_github=debug";
}
