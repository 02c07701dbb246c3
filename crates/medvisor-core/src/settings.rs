use clap::Parser;
use std::path::PathBuf;

/// Number of table rows shown per page unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Medical billing KPI dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "medvisor",
    about = "Medical billing & revenue cycle KPI dashboard",
    version
)]
pub struct Settings {
    /// Claims CSV to load on startup (sample data is shown otherwise)
    #[arg(long, env = "MEDVISOR_FILE")]
    pub file: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Print the dashboard snapshot as JSON and exit
    #[arg(long)]
    pub json: bool,

    /// Table rows per page (1-100)
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub page_size: u32,

    /// Logging level
    #[arg(
        long,
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::parse().resolved()
    }

    /// Same as [`Settings::load`] for an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(args).resolved()
    }

    /// `--debug` overrides the log level.
    fn resolved(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size as usize
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::try_parse_from(["medvisor"]).expect("defaults parse");

        assert_eq!(settings.theme, "auto");
        assert!(!settings.json);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_file_and_json() {
        let settings =
            Settings::load_from_args(["medvisor", "--file", "/tmp/claims.csv", "--json"]);
        assert_eq!(settings.file, Some(PathBuf::from("/tmp/claims.csv")));
        assert!(settings.json);
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["medvisor", "--log-level", "ERROR", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_page_size_range() {
        assert!(Settings::try_parse_from(["medvisor", "--page-size", "0"]).is_err());
        assert!(Settings::try_parse_from(["medvisor", "--page-size", "101"]).is_err());
        let settings = Settings::load_from_args(["medvisor", "--page-size", "25"]);
        assert_eq!(settings.page_size(), 25);
    }

    #[test]
    fn test_settings_rejects_unknown_theme() {
        assert!(Settings::try_parse_from(["medvisor", "--theme", "neon"]).is_err());
    }
}
