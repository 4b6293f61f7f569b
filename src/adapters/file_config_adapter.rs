//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
dir = ./collected_data

[strategy]
short_window = 50
long_window = 200

[engine]
unit_size = 1000.0
initial_capital = 10000.0
close_at_end = on

[report]
output = trade_ledger.txt
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();

        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("./collected_data".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "short_window", 0), 50);
        assert_eq!(adapter.get_int("strategy", "long_window", 0), 200);
        assert_eq!(adapter.get_double("engine", "unit_size", 0.0), 1000.0);
        assert!(adapter.get_bool("engine", "close_at_end", false));
        assert_eq!(
            adapter.get_string("report", "output"),
            Some("trade_ledger.txt".to_string())
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[data]\ndir = ./d\n").unwrap();

        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_int("strategy", "short_window", 50), 50);
        assert_eq!(adapter.get_double("engine", "unit_size", 1000.0), 1000.0);
        assert!(adapter.get_bool("engine", "close_at_end", true));
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nshort_window = fifty\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "short_window", 50), 50);
        assert_eq!(adapter.get_double("strategy", "short_window", 1.5), 1.5);
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[t]\na = true\nb = yes\nc = on\nd = 1\ne = false\nf = no\ng = off\nh = 0\n",
        )
        .unwrap();

        for key in ["a", "b", "c", "d"] {
            assert!(adapter.get_bool("t", key, false), "{key} should be true");
        }
        for key in ["e", "f", "g", "h"] {
            assert!(!adapter.get_bool("t", key, true), "{key} should be false");
        }
    }

    #[test]
    fn get_usize_clamps_negative_to_default() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nshort_window = -3\n").unwrap();
        assert_eq!(adapter.get_usize("strategy", "short_window", 50), 50);
    }

    #[test]
    fn get_usize_reads_value() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nlong_window = 200\n").unwrap();
        assert_eq!(adapter.get_usize("strategy", "long_window", 0), 200);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("strategy", "long_window", 0), 200);
    }

    #[test]
    fn from_file_errors_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/config.ini").is_err());
    }
}
