//! Unit tests for configuration structures and parsing.

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use crate::error::ConfigError;

    // ============= Defaults Tests =============

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.listing.base_url, "https://bff.capitoltrades.com/trades");
        assert_eq!(config.listing.page_size, 36);
        assert_eq!(config.listing.sort_by, "-txDate");
        assert_eq!(config.listing.request_timeout_secs, 30);
        assert_eq!(config.poller.cron, "0 */5 * * * *");
        assert_eq!(config.poller.backfill, 0);
        assert_eq!(config.poller.initial_watermark, None);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("").unwrap();
        assert_eq!(config.listing.page_size, 36);
    }

    // ============= Parsing Tests =============

    #[test]
    fn test_full_config_deserialize() {
        let yaml = r#"
listing:
  base_url: "http://localhost:8080/trades"
  page_size: 12
  sort_by: "txDate"
  request_timeout_secs: 5
poller:
  cron: "*/30 * * * * *"
  backfill: 50
  initial_watermark: 31000
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.listing.base_url, "http://localhost:8080/trades");
        assert_eq!(config.listing.page_size, 12);
        assert_eq!(config.listing.sort_by, "txDate");
        assert_eq!(config.listing.request_timeout_secs, 5);
        assert_eq!(config.poller.cron, "*/30 * * * * *");
        assert_eq!(config.poller.backfill, 50);
        assert_eq!(config.poller.initial_watermark, Some(31000));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let yaml = r#"
listing:
  page_size: 10
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.listing.page_size, 10);
        assert_eq!(config.listing.sort_by, "-txDate");
        assert_eq!(config.poller.cron, "0 */5 * * * *");
    }

    #[test]
    fn test_bom_is_stripped() {
        let yaml = "\u{feff}listing:\n  page_size: 20\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.listing.page_size, 20);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let result = AppConfig::from_yaml("listing: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    // ============= Validation Tests =============

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = AppConfig::default();
        config.listing.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = AppConfig::default();
        config.listing.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
