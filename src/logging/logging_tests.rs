use super::*;

#[test]
fn test_log_config_default() {
    let config = LogConfig::default();
    assert_eq!(config.log_level, Level::WARN);
    assert!(!config.json_format);
    assert!(config.log_dir.is_none());
}

#[test]
fn test_parse_rotation_hourly() {
    let rotation = parse_rotation("hourly");
    // Rotation doesn't impl PartialEq, so use debug
    let debug = format!("{rotation:?}");
    let hourly = format!("{:?}", Rotation::HOURLY);
    assert_eq!(debug, hourly);
}

#[test]
fn test_parse_rotation_daily_case_insensitive() {
    let debug = format!("{:?}", parse_rotation("DAILY"));
    assert_eq!(debug, format!("{:?}", Rotation::DAILY));
}

#[test]
fn test_parse_rotation_unknown_defaults_to_never() {
    let debug = format!("{:?}", parse_rotation("weekly"));
    assert_eq!(debug, format!("{:?}", Rotation::NEVER));
}

#[test]
fn test_level_from_verbosity() {
    assert_eq!(level_from_verbosity(0), Level::WARN);
    assert_eq!(level_from_verbosity(1), Level::INFO);
    assert_eq!(level_from_verbosity(2), Level::DEBUG);
    assert_eq!(level_from_verbosity(9), Level::DEBUG);
}

#[test]
fn test_log_filename_constant() {
    assert_eq!(LOG_FILENAME, "envtag.log");
}
