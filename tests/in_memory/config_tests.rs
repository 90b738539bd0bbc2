//! Integration tests for engine configuration loading.

use chrono::{Datelike, Days, Weekday};
use mockable::DefaultClock;
use rstest::rstest;
use std::io::Write;
use taskdeck::config::{ConfigError, EngineConfig, WeekStart};
use taskdeck::task::domain::DateWindow;

#[rstest]
fn empty_document_yields_defaults() {
    let config = EngineConfig::from_toml_str("").expect("empty config is valid");

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.locale, "he");
    assert_eq!(config.week_start, WeekStart::Sunday);
    assert!(!config.pad_trailing_weeks);
}

#[rstest]
fn explicit_values_override_defaults() {
    let config = EngineConfig::from_toml_str(
        r#"
        locale = "en-GB"
        week_start = "monday"
        pad_trailing_weeks = true
        page_size = 50
        "#,
    )
    .expect("valid config");

    assert_eq!(config.locale, "en-GB");
    assert_eq!(config.week_start.weekday(), Weekday::Mon);
    assert_eq!(config.page_size, 50);
    let options = config.calendar_options();
    assert_eq!(options.week_start, Weekday::Mon);
    assert!(options.pad_trailing);
}

#[rstest]
#[case("colour = \"blue\"")]
#[case("week_start = \"friday\"")]
#[case("page_size = \"many\"")]
fn malformed_documents_are_parse_errors(#[case] text: &str) {
    let err = EngineConfig::from_toml_str(text).expect_err("config should be rejected");
    assert!(matches!(err, ConfigError::ParseToml(_)), "got {err:?}");
}

#[rstest]
#[case("page_size = 0", "page_size")]
#[case("locale = \"not a locale!\"", "locale")]
fn out_of_range_values_name_the_key(#[case] text: &str, #[case] expected_key: &str) {
    let err = EngineConfig::from_toml_str(text).expect_err("config should be rejected");
    assert!(
        matches!(err, ConfigError::InvalidValue { key, .. } if key == expected_key),
        "got {err:?}"
    );
}

#[rstest]
fn load_reads_file_and_reports_missing_paths() {
    let dir = std::env::temp_dir().join(format!("taskdeck-config-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("engine.toml");
    let mut file = std::fs::File::create(&path).expect("create config file");
    writeln!(file, "week_start = \"saturday\"").expect("write config");

    let config = EngineConfig::load(&path).expect("load config");
    assert_eq!(config.week_start, WeekStart::Saturday);

    let missing = EngineConfig::load(&dir.join("absent.toml")).expect_err("missing file");
    assert!(matches!(missing, ConfigError::ReadFile { .. }));

    std::fs::remove_dir_all(&dir).expect("remove temp dir");
}

#[rstest]
fn filter_context_weeks_begin_on_configured_day() {
    let config = EngineConfig::from_toml_str("week_start = \"monday\"").expect("valid config");

    let context = config.filter_context(&DefaultClock);
    let today = context.today();
    let offset = u64::from(today.weekday().num_days_from_monday());
    let monday = today
        .checked_sub_days(Days::new(offset))
        .expect("date in range");
    let sunday_before = monday.pred_opt().expect("date in range");

    assert!(context.in_window(DateWindow::Today, today));
    assert!(context.in_window(DateWindow::Week, monday));
    assert!(!context.in_window(DateWindow::Week, sunday_before));
    assert!(
        context.in_window(
            DateWindow::Week,
            monday.checked_add_days(Days::new(6)).expect("date in range")
        )
    );
}
