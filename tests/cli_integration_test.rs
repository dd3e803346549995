//! CLI orchestration tests.
//!
//! Tests cover:
//! - Parameter assembly from real INI files on disk
//! - Data path resolution (flag override vs `[data] prices`)
//! - Config validation failures surfaced before any run

mod common;

use common::*;
use std::path::PathBuf;
use trendtrader::adapters::file_config_adapter::FileConfigAdapter;
use trendtrader::cli;
use trendtrader::domain::config_validation::validate_run_config;
use trendtrader::domain::error::TrendtraderError;

const VALID_INI: &str = r#"
[data]
prices = prices/sp500.csv

[strategy]
small_window = 14
medium_window = 21
large_window = 40
slope_window = 60
slope_min = 0.1
stop_loss = 0.2

[backtest]
initial_cash = 1000000.0

[report]
data_output = out/simulation_data.csv
summary_output = out/simulation_log.csv
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_parameter_set_reads_all_fields() {
        let file = write_temp_ini(VALID_INI);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();

        validate_run_config(&adapter).unwrap();
        let params = cli::build_parameter_set(&adapter);

        assert_eq!(params.small_window, 14);
        assert_eq!(params.medium_window, 21);
        assert_eq!(params.large_window, 40);
        assert_eq!(params.slope_window, 60);
        assert!((params.slope_min - 0.1).abs() < f64::EPSILON);
        assert!((params.stop_loss - 0.2).abs() < f64::EPSILON);
        assert!((params.initial_cash - 1_000_000.0).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn load_config_rejects_missing_file() {
        assert!(cli::load_config(&PathBuf::from("/nonexistent/run.ini")).is_err());
    }

    #[test]
    fn validation_rejects_broken_strategy_section() {
        let broken = VALID_INI.replace("slope_window = 60", "slope_window = 0");
        let adapter = FileConfigAdapter::from_string(&broken).unwrap();
        assert!(matches!(
            validate_run_config(&adapter),
            Err(TrendtraderError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn ordering_violation_is_caught_after_assembly() {
        // Individually valid windows in the wrong order pass field checks
        // but fail the parameter invariant.
        let swapped = VALID_INI
            .replace("small_window = 14", "small_window = 40")
            .replace("large_window = 40", "large_window = 14");
        let adapter = FileConfigAdapter::from_string(&swapped).unwrap();

        validate_run_config(&adapter).unwrap();
        let params = cli::build_parameter_set(&adapter);
        assert!(matches!(
            params.validate(),
            Err(TrendtraderError::ParameterOrder { .. })
        ));
    }
}

mod data_resolution {
    use super::*;

    #[test]
    fn flag_override_wins() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let path =
            cli::resolve_data_path(Some(PathBuf::from("override.csv")), &adapter).unwrap();
        assert_eq!(path, PathBuf::from("override.csv"));
    }

    #[test]
    fn config_path_used_without_flag() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let path = cli::resolve_data_path(None, &adapter).unwrap();
        assert_eq!(path, PathBuf::from("prices/sp500.csv"));
    }

    #[test]
    fn missing_everywhere_is_a_config_error() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nsmall_window = 1\n").unwrap();
        assert!(matches!(
            cli::resolve_data_path(None, &adapter),
            Err(TrendtraderError::ConfigMissing { section, key })
                if section == "data" && key == "prices"
        ));
    }
}
