//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

use chrono::NaiveDate;

/// Test that distribution functions are accessible via absolute path.
#[test]
fn test_distributions_module_exports() {
    use risk_core::math::distributions::norm_cdf;
    use risk_core::math::distributions::norm_inv;
    use risk_core::math::distributions::norm_pdf;

    let z = norm_inv(0.975_f64);
    assert!((norm_cdf(z) - 0.975).abs() < 1e-6);
    assert!(norm_pdf(z) > 0.0);
}

/// Test that statistics functions are accessible via the math re-exports.
#[test]
fn test_statistics_reexports() {
    use risk_core::math::{mean, pct_change, percentile_linear, rolling_std, sample_std};

    let series = [1000.0, 1100.0, 990.0];
    let returns = pct_change(&series);
    assert_eq!(returns.len(), 3);
    assert!(mean(&returns).is_some());
    assert!(sample_std(&returns).is_some());
    assert!(percentile_linear(&returns, 5.0).is_some());
    assert_eq!(rolling_std(&returns, 2).len(), 3);
}

/// Test that types re-exports work at module level.
#[test]
fn test_types_reexports() {
    use risk_core::types::{
        Date, DateError, RiskError, RiskResult, TradeAction, TradeFieldError, TradeStatus,
    };

    let _date = Date::from_ymd(2024, 6, 15).unwrap();
    let _action = TradeAction::Buy;
    let _status = TradeStatus::Open;
    let _err = RiskError::MissingColumns(vec!["Quantity".to_string()]);
    let _date_err = DateError::ParseError("x".to_string());
    let _field_err = TradeFieldError::UnknownStatus("x".to_string());
    let ok: RiskResult<u8> = Ok(1);
    assert!(ok.is_ok());
}

/// Test chrono integration with the time module.
#[test]
fn test_chrono_integration() {
    use risk_core::types::time::Date;

    let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let date = Date::from(naive);
    assert_eq!(date.into_inner(), naive);
    assert_eq!(date.to_string(), "2024-02-29");
}

/// Test that error predicates classify every variant.
#[test]
fn test_error_classification() {
    use risk_core::types::RiskError;

    let validation = RiskError::InvalidValue {
        column: "Trade Status".to_string(),
        row: 1,
        value: "pending".to_string(),
    };
    let parameter = RiskError::invalid_parameter("window", "must be at least 2");
    let data = RiskError::insufficient_data("rolling volatility", 0, 2);

    assert!(validation.is_validation());
    assert!(parameter.is_invalid_parameter());
    assert!(data.is_insufficient_data());
    assert!(!data.is_validation());
}
