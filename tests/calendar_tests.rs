use driverlog::core::calendar::{days_in_month, is_leap_year};
use driverlog::errors::AppError;
use driverlog::models::job_run::MonthSpec;

#[test]
fn test_leap_year_rule() {
    assert!(is_leap_year(2024));
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2023));
}

#[test]
fn test_days_in_month() {
    assert_eq!(days_in_month(2024, 2).unwrap(), 29);
    assert_eq!(days_in_month(1900, 2).unwrap(), 28);
    assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    assert_eq!(days_in_month(2023, 2).unwrap(), 28);
    assert_eq!(days_in_month(2023, 4).unwrap(), 30);
    assert_eq!(days_in_month(2023, 12).unwrap(), 31);
}

#[test]
fn test_invalid_month_is_rejected() {
    assert!(matches!(days_in_month(2024, 13), Err(AppError::InvalidInput(_))));
    assert!(matches!(days_in_month(2024, 0), Err(AppError::InvalidInput(_))));
    assert!(MonthSpec::new(2024, 13).is_err());
}

#[test]
fn test_unrepresentable_year_is_rejected() {
    assert!(matches!(MonthSpec::new(300000, 1), Err(AppError::InvalidInput(_))));
    assert!(matches!(MonthSpec::parse("-300000", "12"), Err(AppError::InvalidInput(_))));

    let far = MonthSpec::new(9999, 12).unwrap();
    assert_eq!(far.last_day().unwrap().to_string(), "9999-12-31");
}

#[test]
fn test_month_spec_parse() {
    let m = MonthSpec::parse("2024", "02").unwrap();
    assert_eq!(m.year(), 2024);
    assert_eq!(m.month(), 2);
    assert_eq!(m.days(), 29);
    assert_eq!(m.month_str(), "02");
    assert_eq!(m.to_string(), "2024-02");
    assert_eq!(m.last_day().unwrap().to_string(), "2024-02-29");

    let p = MonthSpec::parse_period("2023-11").unwrap();
    assert_eq!(p.days(), 30);

    assert!(MonthSpec::parse("abcd", "01").unwrap_err().is_validation());
    assert!(MonthSpec::parse("2024", "xx").unwrap_err().is_validation());
    assert!(MonthSpec::parse_period("202401").is_err());
}

#[test]
fn test_day_outside_month_is_invalid_date() {
    let m = MonthSpec::new(2023, 2).unwrap();
    assert!(matches!(m.day(29), Err(AppError::InvalidDate(_))));
    assert_eq!(m.day(28).unwrap().to_string(), "2023-02-28");
}
