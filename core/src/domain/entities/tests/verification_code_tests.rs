//! Unit tests for verification code value type

use crate::domain::entities::verification_code::{
    VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN,
};

#[test]
fn test_generated_codes_are_in_range() {
    for _ in 0..1000 {
        let code = VerificationCode::generate();
        let value: u32 = code.as_str().parse().unwrap();

        assert!((CODE_MIN..=CODE_MAX).contains(&value));
        assert_eq!(code.as_str().len(), CODE_LENGTH);
    }
}

#[test]
fn test_from_value() {
    let code = VerificationCode::from_value(482913);
    assert_eq!(code.as_str(), "482913");
    assert_eq!(code.to_string(), "482913");
}

#[test]
fn test_debug_does_not_leak_code() {
    let code = VerificationCode::from_value(482913);
    assert!(!format!("{:?}", code).contains("482913"));
}

#[test]
fn test_canonicalize_plain_digits() {
    assert_eq!(VerificationCode::canonicalize("482913"), Some("482913".to_string()));
}

#[test]
fn test_canonicalize_trims_and_strips_leading_zeros() {
    assert_eq!(VerificationCode::canonicalize(" 0482913\n"), Some("482913".to_string()));
    assert_eq!(VerificationCode::canonicalize("+111222"), Some("111222".to_string()));
    assert_eq!(VerificationCode::canonicalize("000"), Some("0".to_string()));
}

#[test]
fn test_canonicalize_rejects_non_numeric() {
    assert_eq!(VerificationCode::canonicalize(""), None);
    assert_eq!(VerificationCode::canonicalize("   "), None);
    assert_eq!(VerificationCode::canonicalize("12a456"), None);
    assert_eq!(VerificationCode::canonicalize("-482913"), None);
    assert_eq!(VerificationCode::canonicalize("48 2913"), None);
    assert_eq!(VerificationCode::canonicalize("+"), None);
}
