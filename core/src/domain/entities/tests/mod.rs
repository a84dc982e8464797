//! Tests for domain entities

mod user_tests;
mod verification_code_tests;
