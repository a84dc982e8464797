//! Tests for verification service

mod service_tests;
