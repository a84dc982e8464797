//! Tests for email transports
