//! Helpers that read CI-provided tuning knobs for test suites.

pub mod property_test_profile;
