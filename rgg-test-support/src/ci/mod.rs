//! Helpers that read CI-provided settings.

pub mod property_test_profile;
