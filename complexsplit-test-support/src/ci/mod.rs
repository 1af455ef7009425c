//! Environment-driven knobs shared by the CI jobs.

pub mod property_test_profile;
