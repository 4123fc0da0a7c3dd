//! Property-based tests for the validator.
