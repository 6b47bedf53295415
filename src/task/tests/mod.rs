//! Unit tests for the task lifecycle core.

mod status_tests;
