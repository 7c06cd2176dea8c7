//! Integration tests for the indicator pipeline

mod appearance_tests;
mod pipeline_tests;
mod support;
