//! Test Module
//!
//! Cross-module test suite for the InnovVentas backend.
//!
//! ## Test Categories
//! - `mocks`: in-memory providers shared by the other suites
//! - `chat_tests`: dispatcher flows (welcome, FAQ, sentiment replies, legacy mode)
//! - `provider_tests`: Azure clients against a wiremock server
//! - `api_tests`: full router exercised with `tower::ServiceExt::oneshot`
//! - `config_tests`: environment loading

pub mod provider_tests;
