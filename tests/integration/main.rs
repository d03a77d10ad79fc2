//! Integration tests for lt24-dump
//!
//! These tests use wiremock to stand in for the tracking service and run
//! full dumps end-to-end into temporary directories.

mod auth_tests;
mod common;
mod crawl_tests;
