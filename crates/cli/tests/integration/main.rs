//! Integration tests that run pkgplan against a temporary project.

mod build_tests;
mod common;
mod spec_tests;
mod stack_tests;
