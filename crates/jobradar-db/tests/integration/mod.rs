pub mod cache_tests;
pub mod common;
