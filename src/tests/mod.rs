pub mod support;

mod cache_tests;
mod refresh_tests;
