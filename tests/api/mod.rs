//! REST API endpoint tests

mod category_tests;
mod health_tests;
mod post_tests;
mod thread_tests;
mod user_tests;
