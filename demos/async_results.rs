//! Logging the outcome of futures.
//!
//! Run with: cargo run --example async_results

use futures::executor::block_on;
use safe_stringify::{log_async, AsyncLogger, HtmlBuffer, HtmlContainer, Logger, LoggerOptions};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
struct Profile {
    id: u32,
    name: String,
    tags: Vec<String>,
}

#[derive(Debug)]
struct NotFound(u32);

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile {} not found", self.0)
    }
}

impl std::error::Error for NotFound {}

async fn fetch_profile(id: u32) -> Result<Profile, NotFound> {
    if id == 0 {
        return Err(NotFound(id));
    }
    Ok(Profile {
        id,
        name: format!("user-{}", id),
        tags: vec!["beta".to_string()],
    })
}

fn main() {
    let logger = Logger::new(LoggerOptions::default());

    block_on(async {
        let found = log_async(fetch_profile(7), &logger, Some("profile")).await;
        assert!(found.is_ok());

        let missing = log_async(fetch_profile(0), &logger, Some("profile")).await;
        assert!(missing.is_err());

        let async_logger = AsyncLogger::new(LoggerOptions::default());
        let mut page = HtmlBuffer::new();
        let _ = async_logger
            .to_element(fetch_profile(3), &mut page, Some("rendered"))
            .await;
        println!("{}", page.inner_html());
    });
}
