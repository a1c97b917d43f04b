//! Shared helpers for the live API tests

#![allow(dead_code)]

use std::env;

use mnlove_provider::RestProvider;

/// Return early when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_env {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert `Ok` and unwrap, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const BASE_URL_VAR: &str = "MNLOVE_API_BASE_URL";
pub const TOKEN_VAR: &str = "MNLOVE_API_TOKEN";

/// Provider against the API named by `MNLOVE_API_BASE_URL`.
pub fn live_provider() -> Option<RestProvider> {
    let base_url = env::var(BASE_URL_VAR).ok()?;
    let token = env::var(TOKEN_VAR).ok();
    RestProvider::new(base_url, token).ok()
}

/// Minneapolis, where the community feed is densest.
pub const MINNEAPOLIS: (f64, f64) = (44.97775, -93.26501);
