//! Motivational Quote Endpoint
//!
//! Serves one quote from a fixed offline list. An upstream quote API is
//! deliberately not involved; the list is small and the clients only need
//! variety, not freshness.

use axum::{routing::get, Json, Router};
use rand::Rng;
use serde::Serialize;

use super::AppState;

/// A quote with its author
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

const QUOTES: &[Quote] = &[
    Quote {
        text: "The way to get started is to quit talking and begin doing.",
        author: "Walt Disney",
    },
    Quote {
        text: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: "Winston Churchill",
    },
    Quote {
        text: "It is during our darkest moments that we must focus to see the light.",
        author: "Aristotle",
    },
    Quote {
        text: "The future belongs to those who believe in the beauty of their dreams.",
        author: "Eleanor Roosevelt",
    },
    Quote {
        text: "Don't watch the clock; do what it does. Keep going.",
        author: "Sam Levenson",
    },
    Quote {
        text: "The only impossible journey is the one you never begin.",
        author: "Tony Robbins",
    },
    Quote {
        text: "In the middle of difficulty lies opportunity.",
        author: "Albert Einstein",
    },
    Quote {
        text: "Believe you can and you're halfway there.",
        author: "Theodore Roosevelt",
    },
    Quote {
        text: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    Quote {
        text: "Life is what happens to you while you're busy making other plans.",
        author: "John Lennon",
    },
];

/// Create quote API routes
pub fn create_quote_routes() -> Router<AppState> {
    Router::new().route("/focusfuel/quote", get(random_quote))
}

/// Get a random motivational quote
async fn random_quote() -> Json<Quote> {
    let index = rand::thread_rng().gen_range(0..QUOTES.len());
    Json(QUOTES[index].clone())
}
