use serde::{Deserialize, Serialize};

/// An inspirational quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub text: String,
    pub author: String,
    pub category: String,
}

impl QuoteItem {
    pub fn new(text: &str, author: &str, category: &str) -> Self {
        Self {
            text: text.to_string(),
            author: author.to_string(),
            category: category.to_string(),
        }
    }
}
