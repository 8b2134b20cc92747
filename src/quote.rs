use serde::{Deserialize, Serialize};

/// A single quote with its category label.
///
/// Quotes have no identifier; equality is structural. Two collections are
/// considered in sync when their serialized JSON forms match exactly, so
/// field order here is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// The built-in quotes used when no saved collection exists yet.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new("The only limit is your mind.", "Motivation"),
        Quote::new("Creativity takes courage.", "Inspiration"),
        Quote::new("Learning never exhausts the mind.", "Education"),
    ]
}
