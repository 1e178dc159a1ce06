//! Client-name extraction from free text.
//!
//! Implementations typically call out to a language model. The core only
//! consumes the trait and tolerates empty or partial answers.

use crate::error::ExtractionError;
use crate::models::receipt::Client;

/// Best-effort extraction of client details from arbitrary text.
pub trait ClientExtractor {
    fn extract(&self, text: &str) -> Result<Client, ExtractionError>;
}

impl<F> ClientExtractor for F
where
    F: Fn(&str) -> Result<Client, ExtractionError>,
{
    fn extract(&self, text: &str) -> Result<Client, ExtractionError> {
        self(text)
    }
}
