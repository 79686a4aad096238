//! Error types for catalog access.

use thiserror::Error;

/// Errors that can occur while talking to the remote movie catalog.
///
/// Distinguishes the three failure kinds callers handle differently:
/// transport problems, logical failures the API reported in a well-formed
/// payload, and responses that could not be interpreted at all.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure: network unreachable or non-success HTTP status.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The API reported a logical failure in a well-formed error payload.
    #[error("Catalog API error: {reason}")]
    Api {
        /// The status message reported by the API
        reason: String,
    },

    /// The response body was missing expected fields or not valid JSON.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },
}

impl CatalogError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Network { .. } => {
                "Failed to fetch movies. Please try again later.".to_string()
            }
            CatalogError::Api { reason } => format!("Catalog error: {reason}"),
            CatalogError::Parse { .. } => {
                "Received an unexpected response from the catalog.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let network = CatalogError::Network {
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            network.user_message(),
            "Failed to fetch movies. Please try again later."
        );

        let api = CatalogError::Api {
            reason: "Invalid API key".to_string(),
        };
        assert_eq!(api.user_message(), "Catalog error: Invalid API key");
    }
}
