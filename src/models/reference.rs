//! Tag references stored inside output records.

/// Marker for references that name a vocabulary entry.
pub const VOCAB_PREFIX: &str = "vocab: ";

/// A reference string reduced to the form used for alias matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceKey {
    /// Whether the original string carried the vocabulary marker.
    pub vocab: bool,
    /// Trimmed, lowercased text with the marker removed.
    pub key: String,
}

impl ReferenceKey {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.strip_prefix(VOCAB_PREFIX) {
            Some(rest) => Self {
                vocab: true,
                key: rest.trim().to_string(),
            },
            None => Self {
                vocab: false,
                key: lowered,
            },
        }
    }

    /// Render a canonical tag string, restoring the marker if it was present.
    pub fn render(&self, canonical: &str) -> String {
        if self.vocab {
            format!("{}{}", VOCAB_PREFIX, canonical)
        } else {
            canonical.to_string()
        }
    }
}
