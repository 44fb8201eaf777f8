/// Translates logical blob ids into backing-store object names and back.
///
/// The backing namespace is flat; the configured prefix and suffix carve out
/// the slice of it this adapter owns. Decoding is the inverse of encoding and
/// doubles as the foreign-key filter during listings: a name that does not
/// carry both affixes belongs to somebody else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    prefix: String,
    suffix: String,
}

impl KeyCodec {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn encode(&self, id: &str) -> String {
        format!("{}{}{}", self.prefix, id, self.suffix)
    }

    /// Recovers the logical id from a listed object name, or `None` for names
    /// that were not produced by [`encode`](Self::encode). Callers skip those
    /// silently rather than erroring.
    pub fn decode(&self, key: &str) -> Option<String> {
        key.strip_prefix(&self.prefix)?
            .strip_suffix(&self.suffix)
            .map(str::to_owned)
    }
}
