/// Names of the metadata entries the data-bus adapter layers onto stored
/// objects.
pub mod metadata_keys {
    /// ISO-8601 timestamp written once when the object is saved.
    pub const SAVE_TIME: &str = "save-time";

    /// ISO-8601 timestamp rewritten on every read, unless suppressed by
    /// configuration.
    pub const READ_TIME: &str = "read-time";

    /// Derived from the stored object's size on metadata reads; never written
    /// to the object itself.
    pub const LENGTH: &str = "length";
}
