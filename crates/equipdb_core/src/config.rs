//! Store configuration.

/// Configuration for opening a record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether to create missing parent directories of the backing file
    /// when it is first written. When false, opening a file whose directory
    /// does not exist fails.
    pub create_if_missing: bool,

    /// Whether `create` and `update` reject empty name, category or
    /// manufacturer.
    pub validate_required_fields: bool,

    /// Whether snapshots are written as indented JSON.
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            validate_required_fields: true,
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether required fields are enforced by the store.
    #[must_use]
    pub const fn validate_required_fields(mut self, value: bool) -> Self {
        self.validate_required_fields = value;
        self
    }

    /// Sets whether snapshots are pretty-printed.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert!(config.create_if_missing);
        assert!(config.validate_required_fields);
        assert!(config.pretty);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new()
            .create_if_missing(false)
            .validate_required_fields(false)
            .pretty(false);

        assert!(!config.create_if_missing);
        assert!(!config.validate_required_fields);
        assert!(!config.pretty);
    }
}
