use std::time::Duration;

use crate::domain::errors::ConfigError;

/// Options shared by every cloud storage adapter variant.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    /// Project the bucket belongs to; required for auto-creation.
    pub project_id: String,
    /// Bucket all objects live in.
    pub bucket_name: String,
    /// Skip the read-timestamp patch on every read. Saves one metadata
    /// round-trip per read.
    pub do_not_update_last_read_time: bool,
    /// Create the bucket at construction if it does not exist.
    pub auto_create_bucket: bool,
    /// Maximum number of times to retry an operation before reporting failure.
    pub max_retries: u32,
    /// Median delay to target before the first retry.
    pub median_first_retry_delay: Duration,
}

impl StorageOptions {
    pub fn new(
        project_id: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let project_id = project_id.into();
        let bucket_name = bucket_name.into();
        if project_id.trim().is_empty() {
            return Err(ConfigError::MissingOption { name: "project_id" });
        }
        if bucket_name.trim().is_empty() {
            return Err(ConfigError::MissingOption { name: "bucket_name" });
        }
        Ok(Self {
            project_id,
            bucket_name,
            do_not_update_last_read_time: false,
            auto_create_bucket: true,
            max_retries: 5,
            median_first_retry_delay: Duration::from_millis(200),
        })
    }

    pub fn with_do_not_update_last_read_time(mut self, value: bool) -> Self {
        self.do_not_update_last_read_time = value;
        self
    }

    pub fn with_auto_create_bucket(mut self, value: bool) -> Self {
        self.auto_create_bucket = value;
        self
    }

    pub fn with_max_retries(mut self, value: u32) -> Self {
        self.max_retries = value;
        self
    }

    pub fn with_median_first_retry_delay(mut self, value: Duration) -> Self {
        self.median_first_retry_delay = value;
        self
    }
}

/// Options for the data-bus blob adapter.
#[derive(Debug, Clone)]
pub struct DataBusOptions {
    pub common: StorageOptions,
    /// Prefix for object keys. Defaults to `data-`.
    pub object_key_prefix: String,
    /// Suffix for object keys. Defaults to `.dat`.
    pub object_key_suffix: String,
}

impl DataBusOptions {
    pub fn new(
        project_id: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_common(StorageOptions::new(project_id, bucket_name)?))
    }

    pub fn from_common(common: StorageOptions) -> Self {
        Self {
            common,
            object_key_prefix: "data-".to_owned(),
            object_key_suffix: ".dat".to_owned(),
        }
    }

    pub fn with_object_key_prefix(mut self, value: impl Into<String>) -> Self {
        self.object_key_prefix = value.into();
        self
    }

    pub fn with_object_key_suffix(mut self, value: impl Into<String>) -> Self {
        self.object_key_suffix = value.into();
        self
    }
}

/// Options for the subscription registry adapter.
#[derive(Debug, Clone)]
pub struct SubscriptionOptions {
    pub common: StorageOptions,
    /// Prefix for object keys. Defaults to `subscriptions/`.
    pub object_key_prefix: String,
}

impl SubscriptionOptions {
    pub fn new(
        project_id: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_common(StorageOptions::new(project_id, bucket_name)?))
    }

    pub fn from_common(common: StorageOptions) -> Self {
        Self {
            common,
            object_key_prefix: "subscriptions/".to_owned(),
        }
    }

    pub fn with_object_key_prefix(mut self, value: impl Into<String>) -> Self {
        self.object_key_prefix = value.into();
        self
    }
}

/// Options for the saga snapshot archive adapter.
#[derive(Debug, Clone)]
pub struct SagaSnapshotOptions {
    pub common: StorageOptions,
    /// Prefix for object keys. Defaults to `saga-snapshots/`.
    pub object_key_prefix: String,
}

impl SagaSnapshotOptions {
    pub fn new(
        project_id: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_common(StorageOptions::new(project_id, bucket_name)?))
    }

    pub fn from_common(common: StorageOptions) -> Self {
        Self {
            common,
            object_key_prefix: "saga-snapshots/".to_owned(),
        }
    }

    pub fn with_object_key_prefix(mut self, value: impl Into<String>) -> Self {
        self.object_key_prefix = value.into();
        self
    }
}
