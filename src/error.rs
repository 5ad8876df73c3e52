//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: Issues with package registry communication
//! - ConfigError: Issues with the settings file or CLI values
//! - ResolveError: Issues that abort a repository resolution pass
//! - SnapshotError: Issues reading the fleet snapshot

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resolution related errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Snapshot related errors
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded (HTTP 403 or 429)
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Registry answered with a 5xx status
    #[error("{registry} returned server error {status} for '{package}'")]
    ServerError {
        package: String,
        registry: String,
        status: u16,
    },

    /// Registry answered with a non-retryable, non-success status
    #[error("{registry} returned unexpected status {status} for '{package}'")]
    UnexpectedStatus {
        package: String,
        registry: String,
        status: u16,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Package identifier the registry cannot look up
    #[error("invalid package name '{name}' for {registry}: {reason}")]
    InvalidPackageName {
        name: String,
        registry: String,
        reason: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read settings file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for the expected shape
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A setting has an unusable value
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors that abort a resolution pass
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The pass was cancelled before every dependency completed
    #[error("resolution cancelled")]
    Cancelled,
}

/// Errors related to the fleet snapshot file
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Snapshot file not found
    #[error("snapshot file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read snapshot file
    #[error("failed to read snapshot file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new ServerError
    pub fn server_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        status: u16,
    ) -> Self {
        RegistryError::ServerError {
            package: package.into(),
            registry: registry.into(),
            status,
        }
    }

    /// Creates a new UnexpectedStatus error
    pub fn unexpected_status(
        package: impl Into<String>,
        registry: impl Into<String>,
        status: u16,
    ) -> Self {
        RegistryError::UnexpectedStatus {
            package: package.into(),
            registry: registry.into(),
            status,
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new InvalidPackageName error
    pub fn invalid_package_name(
        name: impl Into<String>,
        registry: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidPackageName {
            name: name.into(),
            registry: registry.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for failures worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RegistryError::NetworkError { .. }
                | RegistryError::Timeout { .. }
                | RegistryError::RateLimitExceeded { .. }
                | RegistryError::ServerError { .. }
        )
    }

    /// Returns true if the registry has no such package
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidValue error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl SnapshotError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        SnapshotError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SnapshotError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-package", "npm");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'nonexistent-package' not found"));
        assert!(msg.contains("npm"));
        assert!(err.is_not_found());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("lodash", "npm", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("NuGet");
        let msg = format!("{}", err);
        assert!(msg.contains("rate limit exceeded"));
        assert!(msg.contains("NuGet"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_registry_error_server_error() {
        let err = RegistryError::server_error("guava", "Maven Central", 503);
        let msg = format!("{}", err);
        assert!(msg.contains("503"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_registry_error_unexpected_status_is_permanent() {
        let err = RegistryError::unexpected_status("guava", "Maven Central", 400);
        assert!(format!("{}", err).contains("400"));
        assert!(!err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("AFNetworking", "CocoaPods");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("AFNetworking"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_registry_error_invalid_package_name() {
        let err = RegistryError::invalid_package_name("guava", "Maven", "expected group:artifact");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid package name 'guava'"));
        assert!(msg.contains("group:artifact"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_config_error_parse() {
        let err = ConfigError::parse_error("/etc/depboard.toml", "expected a table");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse config file"));
        assert!(msg.contains("depboard.toml"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::invalid_value("max_concurrency", "must be at least 1");
        let msg = format!("{}", err);
        assert!(msg.contains("max_concurrency"));
        assert!(msg.contains("at least 1"));
    }

    #[test]
    fn test_snapshot_error_not_found() {
        let err = SnapshotError::not_found("/path/to/fleet.json");
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("fleet.json"));
    }

    #[test]
    fn test_snapshot_error_json_parse() {
        let err = SnapshotError::json_parse_error("/path/to/fleet.json", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse JSON"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_resolve_error_cancelled() {
        assert_eq!(format!("{}", ResolveError::Cancelled), "resolution cancelled");
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let registry_err = RegistryError::package_not_found("pkg", "npm");
        let app_err: AppError = registry_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("package 'pkg' not found"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::invalid_value("cache_ttl", "bad").into();
        assert!(format!("{}", app_err).contains("cache_ttl"));
    }

    #[test]
    fn test_app_error_from_snapshot_error() {
        let app_err: AppError = SnapshotError::not_found("/missing.json").into();
        assert!(format!("{}", app_err).contains("snapshot file not found"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = SnapshotError::not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
