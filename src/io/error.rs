//! Error types and context management for layout and rendering operations

use std::fmt;
use std::path::PathBuf;

/// An item whose weight falls outside `(0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct WeightViolation {
    /// Input key of the offending item
    pub item: String,
    /// The rejected weight
    pub weight: f64,
}

impl fmt::Display for WeightViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' has weight {}", self.item, self.weight)
    }
}

/// Main error type for all cloud generation operations
#[derive(Debug)]
pub enum CloudError {
    /// One or more item weights lie outside `(0, 1]`
    ///
    /// Raised before layout begins; every offending item is reported.
    InvalidWeight {
        /// All offending items, in registry order
        violations: Vec<WeightViolation>,
    },

    /// The attempt budget ran out before any attempt placed every item
    LayoutInfeasible {
        /// Number of items to be placed
        item_count: usize,
        /// Side length of the canvas in pixels
        canvas_size: u32,
        /// Gap ratio in effect
        gap_ratio: f64,
        /// Number of attempts made before giving up
        attempts: usize,
    },

    /// Layout or rendering parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Item description file could not be parsed
    InputParse {
        /// Path of the input file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Snapshot does not match the item registry it is applied to
    InvalidSnapshot {
        /// Description of the mismatch
        reason: String,
    },

    /// Failed to load an icon from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWeight { violations } => {
                let listed = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Weights must lie in (0, 1]: {listed}")
            }
            Self::LayoutInfeasible {
                item_count,
                canvas_size,
                gap_ratio,
                attempts,
            } => {
                write!(
                    f,
                    "Could not place {item_count} items on a {canvas_size}x{canvas_size} canvas \
                     with gap ratio {gap_ratio} after {attempts} attempts"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InputParse { path, source } => {
                write!(f, "Failed to parse input '{}': {source}", path.display())
            }
            Self::InvalidSnapshot { reason } => {
                write!(f, "Invalid snapshot: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CloudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::InputParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for cloud generation results
pub type Result<T> = std::result::Result<T, CloudError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Path the failing operation worked on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with the file and operation that failed
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attach the path an I/O or image operation was working on
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<CloudError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only file-backed errors carry a path worth replacing
            match &mut error {
                CloudError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(p) = context.path {
                        *path = p;
                    }
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                CloudError::ImageLoad { path, .. }
                | CloudError::ImageExport { path, .. }
                | CloudError::InputParse { path, .. } => {
                    if let Some(p) = context.path {
                        *path = p;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            operation: Some(operation),
        })
    }
}

impl From<image::ImageError> for CloudError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for CloudError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for CloudError {
    fn from(err: serde_json::Error) -> Self {
        Self::InputParse {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CloudError {
    CloudError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid snapshot error
pub fn invalid_snapshot(reason: &impl ToString) -> CloudError {
    CloudError::InvalidSnapshot {
        reason: reason.to_string(),
    }
}
