//! Result type definition and extension traits.

use crate::error::Error;

/// The standard Result type for InsightDash operations.
///
/// # Examples
///
/// ```ignore
/// fn operation() -> Result<SankeyGraph> {
///     let relation = Relation::try_from(&table)?;
///     Ok(build_sankey(&relation))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait providing logging combinators for Results.
pub trait ResultExt<T> {
    /// Get the value or a default, logging the error if present.
    fn or_default_logged(self, default: T) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn or_default_logged(self, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Operation failed, using default: {}", e);
                default
            }
        }
    }
}
