use thiserror::Error;

/// Client-side rejection of a submission before any request is made.
///
/// The display strings are the exact messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select all options")]
    MissingSelection,
    #[error("Please enter valid numeric values")]
    NonPositiveNumeric,
}
