//! Error types for tree list operations.
//!
//! Every public mutator validates its arguments before any node is touched,
//! so an `Err` always means the collection was left exactly as it was.

use std::fmt;

/// Errors reported by the public surface of the tree collections.
///
/// # Examples
///
/// ```rust
/// use treelist::error::CollectionError;
/// use treelist::tree::TreeList;
///
/// let mut list: TreeList<i32> = (0..3).collect();
/// let error = list.insert(10, 42).unwrap_err();
/// assert!(matches!(error, CollectionError::ArgumentOutOfRange { .. }));
/// assert_eq!(list.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A required argument was absent.
    NullArgument {
        /// Name of the missing parameter.
        parameter: &'static str,
    },
    /// An index or count fell outside its permitted range.
    ArgumentOutOfRange {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The value that was supplied.
        value: isize,
        /// The inclusive upper bound that applied.
        bound: usize,
    },
    /// The arguments were individually well formed but cannot be satisfied together.
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the combination was rejected.
        reason: &'static str,
    },
    /// A mutation was requested through a read-only view.
    NotSupported {
        /// Name of the refused operation.
        operation: &'static str,
    },
    /// The collection changed structurally while a cursor was walking it.
    CollectionModified,
}

impl CollectionError {
    /// Builds an [`CollectionError::ArgumentOutOfRange`] for an unsigned value.
    pub(crate) fn out_of_range(parameter: &'static str, value: usize, bound: usize) -> Self {
        Self::ArgumentOutOfRange {
            parameter,
            value: isize::try_from(value).unwrap_or(isize::MAX),
            bound,
        }
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullArgument { parameter } => {
                write!(formatter, "argument `{parameter}` must be present")
            }
            Self::ArgumentOutOfRange {
                parameter,
                value,
                bound,
            } => write!(
                formatter,
                "argument `{parameter}` is out of range: {value} is not within 0..={bound}"
            ),
            Self::InvalidArgument { parameter, reason } => {
                write!(formatter, "invalid argument `{parameter}`: {reason}")
            }
            Self::NotSupported { operation } => {
                write!(formatter, "`{operation}` is not supported on a read-only collection")
            }
            Self::CollectionModified => write!(
                formatter,
                "collection was modified; enumeration operation may not execute"
            ),
        }
    }
}

impl std::error::Error for CollectionError {}

/// Checks that `index` lies within `0..=bound`.
pub(crate) fn check_position(
    parameter: &'static str,
    index: usize,
    bound: usize,
) -> Result<(), CollectionError> {
    if index > bound {
        return Err(CollectionError::out_of_range(parameter, index, bound));
    }
    Ok(())
}

/// Checks that `index` addresses an existing element of a collection of length `length`.
pub(crate) fn check_element(
    parameter: &'static str,
    index: usize,
    length: usize,
) -> Result<(), CollectionError> {
    if index >= length {
        return Err(CollectionError::out_of_range(
            parameter,
            index,
            length.saturating_sub(1),
        ));
    }
    Ok(())
}

/// Checks that `index..index + count` lies within a collection of length `length`.
pub(crate) fn check_range(index: usize, count: usize, length: usize) -> Result<(), CollectionError> {
    check_position("index", index, length)?;
    check_position("count", count, length)?;
    if length - index < count {
        return Err(CollectionError::InvalidArgument {
            parameter: "count",
            reason: "index and count do not denote a valid range of elements",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_display_null_argument() {
        let error = CollectionError::NullArgument {
            parameter: "destination",
        };
        assert_eq!(
            error.to_string(),
            "argument `destination` must be present"
        );
    }

    #[rstest]
    fn test_display_out_of_range() {
        let error = CollectionError::ArgumentOutOfRange {
            parameter: "destination_index",
            value: -1,
            bound: 20,
        };
        assert_eq!(
            error.to_string(),
            "argument `destination_index` is out of range: -1 is not within 0..=20"
        );
    }

    #[rstest]
    fn test_display_not_supported() {
        let error = CollectionError::NotSupported { operation: "insert" };
        assert_eq!(
            error.to_string(),
            "`insert` is not supported on a read-only collection"
        );
    }

    #[rstest]
    #[case(0, 0, 0, true)]
    #[case(0, 5, 5, true)]
    #[case(3, 2, 5, true)]
    #[case(3, 3, 5, false)]
    #[case(6, 0, 5, false)]
    fn test_check_range(
        #[case] index: usize,
        #[case] count: usize,
        #[case] length: usize,
        #[case] valid: bool,
    ) {
        assert_eq!(check_range(index, count, length).is_ok(), valid);
    }

    #[rstest]
    fn test_check_element_rejects_length() {
        assert!(check_element("index", 3, 3).is_err());
        assert!(check_element("index", 2, 3).is_ok());
    }
}
