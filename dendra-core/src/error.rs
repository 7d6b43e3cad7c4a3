//! Error types for the dendra core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while building, validating, or walking a linkage table.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinkageError {
    /// A point carried a NaN or infinite coordinate and the builder was
    /// configured to reject such input.
    #[error("point {index} has a non-finite coordinate ({x}, {y})")]
    NonFinitePoint {
        /// Position of the offending point in the caller's sequence.
        index: usize,
        /// Horizontal coordinate as supplied.
        x: f64,
        /// Vertical coordinate as supplied.
        y: f64,
    },
    /// A merge round found no pair of leaves in distinct clusters.
    #[error("no eligible leaf pair remained while building row {row}")]
    NoEligiblePair {
        /// Row that could not be produced.
        row: usize,
    },
    /// A row index fell outside the table.
    #[error("row {row} is out of range for a table with {rows} rows")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Number of rows in the table.
        rows: usize,
    },
    /// A row referenced a cluster that is not strictly older than itself.
    #[error("row {row} references {reference}, but only references below {limit} exist yet")]
    ForwardReference {
        /// Row holding the reference.
        row: usize,
        /// Raw reference value as stored in the table.
        reference: usize,
        /// Exclusive upper bound (`leaf_count + row`) for valid references.
        limit: usize,
    },
    /// A row stored its references out of order.
    #[error("row {row} stores left={left} which is not below right={right}")]
    UnorderedRow {
        /// Offending row.
        row: usize,
        /// Stored left reference.
        left: usize,
        /// Stored right reference.
        right: usize,
    },
    /// A row merged a leaf or cluster that an earlier row already merged.
    #[error("row {row} merges {reference}, which an earlier row already merged")]
    ReusedReference {
        /// Row holding the repeated reference.
        row: usize,
        /// Raw reference value as stored in the table.
        reference: usize,
    },
    /// A row distance was negative or non-finite.
    #[error("row {row} has invalid distance {distance}")]
    InvalidDistance {
        /// Offending row.
        row: usize,
        /// Distance as stored in the table.
        distance: f64,
    },
    /// A row size disagreed with the sizes of the clusters it merges.
    #[error("row {row} records size {actual} but its children hold {expected} leaves")]
    SizeMismatch {
        /// Offending row.
        row: usize,
        /// Sum of the child cluster sizes.
        expected: usize,
        /// Size stored in the row.
        actual: usize,
    },
    /// The number of rows does not describe a complete merge sequence.
    #[error("a table over {leaf_count} leaves needs {expected} rows but {actual} were given")]
    RowCountMismatch {
        /// Number of leaves the table was declared over.
        leaf_count: usize,
        /// Rows required for a complete hierarchy.
        expected: usize,
        /// Rows supplied by the caller.
        actual: usize,
    },
    /// A point set did not hold one point per leaf of a table.
    #[error("{points} points were supplied for a table over {leaf_count} leaves")]
    LeafCountMismatch {
        /// Number of points supplied.
        points: usize,
        /// Number of leaves the table was built over.
        leaf_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LinkageError`] variants.
    enum LinkageErrorCode for LinkageError {
        /// A point carried a NaN or infinite coordinate.
        NonFinitePoint => NonFinitePoint { .. } => "LINKAGE_NON_FINITE_POINT",
        /// A merge round found no eligible pair.
        NoEligiblePair => NoEligiblePair { .. } => "LINKAGE_NO_ELIGIBLE_PAIR",
        /// A row index fell outside the table.
        RowOutOfRange => RowOutOfRange { .. } => "LINKAGE_ROW_OUT_OF_RANGE",
        /// A row referenced a cluster that did not exist yet.
        ForwardReference => ForwardReference { .. } => "LINKAGE_FORWARD_REFERENCE",
        /// A row stored its references out of order.
        UnorderedRow => UnorderedRow { .. } => "LINKAGE_UNORDERED_ROW",
        /// A row merged a cluster that was already merged.
        ReusedReference => ReusedReference { .. } => "LINKAGE_REUSED_REFERENCE",
        /// A row distance was negative or non-finite.
        InvalidDistance => InvalidDistance { .. } => "LINKAGE_INVALID_DISTANCE",
        /// A row size disagreed with its children.
        SizeMismatch => SizeMismatch { .. } => "LINKAGE_SIZE_MISMATCH",
        /// The table did not hold a complete merge sequence.
        RowCountMismatch => RowCountMismatch { .. } => "LINKAGE_ROW_COUNT_MISMATCH",
        /// A point set did not match the table's leaves.
        LeafCountMismatch => LeafCountMismatch { .. } => "LINKAGE_LEAF_COUNT_MISMATCH",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LinkageError>;
