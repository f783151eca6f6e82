//! Typed identifiers.
//!
//! Raw integers arrive from the download transport and the catalog. Wrapping
//! them keeps a step id from being passed where a video id is expected and
//! turns the negative-reference sentinel into a validation failure at the
//! boundary instead of a magic-number check deep in the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidReference;

/// Handle correlating a completion signal to the download that produced it.
///
/// Always non-negative; construct through [`ReferenceId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReferenceId(i64);

impl ReferenceId {
    /// Validate a raw reference handle.
    pub const fn new(raw: i64) -> Result<Self, InvalidReference> {
        if raw < 0 {
            return Err(InvalidReference::Negative { raw });
        }
        Ok(Self(raw))
    }

    /// The underlying handle value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ReferenceId {
    type Error = InvalidReference;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ReferenceId> for i64 {
    fn from(id: ReferenceId) -> Self {
        id.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The underlying row id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Identifier of a video in the remote catalog.
    VideoId
);
catalog_id!(
    /// Identifier of a lesson step.
    StepId
);
catalog_id!(
    /// Identifier of a lesson.
    LessonId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_id_accepts_zero_and_positive() {
        assert_eq!(ReferenceId::new(0).map(ReferenceId::get), Ok(0));
        assert_eq!(ReferenceId::new(42).map(ReferenceId::get), Ok(42));
    }

    #[test]
    fn reference_id_rejects_negative() {
        assert_eq!(
            ReferenceId::new(-1),
            Err(InvalidReference::Negative { raw: -1 })
        );
    }

    #[test]
    fn reference_id_deserialize_validates() {
        let ok: ReferenceId = serde_json::from_str("17").unwrap();
        assert_eq!(ok.get(), 17);

        let err = serde_json::from_str::<ReferenceId>("-3");
        assert!(err.is_err());
    }

    #[test]
    fn catalog_ids_display_raw_value() {
        assert_eq!(StepId(7).to_string(), "7");
        assert_eq!(VideoId::from(100).get(), 100);
        assert_eq!(serde_json::to_string(&LessonId(3)).unwrap(), "3");
    }
}
