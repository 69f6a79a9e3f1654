//! Domain identifier types
//!
//! The backend keys every entity by a 64-bit integer. Each entity gets its
//! own newtype so a patient id can never be passed where a prescription id
//! is expected. All of them serialize as plain JSON integers and parse from
//! the decimal strings kept in the session store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw backend identifier
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| format!("Invalid {}: '{}'", $label, s))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a platform user (any role)
    ///
    /// ```
    /// use patient_track::domain::ids::UserId;
    ///
    /// let id: UserId = "42".parse().unwrap();
    /// assert_eq!(id.get(), 42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    UserId,
    "user id"
);
numeric_id!(
    /// Identifier of a tenant organization (hospital, clinic, lab)
    OrganizationId,
    "organization id"
);
numeric_id!(
    /// Identifier of a patient record
    PatientId,
    "patient id"
);
numeric_id!(
    /// Identifier of a visit history entry
    HistoryId,
    "history id"
);
numeric_id!(
    /// Identifier of a lab prescription
    PrescriptionId,
    "prescription id"
);
numeric_id!(
    /// Identifier of a lab result
    ResultId,
    "result id"
);
numeric_id!(TestTypeId, "test type id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id = OrganizationId::from_str("7").unwrap();
        assert_eq!(id, OrganizationId::new(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(UserId::from_str(" 42\n").unwrap().get(), 42);
    }

    #[test]
    fn test_parse_invalid() {
        let err = PatientId::from_str("abc").unwrap_err();
        assert!(err.contains("patient id"));
        assert!(PrescriptionId::from_str("").is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ResultId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: ResultId = serde_json::from_str("9").unwrap();
        assert_eq!(back, ResultId::new(9));
    }
}
