//! Platform roles
//!
//! A role decides which dashboard a user lands on and which routes the
//! guard lets them render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Organization administrator
    Admin,
    /// Treating physician
    Doctor,
    /// Patient with read access to their own records
    Patient,
    /// Laboratory technician processing prescriptions
    #[serde(rename = "LABTECHNICIAN")]
    LabTechnician,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Patient, Role::LabTechnician];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Patient => "PATIENT",
            Role::LabTechnician => "LABTECHNICIAN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Case-insensitive; the auth service reports roles as lower-case scopes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "DOCTOR" => Ok(Role::Doctor),
            "PATIENT" => Ok(Role::Patient),
            "LABTECHNICIAN" => Ok(Role::LabTechnician),
            other => Err(format!(
                "Unknown role '{other}'. Must be one of: ADMIN, DOCTOR, PATIENT, LABTECHNICIAN"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("doctor", Role::Doctor ; "lower case scope")]
    #[test_case("ADMIN", Role::Admin ; "upper case")]
    #[test_case("LabTechnician", Role::LabTechnician ; "mixed case")]
    #[test_case(" patient ", Role::Patient ; "surrounding whitespace")]
    fn test_parse_role(input: &str, expected: Role) {
        assert_eq!(input.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = "nurse".parse::<Role>().unwrap_err();
        assert!(err.contains("NURSE"));
    }

    #[test]
    fn test_display_matches_storage_value() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Role::LabTechnician).unwrap(),
            "\"LABTECHNICIAN\""
        );
        let role: Role = serde_json::from_str("\"DOCTOR\"").unwrap();
        assert_eq!(role, Role::Doctor);
    }
}
