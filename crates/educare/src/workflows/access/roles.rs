use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Staff and family roles that can sign in to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    EccdOffice,
    SeedTeacher,
    EducareTeacher,
    Parent,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::EccdOffice,
        Role::SeedTeacher,
        Role::EducareTeacher,
        Role::Parent,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::EccdOffice => "eccd_office",
            Role::SeedTeacher => "seed_teacher",
            Role::EducareTeacher => "educare_teacher",
            Role::Parent => "parent",
        }
    }

    /// Label shown in the role picker on the login screen.
    pub const fn label(self) -> &'static str {
        match self {
            Role::EccdOffice => "ECCD Office-in-charge",
            Role::SeedTeacher => "SEED Teacher",
            Role::EducareTeacher => "Educare Teacher",
            Role::Parent => "Parent",
        }
    }

    pub const fn sidebar_title(self) -> &'static str {
        match self {
            Role::EccdOffice => "ECCD OFFICE",
            Role::SeedTeacher => "SEED TEACHER",
            Role::EducareTeacher => "EDUCARE TEACHER",
            Role::Parent => "PARENT",
        }
    }

    /// Exact wire-name lookup. Anything else, including different casing, is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownRole(value.to_string()))
    }
}
