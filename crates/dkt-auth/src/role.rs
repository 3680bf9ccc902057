/// Coarse authorization role attached to every account.
///
/// Stored and transmitted as `LAWYER` / `ADMIN`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "LAWYER")]
    Standard,
    #[serde(rename = "ADMIN")]
    Elevated,
}

impl Role {
    pub fn elevated(&self) -> bool {
        matches!(self, Self::Elevated)
    }
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "LAWYER",
            Self::Elevated => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = UnknownRole;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "LAWYER" => Ok(Self::Standard),
            "ADMIN" => Ok(Self::Elevated),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A role string outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl std::fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}
