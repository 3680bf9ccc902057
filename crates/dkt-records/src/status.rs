use serde::Deserialize;
use serde::Serialize;

/// Lifecycle of a case.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    #[default]
    Active,
    Pending,
    Closed,
    Won,
    Lost,
    Settled,
}

impl CaseStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Closed => "CLOSED",
            Self::Won => "WON",
            Self::Lost => "LOST",
            Self::Settled => "SETTLED",
        }
    }
}

impl TryFrom<&str> for CaseStatus {
    type Error = UnknownStatus;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "PENDING" => Ok(Self::Pending),
            "CLOSED" => Ok(Self::Closed),
            "WON" => Ok(Self::Won),
            "LOST" => Ok(Self::Lost),
            "SETTLED" => Ok(Self::Settled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Lifecycle of a hearing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HearingStatus {
    #[default]
    Scheduled,
    Completed,
    Postponed,
    Cancelled,
}

impl HearingStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Postponed => "POSTPONED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl TryFrom<&str> for HearingStatus {
    type Error = UnknownStatus;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "SCHEDULED" => Ok(Self::Scheduled),
            "COMPLETED" => Ok(Self::Completed),
            "POSTPONED" => Ok(Self::Postponed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl std::fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}
