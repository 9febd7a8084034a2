//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a link grants inside a chat window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkRole {
    Respondent,
    Client,
}

impl LinkRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRole::Respondent => "respondent",
            LinkRole::Client => "client",
        }
    }

    /// Client links are shared by the research client team, respondent links
    /// stand for exactly one person.
    pub fn default_multi(&self) -> bool {
        matches!(self, LinkRole::Client)
    }
}

impl fmt::Display for LinkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "respondent" => Ok(LinkRole::Respondent),
            "client" => Ok(LinkRole::Client),
            other => Err(format!("unknown link role '{}'", other)),
        }
    }
}

/// Role of whoever acts in a chat; the moderator holds no link.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Moderator,
    Client,
    Respondent,
}

impl From<LinkRole> for Role {
    fn from(value: LinkRole) -> Self {
        match value {
            LinkRole::Respondent => Role::Respondent,
            LinkRole::Client => Role::Client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_role_parse_and_display() {
        assert_eq!("client".parse::<LinkRole>(), Ok(LinkRole::Client));
        assert_eq!("respondent".parse::<LinkRole>(), Ok(LinkRole::Respondent));
        assert!("moderator".parse::<LinkRole>().is_err());
        assert_eq!(LinkRole::Client.to_string(), "client");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Moderator).unwrap(), "\"moderator\"");
        assert_eq!(Role::from(LinkRole::Respondent), Role::Respondent);
    }
}
