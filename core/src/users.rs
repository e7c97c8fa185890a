//! `users.*` methods and their DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::Error;
use crate::request::{Params, QueryParams};

const METHOD_USERS_GET: &str = "users.get";

/// Sex as reported by the API: 0 unspecified, 1 female, 2 male.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sex {
    #[default]
    Unknown,
    Female,
    Male,
}

impl TryFrom<u8> for Sex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Sex::Unknown),
            1 => Ok(Sex::Female),
            2 => Ok(Sex::Male),
            other => Err(format!("invalid sex value: {other}")),
        }
    }
}

impl From<Sex> for u8 {
    fn from(value: Sex) -> Self {
        value as u8
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::Unknown => "unknown",
            Sex::Female => "female",
            Sex::Male => "male",
        })
    }
}

/// Numeric country identifier; zero means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(pub i64);

impl CountryId {
    pub const UNKNOWN: CountryId = CountryId(0);
    pub const RUSSIA: CountryId = CountryId(1);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub id: CountryId,
    #[serde(default)]
    pub title: String,
}

impl Country {
    pub fn is(&self, id: CountryId) -> bool {
        self.id == id
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == CountryId::UNKNOWN {
            f.write_str("unknown")
        } else {
            f.write_str(&self.title)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub country: Country,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U:{} {} {}", self.id, self.first_name, self.last_name)
    }
}

/// Arguments for `users.get`. All fields follow "omit when empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserGetParams {
    /// Comma-separated user ids; empty means the current user.
    pub user_ids: String,
    /// Additional profile fields, e.g. `"sex,country"`.
    pub fields: String,
}

impl QueryParams for UserGetParams {
    fn params(&self) -> Params {
        let mut p = Params::new();
        p.put_nonzero("user_ids", self.user_ids.as_str());
        p.put_nonzero("fields", self.fields.as_str());
        p
    }
}

/// `users.*` wrapper.
#[derive(Debug, Clone)]
pub struct Users {
    resource: Resource,
}

impl Users {
    pub(crate) fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn get(&self, params: &UserGetParams) -> Result<Vec<User>, Error> {
        self.resource.call(METHOD_USERS_GET, params)
    }
}
