//! OAuth permission scopes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Named capability an authorized application may exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    Offline,
    Friends,
    Photos,
    Groups,
    Video,
    Wall,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Offline => "offline",
            Permission::Friends => "friends",
            Permission::Photos => "photos",
            Permission::Groups => "groups",
            Permission::Video => "video",
            Permission::Wall => "wall",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offline" => Ok(Permission::Offline),
            "friends" => Ok(Permission::Friends),
            "photos" => Ok(Permission::Photos),
            "groups" => Ok(Permission::Groups),
            "video" => Ok(Permission::Video),
            "wall" => Ok(Permission::Wall),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}

/// Set of permissions. Encodes as a sorted, comma-joined string, so a given
/// set always produces the same query value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(BTreeSet<Permission>);

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, permission: Permission) {
        self.0.insert(permission);
    }

    pub fn remove(&mut self, permission: Permission) {
        self.0.remove(&permission);
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Query-string form: permission names in sorted lexical order, joined
    /// with commas.
    pub fn to_query(&self) -> String {
        let mut names: Vec<&str> = self.0.iter().map(|p| p.as_str()).collect();
        names.sort_unstable();
        names.join(",")
    }
}

impl FromIterator<Permission> for Scope {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}
