//! `groups.*` methods, their DTOs, and the batch member-paging script.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::Error;
use crate::request::{Params, QueryParams};
use crate::types::ApiBool;
use crate::users::User;

const METHOD_GROUPS_GET: &str = "groups.get";
const METHOD_GROUPS_GET_MEMBERS: &str = "groups.getMembers";
const METHOD_EXECUTE: &str = "execute";

/// Community visibility: 0 open, 1 closed, 2 private.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GroupAccess {
    #[default]
    Open,
    Closed,
    Private,
}

impl TryFrom<u8> for GroupAccess {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GroupAccess::Open),
            1 => Ok(GroupAccess::Closed),
            2 => Ok(GroupAccess::Private),
            other => Err(format!("invalid is_closed value: {other}")),
        }
    }
}

impl From<GroupAccess> for u8 {
    fn from(value: GroupAccess) -> Self {
        value as u8
    }
}

/// Caller's moderation level in a community; 0 means none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AdminLevel {
    #[default]
    None,
    Moderator,
    Editor,
    Administrator,
}

impl TryFrom<u8> for AdminLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AdminLevel::None),
            1 => Ok(AdminLevel::Moderator),
            2 => Ok(AdminLevel::Editor),
            3 => Ok(AdminLevel::Administrator),
            other => Err(format!("invalid admin_level value: {other}")),
        }
    }
}

impl From<AdminLevel> for u8 {
    fn from(value: AdminLevel) -> Self {
        value as u8
    }
}

/// Deactivation state; the field is absent for live communities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deactivated {
    #[default]
    #[serde(rename = "")]
    Active,
    #[serde(rename = "deleted")]
    Deleted,
    #[serde(rename = "banned")]
    Banned,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "screen_name", default)]
    pub slug: String,
    #[serde(default)]
    pub deactivated: Deactivated,
    #[serde(default)]
    pub is_closed: GroupAccess,
    #[serde(default)]
    pub is_admin: ApiBool,
    #[serde(default)]
    pub is_member: ApiBool,
    #[serde(default)]
    pub admin_level: AdminLevel,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub photo_50: String,
    #[serde(default)]
    pub photo_100: String,
    #[serde(default)]
    pub photo_200: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members_count: i64,
    #[serde(default)]
    pub status: String,
}

impl Group {
    /// "active", "deleted" or "banned".
    pub fn state(&self) -> &'static str {
        match self.deactivated {
            Deactivated::Active => "active",
            Deactivated::Deleted => "deleted",
            Deactivated::Banned => "banned",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G:{} {} [count={},status={}]",
            self.slug,
            self.name,
            self.members_count,
            self.state()
        )
    }
}

/// Arguments for `groups.get`. Every field follows "omit when empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupGetParams {
    pub offset: u32,
    pub count: u32,
    pub user_id: i64,
    pub group_id: i64,
    pub extended: bool,
    pub fields: String,
}

impl QueryParams for GroupGetParams {
    fn params(&self) -> Params {
        let mut p = Params::new();
        p.put_nonzero("offset", self.offset);
        p.put_nonzero("count", self.count);
        p.put_nonzero("user_id", self.user_id);
        p.put_nonzero("group_id", self.group_id);
        p.put_nonzero("extended", self.extended);
        p.put_nonzero("fields", self.fields.as_str());
        p
    }
}

/// Arguments for `groups.getMembers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembersParams {
    pub group_id: i64,
    pub offset: u32,
    pub count: u32,
    pub fields: String,
}

impl QueryParams for GroupMembersParams {
    fn params(&self) -> Params {
        let mut p = Params::new();
        p.put_nonzero("group_id", self.group_id);
        p.put_nonzero("offset", self.offset);
        p.put_nonzero("count", self.count);
        p.put_nonzero("fields", self.fields.as_str());
        p
    }
}

/// Paged list of communities.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GroupList {
    pub count: i64,
    #[serde(default)]
    pub items: Vec<Group>,
}

/// Paged list of community members.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MemberList {
    pub count: i64,
    #[serde(default)]
    pub items: Vec<User>,
}

/// `groups.*` wrapper.
#[derive(Debug, Clone)]
pub struct Groups {
    resource: Resource,
}

impl Groups {
    pub(crate) fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn get(&self, params: &GroupGetParams) -> Result<GroupList, Error> {
        self.resource.call(METHOD_GROUPS_GET, params)
    }

    /// Communities the user belongs to, with description and member counts.
    pub fn get_for_user(&self, user_id: i64) -> Result<Vec<Group>, Error> {
        let params = GroupGetParams {
            user_id,
            count: 1000,
            extended: true,
            fields: "description,members_count".to_string(),
            ..GroupGetParams::default()
        };
        Ok(self.get(&params)?.items)
    }

    pub fn get_members(&self, params: &GroupMembersParams) -> Result<MemberList, Error> {
        self.resource.call(METHOD_GROUPS_GET_MEMBERS, params)
    }

    /// Fetch up to 25 pages of members in one round trip by paging
    /// `groups.getMembers` server-side through a batch ("execute") script.
    pub fn get_members_batch(
        &self,
        group_id: i64,
        offset: u32,
        fields: &str,
    ) -> Result<MemberList, Error> {
        let mut params = Params::new();
        params.put("code", members_script(group_id, offset, fields));
        self.resource.call(METHOD_EXECUTE, &params)
    }
}

/// Server-side script paging `groups.getMembers` until the member count is
/// exhausted or the per-execute call budget (25) runs out.
fn members_script(group_id: i64, offset: u32, fields: &str) -> String {
    format!(
        r#"var group_id = {group_id};
var count = 1000;
var offset = {offset};
var calls = 1;
var response = API.groups.getMembers({{"count": count, "offset": offset, "group_id": group_id, "fields": "{fields}"}});
var total = response.count;
var items = response.items;
offset = offset + count;
while ((offset < total) && (calls < 25)) {{
    response = API.groups.getMembers({{"count": count, "offset": offset, "group_id": group_id, "fields": "{fields}"}});
    items = items + response.items;
    total = response.count;
    offset = offset + count;
    calls = calls + 1;
}}
return {{"count": total, "items": items}};"#
    )
}
