//! Group request/response types.
//!
//! `POST /groups` takes a bare JSON string, so it has no request struct here.

use serde::{Deserialize, Serialize};

use usergroups_core::{GroupRoster, UserId};

/// A group bundled with its member ids, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupWithUsers {
    pub name: String,
    pub userids: Vec<String>,
}

impl From<GroupRoster> for GroupWithUsers {
    fn from(roster: GroupRoster) -> Self {
        GroupWithUsers {
            name: roster.name.into_inner(),
            userids: roster.members.into_iter().map(UserId::into_inner).collect(),
        }
    }
}

/// Body of `PUT /groups/{groupname}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupMembersRequest {
    pub userids: Option<Vec<String>>,
}
