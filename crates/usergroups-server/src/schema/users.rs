//! User request/response types.

use serde::{Deserialize, Serialize};

use usergroups_core::{GroupName, UserProfile};

/// A user bundled with its group names, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithGroups {
    pub first_name: String,
    pub last_name: String,
    pub userid: String,
    pub groups: Vec<String>,
}

impl From<UserProfile> for UserWithGroups {
    fn from(profile: UserProfile) -> Self {
        UserWithGroups {
            first_name: profile.user.first_name,
            last_name: profile.user.last_name,
            userid: profile.user.user_id.into_inner(),
            groups: profile.groups.into_iter().map(GroupName::into_inner).collect(),
        }
    }
}

/// Body of `POST /users` and `PUT /users/{userid}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserWithGroupsRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub userid: Option<String>,
    pub groups: Option<Vec<String>>,
}
