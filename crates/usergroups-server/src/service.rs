//! DirectoryService: the aggregation layer between HTTP handlers and the
//! storage crate.
//!
//! Every API operation is one method here. Reads compose store queries inside
//! a single snapshot; writes compose store mutations inside a single
//! immediate transaction, so a failure at any step leaves no partial write
//! behind and concurrent writers to the same user or group never interleave.
//!
//! Methods are synchronous and block on SQLite. Handlers call them from the
//! blocking thread pool.

use usergroups_core::{GroupName, GroupRoster, GroupSet, User, UserId, UserProfile, UserSet};
use usergroups_storage::{Database, GroupStore, MembershipStore, UserStore};

use crate::error::ApiError;

pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_EXISTS: &str = "User already exists";
pub const GROUP_NOT_FOUND: &str = "Group not found";
pub const GROUP_EXISTS: &str = "Group already exists";

#[derive(Debug, Clone)]
pub struct DirectoryService {
    db: Database,
}

impl DirectoryService {
    pub fn new(db: Database) -> Self {
        DirectoryService { db }
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// Every user with its groups. Any failure aborts the whole listing.
    pub fn list_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.db.read(|conn| -> Result<_, ApiError> {
            let users = UserStore::new(conn).list()?;
            let memberships = MembershipStore::new(conn);
            let mut profiles = Vec::with_capacity(users.len());
            for user in users {
                let groups = memberships.list_groups_for_user(&user.user_id)?;
                profiles.push(UserProfile { user, groups });
            }
            Ok(profiles)
        })
    }

    /// Creates `user`, creates any missing groups, and attaches exactly
    /// `groups` to it.
    pub fn create_user(&self, user: User, groups: GroupSet) -> Result<(), ApiError> {
        self.db.write(|conn| {
            if UserStore::new(conn).create(&user)? != 1 {
                return Err(ApiError::Conflict(USER_EXISTS.to_string()));
            }
            GroupStore::new(conn).create_many(&groups)?;
            MembershipStore::new(conn).reconcile_groups_for_user(&user.user_id, &groups)?;
            Ok(())
        })?;
        tracing::info!(user = %user.user_id, groups = groups.len(), "user created");
        Ok(())
    }

    pub fn get_user(&self, user_id: &UserId) -> Result<UserProfile, ApiError> {
        self.db.read(|conn| -> Result<_, ApiError> {
            let user = UserStore::new(conn)
                .get(user_id)?
                .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;
            let groups = MembershipStore::new(conn).list_groups_for_user(user_id)?;
            Ok(UserProfile { user, groups })
        })
    }

    /// Overwrites the names of `user` and replaces its group set with
    /// `groups`, creating groups that do not exist yet.
    pub fn update_user(&self, user: User, groups: GroupSet) -> Result<(), ApiError> {
        self.db.write(|conn| {
            if UserStore::new(conn).update(&user)? != 1 {
                return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
            }
            GroupStore::new(conn).create_many(&groups)?;
            MembershipStore::new(conn).reconcile_groups_for_user(&user.user_id, &groups)?;
            Ok(())
        })?;
        tracing::info!(user = %user.user_id, groups = groups.len(), "user updated");
        Ok(())
    }

    /// Deletes the user and every membership row that references it.
    pub fn delete_user(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.db.write(|conn| {
            if UserStore::new(conn).delete(user_id)? != 1 {
                return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
            }
            MembershipStore::new(conn).delete_for_user(user_id)?;
            Ok(())
        })?;
        tracing::info!(user = %user_id, "user deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    pub fn create_group(&self, name: &GroupName) -> Result<(), ApiError> {
        self.db.write(|conn| {
            if GroupStore::new(conn).create(name)? != 1 {
                return Err(ApiError::Conflict(GROUP_EXISTS.to_string()));
            }
            Ok(())
        })?;
        tracing::info!(group = %name, "group created");
        Ok(())
    }

    /// Fails with 404 unless the group exists.
    pub fn ensure_group_exists(&self, name: &GroupName) -> Result<(), ApiError> {
        self.db.read(|conn| require_group(&GroupStore::new(conn), name))
    }

    pub fn get_group(&self, name: &GroupName) -> Result<GroupRoster, ApiError> {
        self.db.read(|conn| -> Result<_, ApiError> {
            require_group(&GroupStore::new(conn), name)?;
            let members = MembershipStore::new(conn).list_users_for_group(name)?;
            Ok(GroupRoster {
                name: name.clone(),
                members,
            })
        })
    }

    /// Adds `user_ids` to the group. Current members not listed are kept:
    /// unlike the user-side update, this is not a replace.
    pub fn add_group_members(&self, name: &GroupName, user_ids: UserSet) -> Result<(), ApiError> {
        let added = self.db.write(|conn| {
            require_group(&GroupStore::new(conn), name)?;
            Ok::<_, ApiError>(MembershipStore::new(conn).reconcile_users_for_group(name, &user_ids)?)
        })?;
        tracing::info!(group = %name, added, "group members added");
        Ok(())
    }

    /// Removes the group and its memberships. Succeeds whether or not the
    /// group existed.
    pub fn delete_group(&self, name: &GroupName) -> Result<(), ApiError> {
        let (memberships, groups) = self.db.write(|conn| {
            let memberships = MembershipStore::new(conn).delete_for_group(name)?;
            let groups = GroupStore::new(conn).delete(name)?;
            Ok::<_, ApiError>((memberships, groups))
        })?;
        tracing::info!(group = %name, memberships, existed = groups == 1, "group deleted");
        Ok(())
    }
}

fn require_group(groups: &GroupStore<'_>, name: &GroupName) -> Result<(), ApiError> {
    if groups.exists(name)? {
        Ok(())
    } else {
        Err(ApiError::NotFound(GROUP_NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usergroups_storage::DatabaseConfig;

    fn service() -> (tempfile::TempDir, DirectoryService) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("svc.db"))).unwrap();
        (dir, DirectoryService::new(db))
    }

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn names(list: &[&str]) -> GroupSet {
        list.iter().map(|n| GroupName::new(*n).unwrap()).collect()
    }

    fn sorted(groups: Vec<GroupName>) -> Vec<String> {
        let mut out: Vec<String> = groups.into_iter().map(GroupName::into_inner).collect();
        out.sort();
        out
    }

    #[test]
    fn create_user_creates_groups_implicitly() {
        let (_dir, svc) = service();
        svc.create_user(User::new(uid("u1"), "Ada", "Lovelace"), names(&["a", "b"]))
            .unwrap();

        let profile = svc.get_user(&uid("u1")).unwrap();
        assert_eq!(sorted(profile.groups), vec!["a", "b"]);
        assert!(svc.ensure_group_exists(&GroupName::new("a").unwrap()).is_ok());
    }

    #[test]
    fn duplicate_user_is_conflict_and_leaves_groups_alone() {
        let (_dir, svc) = service();
        svc.create_user(User::new(uid("u1"), "Ada", "Lovelace"), names(&["a"]))
            .unwrap();
        let err = svc
            .create_user(User::new(uid("u1"), "Other", "Person"), names(&["z"]))
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == USER_EXISTS));
        assert!(matches!(
            svc.ensure_group_exists(&GroupName::new("z").unwrap()),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn update_missing_user_creates_nothing() {
        let (_dir, svc) = service();
        let err = svc
            .update_user(User::new(uid("ghost"), "a", "b"), names(&["new"]))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == USER_NOT_FOUND));
        assert!(svc.ensure_group_exists(&GroupName::new("new").unwrap()).is_err());
    }

    #[test]
    fn delete_user_cascades() {
        let (_dir, svc) = service();
        svc.create_user(User::new(uid("u2"), "Grace", "Hopper"), names(&["a"]))
            .unwrap();
        svc.delete_user(&uid("u2")).unwrap();

        let roster = svc.get_group(&GroupName::new("a").unwrap()).unwrap();
        assert!(roster.members.is_empty());
        assert!(matches!(svc.get_user(&uid("u2")), Err(ApiError::NotFound(_))));
        assert!(matches!(svc.delete_user(&uid("u2")), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn delete_group_never_reports_missing() {
        let (_dir, svc) = service();
        assert!(svc.delete_group(&GroupName::new("never-existed").unwrap()).is_ok());
    }

    #[test]
    fn delete_group_drops_memberships() {
        let (_dir, svc) = service();
        svc.create_user(User::new(uid("u1"), "Ada", "Lovelace"), names(&["a", "b"]))
            .unwrap();
        svc.delete_group(&GroupName::new("a").unwrap()).unwrap();
        assert_eq!(sorted(svc.get_user(&uid("u1")).unwrap().groups), vec!["b"]);
    }

    #[test]
    fn add_members_requires_group() {
        let (_dir, svc) = service();
        let err = svc
            .add_group_members(&GroupName::new("g1").unwrap(), [uid("x")].into_iter().collect())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == GROUP_NOT_FOUND));
    }
}
