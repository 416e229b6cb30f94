//! Group service
//!
//! Creating and joining groups, resolving groups and members from user
//! input, and computing a group's ledger summary.

use crate::audit::EntityType;
use crate::error::{GroupSplitError, GroupSplitResult};
use crate::ledger::{self, LedgerSummary};
use crate::models::group::{generate_invite_code, validate_group_name};
use crate::models::{Group, GroupId, Member, User};
use crate::storage::Storage;

use super::user::UserService;

/// Attempts at drawing an unused invite code before giving up
const INVITE_CODE_ATTEMPTS: usize = 16;

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
}

/// Result of joining a group
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub group: Group,
    /// False if the user was already a member
    pub joined: bool,
}

/// A group with its resolved members and derived balances
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub group: Group,
    pub members: Vec<Member>,
    pub ledger: LedgerSummary,
}

impl<'a> GroupService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a group with the current user as its first member
    pub fn create(&self, name: &str) -> GroupSplitResult<Group> {
        let user = UserService::new(self.storage).require_user_to("create a group")?;

        let name = name.trim();
        validate_group_name(name)?;

        let mut group = Group::new(name, user.id);
        group.invite_code = self.unused_invite_code()?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;
        tracing::info!(group = %group.id, creator = %user.id, "created group");

        Ok(group)
    }

    /// Join a group by invite code; joining twice is a no-op
    pub fn join(&self, invite_code: &str) -> GroupSplitResult<JoinOutcome> {
        let user = UserService::new(self.storage).require_user_to("join a group")?;

        let before = self
            .storage
            .groups
            .get_by_invite_code(invite_code)?
            .ok_or_else(|| GroupSplitError::group_not_found(invite_code.trim()))?;

        let mut group = before.clone();
        if !group.add_member(user.id) {
            return Ok(JoinOutcome {
                group,
                joined: false,
            });
        }

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_update(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &before,
            &group,
        )?;
        tracing::info!(group = %group.id, member = %user.id, "member joined group");

        Ok(JoinOutcome {
            group,
            joined: true,
        })
    }

    /// The current user's groups, newest first
    pub fn list_for_current_user(&self) -> GroupSplitResult<Vec<Group>> {
        let user = UserService::new(self.storage).require_user()?;
        self.storage.groups.get_for_member(user.id)
    }

    /// Find one of the current user's groups by name or ID
    pub fn find(&self, identifier: &str) -> GroupSplitResult<Group> {
        let groups = self.list_for_current_user()?;
        let wanted = identifier.trim();

        groups
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(wanted))
            .or_else(|| groups.iter().find(|g| g.id.matches(wanted)))
            .cloned()
            .ok_or_else(|| GroupSplitError::group_not_found(wanted))
    }

    /// Load a group by ID, requiring the current user to be a member
    pub fn get_for_member(&self, user: &User, group_id: GroupId) -> GroupSplitResult<Group> {
        match self.storage.groups.get(group_id)? {
            Some(group) if group.has_member(user.id) => Ok(group),
            _ => Err(GroupSplitError::group_not_found(group_id.to_string())),
        }
    }

    /// Resolve a group's member ids to member records, in join order
    pub fn members(&self, group: &Group) -> GroupSplitResult<Vec<Member>> {
        let users = self.storage.users.get_many(&group.member_ids)?;
        if users.len() != group.member_ids.len() {
            tracing::warn!(
                group = %group.id,
                missing = group.member_ids.len() - users.len(),
                "group lists members with no user record"
            );
        }
        Ok(users.iter().map(Member::from).collect())
    }

    /// Members plus balances and the settlement plan
    pub fn summary(&self, group: &Group) -> GroupSplitResult<GroupSummary> {
        let members = self.members(group)?;
        let ledger = ledger::summarize(&members, &group.expenses);

        Ok(GroupSummary {
            group: group.clone(),
            members,
            ledger,
        })
    }

    /// Find a member by display name (case-insensitive) or ID
    pub fn find_member(members: &[Member], identifier: &str) -> GroupSplitResult<Member> {
        let wanted = identifier.trim();

        members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(wanted))
            .or_else(|| members.iter().find(|m| m.id.matches(wanted)))
            .cloned()
            .ok_or_else(|| GroupSplitError::member_not_found(wanted))
    }

    fn unused_invite_code(&self) -> GroupSplitResult<String> {
        for _ in 0..INVITE_CODE_ATTEMPTS {
            let code = generate_invite_code();
            if !self.storage.groups.invite_code_exists(&code)? {
                return Ok(code);
            }
        }
        Err(GroupSplitError::Storage(
            "Could not generate a unique invite code".into(),
        ))
    }
}
