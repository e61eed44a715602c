//! Task capabilities and their fixed permission strings.

use strum::{EnumIter, EnumString};

/// The four task-board capabilities subject to the permission gate.
///
/// Each capability is a membership test of one fixed organization-scoped
/// permission string against the identity's grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Can view tasks in the organization.
    View,
    /// Can edit existing tasks.
    Edit,
    /// Can create new tasks.
    Create,
    /// Can delete tasks.
    Delete,
}

impl Capability {
    /// Returns the permission string this capability tests for.
    #[must_use]
    pub const fn permission(self) -> &'static str {
        match self {
            Self::View => "org:tasks:view",
            Self::Edit => "org:tasks:edit",
            Self::Create => "org:tasks:create",
            Self::Delete => "org:tasks:delete",
        }
    }

    /// Returns the user-facing denial message for this capability.
    #[must_use]
    pub const fn denied_message(self) -> &'static str {
        match self {
            Self::View => "Insufficient permissions to view tasks.",
            Self::Edit => "Insufficient permissions to edit tasks.",
            Self::Create => "Insufficient permissions to create tasks.",
            Self::Delete => "Insufficient permissions to delete tasks.",
        }
    }
}
