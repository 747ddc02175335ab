//! Error types for the shared domain types.

/// Errors produced when converting raw host or configuration values into
/// domain types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A numeric team id that does not name any team.
    #[error("unknown team id: {0}")]
    UnknownTeam(i64),

    /// A role name that does not name any role.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A configuration prefix that does not name any SCP role.
    #[error("unknown role prefix: {0}")]
    UnknownRolePrefix(String),
}
