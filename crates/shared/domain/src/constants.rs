//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Identity
// =============================================================================

/// Id carried by a user that has not been persisted yet
pub const UNASSIGNED_USER_ID: i32 = 0;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Email format: local part, `@`, domain, then one or more 2-3 character segments.
pub const EMAIL_PATTERN: &str = r"^([\w.\-]+)@([\w\-]+)((\.(\w){2,3})+)$";
