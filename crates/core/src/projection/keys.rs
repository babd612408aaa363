//! Key derivation for the single-table layout.
//!
//! Pure functions for generating partition and sort keys following the
//! single-table design. All functions are sync and have no side effects.
//!
//! Casing is part of the contract: role values are uppercased in key
//! material only, display names are lowercased in `NAME#` sort keys. A role
//! key stored as `ROLE#Admin` instead of `ROLE#ADMIN` silently breaks
//! role-based lookups.

use crate::school::Role;

// ============================================================================
// Key prefixes
// ============================================================================

pub const USER_PREFIX: &str = "USER#";
pub const CLASS_PREFIX: &str = "CLASS#";
pub const SUBJECT_PREFIX: &str = "SUBJECT#";
pub const STUDENT_PREFIX: &str = "STUDENT#";
pub const ROLE_PREFIX: &str = "ROLE#";
pub const NAME_PREFIX: &str = "NAME#";

// ============================================================================
// Sort key and type-partition literals
// ============================================================================

/// Sort key of a user profile item.
pub const PROFILE_SORT_KEY: &str = "PROFILE";
/// Sort key of class and subject info items.
pub const INFO_SORT_KEY: &str = "INFO";
/// Secondary partition grouping every class item.
pub const CLASS_TYPE_KEY: &str = "TYPE#CLASS";
/// Secondary partition grouping every subject item.
pub const SUBJECT_TYPE_KEY: &str = "TYPE#SUBJECT";

// ============================================================================
// User keys
// ============================================================================

/// Generate primary partition key for a User.
///
/// Pattern: `USER#<user_id>`
pub fn user_pk(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate secondary partition key for User role lookup.
///
/// Pattern: `ROLE#<ROLE_UPPERCASE>`
pub fn user_index_pk(role: Role) -> String {
    format!("{ROLE_PREFIX}{}", role.key_name())
}

/// Generate secondary sort key for User name search.
///
/// Pattern: `NAME#<name_lowercase>`
pub fn user_index_sk(name: &str) -> String {
    format!("{NAME_PREFIX}{}", name.to_lowercase())
}

// ============================================================================
// Class keys
// ============================================================================

/// Generate primary partition key for a Class.
///
/// Pattern: `CLASS#<class_id>`
pub fn class_pk(class_id: &str) -> String {
    format!("{CLASS_PREFIX}{class_id}")
}

/// Generate secondary sort key for Class name search.
///
/// Pattern: `NAME#<name_lowercase>`
pub fn class_index_sk(name: &str) -> String {
    format!("{NAME_PREFIX}{}", name.to_lowercase())
}

// ============================================================================
// Subject keys
// ============================================================================

/// Generate primary partition key for a Subject.
///
/// Pattern: `SUBJECT#<code>`
pub fn subject_pk(code: &str) -> String {
    format!("{SUBJECT_PREFIX}{code}")
}

/// Generate secondary sort key for Subject name search.
///
/// Pattern: `NAME#<name_lowercase>`
pub fn subject_index_sk(name: &str) -> String {
    format!("{NAME_PREFIX}{}", name.to_lowercase())
}

// ============================================================================
// Enrollment keys
// ============================================================================

/// Generate primary partition key for an Enrollment.
///
/// Pattern: `CLASS#<class_id>` (the class owns the membership partition)
pub fn enrollment_pk(class_id: &str) -> String {
    format!("{CLASS_PREFIX}{class_id}")
}

/// Generate sort key for an Enrollment.
///
/// Pattern: `STUDENT#<student_id>`
pub fn enrollment_sk(student_id: &str) -> String {
    format!("{STUDENT_PREFIX}{student_id}")
}

/// Generate secondary partition key for an Enrollment (user's classes lookup).
///
/// Pattern: `USER#<student_id>`
pub fn enrollment_index_pk(student_id: &str) -> String {
    format!("{USER_PREFIX}{student_id}")
}

/// Generate secondary sort key for an Enrollment.
///
/// Pattern: `CLASS#<class_id>`
///
/// The inversion of the primary pair lets "classes for a user" be answered
/// from the same item without re-keying.
pub fn enrollment_index_sk(class_id: &str) -> String {
    format!("{CLASS_PREFIX}{class_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_pk() {
        assert_eq!(user_pk("SE182088"), "USER#SE182088");
    }

    #[test]
    fn test_user_index_pk_uppercases_role() {
        assert_eq!(user_index_pk(Role::Admin), "ROLE#ADMIN");
        assert_eq!(user_index_pk(Role::Student), "ROLE#STUDENT");
        assert_eq!(user_index_pk(Role::Lecturer), "ROLE#LECTURER");
    }

    #[test]
    fn test_user_index_sk_lowercases_name() {
        assert_eq!(user_index_sk("Kim Ngan Nguyen"), "NAME#kim ngan nguyen");
    }

    #[test]
    fn test_class_pk() {
        assert_eq!(class_pk("SE1700"), "CLASS#SE1700");
    }

    #[test]
    fn test_class_index_sk() {
        assert_eq!(class_index_sk("SE1700 - SWP391"), "NAME#se1700 - swp391");
    }

    #[test]
    fn test_subject_pk() {
        assert_eq!(subject_pk("SWP391"), "SUBJECT#SWP391");
    }

    #[test]
    fn test_subject_index_sk() {
        assert_eq!(
            subject_index_sk("Software Development Project"),
            "NAME#software development project"
        );
    }

    #[test]
    fn test_enrollment_keys() {
        assert_eq!(enrollment_pk("SE1700"), "CLASS#SE1700");
        assert_eq!(enrollment_sk("SE182088"), "STUDENT#SE182088");
    }

    #[test]
    fn test_enrollment_index_keys_invert_primary_pair() {
        assert_eq!(enrollment_index_pk("SE182088"), "USER#SE182088");
        assert_eq!(enrollment_index_sk("SE1700"), "CLASS#SE1700");
    }
}
