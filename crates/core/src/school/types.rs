use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The role a user holds within the school.
///
/// Roles form a small closed set. Key material derived from a role is
/// uppercased and the stored `role_name` attribute is lowercased, so the
/// enum normalizes casing at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

impl Role {
    /// Canonical lowercase name, stored in the `role_name` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::Admin => "admin",
        }
    }

    /// Uppercase form used in the `ROLE#` partition key.
    pub fn key_name(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Lecturer => "LECTURER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown role value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Parses a role case-insensitively, so `"admin"`, `"Admin"` and
    /// `"ADMIN"` all resolve to the same variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "lecturer" => Ok(Role::Lecturer),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// A user of the school system (student, lecturer or admin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub date_of_birth: NaiveDate,
    /// Avatar image URL.
    pub avatar: String,
    pub status: i64,
}

impl User {
    /// Creates a new active user with a generated avatar URL.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        date_of_birth: NaiveDate,
    ) -> Self {
        let name = name.into();
        let avatar = format!(
            "https://ui-avatars.com/api/?name={}",
            name.replace(' ', "+")
        );
        Self {
            id: id.into(),
            name,
            email: email.into(),
            role,
            date_of_birth,
            avatar,
            status: 1,
        }
    }

    /// Sets a specific avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Sets the status flag.
    pub fn with_status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }
}

/// A class taught during a semester.
///
/// `subject_code` and `teacher_id` are references to a [`Subject`] and a
/// [`User`]; the referenced subject need not be supplied explicitly in the
/// seed set, it is synthesized during projection the first time its code is
/// encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub subject_code: String,
    pub teacher_id: String,
    pub semester: String,
    /// Physical room, if any. Projection normalizes `None` to `"Online"`.
    pub room: Option<String>,
    /// Projection normalizes `None` to the empty string.
    pub description: Option<String>,
    pub status: i64,
}

impl Class {
    /// Creates a new active class with no room or description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject_code: impl Into<String>,
        teacher_id: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject_code: subject_code.into(),
            teacher_id: teacher_id.into(),
            semester: semester.into(),
            room: None,
            description: None,
            status: 1,
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status flag.
    pub fn with_status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }
}

/// A subject identified by its catalog code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
    pub credits: i64,
    pub department: Option<String>,
    pub status: i64,
    /// Explicit creation timestamp. When absent, projection stamps the
    /// wall-clock time of the pass.
    pub created_at: Option<DateTime<Utc>>,
}

impl Subject {
    /// Creates a new active three-credit subject.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits: 3,
            department: None,
            status: 1,
            created_at: None,
        }
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: i64) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets an explicit creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Synthesizes a subject from a class that references it.
    ///
    /// The display name is the portion of the class name after the `-`
    /// separator, trimmed; when the class name has no separator (or nothing
    /// follows it) the subject code is used instead.
    pub fn synthesized_from(class: &Class) -> Self {
        let name = class
            .name
            .split('-')
            .nth(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&class.subject_code)
            .to_string();

        Self::new(&class.subject_code, name)
    }
}

/// Enrollment of a student into a class.
///
/// A pure relationship: it has no identity of its own, its primary key is
/// the pair of related entity keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: String,
    pub class_id: String,
    /// Explicit join timestamp. When absent, projection stamps the
    /// wall-clock time of the pass.
    pub joined_at: Option<DateTime<Utc>>,
    pub status: String,
}

impl Enrollment {
    /// Creates a new enrollment with status `"enrolled"`.
    pub fn new(student_id: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            class_id: class_id.into(),
            joined_at: None,
            status: "enrolled".to_string(),
        }
    }

    /// Sets an explicit join timestamp.
    pub fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = Some(joined_at);
        self
    }
}

/// The full seed data set a reconciliation run loads into the table.
///
/// The vectors are ordered; projection preserves their order, which makes
/// repeated runs diffable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedSet {
    pub users: Vec<User>,
    pub subjects: Vec<Subject>,
    pub classes: Vec<Class>,
    pub enrollments: Vec<Enrollment>,
}

impl SeedSet {
    /// Number of seed records across all entity types.
    ///
    /// This counts inputs, not projected items: classes may synthesize
    /// additional subject items during projection.
    pub fn record_count(&self) -> usize {
        self.users.len() + self.subjects.len() + self.classes.len() + self.enrollments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("LECTURER".parse::<Role>().unwrap(), Role::Lecturer);
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        let err = "teacher".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown role: teacher");
    }

    #[test]
    fn test_role_name_casing() {
        assert_eq!(Role::Admin.name(), "admin");
        assert_eq!(Role::Admin.key_name(), "ADMIN");
    }

    #[test]
    fn test_user_default_avatar() {
        let dob = NaiveDate::from_ymd_opt(2004, 8, 29).unwrap();
        let user = User::new("SE182088", "Kim Ngan", "kimngan@example.com", Role::Student, dob);
        assert_eq!(user.avatar, "https://ui-avatars.com/api/?name=Kim+Ngan");
        assert_eq!(user.status, 1);
    }

    #[test]
    fn test_subject_synthesized_from_class_with_separator() {
        let class = Class::new("SE1700", "SE1700 - SWP391", "SWP391", "GV006", "SPRING2024");
        let subject = Subject::synthesized_from(&class);
        assert_eq!(subject.code, "SWP391");
        assert_eq!(subject.name, "SWP391");
        assert_eq!(subject.credits, 3);
        assert_eq!(subject.status, 1);
    }

    #[test]
    fn test_subject_synthesized_from_class_without_separator() {
        let class = Class::new("CLASS_09A263E6", "OJT", "OJT2026", "SE182907", "SUMMER2026");
        let subject = Subject::synthesized_from(&class);
        assert_eq!(subject.code, "OJT2026");
        assert_eq!(subject.name, "OJT2026");
    }

    #[test]
    fn test_subject_synthesized_name_is_trimmed() {
        let class = Class::new("SE1702", "SE1702 - Software Requirements", "SWR302", "GV006", "2");
        let subject = Subject::synthesized_from(&class);
        assert_eq!(subject.name, "Software Requirements");
    }

    #[test]
    fn test_seed_set_record_count() {
        let seed = SeedSet {
            users: vec![User::new(
                "U1",
                "A",
                "a@example.com",
                Role::Student,
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            )],
            subjects: vec![],
            classes: vec![Class::new("C1", "C1 - X", "X1", "U2", "FALL2025")],
            enrollments: vec![Enrollment::new("U1", "C1")],
        };
        assert_eq!(seed.record_count(), 3);
    }
}
