mod types;

pub use types::{Class, Enrollment, ParseRoleError, Role, SeedSet, Subject, User};
