//! Fixed development seed data.
//!
//! This module contains a pure function returning the seed set loaded by
//! the `seed` command. The data is fixed and in-process: reconciliation
//! replaces the table contents with exactly these records on every run.
//!
//! Subjects `OJT2026`, `PUBG2004` and `VAL36` are deliberately absent from
//! the catalog so the projector synthesizes them from the classes that
//! reference them.

use chrono::{NaiveDate, TimeZone, Utc};
use schoolsync_core::school::{Class, Enrollment, Role, SeedSet, Subject, User};

/// Returns the configured seed set.
pub fn seed_set() -> SeedSet {
    let date = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let datetime = |y: i32, m: u32, d: u32, h: u32| Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();

    let users = vec![
        User::new(
            "SE182088",
            "Kim Ngan Nguyen",
            "se182088@fpt.edu.vn",
            Role::Student,
            date(2004, 8, 29),
        )
        .with_status(0),
        User::new(
            "SE182907",
            "Hoang Lam Nguyen",
            "se182907@fpt.edu.vn",
            Role::Lecturer,
            date(2004, 7, 29),
        ),
        User::new(
            "GV006",
            "Van Tuan Nguyen",
            "lecturer@fpt.edu.vn",
            Role::Lecturer,
            date(1999, 4, 9),
        ),
        User::new(
            "ADMIN01",
            "Super Admin",
            "admin@fpt.edu.vn",
            Role::Admin,
            date(1990, 1, 1),
        ),
    ];

    // Catalog subjects. Classes may reference codes outside this list.
    let subjects = vec![
        Subject::new("SWP391", "Software Development Project")
            .with_department("SE")
            .with_created_at(datetime(2025, 12, 6, 8)),
        Subject::new("SWR302", "Software Requirements")
            .with_department("SE")
            .with_created_at(datetime(2025, 12, 6, 9)),
        Subject::new("PRN211", "Basic Cross-Platform Application Programming")
            .with_department("SE")
            .with_created_at(datetime(2025, 12, 5, 10)),
        Subject::new("MKT101", "Marketing Principles")
            .with_department("IB")
            .with_created_at(datetime(2025, 12, 6, 14)),
        Subject::new("JPD113", "Elementary Japanese")
            .with_department("FL")
            .with_created_at(datetime(2025, 11, 20, 8)),
    ];

    let classes = vec![
        Class::new("SE1700", "SE1700 - SWP391", "SWP391", "GV006", "SPRING2024")
            .with_room("BE-401")
            .with_description("Capstone project preparation"),
        Class::new("SE1702", "SE1702 - SWR302", "SWR302", "GV006", "SPRING2024")
            .with_room("BE-401"),
        Class::new(
            "CLASS_09A263E6",
            "OJT",
            "OJT2026",
            "SE182907",
            "SUMMER2026",
        )
        .with_description("On-the-job training semester"),
        Class::new(
            "CLASS_4D0420B0",
            "PUBG2004",
            "PUBG2004",
            "GV006",
            "SPRING2026",
        ),
        Class::new(
            "CLASS_7056D2DE",
            "Valorant",
            "VAL36",
            "SE182907",
            "FALL2025",
        ),
    ];

    let enrollments = vec![
        Enrollment::new("SE182088", "CLASS_4D0420B0"),
        Enrollment::new("SE182088", "CLASS_7056D2DE"),
    ];

    SeedSet {
        users,
        subjects,
        classes,
        enrollments,
    }
}
