//! Entity projection into storage items.
//!
//! Converts seed domain records into the denormalized single-table layout.
//! Projection runs entity by entity in a single pass: every derived key
//! depends only on the source entity's own fields, never on another item's
//! state.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::school::{Class, Enrollment, SeedSet, Subject, User};
use crate::storage::{IndexKey, ItemKey, StorageItem};

use super::keys;

/// Sentinel room value for classes held without a physical room.
pub const DEFAULT_ROOM: &str = "Online";

/// Project the full seed set into an ordered sequence of storage items.
///
/// The output order is deterministic for a given seed set: users first,
/// then explicit subjects, then classes with their synthesized subjects
/// interleaved, then enrollments. A class referencing a subject code that
/// was already emitted (explicitly or by an earlier class) does not emit it
/// again; the seen-codes set is scoped to this one call.
///
/// `now` stamps `created_at`/`updated_at`/`joined_at` attributes whenever
/// the seed record carries no explicit timestamp, so every item of one pass
/// shares the same wall-clock capture.
pub fn project_seed(seed: &SeedSet, now: DateTime<Utc>) -> Vec<StorageItem> {
    let mut items = Vec::with_capacity(seed.record_count());
    let mut seen_subjects: HashSet<String> = HashSet::new();

    for user in &seed.users {
        items.push(project_user(user));
    }

    for subject in &seed.subjects {
        seen_subjects.insert(subject.code.clone());
        items.push(project_subject(subject, now));
    }

    for class in &seed.classes {
        items.push(project_class(class, now));
        if seen_subjects.insert(class.subject_code.clone()) {
            items.push(project_subject(&Subject::synthesized_from(class), now));
        }
    }

    for enrollment in &seed.enrollments {
        items.push(project_enrollment(enrollment, now));
    }

    items
}

/// Project a user into its profile item.
///
/// The stored `role_name` is the lowercase role; only the secondary
/// partition key carries the uppercase form.
pub fn project_user(user: &User) -> StorageItem {
    StorageItem::new(ItemKey::new(keys::user_pk(&user.id), keys::PROFILE_SORT_KEY))
        .with_index_key(IndexKey::new(
            keys::user_index_pk(user.role),
            keys::user_index_sk(&user.name),
        ))
        .with_attr("id", user.id.as_str())
        .with_attr("name", user.name.as_str())
        .with_attr("email", user.email.as_str())
        .with_attr("role_name", user.role.name())
        .with_attr(
            "date_of_birth",
            user.date_of_birth.format("%Y-%m-%d").to_string(),
        )
        .with_attr("avatar", user.avatar.as_str())
        .with_attr("status", user.status)
}

/// Project a class into its info item.
///
/// Nullable fields are normalized here: a missing room becomes
/// [`DEFAULT_ROOM`], a missing description becomes the empty string. The
/// schema has no notion of optional-vs-missing below this boundary.
pub fn project_class(class: &Class, now: DateTime<Utc>) -> StorageItem {
    StorageItem::new(ItemKey::new(keys::class_pk(&class.id), keys::INFO_SORT_KEY))
        .with_index_key(IndexKey::new(
            keys::CLASS_TYPE_KEY,
            keys::class_index_sk(&class.name),
        ))
        .with_attr("id", class.id.as_str())
        .with_attr("name", class.name.as_str())
        .with_attr("subject_id", keys::subject_pk(&class.subject_code))
        .with_attr("teacher_id", keys::user_pk(&class.teacher_id))
        .with_attr("semester", class.semester.as_str())
        .with_attr("room", class.room.as_deref().unwrap_or(DEFAULT_ROOM))
        .with_attr("description", class.description.as_deref().unwrap_or(""))
        .with_attr("status", class.status)
        .with_attr("created_at", now.to_rfc3339())
}

/// Project a subject into its info item.
pub fn project_subject(subject: &Subject, now: DateTime<Utc>) -> StorageItem {
    let mut item = StorageItem::new(ItemKey::new(
        keys::subject_pk(&subject.code),
        keys::INFO_SORT_KEY,
    ))
    .with_index_key(IndexKey::new(
        keys::SUBJECT_TYPE_KEY,
        keys::subject_index_sk(&subject.name),
    ))
    .with_attr("id", keys::subject_pk(&subject.code))
    .with_attr("codeSubject", subject.code.as_str())
    .with_attr("name", subject.name.as_str())
    .with_attr("credits", subject.credits)
    .with_attr("status", subject.status)
    .with_attr(
        "created_at",
        subject.created_at.unwrap_or(now).to_rfc3339(),
    )
    .with_attr("updated_at", now.to_rfc3339());

    if let Some(department) = &subject.department {
        item = item.with_attr("department", department.as_str());
    }

    item
}

/// Project an enrollment into its relationship item.
///
/// The primary pair is `(CLASS#<class>, STUDENT#<student>)`; the secondary
/// pair inverts it to `(USER#<student>, CLASS#<class>)` so both directions
/// of the relationship read from the same item.
pub fn project_enrollment(enrollment: &Enrollment, now: DateTime<Utc>) -> StorageItem {
    StorageItem::new(ItemKey::new(
        keys::enrollment_pk(&enrollment.class_id),
        keys::enrollment_sk(&enrollment.student_id),
    ))
    .with_index_key(IndexKey::new(
        keys::enrollment_index_pk(&enrollment.student_id),
        keys::enrollment_index_sk(&enrollment.class_id),
    ))
    .with_attr(
        "joined_at",
        enrollment.joined_at.unwrap_or(now).to_rfc3339(),
    )
    .with_attr("status", enrollment.status.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::school::Role;
    use crate::storage::ScalarValue;
    use chrono::{NaiveDate, TimeZone};
    use std::collections::HashSet;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 6, 8, 0, 0).unwrap()
    }

    fn student(id: &str, name: &str) -> User {
        User::new(
            id,
            name,
            format!("{}@fpt.edu.vn", id.to_lowercase()),
            Role::Student,
            NaiveDate::from_ymd_opt(2004, 8, 29).unwrap(),
        )
    }

    fn sample_seed() -> SeedSet {
        SeedSet {
            users: vec![student("SE182088", "Kim Ngan Nguyen")],
            subjects: vec![Subject::new("SWR302", "Software Requirements")],
            classes: vec![
                Class::new("SE1700", "SE1700 - SWP391", "SWP391", "GV006", "SPRING2024")
                    .with_room("BE-401"),
                Class::new("SE1702", "SE1702 - SWR302", "SWR302", "GV006", "SPRING2024"),
            ],
            enrollments: vec![Enrollment::new("SE182088", "SE1700")],
        }
    }

    #[test]
    fn test_projected_keys_are_unique() {
        let items = project_seed(&sample_seed(), fixed_now());
        let mut seen = HashSet::new();
        for item in &items {
            assert!(
                seen.insert(item.key.clone()),
                "duplicate key {:?}",
                item.key
            );
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let seed = sample_seed();
        let now = fixed_now();
        assert_eq!(project_seed(&seed, now), project_seed(&seed, now));
    }

    #[test]
    fn test_subject_synthesized_once_regardless_of_class_order() {
        let mut seed = SeedSet {
            classes: vec![
                Class::new("C1", "C1 - SWP391", "SWP391", "GV006", "FALL2025"),
                Class::new("C2", "C2 - SWP391", "SWP391", "GV006", "FALL2025"),
            ],
            ..SeedSet::default()
        };

        for _ in 0..2 {
            let items = project_seed(&seed, fixed_now());
            let subjects: Vec<_> = items
                .iter()
                .filter(|i| i.key.partition_key.starts_with("SUBJECT#"))
                .collect();
            assert_eq!(subjects.len(), 1);
            assert_eq!(subjects[0].key.partition_key, "SUBJECT#SWP391");

            seed.classes.reverse();
        }
    }

    #[test]
    fn test_explicit_subject_suppresses_synthesis() {
        let seed = SeedSet {
            subjects: vec![Subject::new("SWP391", "Software Development Project")
                .with_credits(3)
                .with_department("SE")],
            classes: vec![Class::new(
                "SE1700",
                "SE1700 - SWP391",
                "SWP391",
                "GV006",
                "SPRING2024",
            )],
            ..SeedSet::default()
        };

        let items = project_seed(&seed, fixed_now());
        let subjects: Vec<_> = items
            .iter()
            .filter(|i| i.key.partition_key == "SUBJECT#SWP391")
            .collect();
        assert_eq!(subjects.len(), 1);
        // The explicit catalog record wins over synthesis.
        assert_eq!(subjects[0].str_attr("name"), Some("Software Development Project"));
        assert_eq!(subjects[0].str_attr("department"), Some("SE"));
    }

    #[test]
    fn test_user_role_casing_in_key_and_attribute() {
        // Both source casings resolve to the same role.
        let role = "Admin".parse::<Role>().unwrap();
        assert_eq!(role, "admin".parse::<Role>().unwrap());

        let user = User::new(
            "ADMIN01",
            "Super Admin",
            "admin@fpt.edu.vn",
            role,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        );
        let item = project_user(&user);

        let index = item.index_key.as_ref().unwrap();
        assert_eq!(index.partition_key, "ROLE#ADMIN");
        assert_eq!(index.sort_key, "NAME#super admin");
        // The stored attribute stays lowercase; only the key is uppercased.
        assert_eq!(item.str_attr("role_name"), Some("admin"));
    }

    #[test]
    fn test_user_item_shape() {
        let item = project_user(&student("SE182088", "Kim Ngan Nguyen"));

        assert_eq!(item.key, ItemKey::new("USER#SE182088", "PROFILE"));
        assert_eq!(item.str_attr("id"), Some("SE182088"));
        assert_eq!(item.str_attr("date_of_birth"), Some("2004-08-29"));
        assert_eq!(item.attributes.get("status"), Some(&ScalarValue::N(1)));
    }

    #[test]
    fn test_class_nullable_fields_are_normalized() {
        let class = Class::new("CLASS_4D0420B0", "PUBG2004", "PUBG2004", "GV006", "SPRING2026");
        let item = project_class(&class, fixed_now());

        assert_eq!(item.str_attr("room"), Some(DEFAULT_ROOM));
        assert_eq!(item.str_attr("description"), Some(""));
    }

    #[test]
    fn test_class_item_references_subject_and_teacher_keys() {
        let class = Class::new("SE1700", "SE1700 - SWP391", "SWP391", "GV006", "SPRING2024")
            .with_room("BE-401")
            .with_description("Capstone preparation");
        let item = project_class(&class, fixed_now());

        assert_eq!(item.key, ItemKey::new("CLASS#SE1700", "INFO"));
        let index = item.index_key.as_ref().unwrap();
        assert_eq!(index.partition_key, "TYPE#CLASS");
        assert_eq!(index.sort_key, "NAME#se1700 - swp391");
        assert_eq!(item.str_attr("subject_id"), Some("SUBJECT#SWP391"));
        assert_eq!(item.str_attr("teacher_id"), Some("USER#GV006"));
        assert_eq!(item.str_attr("room"), Some("BE-401"));
    }

    #[test]
    fn test_synthesized_subject_name_falls_back_to_code() {
        let class = Class::new("CLASS_09A263E6", "OJT", "OJT2026", "SE182907", "SUMMER2026");
        let items = project_seed(
            &SeedSet {
                classes: vec![class],
                ..SeedSet::default()
            },
            fixed_now(),
        );

        let subject = items
            .iter()
            .find(|i| i.key.partition_key == "SUBJECT#OJT2026")
            .unwrap();
        assert_eq!(subject.str_attr("name"), Some("OJT2026"));
        assert_eq!(
            subject.index_key.as_ref().unwrap().sort_key,
            "NAME#ojt2026"
        );
        assert_eq!(subject.attributes.get("credits"), Some(&ScalarValue::N(3)));
    }

    #[test]
    fn test_subject_timestamps_default_to_projection_time() {
        let now = fixed_now();
        let explicit = Utc.with_ymd_and_hms(2025, 11, 20, 8, 0, 0).unwrap();

        let stamped = project_subject(
            &Subject::new("JPD113", "Elementary Japanese").with_created_at(explicit),
            now,
        );
        assert_eq!(stamped.str_attr("created_at"), Some(explicit.to_rfc3339().as_str()));
        assert_eq!(stamped.str_attr("updated_at"), Some(now.to_rfc3339().as_str()));

        let defaulted = project_subject(&Subject::new("MKT101", "Marketing Principles"), now);
        assert_eq!(defaulted.str_attr("created_at"), Some(now.to_rfc3339().as_str()));
    }

    #[test]
    fn test_enrollment_key_inversion() {
        let enrollment = Enrollment::new("SE182088", "CLASS_4D0420B0");
        let item = project_enrollment(&enrollment, fixed_now());

        assert_eq!(
            item.key,
            ItemKey::new("CLASS#CLASS_4D0420B0", "STUDENT#SE182088")
        );
        let index = item.index_key.as_ref().unwrap();
        assert_eq!(index.partition_key, "USER#SE182088");
        assert_eq!(index.sort_key, "CLASS#CLASS_4D0420B0");
        assert_eq!(item.str_attr("status"), Some("enrolled"));
    }

    #[test]
    fn test_end_to_end_minimal_seed() {
        let seed = SeedSet {
            users: vec![student("SE182088", "Kim Ngan Nguyen")],
            classes: vec![Class::new("C1", "C1", "SUB1", "T1", "FALL2025")],
            ..SeedSet::default()
        };

        let items = project_seed(&seed, fixed_now());
        assert_eq!(items.len(), 3);

        let keys: Vec<_> = items.iter().map(|i| i.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ItemKey::new("USER#SE182088", "PROFILE"),
                ItemKey::new("CLASS#C1", "INFO"),
                ItemKey::new("SUBJECT#SUB1", "INFO"),
            ]
        );

        let index_pks: Vec<_> = items
            .iter()
            .map(|i| i.index_key.as_ref().unwrap().partition_key.clone())
            .collect();
        assert_eq!(index_pks, vec!["ROLE#STUDENT", "TYPE#CLASS", "TYPE#SUBJECT"]);
    }
}
