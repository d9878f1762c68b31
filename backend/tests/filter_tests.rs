//! Filter set tests
//!
//! Tests for the list-endpoint filters including:
//! - Field filters emit equality predicates for exactly the supplied fields
//! - Tag filtering joins on the tag and deduplicates
//! - Caregiver scoping applies regardless of the requested field filter

use proptest::prelude::*;
use sea_query::PostgresQueryBuilder;
use shared::filters::{
    count_query, BmiFilter, ChildFilter, DiaperChangeFilter, FeedingFilter, FilterSet,
    NoteFilter, TummyTimeFilter,
};
use shared::schema::EventKind;
use shared::{DiaperColor, FeedingMethod, FeedingType};
use uuid::Uuid;

fn sql<F: FilterSet>(filter: &F, caregiver: &str) -> String {
    filter.select(caregiver).to_string(PostgresQueryBuilder)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Only entities that can be tagged get the tag join
    #[test]
    fn test_tagged_entities() {
        let tagged = TummyTimeFilter {
            child: None,
            tag: Some("outside".into()),
        };
        let query = sql(&tagged, "alice");
        assert!(query.contains(r#""tagged_items"."content_type" = 'tummy_times'"#), "{}", query);
    }

    /// Notes scoped to one child, newest first
    #[test]
    fn test_note_ordering() {
        let child = Uuid::new_v4();
        let query = sql(
            &NoteFilter {
                child: Some(child),
                tag: None,
            },
            "alice",
        );
        assert!(query.contains(&format!(r#""notes"."child_id" = '{}'"#, child)), "{}", query);
        assert!(query.ends_with(r#"ORDER BY "notes"."time" DESC, "notes"."id" DESC"#));
    }

    /// Combined child, field, and tag filters all apply
    #[test]
    fn test_feeding_filters_combine() {
        let child = Uuid::new_v4();
        let query = sql(
            &FeedingFilter {
                child: Some(child),
                feeding_type: Some(FeedingType::BreastMilk),
                method: Some(FeedingMethod::LeftBreast),
                tag: Some("night".into()),
            },
            "alice",
        );
        assert!(query.starts_with("SELECT DISTINCT"), "{}", query);
        assert!(query.contains(r#""feedings"."type" = 'breast_milk'"#));
        assert!(query.contains(r#""feedings"."method" = 'left_breast'"#));
        assert!(query.contains(r#""tags"."name" = 'night'"#));
        assert!(!query.contains("child_caregivers"));
    }

    /// Counting keeps every predicate of the filtered query
    #[test]
    fn test_count_keeps_predicates() {
        let filter = DiaperChangeFilter {
            solid: Some(false),
            ..Default::default()
        };
        let query = count_query(filter.select("alice")).to_string(PostgresQueryBuilder);
        assert!(query.contains(r#""diaper_changes"."solid" = FALSE"#), "{}", query);
        assert!(!query.contains("LIMIT"));
    }

    /// Every event kind maps to a distinct view permission
    #[test]
    fn test_view_permissions_are_distinct() {
        let mut permissions: Vec<_> = EventKind::ALL.iter().map(|k| k.view_permission()).collect();
        permissions.sort();
        permissions.dedup();
        assert_eq!(permissions.len(), EventKind::ALL.len());
        assert!(permissions.iter().all(|p| p.starts_with("core.view_")));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn color_strategy() -> impl Strategy<Value = Option<DiaperColor>> {
        prop_oneof![
            Just(None),
            Just(Some(DiaperColor::Black)),
            Just(Some(DiaperColor::Brown)),
            Just(Some(DiaperColor::Green)),
            Just(Some(DiaperColor::Yellow)),
        ]
    }

    fn username_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,11}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Each diaper field yields a predicate exactly when it is supplied
        #[test]
        fn prop_diaper_predicates_match_supplied_fields(
            wet in proptest::option::of(any::<bool>()),
            solid in proptest::option::of(any::<bool>()),
            color in color_strategy(),
            with_child in any::<bool>(),
        ) {
            let filter = DiaperChangeFilter {
                child: with_child.then(Uuid::new_v4),
                wet,
                solid,
                color,
                tag: None,
            };
            let query = sql(&filter, "alice");

            prop_assert_eq!(query.contains(r#""diaper_changes"."wet" ="#), wet.is_some());
            prop_assert_eq!(query.contains(r#""diaper_changes"."solid" ="#), solid.is_some());
            prop_assert_eq!(query.contains(r#""diaper_changes"."color" ="#), color.is_some());
            prop_assert_eq!(query.contains(r#""diaper_changes"."child_id" ="#), with_child);
            if let Some(color) = color {
                let expected = format!("'{}'", color.as_str());
                prop_assert!(query.contains(&expected));
            }
        }

        /// Scoped filter sets always restrict to the caregiver's children
        #[test]
        fn prop_caregiver_scope_always_applies(
            username in username_strategy(),
            first_name in proptest::option::of("[A-Z][a-z]{1,8}"),
            with_child in any::<bool>(),
        ) {
            let quoted = format!(r#""users"."username" = '{}'"#, username);

            let children = ChildFilter { first_name: first_name.clone() }
                .select(&username)
                .to_string(PostgresQueryBuilder);
            prop_assert!(children.contains(&quoted), "{}", children);
            prop_assert_eq!(children.contains(r#""children"."first_name" ="#), first_name.is_some());

            let bmi = sql(
                &BmiFilter { child: with_child.then(Uuid::new_v4), tag: None },
                &username,
            );
            prop_assert!(bmi.contains(&quoted), "{}", bmi);
        }

        /// Tag filtering always deduplicates and names the tag
        #[test]
        fn prop_tag_filter_deduplicates(tag in "[a-z]{1,12}") {
            let query = sql(&FeedingFilter { tag: Some(tag.clone()), ..Default::default() }, "alice");
            prop_assert!(query.starts_with("SELECT DISTINCT"));
            let expected = format!(r#""tags"."name" = '{}'"#, tag);
            prop_assert!(query.contains(&expected));
        }
    }
}
