//! Filter sets behind the list endpoints
//!
//! A filter set is the typed form of a list endpoint's query string. Each one
//! restricts the base query of a single entity by equality on the fields it
//! declares, optionally by tag, and optionally to the children the requesting
//! caregiver looks after. Unset fields impose no restriction.

use std::fmt::Display;
use std::str::FromStr;

use sea_query::{Alias, Expr, Order, Query, SelectStatement};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::{
    Bmi, DiaperChange, DiaperColor, Feeding, FeedingMethod, FeedingType, HeadCircumference,
    Height, Note, Pumping, Sleep, Temperature, TummyTime, Weight,
};
use crate::schema::{
    ChildCaregivers, Children, DiaperChanges, EventColumn, EventKind, Feedings, TaggedItems, Tags,
    Users,
};
use crate::types::Pagination;

/// Treats a missing or blank query-string value as unset
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Restriction of one entity's list query
pub trait FilterSet {
    /// Row type the query selects
    type Record;

    const KIND: EventKind;

    /// Whether the entity carries tags
    const TAGGED: bool = true;

    /// Whether rows are limited to children of the requesting caregiver
    const CAREGIVER_SCOPED: bool = false;

    fn child(&self) -> Option<Uuid>;

    fn tag(&self) -> Option<&str> {
        None
    }

    /// Entity-specific equality filters
    fn apply_fields(&self, _query: &mut SelectStatement) {}

    /// Full, unpaginated query for `caregiver`, newest first
    fn select(&self, caregiver: &str) -> SelectStatement {
        let kind = Self::KIND;
        let mut query = Query::select();
        query
            .columns(kind.columns().iter().map(|column| (kind, Alias::new(*column))))
            .from(kind);

        if let Some(child) = self.child() {
            query.and_where(Expr::col((kind, EventColumn::ChildId)).eq(child));
        }

        self.apply_fields(&mut query);

        if Self::TAGGED {
            if let Some(tag) = self.tag() {
                filter_by_tag(&mut query, kind, tag);
            }
        }

        if Self::CAREGIVER_SCOPED {
            query.and_where(
                Expr::col((kind, EventColumn::ChildId)).in_subquery(caregiver_children(caregiver)),
            );
        }

        query
            .order_by((kind, Alias::new(kind.time_column())), Order::Desc)
            .order_by((kind, EventColumn::Id), Order::Desc);
        query
    }

    /// One page of [`FilterSet::select`]
    fn page(&self, caregiver: &str, pagination: Pagination) -> SelectStatement {
        let mut query = self.select(caregiver);
        query.limit(pagination.limit()).offset(pagination.offset());
        query
    }
}

/// Narrows `query` to rows linked to the tag called `tag`.
///
/// A record linked to the same tag more than once still appears once.
pub fn filter_by_tag(query: &mut SelectStatement, kind: EventKind, tag: &str) {
    query
        .inner_join(
            TaggedItems::Table,
            Expr::col((TaggedItems::Table, TaggedItems::ObjectId))
                .equals((kind, EventColumn::Id))
                .and(Expr::col((TaggedItems::Table, TaggedItems::ContentType)).eq(kind.table_name())),
        )
        .inner_join(
            Tags::Table,
            Expr::col((Tags::Table, Tags::Id)).equals((TaggedItems::Table, TaggedItems::TagId)),
        )
        .and_where(Expr::col((Tags::Table, Tags::Name)).eq(tag))
        .distinct();
}

/// Ids of the children linked to the caregiver with `username`
pub fn caregiver_children(username: &str) -> SelectStatement {
    Query::select()
        .column((ChildCaregivers::Table, ChildCaregivers::ChildId))
        .from(ChildCaregivers::Table)
        .inner_join(
            Users::Table,
            Expr::col((Users::Table, Users::Id))
                .equals((ChildCaregivers::Table, ChildCaregivers::UserId)),
        )
        .and_where(Expr::col((Users::Table, Users::Username)).eq(username))
        .to_owned()
}

/// Number of rows `query` would return without pagination
pub fn count_query(query: SelectStatement) -> SelectStatement {
    Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from_subquery(query, Alias::new("filtered"))
        .to_owned()
}

/// Tag choices, ordered by name
pub fn tags_query() -> SelectStatement {
    Query::select()
        .columns([Tags::Id, Tags::Name, Tags::Slug, Tags::Color])
        .from(Tags::Table)
        .order_by(Tags::Name, Order::Asc)
        .to_owned()
}

/// Whether a tag with `name` exists
pub fn tag_exists_query(name: &str) -> SelectStatement {
    Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(Tags::Table)
        .and_where(Expr::col(Tags::Name).eq(name))
        .to_owned()
}

/// Children visible to the requesting caregiver.
///
/// The caregiver scope always applies; `first_name` only narrows within it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub first_name: Option<String>,
}

impl ChildFilter {
    pub fn select(&self, caregiver: &str) -> SelectStatement {
        let mut query = Query::select();
        query
            .columns([
                (Children::Table, Children::Id),
                (Children::Table, Children::FirstName),
                (Children::Table, Children::LastName),
                (Children::Table, Children::Slug),
                (Children::Table, Children::BirthDate),
                (Children::Table, Children::FeedingTarget),
            ])
            .from(Children::Table)
            .and_where(
                Expr::col((Children::Table, Children::Id)).in_subquery(caregiver_children(caregiver)),
            );

        if let Some(first_name) = &self.first_name {
            query.and_where(Expr::col((Children::Table, Children::FirstName)).eq(first_name.as_str()));
        }

        query
            .order_by((Children::Table, Children::LastName), Order::Asc)
            .order_by((Children::Table, Children::FirstName), Order::Asc);
        query
    }

    pub fn page(&self, caregiver: &str, pagination: Pagination) -> SelectStatement {
        let mut query = self.select(caregiver);
        query.limit(pagination.limit()).offset(pagination.offset());
        query
    }
}

/// Declares a filter set whose only field is `child`
macro_rules! child_filter_set {
    ($(#[$meta:meta])* $name:ident, $record:ty, $kind:expr) => {
        child_filter_set!($(#[$meta])* $name, $record, $kind, tagged = true, scoped = false);
    };
    ($(#[$meta:meta])* $name:ident, $record:ty, $kind:expr, tagged = $tagged:expr, scoped = $scoped:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(default, deserialize_with = "empty_as_none")]
            pub child: Option<Uuid>,
            #[serde(default, deserialize_with = "empty_as_none")]
            pub tag: Option<String>,
        }

        impl FilterSet for $name {
            type Record = $record;

            const KIND: EventKind = $kind;
            const TAGGED: bool = $tagged;
            const CAREGIVER_SCOPED: bool = $scoped;

            fn child(&self) -> Option<Uuid> {
                self.child
            }

            fn tag(&self) -> Option<&str> {
                self.tag.as_deref()
            }
        }
    };
}

child_filter_set!(
    /// BMI records of the requesting caregiver's children
    BmiFilter,
    Bmi,
    EventKind::Bmi,
    tagged = true,
    scoped = true
);
child_filter_set!(HeadCircumferenceFilter, HeadCircumference, EventKind::HeadCircumference);
child_filter_set!(HeightFilter, Height, EventKind::Height);
child_filter_set!(NoteFilter, Note, EventKind::Note);
child_filter_set!(
    /// Pumping records carry no tags; a `tag` parameter is ignored
    PumpingFilter,
    Pumping,
    EventKind::Pumping,
    tagged = false,
    scoped = false
);
child_filter_set!(SleepFilter, Sleep, EventKind::Sleep);
child_filter_set!(TemperatureFilter, Temperature, EventKind::Temperature);
child_filter_set!(TummyTimeFilter, TummyTime, EventKind::TummyTime);
child_filter_set!(WeightFilter, Weight, EventKind::Weight);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaperChangeFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub child: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub wet: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub solid: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color: Option<DiaperColor>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tag: Option<String>,
}

impl FilterSet for DiaperChangeFilter {
    type Record = DiaperChange;

    const KIND: EventKind = EventKind::DiaperChange;

    fn child(&self) -> Option<Uuid> {
        self.child
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn apply_fields(&self, query: &mut SelectStatement) {
        if let Some(wet) = self.wet {
            query.and_where(Expr::col((DiaperChanges::Table, DiaperChanges::Wet)).eq(wet));
        }
        if let Some(solid) = self.solid {
            query.and_where(Expr::col((DiaperChanges::Table, DiaperChanges::Solid)).eq(solid));
        }
        if let Some(color) = self.color {
            query.and_where(
                Expr::col((DiaperChanges::Table, DiaperChanges::Color)).eq(color.as_str()),
            );
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub child: Option<Uuid>,
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub feeding_type: Option<FeedingType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub method: Option<FeedingMethod>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tag: Option<String>,
}

impl FilterSet for FeedingFilter {
    type Record = Feeding;

    const KIND: EventKind = EventKind::Feeding;

    fn child(&self) -> Option<Uuid> {
        self.child
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn apply_fields(&self, query: &mut SelectStatement) {
        if let Some(feeding_type) = self.feeding_type {
            query.and_where(Expr::col((Feedings::Table, Feedings::Type)).eq(feeding_type.as_str()));
        }
        if let Some(method) = self.method {
            query.and_where(Expr::col((Feedings::Table, Feedings::Method)).eq(method.as_str()));
        }
    }
}
