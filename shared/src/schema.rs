//! Table and column identifiers for query building

use sea_query::Iden;

/// Children table
#[derive(Iden)]
pub enum Children {
    Table,
    Id,
    FirstName,
    LastName,
    Slug,
    BirthDate,
    FeedingTarget,
}

/// Users table - only the columns used for caregiver scoping
#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Username,
}

/// Child ↔ caregiver link table
#[derive(Iden)]
pub enum ChildCaregivers {
    Table,
    ChildId,
    UserId,
}

/// Tags table
#[derive(Iden)]
pub enum Tags {
    Table,
    Id,
    Name,
    Slug,
    Color,
}

/// Generic tag links; `content_type` is the tagged record's table name
#[derive(Iden)]
pub enum TaggedItems {
    Table,
    TagId,
    ObjectId,
    ContentType,
}

/// Columns every event table carries
#[derive(Iden)]
pub enum EventColumn {
    Id,
    ChildId,
}

#[derive(Iden)]
pub enum Feedings {
    Table,
    Id,
    ChildId,
    Start,
    End,
    Type,
    Method,
    Amount,
    Notes,
}

#[derive(Iden)]
pub enum DiaperChanges {
    Table,
    Id,
    ChildId,
    Time,
    Wet,
    Solid,
    Color,
    Amount,
    Notes,
}

/// Event entities exposed through list endpoints and reports.
///
/// The identifier renders as the entity's table name.
#[derive(Debug, Iden, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[iden = "feedings"]
    Feeding,
    #[iden = "sleeps"]
    Sleep,
    #[iden = "diaper_changes"]
    DiaperChange,
    #[iden = "weights"]
    Weight,
    #[iden = "heights"]
    Height,
    #[iden = "head_circumferences"]
    HeadCircumference,
    #[iden = "bmis"]
    Bmi,
    #[iden = "temperatures"]
    Temperature,
    #[iden = "tummy_times"]
    TummyTime,
    #[iden = "pumpings"]
    Pumping,
    #[iden = "notes"]
    Note,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Feeding,
        EventKind::Sleep,
        EventKind::DiaperChange,
        EventKind::Weight,
        EventKind::Height,
        EventKind::HeadCircumference,
        EventKind::Bmi,
        EventKind::Temperature,
        EventKind::TummyTime,
        EventKind::Pumping,
        EventKind::Note,
    ];

    /// Table name, also used as the `content_type` of tag links
    pub fn table_name(&self) -> &'static str {
        match self {
            EventKind::Feeding => "feedings",
            EventKind::Sleep => "sleeps",
            EventKind::DiaperChange => "diaper_changes",
            EventKind::Weight => "weights",
            EventKind::Height => "heights",
            EventKind::HeadCircumference => "head_circumferences",
            EventKind::Bmi => "bmis",
            EventKind::Temperature => "temperatures",
            EventKind::TummyTime => "tummy_times",
            EventKind::Pumping => "pumpings",
            EventKind::Note => "notes",
        }
    }

    /// Columns selected for list views, in row-mapping order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            EventKind::Feeding => &[
                "id", "child_id", "start", "end", "type", "method", "amount", "notes",
            ],
            EventKind::Sleep => &["id", "child_id", "start", "end", "nap", "notes"],
            EventKind::DiaperChange => &[
                "id", "child_id", "time", "wet", "solid", "color", "amount", "notes",
            ],
            EventKind::Weight => &["id", "child_id", "weight", "date", "notes"],
            EventKind::Height => &["id", "child_id", "height", "date", "notes"],
            EventKind::HeadCircumference => {
                &["id", "child_id", "head_circumference", "date", "notes"]
            }
            EventKind::Bmi => &["id", "child_id", "bmi", "date", "notes"],
            EventKind::Temperature => &["id", "child_id", "temperature", "time", "notes"],
            EventKind::TummyTime => &["id", "child_id", "start", "end", "milestone"],
            EventKind::Pumping => &["id", "child_id", "amount", "time", "notes"],
            EventKind::Note => &["id", "child_id", "note", "time"],
        }
    }

    /// Column records of this kind are ordered by
    pub fn time_column(&self) -> &'static str {
        match self {
            EventKind::Feeding | EventKind::Sleep | EventKind::TummyTime => "start",
            EventKind::Weight | EventKind::Height | EventKind::HeadCircumference | EventKind::Bmi => {
                "date"
            }
            EventKind::DiaperChange
            | EventKind::Temperature
            | EventKind::Pumping
            | EventKind::Note => "time",
        }
    }

    /// Permission codename required to list records of this kind
    pub fn view_permission(&self) -> &'static str {
        match self {
            EventKind::Feeding => "core.view_feeding",
            EventKind::Sleep => "core.view_sleep",
            EventKind::DiaperChange => "core.view_diaperchange",
            EventKind::Weight => "core.view_weight",
            EventKind::Height => "core.view_height",
            EventKind::HeadCircumference => "core.view_headcircumference",
            EventKind::Bmi => "core.view_bmi",
            EventKind::Temperature => "core.view_temperature",
            EventKind::TummyTime => "core.view_tummytime",
            EventKind::Pumping => "core.view_pumping",
            EventKind::Note => "core.view_note",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iden_matches_table_name() {
        for kind in EventKind::ALL {
            assert_eq!(kind.to_string(), kind.table_name());
        }
    }

    #[test]
    fn test_time_column_is_selected() {
        for kind in EventKind::ALL {
            assert!(kind.columns().contains(&kind.time_column()), "{:?}", kind);
        }
    }

    #[test]
    fn test_derived_table_names() {
        assert_eq!(DiaperChanges::Table.to_string(), "diaper_changes");
        assert_eq!(Feedings::Type.to_string(), "type");
        assert_eq!(ChildCaregivers::Table.to_string(), "child_caregivers");
        assert_eq!(TaggedItems::ContentType.to_string(), "content_type");
    }
}
