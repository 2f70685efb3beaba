//! Event category enumeration for event classification.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the category of an event.
///
/// This enumeration corresponds to the `EVENT_CATEGORY` PostgreSQL enum and is
/// used to classify events for filtering and discovery.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::EventCategory"]
pub enum EventCategory {
    /// Social gathering or celebration
    #[db_rename = "party"]
    #[serde(rename = "party")]
    #[strum(serialize = "party")]
    Party,

    /// Business or team meeting
    #[db_rename = "meeting"]
    #[serde(rename = "meeting")]
    #[strum(serialize = "meeting")]
    Meeting,

    /// Professional conference or summit
    #[db_rename = "conference"]
    #[serde(rename = "conference")]
    #[strum(serialize = "conference")]
    Conference,

    /// Wedding ceremony or reception
    #[db_rename = "wedding"]
    #[serde(rename = "wedding")]
    #[strum(serialize = "wedding")]
    Wedding,

    /// Birthday celebration
    #[db_rename = "birthday"]
    #[serde(rename = "birthday")]
    #[strum(serialize = "birthday")]
    Birthday,

    /// Anything that does not fit the other categories
    #[db_rename = "other"]
    #[serde(rename = "other")]
    #[strum(serialize = "other")]
    #[default]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_wire_name() {
        assert_eq!("party".parse::<EventCategory>(), Ok(EventCategory::Party));
        assert_eq!("other".parse::<EventCategory>(), Ok(EventCategory::Other));
        assert!("concert".parse::<EventCategory>().is_err());
    }

    #[test]
    fn defaults_to_other() {
        assert_eq!(EventCategory::default(), EventCategory::Other);
    }
}
