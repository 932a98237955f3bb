//! Wire shapes of a stats response.
//!
//! These types only live for the duration of a decode call.

mod envelope;
mod records;
mod weapons;

pub(crate) use self::envelope::{
    count_read,
    RawEnvelope,
};
pub use self::{
    records::{
        DetailedStatBlock,
        MovingTrendBlock,
        TeamRoleBucket,
        TrendSeries,
    },
    weapons::{
        WeaponBlock,
        WeaponSection,
        WeaponSlotsBlock,
        WeaponTypeBlock,
        WeaponTypesBlock,
    },
};
use crate::{
    types::TeamRole,
    vocabulary::{
        RecordShape,
        SectionShape,
        Vocabulary,
    },
    Location,
    StatsResult,
};

/// The decoded payload of a game mode section.
pub trait SectionPayload: Sized {
    /// The shape a section tag must resolve to for this payload
    const SHAPE: SectionShape;

    /// Decode a section whose tag has already been checked.
    ///
    /// Only the given team roles are decoded, the others are left empty.
    fn decode(
        value: &serde_json::Value,
        location: Location,
        vocabulary: &Vocabulary,
        team_roles: &[TeamRole],
    ) -> StatsResult<Self>;

    /// Whether any of the given team roles carry data.
    fn has_data_for(&self, team_roles: &[TeamRole]) -> bool;
}

/// The decoded payload of a team role record.
pub trait RecordPayload: serde::de::DeserializeOwned {
    /// The shape a record tag must resolve to for this payload
    const SHAPE: RecordShape;
}
