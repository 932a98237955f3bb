//! Decoder for Ubisoft player stats responses.
//!
//! The stats service answers every aggregation request with the same envelope, but the sections
//! inside it change shape depending on a `type` tag. This crate resolves those tags, decodes each
//! game mode and team role, and assembles one strongly typed result per aggregation kind.
//!
//! It performs no I/O. Fetch the body however you like and hand the bytes to a [`Decoder`].

mod aggregation;
mod decoder;
pub mod normalize;
pub mod query;
pub mod types;
pub mod vocabulary;
pub mod wire;

pub use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
        InvalidAggregationKind,
        TotalsMode,
    },
    decoder::{
        DecodeOptions,
        Decoder,
    },
    query::StatsQuery,
    types::{
        BombsiteStats,
        DetailedStats,
        GameMode,
        MapStats,
        MovingTrendStats,
        NamedStats,
        OperatorStats,
        StatsWindow,
        SummarizedStats,
        TeamRole,
        WeaponStats,
    },
    vocabulary::{
        RecordShape,
        SectionShape,
        Vocabulary,
    },
    wire::{
        DetailedStatBlock,
        MovingTrendBlock,
        RecordPayload,
        SectionPayload,
        TeamRoleBucket,
        TrendSeries,
        WeaponSection,
    },
};

/// Result type
pub type StatsResult<T> = Result<T, Error>;

/// Where in a response an error was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    /// The game mode section, if the error is inside one
    pub game_mode: Option<GameMode>,

    /// The team role bucket, if the error is inside one
    pub team_role: Option<TeamRole>,

    /// The index of the record inside its team role list
    pub record: Option<usize>,
}

impl Location {
    /// The envelope itself
    pub fn envelope() -> Self {
        Self::default()
    }

    /// A game mode section
    pub fn game_mode(game_mode: GameMode) -> Self {
        Self {
            game_mode: Some(game_mode),
            ..Self::default()
        }
    }

    /// Narrow this location to a team role.
    pub fn with_team_role(self, team_role: TeamRole) -> Self {
        Self {
            team_role: Some(team_role),
            ..self
        }
    }

    /// Narrow this location to a record.
    pub fn with_record(self, record: usize) -> Self {
        Self {
            record: Some(record),
            ..self
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let game_mode = match self.game_mode {
            Some(game_mode) => game_mode,
            None => return write!(f, "envelope"),
        };
        write!(f, "{}", game_mode.as_str())?;

        if let Some(team_role) = self.team_role {
            write!(f, ".{}", team_role.as_str())?;
        }

        if let Some(record) = self.record {
            write!(f, "[{record}]")?;
        }

        Ok(())
    }
}

/// Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A type tag was unknown, or known but not valid for the requested aggregation.
    #[error(
        "unexpected discriminator '{}' at {location}, expected {expected}",
        .found.as_deref().unwrap_or("<none>")
    )]
    DiscriminatorMismatch {
        /// Where the tag was read
        location: Location,

        /// The tag as found on the wire, if any
        found: Option<String>,

        /// What the aggregation accepts here
        expected: &'static str,
    },

    /// Data that the aggregation cannot do without is absent.
    #[error("missing required data at {location}: {reason}")]
    MissingRequiredData {
        /// Where the data was expected
        location: Location,

        /// What is missing
        reason: &'static str,
    },

    /// A field did not have the expected scalar or array shape.
    #[error("malformed value at {location}")]
    MalformedValue {
        /// Where the value was read
        location: Location,

        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Get the location of this error.
    pub fn location(&self) -> Location {
        match self {
            Self::DiscriminatorMismatch { location, .. }
            | Self::MissingRequiredData { location, .. }
            | Self::MalformedValue { location, .. } => *location,
        }
    }

    pub(crate) fn malformed(location: Location, source: serde_json::Error) -> Self {
        Self::MalformedValue { location, source }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::envelope().to_string(), "envelope");
        assert_eq!(Location::game_mode(GameMode::Ranked).to_string(), "ranked");
        assert_eq!(
            Location::game_mode(GameMode::Casual)
                .with_team_role(TeamRole::Attacker)
                .with_record(3)
                .to_string(),
            "casual.attacker[3]"
        );
    }

    #[test]
    fn mismatch_message() {
        let error = Error::DiscriminatorMismatch {
            location: Location::game_mode(GameMode::Unranked),
            found: None,
            expected: "Team roles weapons",
        };
        assert_eq!(
            error.to_string(),
            "unexpected discriminator '<none>' at unranked, expected Team roles weapons"
        );
    }
}
