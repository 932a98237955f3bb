use crate::{
    decoder::DecodeOptions,
    types::{
        GameMode,
        PerGameMode,
        StatsWindow,
        TeamRole,
    },
    vocabulary::{
        RecordShape,
        SectionShape,
    },
    wire::{
        DetailedStatBlock,
        SectionPayload,
    },
    StatsResult,
};
use std::str::FromStr;

/// Error when a string is not a known aggregation kind.
#[derive(Debug)]
pub struct InvalidAggregationKind(pub String);

impl std::error::Error for InvalidAggregationKind {}

impl std::fmt::Display for InvalidAggregationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a valid aggregation kind", self.0)
    }
}

/// The views a caller can request from the stats service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String")]
#[serde(into = "&'static str")]
pub enum AggregationKind {
    /// One stat block per side
    Summary,

    /// One stat block per operator
    Operators,

    /// One stat block per map
    Maps,

    /// One stat block per map bombsite
    Bombsites,

    /// Stats per weapon type and weapon
    Weapons,

    /// Moving average trends
    MovingPoint,
}

impl AggregationKind {
    /// Every aggregation kind
    pub const ALL: [AggregationKind; 6] = [
        Self::Summary,
        Self::Operators,
        Self::Maps,
        Self::Bombsites,
        Self::Weapons,
        Self::MovingPoint,
    ];

    /// The `aggregation` query value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Operators => "operators",
            Self::Maps => "maps",
            Self::Bombsites => "bombsites",
            Self::Weapons => "weapons",
            Self::MovingPoint => "movingpoint",
        }
    }

    /// The `view` query value.
    ///
    /// Weapons and trends are not served in the seasonal view.
    pub fn view(self) -> &'static str {
        match self {
            Self::Summary | Self::Operators => "seasonal",
            Self::Maps | Self::Bombsites | Self::Weapons | Self::MovingPoint => "current",
        }
    }

    /// The game mode sections this kind reads. Others are ignored.
    pub fn game_modes(self) -> &'static [GameMode] {
        match self {
            Self::Summary | Self::Operators | Self::Maps | Self::Bombsites => &GameMode::QUEUES,
            Self::Weapons | Self::MovingPoint => &GameMode::ALL,
        }
    }

    /// The team roles this kind reads. Others are never decoded.
    pub fn team_roles(self) -> &'static [TeamRole] {
        match self {
            Self::Summary => &TeamRole::SIDES,
            Self::Operators
            | Self::Maps
            | Self::Bombsites
            | Self::Weapons
            | Self::MovingPoint => &TeamRole::ALL,
        }
    }

    /// The section shape this kind accepts
    pub fn section_shape(self) -> SectionShape {
        match self {
            Self::Weapons => SectionShape::TeamRoleWeapons,
            _ => SectionShape::TeamRoles,
        }
    }

    /// The record shape this kind accepts, if its sections hold records
    pub fn record_shape(self) -> Option<RecordShape> {
        match self {
            Self::Summary | Self::Operators | Self::Maps | Self::Bombsites => {
                Some(RecordShape::Detailed)
            }
            Self::MovingPoint => Some(RecordShape::MovingTrend),
            Self::Weapons => None,
        }
    }
}

impl std::fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationKind {
    type Err = InvalidAggregationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidAggregationKind(s.to_string()))
    }
}

impl TryFrom<String> for AggregationKind {
    type Error = InvalidAggregationKind;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AggregationKind> for &'static str {
    fn from(kind: AggregationKind) -> Self {
        kind.as_str()
    }
}

/// How the synthetic "All" entry of a named aggregation is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalsMode {
    /// Every field is the exact mean over the records, counters included.
    #[default]
    Mean,

    /// Counters are summed, rates are averaged.
    Sum,
}

/// The typed game mode sections of one response, ready for assembly.
#[derive(Debug, Clone)]
pub struct GameModeSections<S> {
    /// The date range the response covers, if stated
    pub window: Option<StatsWindow>,

    /// The decoded sections
    pub sections: PerGameMode<S>,
}

/// An output view assembled from decoded game mode sections.
pub trait Aggregation: Sized {
    /// The aggregation kind this view is requested with
    const KIND: AggregationKind;

    /// The section payload this view is built from
    type Section: SectionPayload;

    /// Build the view.
    fn assemble(
        sections: GameModeSections<Self::Section>,
        options: &DecodeOptions,
    ) -> StatsResult<Self>;
}

/// The placeholder for a season slug part that was never observed
pub(crate) const UNKNOWN_SEASON_PART: &str = "??";

/// A first-wins scan for the season a response is about.
///
/// Records may carry `seasonYear` and `seasonNumber`. The first record carrying both wins.
/// If no record carries both, each part is taken from the first record carrying it.
#[derive(Debug, Default)]
pub(crate) struct SeasonSlugScan {
    pair: Option<(String, String)>,
    year: Option<String>,
    number: Option<String>,
}

impl SeasonSlugScan {
    /// Observe a record.
    pub(crate) fn observe(&mut self, record: &DetailedStatBlock) {
        if self.pair.is_some() {
            return;
        }

        let year = record.season_year.as_ref().filter(|year| !year.is_empty());
        let number = record
            .season_number
            .as_ref()
            .filter(|number| !number.is_empty());

        match (year, number) {
            (Some(year), Some(number)) => {
                self.pair = Some((year.clone(), number.clone()));
            }
            (year, number) => {
                if self.year.is_none() {
                    self.year = year.cloned();
                }
                if self.number.is_none() {
                    self.number = number.cloned();
                }
            }
        }
    }

    /// Observe every record of the given roles in every section.
    pub(crate) fn observe_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a DetailedStatBlock>,
    {
        for record in records {
            if self.pair.is_some() {
                break;
            }
            self.observe(record);
        }
    }

    /// Finish the scan, filling unobserved parts with a placeholder.
    pub(crate) fn finish(self) -> String {
        let slug = match self.pair {
            Some((year, number)) => format!("{year}{number}"),
            None => {
                let year = self.year.as_deref().unwrap_or(UNKNOWN_SEASON_PART);
                let number = self.number.as_deref().unwrap_or(UNKNOWN_SEASON_PART);
                format!("{year}{number}")
            }
        };
        tracing::debug!(%slug, "derived season slug");
        slug
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn season(year: Option<&str>, number: Option<&str>) -> DetailedStatBlock {
        DetailedStatBlock {
            season_year: year.map(str::to_string),
            season_number: number.map(str::to_string),
            ..DetailedStatBlock::default()
        }
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in AggregationKind::ALL {
            assert_eq!(kind.as_str().parse::<AggregationKind>().unwrap(), kind);
        }
        assert_eq!(
            "MovingPoint".parse::<AggregationKind>().unwrap(),
            AggregationKind::MovingPoint
        );
        assert!("seasonal".parse::<AggregationKind>().is_err());
    }

    #[test]
    fn kind_shapes() {
        assert_eq!(
            AggregationKind::Weapons.section_shape(),
            SectionShape::TeamRoleWeapons
        );
        assert_eq!(AggregationKind::Weapons.record_shape(), None);
        assert_eq!(
            AggregationKind::MovingPoint.record_shape(),
            Some(RecordShape::MovingTrend)
        );
        assert!(!AggregationKind::Summary
            .game_modes()
            .contains(&GameMode::All));
        assert!(AggregationKind::Weapons.game_modes().contains(&GameMode::All));
        assert_eq!(AggregationKind::Summary.view(), "seasonal");
        assert_eq!(AggregationKind::Maps.view(), "current");
    }

    #[test]
    fn slug_first_wins() {
        let mut scan = SeasonSlugScan::default();
        scan.observe_all(&[
            season(None, None),
            season(Some("Y8"), Some("S2")),
            season(Some("Y9"), Some("S1")),
        ]);
        assert_eq!(scan.finish(), "Y8S2");
    }

    #[test]
    fn slug_prefers_a_complete_pair() {
        let mut scan = SeasonSlugScan::default();
        scan.observe_all(&[
            season(Some("Y8"), None),
            season(Some(""), Some("S3")),
            season(Some("Y9"), Some("S2")),
            season(Some("Y7"), Some("S4")),
        ]);
        assert_eq!(scan.finish(), "Y9S2");
    }

    #[test]
    fn slug_parts_without_a_pair() {
        let mut scan = SeasonSlugScan::default();
        scan.observe(&season(Some(""), Some("S3")));
        scan.observe(&season(Some("Y7"), None));
        scan.observe(&season(None, Some("S4")));
        assert_eq!(scan.finish(), "Y7S3");

        let mut scan = SeasonSlugScan::default();
        scan.observe(&season(Some("Y7"), None));
        assert_eq!(scan.finish(), "Y7??");

        assert_eq!(SeasonSlugScan::default().finish(), "????");
    }
}
