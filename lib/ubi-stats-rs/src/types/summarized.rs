use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
        SeasonSlugScan,
    },
    decoder::DecodeOptions,
    types::{
        DetailedStats,
        MatchStats,
        PerGameMode,
        StatsWindow,
        TeamRole,
    },
    wire::{
        DetailedStatBlock,
        TeamRoleBucket,
    },
    StatsResult,
};

/// Attack and defence stats of a player, per game mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummarizedStats {
    /// The date range covered, if the response states it
    pub window: Option<StatsWindow>,

    /// The season these stats are about, like `Y8S2`.
    ///
    /// Parts that no record carried are `??`.
    pub season_slug: String,

    pub game_modes: PerGameMode<SummarizedGameModeStats>,
}

/// The summary of one game mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummarizedGameModeStats {
    pub attack: Option<DetailedStats>,
    pub defence: Option<DetailedStats>,

    /// Taken from the first side that reports any played match
    pub matches: MatchStats,
}

impl SummarizedGameModeStats {
    fn from_bucket(bucket: &TeamRoleBucket<DetailedStatBlock>) -> Self {
        let attack = bucket.attacker.first();
        let defence = bucket.defender.first();

        let matches = [attack, defence]
            .into_iter()
            .flatten()
            .map(MatchStats::from)
            .find(|matches| !matches.is_empty())
            .unwrap_or_default();

        Self {
            attack: attack.map(DetailedStats::from),
            defence: defence.map(DetailedStats::from),
            matches,
        }
    }
}

impl Aggregation for SummarizedStats {
    const KIND: AggregationKind = AggregationKind::Summary;
    type Section = TeamRoleBucket<DetailedStatBlock>;

    fn assemble(
        sections: GameModeSections<Self::Section>,
        _options: &DecodeOptions,
    ) -> StatsResult<Self> {
        let mut season = SeasonSlugScan::default();
        for (_, bucket) in sections.sections.iter() {
            season.observe_all(bucket.records(&TeamRole::SIDES).map(|(_, record)| record));
        }

        let game_modes = sections
            .sections
            .map(|_, bucket| SummarizedGameModeStats::from_bucket(&bucket));

        Ok(Self {
            window: sections.window,
            season_slug: season.finish(),
            game_modes,
        })
    }
}
