use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
        SeasonSlugScan,
    },
    decoder::DecodeOptions,
    types::{
        named::UNNAMED,
        DetailedStats,
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

/// Per bombsite stats.
///
/// Bombsite names repeat across maps, so every record is kept in wire order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BombsiteStats {
    /// The date range covered, if the response states it
    pub window: Option<StatsWindow>,

    /// The season these stats are about, like `Y8S2`
    pub season_slug: String,

    pub game_modes: PerGameMode<BombsiteTeamRoles>,
}

/// The bombsite entries of each team role in a game mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BombsiteTeamRoles {
    pub all: Option<Vec<BombsiteEntry>>,
    pub attack: Option<Vec<BombsiteEntry>>,
    pub defence: Option<Vec<BombsiteEntry>>,
}

impl BombsiteTeamRoles {
    /// Get the entries of a team role
    pub fn get(&self, team_role: TeamRole) -> Option<&[BombsiteEntry]> {
        match team_role {
            TeamRole::All => self.all.as_deref(),
            TeamRole::Attacker => self.attack.as_deref(),
            TeamRole::Defender => self.defence.as_deref(),
        }
    }
}

/// A named bombsite record.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BombsiteEntry {
    pub name: String,
    pub stats: DetailedStats,
}

impl From<&DetailedStatBlock> for BombsiteEntry {
    fn from(record: &DetailedStatBlock) -> Self {
        Self {
            name: record
                .stats_detail
                .clone()
                .unwrap_or_else(|| UNNAMED.to_string()),
            stats: DetailedStats::from(record),
        }
    }
}

fn entries(records: &[DetailedStatBlock]) -> Option<Vec<BombsiteEntry>> {
    if records.is_empty() {
        return None;
    }

    Some(records.iter().map(BombsiteEntry::from).collect())
}

impl Aggregation for BombsiteStats {
    const KIND: AggregationKind = AggregationKind::Bombsites;
    type Section = TeamRoleBucket<DetailedStatBlock>;

    fn assemble(
        sections: GameModeSections<Self::Section>,
        _options: &DecodeOptions,
    ) -> StatsResult<Self> {
        let mut season = SeasonSlugScan::default();
        for (_, bucket) in sections.sections.iter() {
            season.observe_all(bucket.records(&TeamRole::ALL).map(|(_, record)| record));
        }

        let game_modes = sections.sections.map(|_, bucket| BombsiteTeamRoles {
            all: entries(&bucket.all),
            attack: entries(&bucket.attacker),
            defence: entries(&bucket.defender),
        });

        Ok(Self {
            window: sections.window,
            season_slug: season.finish(),
            game_modes,
        })
    }
}
