use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
        SeasonSlugScan,
        TotalsMode,
    },
    decoder::DecodeOptions,
    types::{
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
use indexmap::IndexMap;

/// The name of the synthetic totals entry
pub const TOTALS_NAME: &str = "All";

/// The name used for records without a display name
pub const UNNAMED: &str = "n/a";

/// Stats keyed by a display name, per game mode and team role.
///
/// Every non-empty role also has a synthetic [`TOTALS_NAME`] entry, placed first.
/// Counters are floats, since that entry may be a mean.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NamedStats {
    /// The date range covered, if the response states it
    pub window: Option<StatsWindow>,

    /// The season these stats are about, like `Y8S2`
    pub season_slug: String,

    pub game_modes: PerGameMode<NamedTeamRoles>,
}

/// The named stats of each team role in a game mode.
///
/// A role without records is `None`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NamedTeamRoles {
    pub all: Option<IndexMap<String, DetailedStats<f64>>>,
    pub attack: Option<IndexMap<String, DetailedStats<f64>>>,
    pub defence: Option<IndexMap<String, DetailedStats<f64>>>,
}

impl NamedTeamRoles {
    /// Get the named stats of a team role
    pub fn get(&self, team_role: TeamRole) -> Option<&IndexMap<String, DetailedStats<f64>>> {
        match team_role {
            TeamRole::All => self.all.as_ref(),
            TeamRole::Attacker => self.attack.as_ref(),
            TeamRole::Defender => self.defence.as_ref(),
        }
    }
}

impl NamedStats {
    /// Build named stats from decoded sections.
    fn assemble_named(
        sections: GameModeSections<TeamRoleBucket<DetailedStatBlock>>,
        totals: TotalsMode,
    ) -> Self {
        let mut season = SeasonSlugScan::default();
        for (_, bucket) in sections.sections.iter() {
            season.observe_all(bucket.records(&TeamRole::ALL).map(|(_, record)| record));
        }

        let game_modes = sections.sections.map(|_, bucket| NamedTeamRoles {
            all: name_records(&bucket.all, totals),
            attack: name_records(&bucket.attacker, totals),
            defence: name_records(&bucket.defender, totals),
        });

        Self {
            window: sections.window,
            season_slug: season.finish(),
            game_modes,
        }
    }
}

/// Key the records of one role by name, after a synthetic totals entry.
///
/// Later records with a repeated name replace earlier ones.
/// A record named like the totals entry is skipped.
fn name_records(
    records: &[DetailedStatBlock],
    totals: TotalsMode,
) -> Option<IndexMap<String, DetailedStats<f64>>> {
    let totals = DetailedStats::<f64>::totals(records, totals)?;

    let mut named = IndexMap::with_capacity(records.len() + 1);
    named.insert(TOTALS_NAME.to_string(), totals);

    for record in records {
        let name = record.stats_detail.as_deref().unwrap_or(UNNAMED);
        if name == TOTALS_NAME {
            tracing::debug!("skipping record that shadows the totals entry");
            continue;
        }

        named.insert(name.to_string(), DetailedStats::from(record));
    }

    Some(named)
}

/// Per operator stats.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct OperatorStats(pub NamedStats);

impl std::ops::Deref for OperatorStats {
    type Target = NamedStats;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Aggregation for OperatorStats {
    const KIND: AggregationKind = AggregationKind::Operators;
    type Section = TeamRoleBucket<DetailedStatBlock>;

    fn assemble(
        sections: GameModeSections<Self::Section>,
        options: &DecodeOptions,
    ) -> StatsResult<Self> {
        Ok(Self(NamedStats::assemble_named(sections, options.totals)))
    }
}

/// Per map stats.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct MapStats(pub NamedStats);

impl std::ops::Deref for MapStats {
    type Target = NamedStats;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Aggregation for MapStats {
    const KIND: AggregationKind = AggregationKind::Maps;
    type Section = TeamRoleBucket<DetailedStatBlock>;

    fn assemble(
        sections: GameModeSections<Self::Section>,
        options: &DecodeOptions,
    ) -> StatsResult<Self> {
        Ok(Self(NamedStats::assemble_named(sections, options.totals)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Decoder;

    const OPERATORS: &str = include_str!("../../test_data/operators.json");

    #[test]
    fn operators_with_mean_totals() {
        let stats: OperatorStats = Decoder::new().decode(OPERATORS.as_bytes()).unwrap();
        assert_eq!(stats.season_slug, "Y9S1");

        let ranked = stats.game_modes.ranked.as_ref().unwrap();
        let attack = ranked.attack.as_ref().unwrap();

        let names: Vec<_> = attack.keys().map(String::as_str).collect();
        assert_eq!(names, [TOTALS_NAME, "Ash", "Thermite", UNNAMED]);

        let totals = &attack[TOTALS_NAME];
        assert_eq!(totals.kills, 10.0);
        assert_eq!(totals.deaths, 4.0);
        assert_eq!(totals.rounds_played, 20.0);
        assert_eq!(totals.headshot_accuracy, 0.5);
        assert_eq!(attack["Ash"].kills, 16.0);

        let defence = ranked.defence.as_ref().unwrap();
        assert_eq!(defence.len(), 2);
        assert_eq!(defence[TOTALS_NAME].kills, 7.0);
        assert_eq!(defence["Smoke"].kills, 7.0);

        assert!(ranked.all.is_none());
        assert!(ranked.get(TeamRole::All).is_none());
        assert!(stats.game_modes.casual.is_none());
    }

    #[test]
    fn operators_with_sum_totals() {
        let decoder = Decoder::with_options(DecodeOptions {
            totals: TotalsMode::Sum,
            ..DecodeOptions::default()
        });
        let stats: MapStats = decoder.decode(OPERATORS.as_bytes()).unwrap();

        let attack = stats.game_modes.ranked.as_ref().unwrap().attack.as_ref().unwrap();
        let totals = &attack[TOTALS_NAME];
        assert_eq!(totals.kills, 30.0);
        assert_eq!(totals.rounds_played, 60.0);
        assert_eq!(totals.headshot_accuracy, 0.5);
    }

    #[test]
    fn record_named_all_does_not_replace_totals() {
        let records = [
            DetailedStatBlock {
                stats_detail: Some(TOTALS_NAME.to_string()),
                kills: 100,
                ..DetailedStatBlock::default()
            },
            DetailedStatBlock {
                stats_detail: Some("Sledge".to_string()),
                kills: 2,
                ..DetailedStatBlock::default()
            },
        ];

        let named = name_records(&records, TotalsMode::Mean).unwrap();
        assert_eq!(named.len(), 2);
        assert_eq!(named[TOTALS_NAME].kills, 51.0);
        assert_eq!(named["Sledge"].kills, 2.0);
    }

    fn ranked_attackers(records: &str) -> String {
        format!(
            r#"{{"platforms": {{"PC": {{"gameModes": {{"ranked": {{
                "type": "Team roles",
                "teamRoles": {{"attacker": [{records}]}}
            }}}}}}}}}}"#
        )
    }

    #[test]
    fn mean_totals_keep_fractions() {
        let body = ranked_attackers(
            r#"{"type": "Seasonal", "statsDetail": "Ash", "kills": 10},
               {"type": "Seasonal", "statsDetail": "Sledge", "kills": 5}"#,
        );
        let stats: OperatorStats = Decoder::new().decode(body.as_bytes()).unwrap();

        let attack = stats.game_modes.ranked.as_ref().unwrap().attack.as_ref().unwrap();
        assert_eq!(attack[TOTALS_NAME].kills, 7.5);
        assert_eq!(attack["Sledge"].kills, 5.0);
    }

    #[test]
    fn huge_counters_do_not_overflow() {
        let body = ranked_attackers(
            r#"{"type": "Seasonal", "statsDetail": "Ash", "kills": 18446744073709551615},
               {"type": "Seasonal", "statsDetail": "Sledge", "kills": 1}"#,
        );
        let decoder = Decoder::with_options(DecodeOptions {
            totals: TotalsMode::Sum,
            ..DecodeOptions::default()
        });
        let stats: OperatorStats = decoder.decode(body.as_bytes()).unwrap();

        let attack = stats.game_modes.ranked.as_ref().unwrap().attack.as_ref().unwrap();
        assert_eq!(attack[TOTALS_NAME].kills, 2f64.powi(64));
    }

    #[test]
    fn no_records_no_totals() {
        assert!(name_records(&[], TotalsMode::Mean).is_none());
    }
}
