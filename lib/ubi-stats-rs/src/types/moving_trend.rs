use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
    },
    decoder::DecodeOptions,
    types::{
        PerGameMode,
        StatsWindow,
        TeamRole,
    },
    wire::{
        MovingTrendBlock,
        TeamRoleBucket,
        TrendSeries,
    },
    StatsResult,
};

/// Moving average trends, per game mode and team role.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MovingTrendStats {
    /// The date range covered, if the response states it
    pub window: Option<StatsWindow>,

    pub game_modes: PerGameMode<MovingTrendTeamRoles>,
}

/// The trend bundle of each team role in a game mode.
///
/// Only the first record of a role is used.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MovingTrendTeamRoles {
    pub all: Option<MovingTrend>,
    pub attack: Option<MovingTrend>,
    pub defence: Option<MovingTrend>,
}

impl MovingTrendTeamRoles {
    /// Get the trend bundle of a team role
    pub fn get(&self, team_role: TeamRole) -> Option<&MovingTrend> {
        match team_role {
            TeamRole::All => self.all.as_ref(),
            TeamRole::Attacker => self.attack.as_ref(),
            TeamRole::Defender => self.defence.as_ref(),
        }
    }
}

/// A single series.
///
/// Point sequences start at index 0.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MovingTrendEntry {
    pub low: f64,
    pub average: f64,
    pub high: f64,
    pub actuals: Vec<f64>,
    pub trend: Vec<f64>,
}

impl From<TrendSeries> for MovingTrendEntry {
    fn from(series: TrendSeries) -> Self {
        Self {
            low: series.low,
            average: series.average,
            high: series.high,
            actuals: series.actuals,
            trend: series.trend,
        }
    }
}

/// A bundle of moving average series.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MovingTrend {
    /// The number of matches in the moving window
    pub moving_points: u64,

    pub distance_per_round: MovingTrendEntry,
    pub headshot_accuracy: MovingTrendEntry,
    pub kill_death_ratio: MovingTrendEntry,
    pub kills_per_round: MovingTrendEntry,
    pub ratio_time_alive_per_match: MovingTrendEntry,
    pub rounds_survived: MovingTrendEntry,
    pub rounds_with_kill: MovingTrendEntry,
    pub rounds_with_kost: MovingTrendEntry,
    pub rounds_with_multikill: MovingTrendEntry,
    pub rounds_with_opening_death: MovingTrendEntry,
    pub rounds_with_opening_kill: MovingTrendEntry,
    pub win_loss_ratio: MovingTrendEntry,
}

impl From<MovingTrendBlock> for MovingTrend {
    fn from(block: MovingTrendBlock) -> Self {
        Self {
            moving_points: block.moving_points,
            distance_per_round: block.distance_per_round.into(),
            headshot_accuracy: block.headshot_accuracy.into(),
            kill_death_ratio: block.kill_death_ratio.into(),
            kills_per_round: block.kills_per_round.into(),
            ratio_time_alive_per_match: block.ratio_time_alive_per_match.into(),
            rounds_survived: block.rounds_survived.into(),
            rounds_with_kill: block.rounds_with_kill.into(),
            rounds_with_kost: block.rounds_with_kost.into(),
            rounds_with_multikill: block.rounds_with_multikill.into(),
            rounds_with_opening_death: block.rounds_with_opening_death.into(),
            rounds_with_opening_kill: block.rounds_with_opening_kill.into(),
            win_loss_ratio: block.win_loss_ratio.into(),
        }
    }
}

fn first_trend(records: Vec<MovingTrendBlock>) -> Option<MovingTrend> {
    if records.len() > 1 {
        tracing::debug!(count = records.len(), "using the first of several trend records");
    }
    records.into_iter().next().map(MovingTrend::from)
}

impl Aggregation for MovingTrendStats {
    const KIND: AggregationKind = AggregationKind::MovingPoint;
    type Section = TeamRoleBucket<MovingTrendBlock>;

    fn assemble(
        sections: GameModeSections<Self::Section>,
        _options: &DecodeOptions,
    ) -> StatsResult<Self> {
        let game_modes = sections.sections.map(|_, bucket| MovingTrendTeamRoles {
            all: first_trend(bucket.all),
            attack: first_trend(bucket.attacker),
            defence: first_trend(bucket.defender),
        });

        Ok(Self {
            window: sections.window,
            game_modes,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        Decoder,
        Error,
        GameMode,
        Location,
    };

    const MOVING_POINT: &str = include_str!("../../test_data/moving_point.json");

    #[test]
    fn reindexed_series() {
        let stats: MovingTrendStats = Decoder::new().decode(MOVING_POINT.as_bytes()).unwrap();

        let all = stats.game_modes.get(GameMode::All).unwrap();
        let trend = all.get(TeamRole::All).unwrap();
        assert_eq!(trend.moving_points, 3);
        assert_eq!(trend.kill_death_ratio.actuals, [0.1, 0.2, 0.3]);
        assert_eq!(trend.kill_death_ratio.trend, [0.15, 0.2, 0.25]);
        assert_eq!(trend.kill_death_ratio.average, 0.2);
        assert_eq!(trend.win_loss_ratio.actuals, [1.0, 0.0, 1.0]);
        assert!(trend.headshot_accuracy.actuals.is_empty());

        let attack = all.attack.as_ref().unwrap();
        assert_eq!(attack.rounds_with_multikill.high, 0.4);
        assert!(all.defence.is_none());

        let ranked = stats.game_modes.ranked.as_ref().unwrap();
        assert_eq!(ranked.defence.as_ref().unwrap().kills_per_round.actuals, [0.7]);
        assert!(stats.game_modes.casual.is_none());
    }

    #[test]
    fn gap_in_series_is_malformed() {
        let body = br#"{"platforms": {"PC": {"gameModes": {"casual": {
            "type": "Team roles",
            "teamRoles": {"attacker": [{
                "type": "Moving Point Average Trend",
                "killsPerRound": {"actuals": {"1": 0.5, "3": 0.7}}
            }]}
        }}}}}"#;

        let error = Decoder::new()
            .decode::<MovingTrendStats>(body)
            .unwrap_err();
        assert!(matches!(error, Error::MalformedValue { .. }));
        assert_eq!(
            error.location(),
            Location::game_mode(GameMode::Casual)
                .with_team_role(TeamRole::Attacker)
                .with_record(0)
        );
    }
}
