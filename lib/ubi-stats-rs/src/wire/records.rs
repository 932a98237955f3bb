use crate::{
    decoder::decode_records,
    normalize::{
        point_series,
        wrapped_f64,
    },
    types::TeamRole,
    vocabulary::{
        RecordShape,
        SectionShape,
        Vocabulary,
    },
    wire::{
        RecordPayload,
        SectionPayload,
    },
    Error,
    Location,
    StatsResult,
};

/// A flat record of counters and rates.
///
/// Rate fields may be bare numbers or wrapped as `{"value": n}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DetailedStatBlock {
    /// The display name of this record (operator, map, bombsite).
    ///
    /// `None` when the record is an unnamed aggregate.
    #[serde(rename = "statsDetail")]
    pub stats_detail: Option<String>,

    #[serde(rename = "seasonYear")]
    pub season_year: Option<String>,

    #[serde(rename = "seasonNumber")]
    pub season_number: Option<String>,

    pub headshots: u64,
    pub kills: u64,

    #[serde(rename = "roundsPlayed")]
    pub rounds_played: u64,

    #[serde(rename = "roundsWon")]
    pub rounds_won: u64,

    #[serde(rename = "roundsLost")]
    pub rounds_lost: u64,

    #[serde(rename = "matchesPlayed")]
    pub matches_played: u64,

    #[serde(rename = "matchesWon")]
    pub matches_won: u64,

    #[serde(rename = "matchesLost")]
    pub matches_lost: u64,

    #[serde(rename = "minutesPlayed")]
    pub minutes_played: u64,

    pub assists: u64,

    #[serde(rename = "death")]
    pub deaths: u64,

    #[serde(rename = "meleeKills")]
    pub melee_kills: u64,

    #[serde(rename = "teamKills")]
    pub team_kills: u64,

    #[serde(rename = "openingDeaths")]
    pub opening_deaths: u64,

    #[serde(rename = "openingDeathTrades")]
    pub opening_death_trades: u64,

    #[serde(rename = "openingKills")]
    pub opening_kills: u64,

    #[serde(rename = "openingKillTrades")]
    pub opening_kill_trades: u64,

    pub trades: u64,
    pub revives: u64,

    #[serde(rename = "killsPerRound", deserialize_with = "wrapped_f64")]
    pub kills_per_round: f64,

    #[serde(rename = "headshotAccuracy", deserialize_with = "wrapped_f64")]
    pub headshot_accuracy: f64,

    #[serde(rename = "roundsSurvived", deserialize_with = "wrapped_f64")]
    pub rounds_survived: f64,

    #[serde(rename = "roundsWithAKill", deserialize_with = "wrapped_f64")]
    pub rounds_with_kill: f64,

    #[serde(rename = "roundsWithMultikill", deserialize_with = "wrapped_f64")]
    pub rounds_with_multikill: f64,

    #[serde(rename = "roundsWithAce", deserialize_with = "wrapped_f64")]
    pub rounds_with_ace: f64,

    #[serde(rename = "roundsWithClutch", deserialize_with = "wrapped_f64")]
    pub rounds_with_clutch: f64,

    #[serde(rename = "roundsWithKOST", deserialize_with = "wrapped_f64")]
    pub rounds_with_kost: f64,

    #[serde(rename = "roundsWithOpeningDeath", deserialize_with = "wrapped_f64")]
    pub rounds_with_opening_death: f64,

    #[serde(rename = "roundsWithOpeningKill", deserialize_with = "wrapped_f64")]
    pub rounds_with_opening_kill: f64,

    #[serde(rename = "distancePerRound", deserialize_with = "wrapped_f64")]
    pub distance_per_round: f64,

    #[serde(rename = "distanceTravelled", deserialize_with = "wrapped_f64")]
    pub distance_travelled: f64,

    #[serde(rename = "timeAlivePerMatch", deserialize_with = "wrapped_f64")]
    pub time_alive_per_match: f64,

    #[serde(rename = "timeDeadPerMatch", deserialize_with = "wrapped_f64")]
    pub time_dead_per_match: f64,
}

impl RecordPayload for DetailedStatBlock {
    const SHAPE: RecordShape = RecordShape::Detailed;
}

/// A single moving average series.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TrendSeries {
    #[serde(deserialize_with = "wrapped_f64")]
    pub low: f64,

    #[serde(deserialize_with = "wrapped_f64")]
    pub average: f64,

    #[serde(deserialize_with = "wrapped_f64")]
    pub high: f64,

    /// Raw values, re-indexed from 0
    #[serde(deserialize_with = "point_series")]
    pub actuals: Vec<f64>,

    /// Smoothed values, re-indexed from 0
    #[serde(deserialize_with = "point_series")]
    pub trend: Vec<f64>,
}

/// A fixed bundle of moving average series.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct MovingTrendBlock {
    /// The number of matches in the moving window
    #[serde(rename = "movingPoints")]
    pub moving_points: u64,

    #[serde(rename = "distancePerRound")]
    pub distance_per_round: TrendSeries,

    #[serde(rename = "headshotAccuracy")]
    pub headshot_accuracy: TrendSeries,

    #[serde(rename = "killDeathRatio")]
    pub kill_death_ratio: TrendSeries,

    #[serde(rename = "killsPerRound")]
    pub kills_per_round: TrendSeries,

    #[serde(rename = "ratioTimeAlivePerMatch")]
    pub ratio_time_alive_per_match: TrendSeries,

    #[serde(rename = "roundsSurvived")]
    pub rounds_survived: TrendSeries,

    #[serde(rename = "roundsWithAKill")]
    pub rounds_with_kill: TrendSeries,

    #[serde(rename = "roundsWithKOST")]
    pub rounds_with_kost: TrendSeries,

    #[serde(rename = "roundsWithMultiKill", alias = "roundsWithMultikill")]
    pub rounds_with_multikill: TrendSeries,

    #[serde(rename = "roundsWithOpeningDeath")]
    pub rounds_with_opening_death: TrendSeries,

    #[serde(rename = "roundsWithOpeningKill")]
    pub rounds_with_opening_kill: TrendSeries,

    #[serde(rename = "winLossRatio")]
    pub win_loss_ratio: TrendSeries,
}

impl RecordPayload for MovingTrendBlock {
    const SHAPE: RecordShape = RecordShape::MovingTrend;
}

/// The team role lists of a game mode section, decoded as records of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRoleBucket<R> {
    pub all: Vec<R>,
    pub attacker: Vec<R>,
    pub defender: Vec<R>,
}

impl<R> TeamRoleBucket<R> {
    /// Get the records of a team role
    pub fn get(&self, team_role: TeamRole) -> &[R] {
        match team_role {
            TeamRole::All => &self.all,
            TeamRole::Attacker => &self.attacker,
            TeamRole::Defender => &self.defender,
        }
    }

    fn get_mut(&mut self, team_role: TeamRole) -> &mut Vec<R> {
        match team_role {
            TeamRole::All => &mut self.all,
            TeamRole::Attacker => &mut self.attacker,
            TeamRole::Defender => &mut self.defender,
        }
    }

    /// Iterate over every record of the given roles, in the given order.
    pub fn records<'a>(
        &'a self,
        team_roles: &'a [TeamRole],
    ) -> impl Iterator<Item = (TeamRole, &'a R)> + 'a {
        team_roles.iter().flat_map(move |team_role| {
            self.get(*team_role)
                .iter()
                .map(move |record| (*team_role, record))
        })
    }
}

impl<R> Default for TeamRoleBucket<R> {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            attacker: Vec::new(),
            defender: Vec::new(),
        }
    }
}

/// The untyped lists of a team role section.
#[derive(Debug, Default, serde::Deserialize)]
struct RawTeamRoles {
    #[serde(default)]
    all: Option<Vec<serde_json::Value>>,

    #[serde(default, alias = "Attacker")]
    attacker: Option<Vec<serde_json::Value>>,

    #[serde(default, alias = "Defender")]
    defender: Option<Vec<serde_json::Value>>,
}

impl RawTeamRoles {
    fn take(&mut self, team_role: TeamRole) -> Vec<serde_json::Value> {
        let list = match team_role {
            TeamRole::All => &mut self.all,
            TeamRole::Attacker => &mut self.attacker,
            TeamRole::Defender => &mut self.defender,
        };
        list.take().unwrap_or_default()
    }
}

#[derive(Debug, serde::Deserialize)]
struct RawTeamRoleSection {
    #[serde(rename = "teamRoles", default)]
    team_roles: RawTeamRoles,
}

impl<R> SectionPayload for TeamRoleBucket<R>
where
    R: RecordPayload,
{
    const SHAPE: SectionShape = SectionShape::TeamRoles;

    fn decode(
        value: &serde_json::Value,
        location: Location,
        vocabulary: &Vocabulary,
        team_roles: &[TeamRole],
    ) -> StatsResult<Self> {
        let mut raw: RawTeamRoleSection = serde::Deserialize::deserialize(value)
            .map_err(|error| Error::malformed(location, error))?;

        let mut bucket = Self::default();
        for team_role in team_roles.iter().copied() {
            let values = raw.team_roles.take(team_role);
            *bucket.get_mut(team_role) = decode_records(
                &values,
                location.with_team_role(team_role),
                vocabulary,
            )?;
        }

        Ok(bucket)
    }

    fn has_data_for(&self, team_roles: &[TeamRole]) -> bool {
        team_roles
            .iter()
            .any(|team_role| !self.get(*team_role).is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::GameMode;

    #[test]
    fn detailed_block_defaults_and_wrapping() {
        let block: DetailedStatBlock = serde_json::from_str(
            r#"{
                "type": "Seasonal",
                "statsDetail": "Ash",
                "kills": 10,
                "death": 5,
                "killsPerRound": {"value": 0.5},
                "headshotAccuracy": 0.25,
                "distanceTravelled": 1200
            }"#,
        )
        .unwrap();

        assert_eq!(block.stats_detail.as_deref(), Some("Ash"));
        assert_eq!(block.kills, 10);
        assert_eq!(block.deaths, 5);
        assert_eq!(block.kills_per_round, 0.5);
        assert_eq!(block.headshot_accuracy, 0.25);
        assert_eq!(block.distance_travelled, 1200.0);
        assert_eq!(block.rounds_played, 0);
        assert!(block.season_year.is_none());
    }

    #[test]
    fn trend_block_reindexes() {
        let block: MovingTrendBlock = serde_json::from_str(
            r#"{
                "movingPoints": 3,
                "killDeathRatio": {
                    "low": 0.5,
                    "average": 1.0,
                    "high": 1.5,
                    "actuals": {"1": 0.1, "2": 0.2, "3": 0.3},
                    "trend": {"2": 0.9, "1": 0.8}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(block.moving_points, 3);
        assert_eq!(block.kill_death_ratio.actuals, vec![0.1, 0.2, 0.3]);
        assert_eq!(block.kill_death_ratio.trend, vec![0.8, 0.9]);
        assert!(block.win_loss_ratio.actuals.is_empty());
    }

    #[test]
    fn bucket_decodes_requested_roles_only() {
        let value = serde_json::json!({
            "type": "Team roles",
            "teamRoles": {
                "all": [{"type": "Moving Point Average Trend"}],
                "Attacker": [{"type": "Seasonal", "kills": 1}, {"type": "Generalized", "kills": 2}],
                "defender": null
            }
        });

        let bucket = TeamRoleBucket::<DetailedStatBlock>::decode(
            &value,
            Location::game_mode(GameMode::Casual),
            &Vocabulary::default(),
            &TeamRole::SIDES,
        )
        .unwrap();

        assert!(bucket.all.is_empty());
        assert_eq!(bucket.attacker.len(), 2);
        assert_eq!(bucket.attacker[1].kills, 2);
        assert!(bucket.defender.is_empty());
        assert!(bucket.has_data_for(&TeamRole::SIDES));
        assert!(!bucket.has_data_for(&[TeamRole::Defender]));

        let order: Vec<_> = bucket
            .records(&TeamRole::ALL)
            .map(|(role, record)| (role, record.kills))
            .collect();
        assert_eq!(order, [(TeamRole::Attacker, 1), (TeamRole::Attacker, 2)]);
    }
}
