use crate::{
    aggregation::TotalsMode,
    wire::DetailedStatBlock,
};

/// Match counters of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MatchStats {
    pub played: u64,
    pub won: u64,
    pub lost: u64,
}

impl MatchStats {
    /// Whether any match was played
    pub fn is_empty(&self) -> bool {
        self.played == 0
    }
}

impl From<&DetailedStatBlock> for MatchStats {
    fn from(block: &DetailedStatBlock) -> Self {
        Self {
            played: block.matches_played,
            won: block.matches_won,
            lost: block.matches_lost,
        }
    }
}

/// A counter of [`DetailedStats`].
///
/// Records count in `u64`. The synthetic totals entry of named stats is a mean, so it counts in
/// `f64`.
pub trait Counter: Copy + Default + PartialEq + std::fmt::Display + serde::Serialize {
    /// Convert a wire count
    fn from_count(count: u64) -> Self;

    /// Get this counter as a float
    fn to_f64(self) -> f64;
}

impl Counter for u64 {
    fn from_count(count: u64) -> Self {
        count
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Counter for f64 {
    fn from_count(count: u64) -> Self {
        count as f64
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Counters and rates of a side, operator, map or bombsite.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct DetailedStats<C = u64> {
    pub headshots: C,
    pub kills: C,
    pub deaths: C,
    pub assists: C,
    pub rounds_played: C,
    pub rounds_won: C,
    pub rounds_lost: C,
    pub matches_played: C,
    pub matches_won: C,
    pub matches_lost: C,
    pub minutes_played: C,
    pub melee_kills: C,
    pub team_kills: C,
    pub opening_deaths: C,
    pub opening_death_trades: C,
    pub opening_kills: C,
    pub opening_kill_trades: C,
    pub trades: C,
    pub revives: C,

    /// Total distance travelled, in meters
    pub distance_travelled: f64,

    pub kills_per_round: f64,
    pub headshot_accuracy: f64,
    pub rounds_survived: f64,
    pub rounds_with_kill: f64,
    pub rounds_with_multikill: f64,
    pub rounds_with_ace: f64,
    pub rounds_with_clutch: f64,
    pub rounds_with_kost: f64,
    pub rounds_with_opening_death: f64,
    pub rounds_with_opening_kill: f64,
    pub distance_per_round: f64,
    pub time_alive_per_match: f64,
    pub time_dead_per_match: f64,
}

impl<C: Counter> DetailedStats<C> {
    /// Get the kill/death ratio.
    ///
    /// `None` if there are no deaths.
    pub fn kd(&self) -> Option<f64> {
        let deaths = self.deaths.to_f64();
        if deaths == 0.0 {
            return None;
        }

        Some(self.kills.to_f64() / deaths)
    }
}

impl DetailedStats<f64> {
    /// Compute the synthetic totals entry of a list of records.
    ///
    /// Returns `None` for an empty list.
    /// Rates are always averaged.
    /// Counters and distance are averaged or summed, depending on the mode.
    /// Counters are accumulated as floats, so huge wire counts cannot overflow.
    pub fn totals(records: &[DetailedStatBlock], mode: TotalsMode) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let len = records.len() as f64;

        let total = |sum: f64| match mode {
            TotalsMode::Mean => sum / len,
            TotalsMode::Sum => sum,
        };
        let counter = |field: fn(&DetailedStatBlock) -> u64| {
            total(records.iter().map(|record| field(record) as f64).sum())
        };
        let rate =
            |field: fn(&DetailedStatBlock) -> f64| records.iter().map(field).sum::<f64>() / len;

        Some(Self {
            headshots: counter(|r| r.headshots),
            kills: counter(|r| r.kills),
            deaths: counter(|r| r.deaths),
            assists: counter(|r| r.assists),
            rounds_played: counter(|r| r.rounds_played),
            rounds_won: counter(|r| r.rounds_won),
            rounds_lost: counter(|r| r.rounds_lost),
            matches_played: counter(|r| r.matches_played),
            matches_won: counter(|r| r.matches_won),
            matches_lost: counter(|r| r.matches_lost),
            minutes_played: counter(|r| r.minutes_played),
            melee_kills: counter(|r| r.melee_kills),
            team_kills: counter(|r| r.team_kills),
            opening_deaths: counter(|r| r.opening_deaths),
            opening_death_trades: counter(|r| r.opening_death_trades),
            opening_kills: counter(|r| r.opening_kills),
            opening_kill_trades: counter(|r| r.opening_kill_trades),
            trades: counter(|r| r.trades),
            revives: counter(|r| r.revives),

            distance_travelled: total(records.iter().map(|r| r.distance_travelled).sum()),

            kills_per_round: rate(|r| r.kills_per_round),
            headshot_accuracy: rate(|r| r.headshot_accuracy),
            rounds_survived: rate(|r| r.rounds_survived),
            rounds_with_kill: rate(|r| r.rounds_with_kill),
            rounds_with_multikill: rate(|r| r.rounds_with_multikill),
            rounds_with_ace: rate(|r| r.rounds_with_ace),
            rounds_with_clutch: rate(|r| r.rounds_with_clutch),
            rounds_with_kost: rate(|r| r.rounds_with_kost),
            rounds_with_opening_death: rate(|r| r.rounds_with_opening_death),
            rounds_with_opening_kill: rate(|r| r.rounds_with_opening_kill),
            distance_per_round: rate(|r| r.distance_per_round),
            time_alive_per_match: rate(|r| r.time_alive_per_match),
            time_dead_per_match: rate(|r| r.time_dead_per_match),
        })
    }
}

impl<C: Counter> From<&DetailedStatBlock> for DetailedStats<C> {
    fn from(block: &DetailedStatBlock) -> Self {
        Self {
            headshots: C::from_count(block.headshots),
            kills: C::from_count(block.kills),
            deaths: C::from_count(block.deaths),
            assists: C::from_count(block.assists),
            rounds_played: C::from_count(block.rounds_played),
            rounds_won: C::from_count(block.rounds_won),
            rounds_lost: C::from_count(block.rounds_lost),
            matches_played: C::from_count(block.matches_played),
            matches_won: C::from_count(block.matches_won),
            matches_lost: C::from_count(block.matches_lost),
            minutes_played: C::from_count(block.minutes_played),
            melee_kills: C::from_count(block.melee_kills),
            team_kills: C::from_count(block.team_kills),
            opening_deaths: C::from_count(block.opening_deaths),
            opening_death_trades: C::from_count(block.opening_death_trades),
            opening_kills: C::from_count(block.opening_kills),
            opening_kill_trades: C::from_count(block.opening_kill_trades),
            trades: C::from_count(block.trades),
            revives: C::from_count(block.revives),

            distance_travelled: block.distance_travelled,

            kills_per_round: block.kills_per_round,
            headshot_accuracy: block.headshot_accuracy,
            rounds_survived: block.rounds_survived,
            rounds_with_kill: block.rounds_with_kill,
            rounds_with_multikill: block.rounds_with_multikill,
            rounds_with_ace: block.rounds_with_ace,
            rounds_with_clutch: block.rounds_with_clutch,
            rounds_with_kost: block.rounds_with_kost,
            rounds_with_opening_death: block.rounds_with_opening_death,
            rounds_with_opening_kill: block.rounds_with_opening_kill,
            distance_per_round: block.distance_per_round,
            time_alive_per_match: block.time_alive_per_match,
            time_dead_per_match: block.time_dead_per_match,
        }
    }
}
