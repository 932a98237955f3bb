use time::Date;

/// A game mode section of a stats response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// All game modes combined
    All,
    Casual,
    Unranked,
    Ranked,
}

impl GameMode {
    /// Every game mode, in wire order
    pub const ALL: [GameMode; 4] = [Self::All, Self::Casual, Self::Unranked, Self::Ranked];

    /// The queue based game modes, without the combined section
    pub const QUEUES: [GameMode; 3] = [Self::Casual, Self::Unranked, Self::Ranked];

    /// The wire key of this game mode
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Casual => "casual",
            Self::Unranked => "unranked",
            Self::Ranked => "ranked",
        }
    }
}

/// A team role bucket inside a game mode section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Both sides combined
    All,
    Attacker,
    Defender,
}

impl TeamRole {
    /// Every team role, in wire order
    pub const ALL: [TeamRole; 3] = [Self::All, Self::Attacker, Self::Defender];

    /// Attack and defence, without the combined bucket
    pub const SIDES: [TeamRole; 2] = [Self::Attacker, Self::Defender];

    /// The wire key of this team role
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Attacker => "attacker",
            Self::Defender => "defender",
        }
    }
}

/// One optional value per game mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PerGameMode<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<T>,
    pub casual: Option<T>,
    pub unranked: Option<T>,
    pub ranked: Option<T>,
}

impl<T> PerGameMode<T> {
    /// Get the value for a game mode
    pub fn get(&self, game_mode: GameMode) -> Option<&T> {
        match game_mode {
            GameMode::All => self.all.as_ref(),
            GameMode::Casual => self.casual.as_ref(),
            GameMode::Unranked => self.unranked.as_ref(),
            GameMode::Ranked => self.ranked.as_ref(),
        }
    }

    /// Get a mutable slot for a game mode
    pub fn slot_mut(&mut self, game_mode: GameMode) -> &mut Option<T> {
        match game_mode {
            GameMode::All => &mut self.all,
            GameMode::Casual => &mut self.casual,
            GameMode::Unranked => &mut self.unranked,
            GameMode::Ranked => &mut self.ranked,
        }
    }

    /// Iterate over the present game modes, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (GameMode, &T)> + '_ {
        GameMode::ALL
            .into_iter()
            .filter_map(move |game_mode| Some((game_mode, self.get(game_mode)?)))
    }

    /// The number of present game modes
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no game mode is present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert every present value.
    pub fn map<U, F>(self, mut f: F) -> PerGameMode<U>
    where
        F: FnMut(GameMode, T) -> U,
    {
        let mut mapped = PerGameMode::default();
        for (game_mode, value) in self {
            *mapped.slot_mut(game_mode) = Some(f(game_mode, value));
        }
        mapped
    }
}

impl<T> Default for PerGameMode<T> {
    fn default() -> Self {
        Self {
            all: None,
            casual: None,
            unranked: None,
            ranked: None,
        }
    }
}

impl<T> IntoIterator for PerGameMode<T> {
    type Item = (GameMode, T);
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<(GameMode, T)>, 4>>;

    fn into_iter(self) -> Self::IntoIter {
        [
            self.all.map(|value| (GameMode::All, value)),
            self.casual.map(|value| (GameMode::Casual, value)),
            self.unranked.map(|value| (GameMode::Unranked, value)),
            self.ranked.map(|value| (GameMode::Ranked, value)),
        ]
        .into_iter()
        .flatten()
    }
}

/// The date range a response covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StatsWindow {
    /// First day included
    pub start: Date,

    /// Last day included
    pub end: Date,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn per_game_mode_order() {
        let mut values = PerGameMode::default();
        *values.slot_mut(GameMode::Ranked) = Some(3);
        *values.slot_mut(GameMode::All) = Some(0);

        let present: Vec<_> = values.iter().map(|(mode, value)| (mode, *value)).collect();
        assert_eq!(present, [(GameMode::All, 0), (GameMode::Ranked, 3)]);
        assert_eq!(values.len(), 2);
        assert!(values.get(GameMode::Casual).is_none());

        let doubled = values.map(|_, value| value * 2);
        assert_eq!(doubled.ranked, Some(6));
        assert_eq!(doubled.all, Some(0));
        assert!(doubled.unranked.is_none());
    }

    #[test]
    fn map_sees_modes_in_order() {
        let values = PerGameMode {
            all: None,
            casual: Some(1),
            unranked: Some(2),
            ranked: Some(3),
        };

        let mut seen = Vec::new();
        let labels = values.map(|mode, value| {
            seen.push(mode);
            format!("{}={value}", mode.as_str())
        });
        assert_eq!(
            seen,
            [GameMode::Casual, GameMode::Unranked, GameMode::Ranked]
        );
        assert_eq!(labels.unranked.as_deref(), Some("unranked=2"));
        assert!(labels.all.is_none());
    }
}
