use crate::{
    normalize::compact_date,
    types::{
        GameMode,
        PerGameMode,
        StatsWindow,
    },
    Error,
    Location,
    StatsResult,
};
use std::collections::HashMap;
use time::Date;

/// The top level of a stats response.
///
/// Two generations exist. The legacy one puts `platforms` at the top level next to the covered
/// date range. The current one nests it under `profileData.<userId>`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawEnvelope {
    #[serde(rename = "startDate", default, deserialize_with = "compact_date")]
    start_date: Option<Date>,

    #[serde(rename = "endDate", default, deserialize_with = "compact_date")]
    end_date: Option<Date>,

    #[serde(default)]
    platforms: Option<HashMap<String, RawPlatform>>,

    #[serde(rename = "profileData", default)]
    profile_data: Option<HashMap<String, RawProfile>>,

    #[serde(rename = "userId", default)]
    user_id: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RawProfile {
    #[serde(default)]
    platforms: HashMap<String, RawPlatform>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RawPlatform {
    #[serde(rename = "gameModes", default)]
    game_modes: RawGameModes,
}

/// The untyped game mode sections. `null` counts as absent.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawGameModes {
    all: Option<serde_json::Value>,
    casual: Option<serde_json::Value>,
    unranked: Option<serde_json::Value>,
    ranked: Option<serde_json::Value>,
}

impl RawGameModes {
    fn into_per_game_mode(self) -> PerGameMode<serde_json::Value> {
        PerGameMode {
            all: self.all,
            casual: self.casual,
            unranked: self.unranked,
            ranked: self.ranked,
        }
    }
}

impl RawEnvelope {
    /// Parse the envelope from response bytes.
    pub(crate) fn from_slice(bytes: &[u8]) -> StatsResult<Self> {
        serde_json::from_slice(bytes).map_err(|error| Error::malformed(Location::envelope(), error))
    }

    /// The date range covered, if the response states both ends.
    pub(crate) fn window(&self) -> Option<StatsWindow> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(StatsWindow { start, end }),
            (None, None) => None,
            _ => {
                tracing::debug!("response states only one end of its date range");
                None
            }
        }
    }

    /// Take the untyped game mode sections of a platform.
    ///
    /// A missing platform means no data for any game mode.
    pub(crate) fn into_game_modes(
        self,
        platform: &str,
    ) -> StatsResult<PerGameMode<serde_json::Value>> {
        let mut platforms = match (self.profile_data, self.platforms) {
            (Some(profile_data), _) => select_profile(profile_data, self.user_id.as_deref())?,
            (None, Some(platforms)) => platforms,
            (None, None) => HashMap::new(),
        };

        match platforms.remove(platform) {
            Some(platform) => Ok(platform.game_modes.into_per_game_mode()),
            None => {
                tracing::debug!(platform, "response has no data for platform");
                Ok(PerGameMode::default())
            }
        }
    }
}

/// Pick the profile a current generation response is about.
fn select_profile(
    mut profile_data: HashMap<String, RawProfile>,
    user_id: Option<&str>,
) -> StatsResult<HashMap<String, RawPlatform>> {
    let profile = match user_id {
        Some(user_id) => profile_data.remove(user_id),
        None if profile_data.len() == 1 => profile_data.into_values().next(),
        None => None,
    };

    profile
        .map(|profile| profile.platforms)
        .ok_or(Error::MissingRequiredData {
            location: Location::envelope(),
            reason: "no profile entry matches the response user id",
        })
}

/// Count the present game mode sections that a given set of modes would read.
pub(crate) fn count_read(sections: &PerGameMode<serde_json::Value>, modes: &[GameMode]) -> usize {
    modes
        .iter()
        .filter(|game_mode| sections.get(**game_mode).is_some())
        .count()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn legacy_envelope() {
        let envelope = RawEnvelope::from_slice(
            br#"{
                "startDate": "20230601",
                "endDate": 20230831,
                "platforms": {"PC": {"gameModes": {"casual": {"teamRoles": {}}, "ranked": null}}}
            }"#,
        )
        .unwrap();

        let window = envelope.window().unwrap();
        assert_eq!(window.start.to_string(), "2023-06-01");
        assert_eq!(window.end.to_string(), "2023-08-31");

        let sections = envelope.into_game_modes("PC").unwrap();
        assert!(sections.casual.is_some());
        assert!(sections.ranked.is_none());
        assert!(sections.all.is_none());
        assert_eq!(count_read(&sections, &GameMode::QUEUES), 1);
    }

    #[test]
    fn current_envelope() {
        let envelope = RawEnvelope::from_slice(
            br#"{
                "userId": "abc",
                "profileData": {
                    "abc": {"platforms": {"PC": {"gameModes": {"all": {}, "ranked": {}}}}},
                    "def": {"platforms": {"PC": {"gameModes": {"casual": {}}}}}
                }
            }"#,
        )
        .unwrap();
        assert!(envelope.window().is_none());

        let sections = envelope.into_game_modes("PC").unwrap();
        assert!(sections.all.is_some());
        assert!(sections.ranked.is_some());
        assert!(sections.casual.is_none());
    }

    #[test]
    fn single_profile_without_user_id() {
        let envelope = RawEnvelope::from_slice(
            br#"{"profileData": {"abc": {"platforms": {"PC": {"gameModes": {"unranked": {}}}}}}}"#,
        )
        .unwrap();
        let sections = envelope.into_game_modes("PC").unwrap();
        assert!(sections.unranked.is_some());
    }

    #[test]
    fn unknown_user_id() {
        let envelope = RawEnvelope::from_slice(
            br#"{"userId": "xyz", "profileData": {"abc": {}, "def": {}}}"#,
        )
        .unwrap();
        let error = envelope.into_game_modes("PC").unwrap_err();
        assert!(matches!(error, Error::MissingRequiredData { .. }));
    }

    #[test]
    fn missing_platform_is_empty() {
        let envelope =
            RawEnvelope::from_slice(br#"{"platforms": {"PC": {"gameModes": {"all": {}}}}}"#)
                .unwrap();
        let sections = envelope.into_game_modes("CONSOLE").unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn invalid_json() {
        let error = RawEnvelope::from_slice(b"{not json").unwrap_err();
        assert!(matches!(error, Error::MalformedValue { .. }));
        assert_eq!(error.location(), Location::envelope());

        let error = RawEnvelope::from_slice(br#"{"startDate": "June"}"#).unwrap_err();
        assert!(matches!(error, Error::MalformedValue { .. }));
    }
}
