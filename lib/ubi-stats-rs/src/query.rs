use crate::aggregation::AggregationKind;
use url::Url;

/// The base url of the player stats endpoint
pub const API_BASE_URL: &str = "https://prod.datadev.ubisoft.com/v1/users";

/// The space id of the game
pub const SPACE_ID: &str = "5172a557-50b5-4665-b7db-e3f2e8c5041d";

const GAME_MODES: &str = "all,ranked,unranked,casual";
const TEAM_ROLES: &str = "all,Attacker,Defender";
const DEFAULT_PLATFORM_GROUP: &str = "PC";

/// A player stats request.
///
/// This only builds the url. Sending it, with whatever auth the service wants, is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    /// The profile id of the player
    pub profile_id: String,

    /// The season slug, like `Y8S2`
    pub season: String,

    /// The aggregation to request
    pub kind: AggregationKind,

    /// The platform group to request
    pub platform_group: String,
}

impl StatsQuery {
    /// Make a new query for the default platform group.
    pub fn new(
        profile_id: impl Into<String>,
        season: impl Into<String>,
        kind: AggregationKind,
    ) -> Self {
        Self {
            profile_id: profile_id.into(),
            season: season.into(),
            kind,
            platform_group: DEFAULT_PLATFORM_GROUP.to_string(),
        }
    }

    /// Build the request url.
    ///
    /// The profile id is a single escaped path segment.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse_with_params(
            API_BASE_URL,
            &[
                ("spaceId", SPACE_ID),
                ("view", self.kind.view()),
                ("aggregation", self.kind.as_str()),
                ("gameMode", GAME_MODES),
                ("platformGroup", self.platform_group.as_str()),
                ("teamRole", TEAM_ROLES),
                ("seasons", self.season.as_str()),
            ],
        )?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(&self.profile_id)
            .push("playerstats");

        Ok(url)
    }
}
