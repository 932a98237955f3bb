use crate::{
    aggregation::{
        Aggregation,
        AggregationKind,
        GameModeSections,
        TotalsMode,
    },
    types::{
        GameMode,
        PerGameMode,
    },
    vocabulary::Vocabulary,
    wire::{
        count_read,
        RawEnvelope,
        RecordPayload,
        SectionPayload,
    },
    Error,
    Location,
    StatsResult,
};
use serde::de::Error as _;

/// The default platform key inside a response
const DEFAULT_PLATFORM: &str = "PC";

/// The wire key of every discriminator
const TAG_KEY: &str = "type";

/// Options for a [`Decoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// The tag lookup table
    pub vocabulary: Vocabulary,

    /// How named aggregations compute their synthetic entry
    pub totals: TotalsMode,

    /// The platform key to read game modes from
    pub platform: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            totals: TotalsMode::default(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

/// A stats response decoder.
///
/// Decoding is a pure function of the options and the input bytes.
/// One decoder may be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Make a new [`Decoder`] with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a new [`Decoder`] with the given options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Get the options of this decoder
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a response body into an aggregation.
    ///
    /// Either the whole result or the first error is returned.
    #[tracing::instrument(level = "debug", skip(self, bytes), fields(kind = %A::KIND, len = bytes.len()))]
    pub fn decode<A>(&self, bytes: &[u8]) -> StatsResult<A>
    where
        A: Aggregation,
    {
        let sections = self.decode_sections::<A::Section>(bytes, A::KIND)?;
        A::assemble(sections, &self.options)
    }

    /// Decode the typed game mode sections of a response without assembling them.
    pub fn decode_sections<S>(
        &self,
        bytes: &[u8],
        kind: AggregationKind,
    ) -> StatsResult<GameModeSections<S>>
    where
        S: SectionPayload,
    {
        let envelope = RawEnvelope::from_slice(bytes)?;
        let window = envelope.window();
        let mut raw_sections = envelope.into_game_modes(&self.options.platform)?;
        tracing::debug!(
            present = raw_sections.len(),
            read = count_read(&raw_sections, kind.game_modes()),
            "decoding game mode sections"
        );

        let mut sections = PerGameMode::default();
        for game_mode in kind.game_modes().iter().copied() {
            let value = match raw_sections.slot_mut(game_mode).take() {
                Some(value) => value,
                None => continue,
            };

            let section = decode_section::<S>(&value, game_mode, kind, &self.options.vocabulary)?;
            *sections.slot_mut(game_mode) = Some(section);
        }

        for (game_mode, _) in raw_sections.iter() {
            tracing::trace!(game_mode = game_mode.as_str(), %kind, "ignoring unread section");
        }

        Ok(GameModeSections { window, sections })
    }
}

/// Get the discriminator of a tagged object.
///
/// A missing or `null` tag is `None`. A non-object or a non-string tag is malformed.
fn read_tag(value: &serde_json::Value, location: Location) -> StatsResult<Option<&str>> {
    let object = value.as_object().ok_or_else(|| {
        Error::malformed(
            location,
            serde_json::Error::custom("expected a JSON object"),
        )
    })?;

    match object.get(TAG_KEY) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(tag)) => Ok(Some(tag.as_str())),
        Some(_) => Err(Error::malformed(
            location,
            serde_json::Error::custom("discriminator is not a string"),
        )),
    }
}

/// Check the tag of a game mode section and decode it.
fn decode_section<S>(
    value: &serde_json::Value,
    game_mode: GameMode,
    kind: AggregationKind,
    vocabulary: &Vocabulary,
) -> StatsResult<S>
where
    S: SectionPayload,
{
    let location = Location::game_mode(game_mode);
    let tag = read_tag(value, location)?;

    match vocabulary.resolve_section(tag) {
        Some(shape) if shape == S::SHAPE => {}
        _ => {
            return Err(Error::DiscriminatorMismatch {
                location,
                found: tag.map(str::to_string),
                expected: S::SHAPE.as_str(),
            });
        }
    }

    let team_roles = kind.team_roles();
    let section = S::decode(value, location, vocabulary, team_roles)?;
    if !section.has_data_for(team_roles) {
        return Err(Error::MissingRequiredData {
            location,
            reason: "section carries no data for any team role the aggregation reads",
        });
    }

    Ok(section)
}

/// Check the tag of every record in a team role list and decode them.
pub(crate) fn decode_records<R>(
    values: &[serde_json::Value],
    location: Location,
    vocabulary: &Vocabulary,
) -> StatsResult<Vec<R>>
where
    R: RecordPayload,
{
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let location = location.with_record(index);
            let tag = read_tag(value, location)?;

            match vocabulary.resolve_record(tag) {
                Some(shape) if shape == R::SHAPE => {}
                _ => {
                    return Err(Error::DiscriminatorMismatch {
                        location,
                        found: tag.map(str::to_string),
                        expected: R::SHAPE.as_str(),
                    });
                }
            }

            <R as serde::Deserialize>::deserialize(value)
                .map_err(|error| Error::malformed(location, error))
        })
        .collect()
}
