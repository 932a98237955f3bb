use anyhow::Context;
use camino::Utf8Path;
use serde::Deserialize;
use std::{
    borrow::Cow,
    collections::HashMap,
};
use ubi_stats::{
    DecodeOptions,
    RecordShape,
    SectionShape,
    TotalsMode,
    Vocabulary,
};

fn default_platform() -> String {
    "PC".to_string()
}

#[derive(Deserialize, Debug)]
pub struct Config {
    /// An EnvFilter directive string
    #[serde(default)]
    log_filter: Option<String>,

    #[serde(default)]
    totals: TotalsMode,

    #[serde(default = "default_platform")]
    platform: String,

    #[serde(default)]
    tags: TagsConfig,

    #[serde(default)]
    default_record_shape: Option<RecordShape>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

/// Extra wire tags, on top of the built-in ones.
#[derive(Deserialize, Debug, Default)]
pub struct TagsConfig {
    #[serde(default)]
    sections: HashMap<String, SectionShape>,

    #[serde(default)]
    records: HashMap<String, RecordShape>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Config {
    pub fn log_filter(&self) -> Option<&str> {
        self.log_filter.as_deref()
    }

    /// Build the decoder options this config describes
    pub fn decode_options(&self) -> DecodeOptions {
        let mut vocabulary = Vocabulary::default();
        for (tag, shape) in self.tags.sections.iter() {
            vocabulary = vocabulary.with_section_tag(tag.as_str(), *shape);
        }
        for (tag, shape) in self.tags.records.iter() {
            vocabulary = vocabulary.with_record_tag(tag.as_str(), *shape);
        }
        if let Some(shape) = self.default_record_shape {
            vocabulary = vocabulary.with_implicit_record(Some(shape));
        }

        DecodeOptions {
            vocabulary,
            totals: self.totals,
            platform: self.platform.clone(),
        }
    }

    /// Load a config from a path
    pub fn load_from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from '{path}'"))
            .and_then(|data| Self::load_from_str(&data))
    }

    /// Load a config from a string
    pub fn load_from_str(data: &str) -> anyhow::Result<Self> {
        toml::from_str(data).context("failed to parse config")
    }

    /// Validate a config
    pub fn validate(&mut self) -> Vec<ValidationMessage> {
        let mut errors = Vec::new();

        if let Some(log_filter) = self.log_filter.as_deref() {
            if let Err(e) = tracing_subscriber::EnvFilter::try_new(log_filter) {
                errors.push(ValidationMessage {
                    severity: Severity::Error,
                    error: ValidationError::InvalidLogFilter(e.to_string()),
                });
            }
        }

        if self.platform.trim().is_empty() {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::EmptyPlatform,
            });
        }

        let empty_tag = self.tags.sections.contains_key("") || self.tags.records.contains_key("");
        if empty_tag {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::EmptyTag,
            });
        }

        for key in self.extra.keys() {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::UnknownKey(Cow::Owned(key.clone())),
            });
        }

        for key in self.tags.extra.keys() {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::UnknownKey(Cow::Owned(format!("tags.{key}"))),
            });
        }

        errors
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: None,
            totals: TotalsMode::default(),
            platform: default_platform(),
            tags: TagsConfig::default(),
            default_record_shape: None,
            extra: HashMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct ValidationMessage {
    severity: Severity,
    error: ValidationError,
}

impl ValidationMessage {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

#[derive(Debug)]
pub enum ValidationError {
    InvalidLogFilter(String),
    EmptyPlatform,
    EmptyTag,
    UnknownKey(Cow<'static, str>),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidLogFilter(e) => write!(f, "Invalid Log Filter: {e}"),
            ValidationError::EmptyPlatform => write!(f, "Empty Platform"),
            ValidationError::EmptyTag => write!(f, "Empty Tag"),
            ValidationError::UnknownKey(key) => write!(f, "Unknown Key '{key}'"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

#[cfg(test)]
mod test {
    use super::*;
    use ubi_stats::{
        Decoder,
        OperatorStats,
    };

    #[test]
    fn empty_config_is_default() {
        let mut config = Config::load_from_str("").unwrap();
        assert!(config.validate().is_empty());

        let options = config.decode_options();
        assert_eq!(options, DecodeOptions::default());
    }

    #[test]
    fn full_config() {
        let mut config = Config::load_from_str(
            r#"
log_filter = "ubi_stats=trace"
totals = "sum"
platform = "XBOX"
default_record_shape = "detailed"
colour = "blue"

[tags.sections]
"Team roles v2" = "team-roles"

[tags.records]
"Ranked Seasonal" = "detailed"
"#,
        )
        .unwrap();

        let messages = config.validate();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity(), Severity::Warn);
        assert_eq!(messages[0].error().to_string(), "Unknown Key 'colour'");

        let options = config.decode_options();
        assert_eq!(options.totals, TotalsMode::Sum);
        assert_eq!(options.platform, "XBOX");
        assert_eq!(
            options.vocabulary.resolve_section(Some("Team roles v2")),
            Some(SectionShape::TeamRoles)
        );
        assert_eq!(
            options.vocabulary.resolve_record(Some("Ranked Seasonal")),
            Some(RecordShape::Detailed)
        );
        assert_eq!(
            options.vocabulary.resolve_record(None),
            Some(RecordShape::Detailed)
        );
    }

    #[test]
    fn invalid_config() {
        let mut config = Config::load_from_str(
            r#"
log_filter = "ubi_stats=loud"
platform = ""

[tags.records]
"" = "moving-trend"
"#,
        )
        .unwrap();

        let messages = config.validate();
        assert_eq!(messages.len(), 3);
        assert!(messages
            .iter()
            .all(|message| message.severity() == Severity::Error));

        assert!(Config::load_from_str(r#"totals = "median""#).is_err());
    }

    #[test]
    fn extra_tags_reach_the_decoder() {
        let config = Config::load_from_str(
            r#"
[tags.records]
"Seasonal v2" = "detailed"
"#,
        )
        .unwrap();
        let decoder = Decoder::with_options(config.decode_options());

        let body = br#"{"platforms": {"PC": {"gameModes": {"casual": {
            "type": "Team roles",
            "teamRoles": {"attacker": [{"type": "Seasonal v2", "statsDetail": "Ash", "kills": 3}]}
        }}}}}"#;
        let stats: OperatorStats = decoder.decode(body).unwrap();
        let attack = stats.game_modes.casual.as_ref().unwrap().attack.as_ref().unwrap();
        assert_eq!(attack["Ash"].kills, 3.0);
    }
}
