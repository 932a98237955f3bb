use camino::Utf8PathBuf;
use ubi_stats::AggregationKind;

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Decode a saved Ubisoft player stats response")]
pub struct CliOptions {
    #[argh(
        option,
        description = "the path to the config",
        default = "Utf8PathBuf::from(\"./config.toml\")"
    )]
    pub config: Utf8PathBuf,

    #[argh(
        option,
        description = "the output format, json or table",
        default = "OutputFormat::Table"
    )]
    pub format: OutputFormat,

    #[argh(
        positional,
        description = "the aggregation the response was requested with: summary, operators, maps, bombsites, weapons or movingpoint"
    )]
    pub kind: AggregationKind,

    #[argh(positional, description = "the path to the saved response body")]
    pub input: Utf8PathBuf,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("'{input}' is not a valid output format")),
        }
    }
}
