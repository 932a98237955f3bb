use std::collections::HashMap;

/// The payload shapes a game mode section can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionShape {
    /// Team role buckets holding lists of tagged records
    TeamRoles,

    /// Team role buckets holding weapon slots
    TeamRoleWeapons,
}

impl SectionShape {
    /// The canonical wire tag for this shape
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TeamRoles => "Team roles",
            Self::TeamRoleWeapons => "Team roles weapons",
        }
    }
}

/// The payload shapes a team role record can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordShape {
    /// A flat block of counters and rates
    Detailed,

    /// A bundle of moving average trend series
    MovingTrend,
}

impl RecordShape {
    /// The canonical wire tag for this shape
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detailed => "Seasonal",
            Self::MovingTrend => "Moving Point Average Trend",
        }
    }
}

/// The lookup table from wire tags to payload shapes.
///
/// This is the only place that knows tag strings.
/// New service revisions are supported by adding tags here, not by touching the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    sections: HashMap<String, SectionShape>,
    records: HashMap<String, RecordShape>,

    implicit_section: Option<SectionShape>,
    implicit_record: Option<RecordShape>,
}

impl Vocabulary {
    /// A vocabulary that knows no tags.
    pub fn empty() -> Self {
        Self {
            sections: HashMap::new(),
            records: HashMap::new(),
            implicit_section: None,
            implicit_record: None,
        }
    }

    /// Map a section tag to a shape, replacing any previous mapping.
    pub fn with_section_tag(mut self, tag: impl Into<String>, shape: SectionShape) -> Self {
        self.sections.insert(tag.into(), shape);
        self
    }

    /// Map a record tag to a shape, replacing any previous mapping.
    pub fn with_record_tag(mut self, tag: impl Into<String>, shape: RecordShape) -> Self {
        self.records.insert(tag.into(), shape);
        self
    }

    /// Set the shape assumed for sections without a tag.
    pub fn with_implicit_section(mut self, shape: Option<SectionShape>) -> Self {
        self.implicit_section = shape;
        self
    }

    /// Set the shape assumed for records without a tag.
    pub fn with_implicit_record(mut self, shape: Option<RecordShape>) -> Self {
        self.implicit_record = shape;
        self
    }

    /// Resolve a section tag.
    ///
    /// A missing or empty tag resolves to the implicit section shape, if there is one.
    pub fn resolve_section(&self, tag: Option<&str>) -> Option<SectionShape> {
        match tag {
            None | Some("") => self.implicit_section,
            Some(tag) => self.sections.get(tag).copied(),
        }
    }

    /// Resolve a record tag.
    ///
    /// A missing or empty tag resolves to the implicit record shape, if there is one.
    pub fn resolve_record(&self, tag: Option<&str>) -> Option<RecordShape> {
        match tag {
            None | Some("") => self.implicit_record,
            Some(tag) => self.records.get(tag).copied(),
        }
    }

    /// Iterate over the known section tags.
    pub fn section_tags(&self) -> impl Iterator<Item = (&str, SectionShape)> + '_ {
        self.sections
            .iter()
            .map(|(tag, shape)| (tag.as_str(), *shape))
    }

    /// Iterate over the known record tags.
    pub fn record_tags(&self) -> impl Iterator<Item = (&str, RecordShape)> + '_ {
        self.records
            .iter()
            .map(|(tag, shape)| (tag.as_str(), *shape))
    }
}

impl Default for Vocabulary {
    /// The tags used by the current and previous service revisions.
    ///
    /// Legacy responses omit the section tag for team role sections.
    fn default() -> Self {
        Self::empty()
            .with_section_tag(SectionShape::TeamRoles.as_str(), SectionShape::TeamRoles)
            .with_section_tag(
                SectionShape::TeamRoleWeapons.as_str(),
                SectionShape::TeamRoleWeapons,
            )
            .with_record_tag(RecordShape::Detailed.as_str(), RecordShape::Detailed)
            .with_record_tag("Generalized", RecordShape::Detailed)
            .with_record_tag(RecordShape::MovingTrend.as_str(), RecordShape::MovingTrend)
            .with_implicit_section(Some(SectionShape::TeamRoles))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_tags() {
        let vocabulary = Vocabulary::default();

        assert_eq!(
            vocabulary.resolve_section(Some("Team roles")),
            Some(SectionShape::TeamRoles)
        );
        assert_eq!(
            vocabulary.resolve_section(Some("Team roles weapons")),
            Some(SectionShape::TeamRoleWeapons)
        );
        assert_eq!(
            vocabulary.resolve_section(None),
            Some(SectionShape::TeamRoles)
        );
        assert_eq!(vocabulary.resolve_section(Some("Team roles v3")), None);

        assert_eq!(
            vocabulary.resolve_record(Some("Seasonal")),
            Some(RecordShape::Detailed)
        );
        assert_eq!(
            vocabulary.resolve_record(Some("Generalized")),
            Some(RecordShape::Detailed)
        );
        assert_eq!(
            vocabulary.resolve_record(Some("Moving Point Average Trend")),
            Some(RecordShape::MovingTrend)
        );
        assert_eq!(vocabulary.resolve_record(None), None);
        assert_eq!(vocabulary.resolve_record(Some("")), None);
    }

    #[test]
    fn extend_tags() {
        let vocabulary = Vocabulary::default()
            .with_record_tag("Lifetime", RecordShape::Detailed)
            .with_implicit_record(Some(RecordShape::Detailed))
            .with_implicit_section(None);

        assert_eq!(
            vocabulary.resolve_record(Some("Lifetime")),
            Some(RecordShape::Detailed)
        );
        assert_eq!(vocabulary.resolve_record(None), Some(RecordShape::Detailed));
        assert_eq!(vocabulary.resolve_section(None), None);
        assert_eq!(vocabulary.record_tags().count(), 4);
    }

    #[test]
    fn empty_knows_nothing() {
        let vocabulary = Vocabulary::empty();
        assert_eq!(vocabulary.resolve_section(Some("Team roles")), None);
        assert_eq!(vocabulary.resolve_record(Some("Seasonal")), None);
        assert_eq!(vocabulary.section_tags().count(), 0);
    }
}
