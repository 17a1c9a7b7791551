//! Presets, rows, segments and the user's substitutions

use std::collections::HashMap;

use crate::error::ConfigError;

/// A predefined multi-row phrase
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Template with `<key>` tokens, used for labels and file names
    pub display_text: String,
    pub rows: Vec<Row>,
}

/// One visual line
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub segments: Vec<Segment>,
}

/// Smallest layout unit within a row
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, rendered verbatim
    Text { text: String, size: f32 },
    /// User-fillable slot that falls back to `default_text`
    Placeholder {
        key: String,
        default_text: String,
        size: f32,
    },
}

/// Placeholder key to replacement text
///
/// An empty value counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: HashMap<String, String>,
}

impl Preset {
    pub fn new(display_text: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            display_text: display_text.into(),
            rows,
        }
    }

    /// Check the invariants every preset must hold before layout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows.is_empty() {
            return Err(ConfigError::EmptyPreset);
        }

        for (row_index, row) in self.rows.iter().enumerate() {
            if row.segments.is_empty() {
                return Err(ConfigError::EmptyRow { row: row_index });
            }
            for (segment_index, segment) in row.segments.iter().enumerate() {
                let size = segment.size();
                if !size.is_finite() || size <= 0.0 {
                    return Err(ConfigError::InvalidSize {
                        row: row_index,
                        segment: segment_index,
                        size,
                    });
                }
                if let Segment::Placeholder { key, .. } = segment {
                    if key.is_empty() {
                        return Err(ConfigError::EmptyPlaceholderKey {
                            row: row_index,
                            segment: segment_index,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Smallest relative size over every segment of the preset
    ///
    /// Row font sizes scale relative to this value, so the smallest row
    /// renders at the base size.
    pub fn min_size(&self) -> Result<f32, ConfigError> {
        self.validate()?;
        self.segments()
            .map(Segment::size)
            .reduce(f32::min)
            .ok_or(ConfigError::EmptyPreset)
    }

    /// Every segment in reading order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.rows.iter().flat_map(|row| row.segments.iter())
    }

    /// Placeholder segments in reading order
    pub fn placeholders(&self) -> impl Iterator<Item = &Segment> {
        self.segments().filter(|s| s.is_placeholder())
    }

    /// Default text for a placeholder key, if the preset has one
    pub fn placeholder_default(&self, key: &str) -> Option<&str> {
        self.segments().find_map(|segment| match segment {
            Segment::Placeholder {
                key: k,
                default_text,
                ..
            } if k == key => Some(default_text.as_str()),
            _ => None,
        })
    }

    /// Display text with every `<key>` token filled in
    ///
    /// Tokens resolve to the substitution, then the placeholder default;
    /// tokens the preset knows nothing about stay as written.
    pub fn render_display_text(&self, substitutions: &Substitutions) -> String {
        let mut out = String::with_capacity(self.display_text.len());
        let mut rest = self.display_text.as_str();

        while let Some(open) = rest.find('<') {
            let Some(close) = rest[open..].find('>').map(|i| open + i) else {
                break;
            };
            out.push_str(&rest[..open]);
            let key = &rest[open + 1..close];
            match substitutions
                .get(key)
                .or_else(|| self.placeholder_default(key))
            {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

impl Row {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The row's relative size, taken from its first segment
    pub fn size(&self) -> Option<f32> {
        self.segments.first().map(Segment::size)
    }

    pub fn has_placeholder(&self) -> bool {
        self.segments.iter().any(Segment::is_placeholder)
    }
}

impl Segment {
    pub fn text(text: impl Into<String>, size: f32) -> Self {
        Self::Text {
            text: text.into(),
            size,
        }
    }

    pub fn placeholder(key: impl Into<String>, default_text: impl Into<String>, size: f32) -> Self {
        Self::Placeholder {
            key: key.into(),
            default_text: default_text.into(),
            size,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Self::Text { size, .. } | Self::Placeholder { size, .. } => *size,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// The text this segment paints under the given substitutions
    pub fn resolve<'a>(&'a self, substitutions: &'a Substitutions) -> &'a str {
        match self {
            Self::Text { text, .. } => text,
            Self::Placeholder {
                key, default_text, ..
            } => substitutions.get(key).unwrap_or(default_text.as_str()),
        }
    }
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// The replacement for `key`, treating an empty value as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut subs = Self::new();
        for (key, value) in iter {
            subs.insert(key, value);
        }
        subs
    }
}
