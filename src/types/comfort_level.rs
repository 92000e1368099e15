//! Defines the `ComfortLevel` enum, mapping the feed's crowding descriptors
//! (`SSD` column) to descriptive variants.

use serde::{Serialize, Serializer};
use std::fmt;

/// Label used for categorical fields the feed left empty.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Crowding descriptor reported for a site.
///
/// The feed uses a small closed vocabulary of Chinese labels. Labels outside of
/// it are preserved verbatim in [`ComfortLevel::Other`] so no observation is
/// lost when the publisher introduces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComfortLevel {
    /// `舒适`: comfortable.
    Comfortable,
    /// `较舒适`: moderately comfortable.
    ModeratelyComfortable,
    /// `一般`: crowded.
    Crowded,
    /// `暂无`: no reading reported.
    NotReported,
    /// Any label not in the known vocabulary.
    Other(String),
}

impl ComfortLevel {
    /// Maps a raw `SSD` value to a variant. Empty values map to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shanghai_tourist::ComfortLevel;
    ///
    /// assert_eq!(ComfortLevel::from_label("较舒适"), Some(ComfortLevel::ModeratelyComfortable));
    /// assert_eq!(ComfortLevel::from_label(""), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        match label {
            "" => None,
            "舒适" => Some(ComfortLevel::Comfortable),
            "较舒适" => Some(ComfortLevel::ModeratelyComfortable),
            "一般" => Some(ComfortLevel::Crowded),
            "暂无" => Some(ComfortLevel::NotReported),
            other => Some(ComfortLevel::Other(other.to_string())),
        }
    }

    /// The label as published by the feed.
    pub fn label(&self) -> &str {
        match self {
            ComfortLevel::Comfortable => "舒适",
            ComfortLevel::ModeratelyComfortable => "较舒适",
            ComfortLevel::Crowded => "一般",
            ComfortLevel::NotReported => "暂无",
            ComfortLevel::Other(label) => label,
        }
    }

    /// Label for an optional level, falling back to [`UNKNOWN_LABEL`].
    pub fn label_or_unknown(level: Option<&ComfortLevel>) -> &str {
        level.map(ComfortLevel::label).unwrap_or(UNKNOWN_LABEL)
    }
}

impl fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ComfortLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
