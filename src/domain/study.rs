use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One study card scraped from the studies page. Field values are the
/// trimmed page text; no currency or unit normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    pub id: String,
    pub reward: String,
    pub places_left: String,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Studies from a single poll, keyed by page-assigned identifier.
pub type StudyMap = HashMap<String, Study>;

impl Study {
    /// Duration in minutes, when the page gives a bare integer.
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration.as_deref()?.parse().ok()
    }
}

impl std::fmt::Display for Study {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Study {} (reward {}, places {}",
            self.id, self.reward, self.places_left
        )?;
        if let Some(ref duration) = self.duration {
            write!(f, ", duration {duration}")?;
        }
        write!(f, ")")
    }
}
