use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::types::AnnouncementConfig;
use crate::domain::study::Study;

/// A rich "new study" message, independent of the chat platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub lead: String,
    pub mention_everyone: bool,
    pub title: String,
    pub link: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<AnnouncementField>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl AnnouncementField {
    fn inline(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline: true,
        }
    }
}

impl Announcement {
    pub fn for_study(study: &Study, style: &AnnouncementConfig, timestamp: DateTime<Utc>) -> Self {
        let mut fields = vec![
            AnnouncementField::inline(
                "Reward",
                format_reward(&study.reward, &style.currency_symbol),
            ),
            AnnouncementField::inline("Places", study.places_left.clone()),
        ];
        if let Some(ref duration) = study.duration {
            let value = study
                .duration_minutes()
                .map_or_else(|| duration.clone(), |m| format!("{m} minutes"));
            fields.push(AnnouncementField::inline("Duration", value));
        }

        Self {
            lead: style.lead.clone(),
            mention_everyone: style.mention_everyone,
            title: style.title.clone(),
            link: style.link.clone(),
            color: style.color,
            timestamp,
            fields,
            footer: style.footer.clone(),
        }
    }

    /// The plain-text line sent alongside the rich body.
    pub fn content(&self) -> String {
        if self.mention_everyone {
            format!("@everyone {}", self.lead)
        } else {
            self.lead.clone()
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

fn format_reward(reward: &str, symbol: &str) -> String {
    if symbol.is_empty() || reward.starts_with(symbol) {
        reward.to_string()
    } else {
        format!("{symbol}{reward}")
    }
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.content())?;
        writeln!(f, "# {}", self.title)?;
        for field in &self.fields {
            writeln!(f, "{}: {}", field.name, field.value)?;
        }
        writeln!(f, "{}", self.footer)?;
        write!(f, "URL: {}", self.link)
    }
}
