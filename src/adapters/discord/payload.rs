//! Request bodies for Discord's `POST /channels/{id}/messages`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::announcement::Announcement;

#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    pub allowed_mentions: AllowedMentions,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Without an explicit list Discord would ping whatever the content mentions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<&'static str>,
}

impl MessagePayload {
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            embeds: Vec::new(),
            allowed_mentions: AllowedMentions::default(),
        }
    }
}

impl From<&Announcement> for MessagePayload {
    fn from(announcement: &Announcement) -> Self {
        let embed = Embed {
            title: announcement.title.clone(),
            url: announcement.link.clone(),
            color: announcement.color,
            timestamp: announcement.timestamp,
            fields: announcement
                .fields
                .iter()
                .map(|f| EmbedField {
                    name: f.name.clone(),
                    value: f.value.clone(),
                    inline: f.inline,
                })
                .collect(),
            footer: EmbedFooter {
                text: announcement.footer.clone(),
            },
        };
        let allowed_mentions = if announcement.mention_everyone {
            AllowedMentions {
                parse: vec!["everyone"],
            }
        } else {
            AllowedMentions::default()
        };

        Self {
            content: announcement.content(),
            embeds: vec![embed],
            allowed_mentions,
        }
    }
}
