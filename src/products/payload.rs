use crate::*;
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Embed field
pub struct EmbedField {
    /// Field title
    pub name: String,

    /// Field text
    pub value: String,

    /// Render next to other fields
    pub inline: bool,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Rich message block
pub struct Embed {
    /// Embed title
    pub title: String,

    /// Embed description
    pub description: String,

    /// Side bar color
    pub color: u32,

    /// Embed fields
    pub fields: Vec<EmbedField>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// JSON body POSTed to the webhook
pub struct WebhookPayload {
    /// Message embeds
    pub embeds: Vec<Embed>,
}


impl WebhookPayload {
    /// Serialize to JSON body
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}


impl From<&Report> for WebhookPayload {
    fn from(report: &Report) -> WebhookPayload {
        WebhookPayload {
            embeds: vec![Embed {
                title: report.title.clone(),
                description: report.description.clone(),
                color: report.severity.color(),
                fields: report
                    .fields
                    .iter()
                    .map(|field| {
                        EmbedField {
                            name: field.label.clone(),
                            value: field.body.clone(),
                            inline: true,
                        }
                    })
                    .collect(),
            }],
        }
    }
}
