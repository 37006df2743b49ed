use serde::{Deserialize, Serialize};

use services::participant_service::Participant;

/// Admin roster row; this is the only surface carrying the full phone number.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub phone_last4: String,
    pub baptismal_name: String,
    pub district: String,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            name: p.name,
            phone: p.phone,
            phone_last4: p.phone_last4,
            baptismal_name: p.baptismal_name,
            district: p.district,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantPayload {
    pub name: String,
    pub phone: String,
    pub baptismal_name: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    #[serde(default, rename = "replaceAll")]
    pub replace_all: bool,
}
