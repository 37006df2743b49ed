use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Delete criteria: one session, or an inclusive date range.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CleanupRunQuery {
    pub days: Option<i64>,
}
