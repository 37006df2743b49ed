use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin session token claims: an explicit issued-at/expiry pair instead of
/// ambient wall-clock checks.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iat: usize,
    pub exp: usize,
    pub admin: bool,
}

impl Claims {
    /// Pure validity check against a caller-supplied clock.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        (now.timestamp() as usize) < self.exp
    }
}

#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Claims);
