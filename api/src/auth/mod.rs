pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthAdmin, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config::AppConfig;

/// Issues an admin session token and its expiry timestamp. The lifetime
/// comes from `ADMIN_SESSION_MINUTES` (one hour by default).
pub fn generate_admin_token() -> (String, String) {
    let (secret, minutes) = {
        let cfg = AppConfig::global();
        (cfg.jwt_secret.clone(), cfg.admin_session_minutes)
    };

    let issued = Utc::now();
    let expiry = issued + Duration::minutes(minutes as i64);

    let claims = Claims {
        iat: issued.timestamp() as usize,
        exp: expiry.timestamp() as usize,
        admin: true,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn claims_validity_is_a_pure_function_of_the_clock() {
        let claims = Claims {
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            admin: true,
        };
        let before = Utc.timestamp_opt(1_700_003_599, 0).unwrap();
        let after = Utc.timestamp_opt(1_700_003_600, 0).unwrap();
        assert!(claims.is_valid(before));
        assert!(!claims.is_valid(after));
    }
}
