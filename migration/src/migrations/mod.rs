pub mod m20250101_000001_create_participants;
pub mod m20250101_000002_create_sessions;
pub mod m20250101_000003_create_attendances;
pub mod m20250101_000004_create_settings;
