/// Child-row primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Projects are addressed by UUID so the client can hold a stable handle
/// across stages.
pub type ProjectId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
