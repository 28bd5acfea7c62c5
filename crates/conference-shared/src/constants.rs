//! Application-wide constants

pub const DEFAULT_CREATED_BY: &str = "system";
pub const ADMIN_MAILBOX: &str = "admin";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
