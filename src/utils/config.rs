//! Configuration and constants for the viewer.

/// Default port for the report server
pub const DEFAULT_PORT: u16 = 4040;

/// Default bind address (local viewer)
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Current stats artifact schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Major schema version this build can read
pub const SUPPORTED_SCHEMA_MAJOR: &str = "1";

// Symbol names longer than the limit are shortened to KEEP + "..." + KEEP chars
pub const DISPLAY_NAME_LIMIT: usize = 40;
pub const DISPLAY_NAME_KEEP: usize = 20;

/// Sort key used when the query string has none (inclusive time)
pub const DEFAULT_SORT: &str = "ct";
