/// URL for accessing the PostgreSQL database (should contain a database name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Address the HTTP server binds to. Defaults to [DEFAULT_LISTEN_ADDR].
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
/// Secret used to sign and verify the session cookie. Must be at least 64 bytes long.
pub const SESSION_SECRET: &str = "SESSION_SECRET";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

pub mod test {
    /// URL for accessing the PostgreSQL database during integration tests (should not contain a database name in the path)
    pub const TEST_DB_URL: &str = "TEST_DB_URL";
}
