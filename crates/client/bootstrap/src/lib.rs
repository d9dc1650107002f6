//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading and session assembly that can be reused
//! by UI shells or headless tools. Front-ends supply the pieces owned by
//! out-of-scope flows (the logged-in backend handle and player identity);
//! everything else defaults sensibly.
pub mod builder;
pub mod config;

pub use builder::SessionBuilder;
pub use config::SessionConfig;

/// Installs the process-wide tracing subscriber.
///
/// Logs to stderr at `INFO` by default; `RUST_LOG` overrides per module.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
