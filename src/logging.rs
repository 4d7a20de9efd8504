use tracing::Level;

/// Logging setup, decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Debug level with timestamps and targets.
    pub verbose: bool,
}

impl LogConfig {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Install the global subscriber writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt()
            .with_max_level(self.level())
            .with_writer(std::io::stderr);
        let _ = if self.verbose {
            builder.with_target(true).try_init()
        } else {
            builder.without_time().with_target(false).try_init()
        };
    }
}
