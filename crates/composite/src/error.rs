use std::error::Error as StdError;

use actin_core::SchemaError;

use crate::ConfigError;

/// Errors that can occur during a composite run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid run config: {0}")]
    Config(#[from] ConfigError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("process error at t = {global_time}: {source}")]
    Process {
        global_time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn process<E: StdError + Send + Sync + 'static>(global_time: f64, err: E) -> Self {
        Self::Process {
            global_time,
            source: Box::new(err),
        }
    }
}
