//! Configuration for the growable writers.
//!
//! The codecs themselves are stateless; the only tunables are how an
//! [`ArrayOutput`](crate::io::ArrayOutput) sizes its backing array.
//!
//! ```
//! use dataio::config::Config;
//! use dataio::io::ArrayOutput;
//!
//! let config = Config::new(16, 4096);
//! let out = ArrayOutput::with_config(&config);
//! assert_eq!(out.buf().len(), 16);
//! ```

use crate::def::{DEFAULT_MAX_OUTPUT_SIZE, DEFAULT_OUTPUT_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Length of the backing array of a fresh writer (default: 128 bytes)
    pub initial_output_size: usize,
    /// A writer never grows its backing array beyond this size (default: 1GB)
    pub max_output_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_output_size: DEFAULT_OUTPUT_SIZE,
            max_output_size: DEFAULT_MAX_OUTPUT_SIZE,
        }
    }
}

impl Config {
    pub fn new(initial_output_size: usize, max_output_size: usize) -> Self {
        Self {
            initial_output_size,
            max_output_size: max_output_size.max(initial_output_size),
        }
    }
}
