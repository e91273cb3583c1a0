use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Subcommand, Debug, Serialize, Clone)]
pub enum Command {
    /// Print the bytes of a hex string
    Hex { text: String },
    /// Decode every packed long in a hex string
    Unpack { hex: String },
    /// Pack values and print the hex string
    Pack {
        #[arg(required = true)]
        values: Vec<u64>,
    },
    /// Decode one bidirectional long
    Bidi {
        hex: String,

        /// Decode backward from the end of the string
        #[arg(long, default_value_t = false)]
        reverse: bool,
    },
    /// Stamp check bits onto a pointer payload
    ParitySet {
        /// Check bits: 1, 3, 4 or 16
        #[arg(long, default_value_t = 1)]
        bits: u32,

        /// Decimal, or hex with a 0x prefix
        payload: String,
    },
    /// Validate a pointer word and print its payload
    ParityGet {
        /// Check bits: 1, 3, 4 or 16
        #[arg(long, default_value_t = 1)]
        bits: u32,

        /// Decimal, or hex with a 0x prefix
        word: String,
    },
}

#[derive(Parser, Debug, Serialize, Clone)]
pub struct InspectCli {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// env_logger filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
