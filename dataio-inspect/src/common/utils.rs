use anyhow::{anyhow, Result};

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

/// Parses a decimal number, or a hex number with a `0x` prefix.
pub fn parse_u64(text: &str) -> Result<u64> {
    let text = text.trim().replace('_', "");
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|e| anyhow!("Invalid number {:?}: {}", text, e))
}
