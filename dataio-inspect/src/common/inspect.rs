use super::cli::Command;
use super::utils::parse_u64;
use anyhow::{Context, Result};
use dataio::{
    bidi::{unpack_long_bidi, unpack_long_bidi_reverse},
    hexa::{from_hexa, to_hexa},
    io::{ArrayInput, ArrayOutput, DataInput, DataOutput},
    parity::ParityScheme,
};
use log::debug;
use serde::Serialize;
use std::fmt;

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Bytes { bytes: Vec<u8> },
    Values { values: Vec<u64> },
    Hex { hex: String },
    Bidi { value: u64, size: usize, raw: u64 },
    Word { bits: u32, payload: u64, word: u64 },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Bytes { bytes } => write!(f, "{:?}", bytes),
            Report::Values { values } => {
                for v in values {
                    writeln!(f, "{}", v)?;
                }
                Ok(())
            }
            Report::Hex { hex } => write!(f, "{}", hex),
            Report::Bidi { value, size, raw } => {
                write!(f, "value={} size={} raw={:#x}", value, size, raw)
            }
            Report::Word {
                bits,
                payload,
                word,
            } => write!(f, "payload={} word={:#x} check_bits={}", payload, word, bits),
        }
    }
}

pub fn run(command: &Command) -> Result<Report> {
    match command {
        Command::Hex { text } => Ok(Report::Bytes {
            bytes: from_hexa(text)?,
        }),
        Command::Unpack { hex } => {
            let mut input = ArrayInput::new(from_hexa(hex)?);
            let mut values = Vec::new();
            while input.remaining() > 0 {
                let pos = input.position();
                let v = input
                    .unpack_long()
                    .with_context(|| format!("Cannot unpack value at byte {}", pos))?;
                debug!("unpacked {} at byte {}", v, pos);
                values.push(v);
            }
            Ok(Report::Values { values })
        }
        Command::Pack { values } => {
            let mut out = ArrayOutput::new();
            for &v in values {
                out.pack_long(v)?;
            }
            Ok(Report::Hex {
                hex: to_hexa(&out.copy_bytes()),
            })
        }
        Command::Bidi { hex, reverse } => {
            let bz = from_hexa(hex)?;
            let word = if *reverse {
                unpack_long_bidi_reverse(&bz, bz.len(), 0)?
            } else {
                unpack_long_bidi(&bz, 0)?
            };
            Ok(Report::Bidi {
                value: word.value(),
                size: word.size(),
                raw: word.raw(),
            })
        }
        Command::ParitySet { bits, payload } => {
            let scheme = ParityScheme::from_bits(*bits)?;
            let payload = parse_u64(payload)?;
            if payload >> (64 - bits) != 0 {
                anyhow::bail!("Payload {:#x} does not fit in {} bits", payload, 64 - bits);
            }
            Ok(Report::Word {
                bits: *bits,
                payload,
                word: scheme.set(payload),
            })
        }
        Command::ParityGet { bits, word } => {
            let scheme = ParityScheme::from_bits(*bits)?;
            let word = parse_u64(word)?;
            let payload = scheme.get(word)?;
            Ok(Report::Word {
                bits: *bits,
                payload,
                word,
            })
        }
    }
}
