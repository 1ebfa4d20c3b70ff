//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::Parser;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "retrace")]
#[command(about = "Compare retirement traces between an RTL simulation and Spike")]
#[command(version)]
pub struct Cli {
    /// Trace log generated by the RTL simulator
    #[arg(short, long, value_name = "FILE")]
    pub rtl: PathBuf,

    /// Trace log generated by Spike
    #[arg(short, long, value_name = "FILE")]
    pub spike: PathBuf,

    /// Reset vector the reference trace is anchored to (hex)
    #[arg(
        long,
        value_name = "ADDR",
        default_value = "0x80000000",
        value_parser = parse_hex_addr
    )]
    pub reset_vector: u64,

    /// Enable verbose output (sets default log level to debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress diagnostics (only show errors and the report)
    #[arg(long, conflicts_with = "verbose")]
    pub silent: bool,
}

/// Parse a hex address with an optional `0x` prefix.
fn parse_hex_addr(s: &str) -> Result<u64, String> {
    let s = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(s, 16).map_err(|e| format!("invalid hex address: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_addr() {
        assert_eq!(parse_hex_addr("0x80000000"), Ok(0x8000_0000));
        assert_eq!(parse_hex_addr("80000000"), Ok(0x8000_0000));
        assert_eq!(parse_hex_addr("0x1000"), Ok(0x1000));
        assert!(parse_hex_addr("").is_err());
        assert!(parse_hex_addr("0xzz").is_err());
    }
}
