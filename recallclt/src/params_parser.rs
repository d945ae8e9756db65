use byte_unit::Byte;
use clap::{Parser, ValueEnum};
use memrecall::protocol::text::encoding::TextEncoding;
use std::{net::IpAddr, ops::RangeInclusive};

const DEFAULT_PORT: u16 = 11211;
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const VALUE_SIZE: &str = "64B";
const MAX_VALUE_SIZE: u64 = 1024 * 1024;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ClientMode {
    /// scripted GET/SET sequence over one connection
    Smoke,
    /// parallel clients writing and reading random keys
    Load,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
/// recallclt - sample client for the memrecalld text protocol
pub struct MemcacheClientConfig {
    #[arg(value_enum, default_value_t = ClientMode::Smoke)]
    /// what to run against the server
    pub mode: ClientMode,

    #[arg(short, long, value_name = "PORT", value_parser = port_in_range, default_value_t = DEFAULT_PORT)]
    /// TCP port the server listens on
    pub port: u16,

    #[arg(short, long, value_name = "ADDRESS", default_value = DEFAULT_ADDRESS)]
    /// server address
    pub server_address: IpAddr,

    #[arg(short, long, value_enum, default_value_t = TextEncoding::Utf16Le)]
    /// text encoding used on the wire
    pub encoding: TextEncoding,

    #[arg(short, long, value_name = "CLIENTS", value_parser = clap::value_parser!(u32).range(1..), default_value_t = 4)]
    /// parallel clients in load mode
    pub clients: u32,

    #[arg(short, long, value_name = "REQUESTS", value_parser = clap::value_parser!(u32).range(2..), default_value_t = 1000)]
    /// requests sent by each client in load mode
    pub requests: u32,

    #[arg(long, value_name = "VALUE-SIZE", value_parser = parse_value_size, default_value = VALUE_SIZE)]
    /// size of generated values in load mode (min: 1, max: 1m)
    pub value_size: u64,

    #[arg(short, action = clap::ArgAction::Count, default_value_t = 2)]
    /// sets the level of verbosity
    pub verbose: u8,
}

const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a port number"))?;
    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

fn parse_value_size(s: &str) -> Result<u64, String> {
    match Byte::parse_str(s, true) {
        Ok(bytes) => {
            let bytes = bytes.as_u64();
            if bytes == 0 || bytes > MAX_VALUE_SIZE {
                return Err(format!(
                    "value size must be between 1 and {} bytes",
                    MAX_VALUE_SIZE
                ));
            }
            Ok(bytes)
        }
        Err(byte_error) => Err(format!("{}", byte_error)),
    }
}

impl MemcacheClientConfig {
    fn from_args(args: Vec<String>) -> Result<MemcacheClientConfig, clap::Error> {
        MemcacheClientConfig::try_parse_from(args.iter())
    }
}

pub fn parse(args: Vec<String>) -> Result<MemcacheClientConfig, clap::Error> {
    MemcacheClientConfig::from_args(args)
}
