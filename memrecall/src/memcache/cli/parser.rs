use crate::protocol::text::encoding::TextEncoding;
use crate::version;
use byte_unit::Byte;
use clap::{Parser, ValueEnum};
use std::{net::IpAddr, ops::RangeInclusive};

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum RuntimeType {
    /// one single threaded runtime per worker thread, each with its own listener
    CurrentThread,
    /// work stealing threadpool runtime
    MultiThread,
}

impl RuntimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeType::CurrentThread => "Work handled withing current thread runtime",
            RuntimeType::MultiThread => "Work stealing threadpool runtime",
        }
    }
}

const DEFAULT_PORT: u16 = 11211;
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_CAPACITY: usize = 2048;
const CONNECTION_LIMIT: u32 = 1024;
const LISTEN_BACKLOG: u32 = 1024;
const READ_BUFFER_SIZE: &str = "2KiB";

#[derive(Parser, Debug, Clone)]
#[command(author, version = version::MEMRECALL_VERSION, about, long_about = None)]
/// memrecalld - in-memory LRU cache server speaking a GET/SET text protocol
pub struct MemrecalldConfig {
    #[arg(short, long, value_name = "PORT", value_parser = port_in_range, default_value_t = DEFAULT_PORT)]
    /// TCP port to listen on
    pub port: u16,

    #[arg(short, long = "listen", value_name = "ADDRESS", default_value = DEFAULT_ADDRESS)]
    /// interface to listen on
    pub listen_address: IpAddr,

    #[arg(short = 'm', long, value_name = "ENTRIES", value_parser = capacity_in_range, default_value_t = DEFAULT_CAPACITY)]
    /// maximum number of cached items
    pub capacity: usize,

    #[arg(short, long, value_name = "CONNECTION-LIMIT", default_value_t = CONNECTION_LIMIT)]
    /// max simultaneous connections
    pub connection_limit: u32,

    #[arg(short = 'b', long, value_name = "LISTEN-BACKLOG", default_value_t = LISTEN_BACKLOG)]
    /// set the backlog queue limit
    pub listen_backlog: u32,

    #[arg(short, long, value_name = "THREADS", value_parser = threads_in_range, default_value_t = num_cpus::get())]
    /// number of threads to use
    pub threads: usize,

    #[arg(short, long, value_enum, default_value_t = RuntimeType::MultiThread)]
    /// runtime type to use
    pub runtime_type: RuntimeType,

    #[arg(short, long, value_enum, default_value_t = TextEncoding::Utf16Le)]
    /// text encoding used on the wire
    pub encoding: TextEncoding,

    #[arg(short = 'R', long, value_name = "READ-BUFFER-SIZE", value_parser = parse_buffer_size, default_value = READ_BUFFER_SIZE)]
    /// bytes requested from the socket per read (min: 1, max: 64m)
    pub read_buffer_size: usize,

    #[arg(short, action = clap::ArgAction::Count)]
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

fn capacity_in_range(s: &str) -> Result<usize, String> {
    let capacity: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a number of entries"))?;
    if capacity == 0 {
        return Err(String::from("capacity must be greater than or equal to one"));
    }
    Ok(capacity)
}

fn threads_in_range(s: &str) -> Result<usize, String> {
    let threads: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a number of threads"))?;
    if threads == 0 {
        return Err(String::from("at least one thread is required"));
    }
    Ok(threads)
}

const MAX_READ_BUFFER_SIZE: u64 = 64 * 1024 * 1024;

fn parse_buffer_size(s: &str) -> Result<usize, String> {
    match Byte::parse_str(s, true) {
        Ok(bytes) => {
            let bytes = bytes.as_u64();
            if bytes == 0 || bytes > MAX_READ_BUFFER_SIZE {
                return Err(format!(
                    "read buffer size must be between 1 and {} bytes",
                    MAX_READ_BUFFER_SIZE
                ));
            }
            Ok(bytes as usize)
        }
        Err(byte_error) => Err(format!("{}", byte_error)),
    }
}

impl MemrecalldConfig {
    fn from_args(args: Vec<String>) -> Result<MemrecalldConfig, clap::Error> {
        MemrecalldConfig::try_parse_from(args.iter())
    }
}

pub fn parse(args: Vec<String>) -> Result<MemrecalldConfig, clap::Error> {
    MemrecalldConfig::from_args(args)
}
