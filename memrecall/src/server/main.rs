use crate::memcache;
use crate::memcache_server::{runtime_builder, server_context::ServerContext};
use log::info;
use std::process;
use tracing_log::LogTracer;
extern crate clap;

#[cfg(feature = "jemallocator")]
use jemallocator::Jemalloc;

#[cfg(feature = "jemallocator")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn get_log_level(verbose: u8) -> tracing::Level {
    // Vary the output based on how many times the user used the "verbose" flag
    // (i.e. 'myprog -v -v -v' or 'myprog -vvv' vs 'myprog -v'
    match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

pub fn run(args: Vec<String>) {
    if let Err(err) = LogTracer::init() {
        eprintln!("Cannot initialize logger: {}", err);
    }

    let cli_config = match memcache::cli::parser::parse(args) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    tracing_subscriber::fmt()
        .with_max_level(get_log_level(cli_config.verbose))
        .init();

    info!("Listen address: {}", cli_config.listen_address);
    info!("Listen port: {}", cli_config.port);
    info!("Connection limit: {}", cli_config.connection_limit);
    info!("Listen backlog: {}", cli_config.listen_backlog);
    info!("Number of threads: {}", cli_config.threads);
    info!("Runtime type: {}", cli_config.runtime_type.as_str());
    info!("Text encoding: {}", cli_config.encoding.as_str());
    info!("Cache capacity: {} items", cli_config.capacity);
    info!(
        "Read buffer size: {}",
        byte_unit::Byte::from_u64(cli_config.read_buffer_size as u64)
            .get_appropriate_unit(byte_unit::UnitType::Binary)
    );

    let store_config = memcache::builder::MemcacheStoreConfig::new(cli_config.capacity);
    let ctxt = match ServerContext::get_default_server_context(store_config) {
        Ok(ctxt) => ctxt,
        Err(err) => {
            error!("Cannot create cache: {}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    if let Err(err) = runtime_builder::start_memrecall_server(cli_config, ctxt) {
        error!("Server error: {}", err);
        eprintln!("{}", err);
        process::exit(1);
    }
}
