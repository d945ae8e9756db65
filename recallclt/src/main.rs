use std::env;
extern crate clap;
mod connection;
mod params_parser;
mod scenarios;

fn main() {
    recallclt::run(env::args().collect())
}

mod recallclt {
    use crate::params_parser::{ClientMode, MemcacheClientConfig};
    use env_logger::Builder;
    use log::{error, info};
    use std::{io::Write, process};

    use super::{params_parser, scenarios};

    fn get_log_level(verbose: u8) -> log::LevelFilter {
        // Vary the output based on how many times the user used the "verbose" flag
        // (i.e. 'myprog -v -v -v' or 'myprog -vvv' vs 'myprog -v'
        match verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn init_logger(cli_config: &MemcacheClientConfig) {
        let mut builder = Builder::new();
        builder.filter_level(get_log_level(cli_config.verbose));
        builder.format_module_path(false);
        builder.format_file(false);
        builder.format_source_path(false);
        builder.format_target(false);

        builder.format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{}] {style}{:<5}{style:#}: {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        });
        builder.init();
    }

    pub fn run(args: Vec<String>) {
        let cli_config = match params_parser::parse(args) {
            Ok(config) => config,
            Err(err) => err.exit(),
        };

        init_logger(&cli_config);

        info!("Server address: {}", cli_config.server_address);
        info!("Server port: {}", cli_config.port);
        info!("Text encoding: {}", cli_config.encoding.as_str());

        let result = match cli_config.mode {
            ClientMode::Smoke => scenarios::smoke(&cli_config),
            ClientMode::Load => {
                info!("Clients: {}", cli_config.clients);
                info!("Requests per client: {}", cli_config.requests);
                info!(
                    "Value size: {}",
                    byte_unit::Byte::from_u64(cli_config.value_size)
                        .get_appropriate_unit(byte_unit::UnitType::Binary)
                );
                scenarios::load(&cli_config)
            }
        };

        if let Err(err) = result {
            error!("Client error: {}", err);
            process::exit(1);
        }
    }
}
