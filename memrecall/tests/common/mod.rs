#![allow(dead_code)]
pub mod multi_thread_server;
pub mod params_builder;
pub mod random_port;
pub mod text_client;

pub use multi_thread_server::spawn_server;
pub use params_builder::MemrecalldServerParamsBuilder;
pub use text_client::TextClient;
