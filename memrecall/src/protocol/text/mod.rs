pub mod connection;
pub mod decoder;
pub mod encoder;
pub mod encoding;
pub mod request;

/// Terminates a command line and a data line
pub const COMMAND_DELIMITER: &str = "\r\n";
pub const GET_COMMAND: &str = "GET";
pub const SET_COMMAND: &str = "SET";
