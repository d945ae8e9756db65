use super::encoding::TextEncoding;
use super::{COMMAND_DELIMITER, GET_COMMAND, SET_COMMAND};
use crate::cache::cache::{KeyType, ValueType};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCommand {
    Unknown,
    Get,
    Set,
}

/// State of the value associated with a request key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSlot {
    /// Requested by GET, not looked up yet
    Pending,
    /// Value carried by SET or found in the cache
    Value(ValueType),
    /// Looked up and not cached
    Missing,
}

/// One decoded protocol command.
///
/// Built from a single frame with the delimiters that terminate it already
/// stripped. Keys keep the order in which they were parsed.
#[derive(Debug, Clone)]
pub struct Request {
    command: RequestCommand,
    data: IndexMap<KeyType, ValueSlot>,
    malformed: bool,
}

impl Request {
    pub fn new(command_text: &str) -> Request {
        let mut request = Request {
            command: RequestCommand::Unknown,
            data: IndexMap::new(),
            malformed: false,
        };

        if command_text.trim().is_empty() {
            request.malformed = true;
        } else if command_text.starts_with(GET_COMMAND) {
            request.parse_get(command_text);
        } else if command_text.starts_with(SET_COMMAND) {
            request.parse_set(command_text);
        } else {
            request.malformed = true;
        }
        request
    }

    pub fn command(&self) -> RequestCommand {
        self.command
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub fn data(&self) -> &IndexMap<KeyType, ValueSlot> {
        &self.data
    }

    pub fn keys(&self) -> Vec<KeyType> {
        self.data.keys().cloned().collect()
    }

    pub fn value(&self, key: &str) -> Option<&ValueSlot> {
        self.data.get(key)
    }

    pub(crate) fn resolve(&mut self, key: &str, slot: ValueSlot) {
        if let Some(current) = self.data.get_mut(key) {
            *current = slot;
        }
    }

    /// Drops keys resolved as missing, keeping the order of the others.
    pub(crate) fn remove_missing(&mut self) {
        self.data.retain(|_key, slot| *slot != ValueSlot::Missing);
    }

    /// Renders the response for an already processed request.
    pub fn response_text(&self, encoding: TextEncoding) -> String {
        let mut response = String::new();
        if self.malformed {
            response.push_str("ERROR");
            response.push_str(COMMAND_DELIMITER);
            return response;
        }

        if self.command == RequestCommand::Set {
            response.push_str("STORED");
            response.push_str(COMMAND_DELIMITER);
            return response;
        }

        for (key, slot) in &self.data {
            if let ValueSlot::Value(value) = slot {
                response.push_str("VALUE ");
                response.push_str(key);
                response.push(' ');
                response.push_str(&encoding.len(value).to_string());
                response.push_str(COMMAND_DELIMITER);
                response.push_str(value);
                response.push_str(COMMAND_DELIMITER);
            }
        }
        response.push_str("END");
        response.push_str(COMMAND_DELIMITER);
        response
    }

    //  GET <key_1> [<key_2> ... <key_n>]
    fn parse_get(&mut self, command_text: &str) {
        if command_text.contains(COMMAND_DELIMITER) {
            self.malformed = true;
            return;
        }

        let tokens: Vec<&str> = command_text.split(' ').collect();
        if tokens.len() < 2 || tokens[0] != GET_COMMAND {
            self.malformed = true;
            return;
        }

        self.command = RequestCommand::Get;
        for key in &tokens[1..] {
            self.data.insert(key.to_string(), ValueSlot::Pending);
        }
    }

    //  SET <key> <flags> <exptime> <bytes>\r\n
    //  <data>
    fn parse_set(&mut self, command_text: &str) {
        let lines: Vec<&str> = command_text.split(COMMAND_DELIMITER).collect();
        if lines.len() != 2 {
            self.malformed = true;
            return;
        }

        let tokens: Vec<&str> = lines[0].split(' ').collect();
        if tokens.len() < 2 || tokens[0] != SET_COMMAND {
            self.malformed = true;
            return;
        }

        self.command = RequestCommand::Set;
        self.data
            .insert(tokens[1].to_string(), ValueSlot::Value(lines[1].to_string()));
    }
}
