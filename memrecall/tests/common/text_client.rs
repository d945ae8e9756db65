use bytes::BytesMut;
use memrecall::protocol::text::encoding::TextEncoding;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use crate::common::multi_thread_server::MemrecalldTestServer;

const RESPONSE_TERMINATORS: [&str; 3] = ["STORED", "ERROR", "END"];

/// Blocking client speaking the text protocol, used to drive a test server.
pub struct TextClient {
    stream: TcpStream,
    encoding: TextEncoding,
    buffer: BytesMut,
    text: String,
}

impl TextClient {
    pub fn connect(server: &MemrecalldTestServer) -> TextClient {
        let addr = SocketAddr::from(([127, 0, 0, 1], server.port()));
        // the listener binds on a background thread
        for _ in 0..200 {
            if let Ok(stream) = TcpStream::connect(addr) {
                stream
                    .set_read_timeout(Some(Duration::from_secs(5)))
                    .unwrap();
                return TextClient {
                    stream,
                    encoding: server.encoding(),
                    buffer: BytesMut::new(),
                    text: String::new(),
                };
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("Cannot connect to {}", addr);
    }

    pub fn send(&mut self, text: &str) {
        let mut bytes = BytesMut::new();
        self.encoding.encode(text, &mut bytes);
        self.send_bytes(&bytes);
    }

    pub fn send_bytes(&mut self, bytes: &[u8]) {
        self.stream.write_all(bytes).unwrap();
        self.stream.flush().unwrap();
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut bytes = BytesMut::new();
        self.encoding.encode(text, &mut bytes);
        bytes.to_vec()
    }

    /// Reads up to and including the next STORED, ERROR or END line.
    pub fn read_response(&mut self) -> String {
        loop {
            if let Some(end) = response_end(&self.text) {
                return self.text.drain(..end).collect();
            }
            let mut chunk = [0u8; 1024];
            let read = self.stream.read(&mut chunk).unwrap();
            assert!(read > 0, "server closed the connection");
            self.buffer.extend_from_slice(&chunk[..read]);
            self.encoding
                .decode(&mut self.buffer, &mut self.text)
                .unwrap();
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> String {
        let command = format!(
            "SET {} 0 0 {}\r\n{}\r\n",
            key,
            self.encoding.len(value),
            value
        );
        self.send(&command);
        self.read_response()
    }

    pub fn get(&mut self, keys: &[&str]) -> String {
        self.send(&format!("GET {}\r\n", keys.join(" ")));
        self.read_response()
    }
}

fn response_end(text: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(pos) = text[start..].find("\r\n") {
        let line = &text[start..start + pos];
        let next = start + pos + 2;
        if RESPONSE_TERMINATORS.contains(&line) {
            return Some(next);
        }
        start = next;
    }
    None
}
