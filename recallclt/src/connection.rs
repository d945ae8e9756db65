use memrecall::protocol::text::encoding::TextEncoding;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use bytes::BytesMut;

const RESPONSE_TERMINATORS: [&str; 3] = ["STORED", "ERROR", "END"];
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking connection to a memrecalld server.
pub struct TextConnection {
    stream: TcpStream,
    encoding: TextEncoding,
    buffer: BytesMut,
    text: String,
}

impl TextConnection {
    pub fn connect(addr: SocketAddr, encoding: TextEncoding) -> io::Result<TextConnection> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        Ok(TextConnection {
            stream,
            encoding,
            buffer: BytesMut::new(),
            text: String::new(),
        })
    }

    pub fn set(&mut self, key: &str, value: &str) -> io::Result<String> {
        let command = format!(
            "SET {} 0 0 {}\r\n{}\r\n",
            key,
            self.encoding.len(value),
            value
        );
        self.request(&command)
    }

    pub fn get(&mut self, keys: &[&str]) -> io::Result<String> {
        self.request(&format!("GET {}\r\n", keys.join(" ")))
    }

    fn request(&mut self, command: &str) -> io::Result<String> {
        let mut bytes = BytesMut::new();
        self.encoding.encode(command, &mut bytes);
        self.stream.write_all(&bytes)?;
        self.read_response()
    }

    fn read_response(&mut self) -> io::Result<String> {
        let mut chunk = [0u8; 2048];
        loop {
            if let Some(end) = response_end(&self.text) {
                return Ok(self.text.drain(..end).collect());
            }
            let read = self.stream.read(&mut chunk)?;
            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "server closed the connection",
                ));
            }
            self.buffer.extend_from_slice(&chunk[..read]);
            self.encoding.decode(&mut self.buffer, &mut self.text)?;
        }
    }
}

fn response_end(text: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(pos) = text[start..].find("\r\n") {
        let next = start + pos + 2;
        if RESPONSE_TERMINATORS.contains(&&text[start..start + pos]) {
            return Some(next);
        }
        start = next;
    }
    None
}
