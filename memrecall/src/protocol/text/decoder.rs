use super::encoding::TextEncoding;
use super::request::Request;
use super::{COMMAND_DELIMITER, SET_COMMAND};
use bytes::BytesMut;
use std::io;
use tokio_util::codec::Decoder;

/// Splits the text stream of one connection into requests.
///
/// GET and unrecognized commands end at the first delimiter. SET carries a
/// data line and ends at the second one, until that arrives the whole SET
/// stays buffered. Text that does not form a complete frame yet is kept for
/// the next call.
pub struct MemcacheTextDecoder {
    encoding: TextEncoding,
    text: String,
    // start of the first frame not handed out yet
    consumed: usize,
}

impl MemcacheTextDecoder {
    pub fn new(encoding: TextEncoding) -> MemcacheTextDecoder {
        MemcacheTextDecoder {
            encoding,
            text: String::new(),
            consumed: 0,
        }
    }

    /// Decodes every complete request currently available in `src`.
    pub fn decode_all(&mut self, src: &mut BytesMut) -> Result<Vec<Request>, io::Error> {
        let mut requests = Vec::new();
        while let Some(request) = self.decode(src)? {
            requests.push(request);
        }
        Ok(requests)
    }

    /// Decoded text that does not form a complete frame yet
    pub fn pending(&self) -> &str {
        &self.text[self.consumed..]
    }

    pub fn has_pending(&self) -> bool {
        self.consumed < self.text.len()
    }

    fn frame_end(&self) -> Option<usize> {
        let unconsumed = &self.text[self.consumed..];
        let mut end = unconsumed.find(COMMAND_DELIMITER)?;
        if unconsumed.starts_with(SET_COMMAND) {
            let data_start = end + COMMAND_DELIMITER.len();
            end = data_start + unconsumed[data_start..].find(COMMAND_DELIMITER)?;
        }
        Some(self.consumed + end)
    }

    fn compact(&mut self) {
        if self.consumed > 0 {
            self.text.drain(..self.consumed);
            self.consumed = 0;
        }
    }
}

impl Decoder for MemcacheTextDecoder {
    type Item = Request;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Request>, io::Error> {
        self.encoding.decode(src, &mut self.text)?;

        match self.frame_end() {
            Some(end) => {
                let request = Request::new(&self.text[self.consumed..end]);
                if request.is_malformed() {
                    debug!("Malformed request: {:?}", &self.text[self.consumed..end]);
                }
                self.consumed = end + COMMAND_DELIMITER.len();
                Ok(Some(request))
            }
            None => {
                self.compact();
                Ok(None)
            }
        }
    }
}
