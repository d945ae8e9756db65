use super::encoding::TextEncoding;
use super::request::Request;
use bytes::BytesMut;
use std::io;
use tokio_util::codec::Encoder;

/// Writes the response of a processed request in the wire encoding
pub struct MemcacheTextEncoder {
    encoding: TextEncoding,
}

impl MemcacheTextEncoder {
    pub fn new(encoding: TextEncoding) -> MemcacheTextEncoder {
        MemcacheTextEncoder { encoding }
    }
}

impl<'a> Encoder<&'a Request> for MemcacheTextEncoder {
    type Error = io::Error;

    fn encode(&mut self, request: &'a Request, dst: &mut BytesMut) -> Result<(), io::Error> {
        let response = request.response_text(self.encoding);
        self.encoding.encode(&response, dst);
        Ok(())
    }
}
