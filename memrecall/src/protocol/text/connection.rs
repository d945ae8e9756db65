use super::decoder::MemcacheTextDecoder;
use super::encoder::MemcacheTextEncoder;
use super::encoding::TextEncoding;
use super::request::Request;
use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;

pub struct MemcacheTextConnection<S> {
    stream: S,
    decoder: MemcacheTextDecoder,
    encoder: MemcacheTextEncoder,
    buffer: BytesMut,
    read_buffer_size: usize,
    closed: bool,
}

impl<S> MemcacheTextConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(socket: S, encoding: TextEncoding, read_buffer_size: usize) -> Self {
        let read_buffer_size = read_buffer_size.max(1);
        MemcacheTextConnection {
            stream: socket,
            decoder: MemcacheTextDecoder::new(encoding),
            encoder: MemcacheTextEncoder::new(encoding),
            buffer: BytesMut::with_capacity(read_buffer_size),
            read_buffer_size,
            closed: false,
        }
    }

    /// Reads whatever the peer has sent so far and returns the requests it
    /// completes, possibly none.
    ///
    /// A read of zero bytes marks the connection as closed by the peer and
    /// yields no requests.
    pub async fn read_requests(&mut self) -> Result<Vec<Request>, io::Error> {
        self.buffer.reserve(self.read_buffer_size);
        // `0` indicates "end of stream".
        if 0 == self.stream.read_buf(&mut self.buffer).await? {
            self.closed = true;
            if self.decoder.has_pending() || !self.buffer.is_empty() {
                debug!(
                    "Peer closed the stream inside a frame, discarding {:?}",
                    self.decoder.pending()
                );
            }
            return Ok(Vec::new());
        }
        self.decoder.decode_all(&mut self.buffer)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub async fn write(&mut self, request: &Request) -> io::Result<()> {
        let mut dst = BytesMut::new();
        self.encoder.encode(request, &mut dst)?;
        self.stream.write_all(&dst[..]).await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
