use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io;
use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tracing::{debug, error};

use super::handler::RequestProcessor;
use crate::cache::cache::Cache;
use crate::protocol::text::connection::MemcacheTextConnection;
use crate::protocol::text::encoding::TextEncoding;
use crate::protocol::text::request::Request;

pub struct ClientConfig {
    pub(crate) encoding: TextEncoding,
    pub(crate) read_buffer_size: usize,
}

pub struct Client {
    stream: MemcacheTextConnection<TcpStream>,
    addr: SocketAddr,
    processor: RequestProcessor,
    /// Max connection semaphore, one permit is returned when the client is dropped.
    limit_connections: Arc<Semaphore>,
}

impl Client {
    pub fn new(
        cache: Arc<dyn Cache + Send + Sync>,
        socket: TcpStream,
        addr: SocketAddr,
        config: ClientConfig,
        limit_connections: Arc<Semaphore>,
    ) -> Self {
        Client {
            stream: MemcacheTextConnection::new(
                socket,
                config.encoding,
                config.read_buffer_size,
            ),
            addr,
            processor: RequestProcessor::new(cache),
            limit_connections,
        }
    }

    pub async fn handle(&mut self) {
        debug!("New client connected: {}", self.addr);

        // Responses for everything decoded from one read are written before
        // the next read, in decoding order.
        loop {
            match self.stream.read_requests().await {
                Ok(requests) => {
                    if self.stream.is_closed() {
                        debug!("Connection closed: {}", self.addr);
                        return;
                    }
                    for request in requests {
                        if let Err(err) = self.handle_request(request).await {
                            error!("Error on sending response; error = {:?}", err);
                            return;
                        }
                    }
                }
                Err(err) => {
                    error!("Error when reading frame; error = {:?}", err);
                    if let Err(_e) = self.stream.shutdown().await.map_err(log_error) {}
                    return;
                }
            }
        }
    }

    async fn handle_request(&mut self, mut request: Request) -> io::Result<()> {
        debug!("Got request {:?}", request);
        self.processor.process_request(&mut request);
        self.stream.write(&request).await
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        // runs on panic too, so the listener always gets its permit back
        self.limit_connections.add_permits(1);
    }
}

fn log_error(e: io::Error) {
    // peer already gone
    if e.kind() == io::ErrorKind::NotConnected {
        info!("Error: {}", e);
    } else {
        error!("Error: {}", e);
    }
}
