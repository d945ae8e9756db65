use socket2::{Domain, SockAddr, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use tracing::{debug, error, info};

use super::client_handler;
use crate::cache::cache::Cache;
use crate::protocol::text::encoding::TextEncoding;

#[derive(Clone, Copy)]
pub struct MemcacheServerConfig {
    connection_limit: u32,
    listen_backlog: u32,
    encoding: TextEncoding,
    read_buffer_size: usize,
}

impl MemcacheServerConfig {
    pub fn new(
        connection_limit: u32,
        listen_backlog: u32,
        encoding: TextEncoding,
        read_buffer_size: usize,
    ) -> Self {
        MemcacheServerConfig {
            connection_limit,
            listen_backlog,
            encoding,
            read_buffer_size,
        }
    }
}

#[derive(Clone)]
pub struct MemcacheTcpServer {
    cache: Arc<dyn Cache + Send + Sync>,
    limit_connections: Arc<Semaphore>,
    config: MemcacheServerConfig,
    cancellation_token: CancellationToken,
}

impl MemcacheTcpServer {
    pub fn new(
        config: MemcacheServerConfig,
        cache: Arc<dyn Cache + Send + Sync>,
        cancellation_token: CancellationToken,
    ) -> MemcacheTcpServer {
        MemcacheTcpServer {
            cache,
            limit_connections: Arc::new(Semaphore::new(config.connection_limit as usize)),
            config,
            cancellation_token,
        }
    }

    pub async fn run(&mut self, addr: SocketAddr) -> io::Result<()> {
        let listener = self.get_tcp_listener(addr)?;
        loop {
            tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    info!("Stopping listener on: {}", addr);
                    return Ok(());
                }
                connection = listener.accept() => {
                    match connection {
                        Ok((socket, peer_addr)) => {
                            if let Err(err) = socket.set_nodelay(true) {
                                error!("Cannot set TCP_NODELAY for {}: {}", peer_addr, err);
                            }
                            match self.limit_connections.acquire().await {
                                Ok(permit) => permit.forget(),
                                Err(err) => {
                                    error!("Connection limit semaphore closed: {}", err);
                                    return Ok(());
                                }
                            }
                            let mut client = client_handler::Client::new(
                                Arc::clone(&self.cache),
                                socket,
                                peer_addr,
                                self.get_client_config(),
                                Arc::clone(&self.limit_connections),
                            );
                            tokio::spawn(async move { client.handle().await });
                        },
                        Err(err) => {
                            error!("Accept error: {}", err);
                        }
                    }
                }
            }
        }
    }

    fn get_tcp_listener(&mut self, addr: SocketAddr) -> Result<TcpListener, std::io::Error> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, None)?;
        socket.set_reuse_address(true)?;
        socket.set_reuse_port(true)?;
        socket.set_nonblocking(true)?;
        debug!("Binding to addr: {:?}", addr);
        let sock_addr = SockAddr::from(addr);
        if let Err(err) = socket.bind(&sock_addr) {
            error!("Can't bind to: {:?}, err {:?}", addr, err);
            return Err(err);
        }

        if let Err(err) = socket.listen(self.config.listen_backlog as i32) {
            error!("Listen error: {:?}", err);
            return Err(err);
        }

        let std_listener: std::net::TcpListener = socket.into();
        TcpListener::from_std(std_listener)
    }

    fn get_client_config(&self) -> client_handler::ClientConfig {
        client_handler::ClientConfig {
            encoding: self.config.encoding,
            read_buffer_size: self.config.read_buffer_size,
        }
    }
}
