use std::io;

use memrecall::{
    memcache,
    memcache_server::{
        runtime_builder::start_memrecall_server_with_ctxt, server_context::ServerContext,
    },
    protocol::text::encoding::TextEncoding,
};
use tokio_util::sync::CancellationToken;

use crate::common::{random_port::pseudo_random_port, MemrecalldServerParamsBuilder};

pub struct MemrecalldTestServer {
    thread_join_handle: Option<std::thread::JoinHandle<io::Result<()>>>,
    cancellation_token: CancellationToken,
    port: u16,
    encoding: TextEncoding,
}

impl MemrecalldTestServer {
    fn new(
        thread_join_handle: std::thread::JoinHandle<io::Result<()>>,
        cancellation_token: CancellationToken,
        port: u16,
        encoding: TextEncoding,
    ) -> MemrecalldTestServer {
        MemrecalldTestServer {
            thread_join_handle: Some(thread_join_handle),
            cancellation_token,
            port,
            encoding,
        }
    }

    fn kill(&mut self) -> io::Result<()> {
        self.cancellation_token.cancel();
        match self.thread_join_handle.take() {
            Some(thread_join_handle) => match thread_join_handle.join() {
                Ok(result) => result,
                Err(_) => Err(io::Error::new(io::ErrorKind::Other, "server thread panicked")),
            },
            None => Ok(()),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }
}

impl Drop for MemrecalldTestServer {
    fn drop(&mut self) {
        match self.kill() {
            Ok(_) => {}
            Err(err) => {
                eprintln!("Problem when stopping server: {err}");
            }
        }
    }
}

fn spawn_server_args(args: Vec<String>, encoding: TextEncoding) -> MemrecalldTestServer {
    let config = memcache::cli::parser::parse(args).unwrap();
    let store_config = memcache::builder::MemcacheStoreConfig::new(config.capacity);
    let ctxt = ServerContext::get_default_server_context(store_config).unwrap();
    let cancellation_token = ctxt.cancellation_token();
    let port = config.port;
    let handle = std::thread::spawn(move || start_memrecall_server_with_ctxt(config, ctxt));
    MemrecalldTestServer::new(handle, cancellation_token, port, encoding)
}

pub fn spawn_server(mut params: MemrecalldServerParamsBuilder) -> MemrecalldTestServer {
    let port = pseudo_random_port.lock().unwrap().get_next_port();
    params.with_port(port);
    let args = params.build();
    spawn_server_args(args, params.encoding())
}
