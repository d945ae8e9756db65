extern crate core_affinity;
use crate::memcache::cli::parser::{MemrecalldConfig, RuntimeType};
use crate::memcache_server::memc_tcp::{MemcacheServerConfig, MemcacheTcpServer};
use crate::memcache_server::server_context::ServerContext;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::runtime::{Builder, Runtime};

fn get_worker_thread_name() -> String {
    static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
    let id = ATOMIC_ID.fetch_add(1, Ordering::SeqCst);
    format!("memrecalld-wrk-{}", id)
}

fn create_multi_thread_runtime(worker_threads: usize) -> io::Result<Runtime> {
    Builder::new_multi_thread()
        .thread_name_fn(get_worker_thread_name)
        .worker_threads(worker_threads)
        .enable_all()
        .build()
}

fn create_current_thread_runtime() -> io::Result<Runtime> {
    Builder::new_current_thread()
        .thread_name_fn(get_worker_thread_name)
        .enable_all()
        .build()
}

fn get_server_config(config: &MemrecalldConfig) -> MemcacheServerConfig {
    MemcacheServerConfig::new(
        config.connection_limit,
        config.listen_backlog,
        config.encoding,
        config.read_buffer_size,
    )
}

// One single threaded runtime per worker thread. Every runtime binds its own
// listener on the same address, the kernel spreads connections over them.
fn create_current_thread_server(
    config: MemrecalldConfig,
    ctxt: &ServerContext,
) -> io::Result<Runtime> {
    let addr = SocketAddr::new(config.listen_address, config.port);
    let memc_config = get_server_config(&config);
    let core_ids = core_affinity::get_core_ids().unwrap_or_default();
    if core_ids.is_empty() {
        warn!("Cannot read core ids, worker threads won't be pinned");
    }

    for i in 0..config.threads {
        let cache = ctxt.cache();
        let cancellation_token = ctxt.cancellation_token();
        let core_id = if core_ids.is_empty() {
            None
        } else {
            Some(core_ids[i % core_ids.len()])
        };
        std::thread::spawn(move || {
            debug!("Creating runtime {}", i);
            if let Some(core_id) = core_id {
                if core_affinity::set_for_current(core_id) {
                    debug!(
                        "Thread pinned {:?} to core {:?}",
                        std::thread::current().id(),
                        core_id.id
                    );
                } else {
                    warn!("Cannot pin thread to core {}", core_id.id);
                }
            }
            let child_runtime = match create_current_thread_runtime() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("Cannot create runtime {}: {}", i, err);
                    cancellation_token.cancel();
                    return;
                }
            };
            let mut tcp_server =
                MemcacheTcpServer::new(memc_config, cache, cancellation_token.clone());
            if let Err(err) = child_runtime.block_on(tcp_server.run(addr)) {
                error!("Listener {} failed: {}", i, err);
                cancellation_token.cancel();
            }
        });
    }
    create_current_thread_runtime()
}

fn create_threadpool_server(config: MemrecalldConfig, ctxt: &ServerContext) -> io::Result<Runtime> {
    let addr = SocketAddr::new(config.listen_address, config.port);
    let memc_config = get_server_config(&config);
    let runtime = create_multi_thread_runtime(config.threads)?;
    let cancellation_token = ctxt.cancellation_token();
    let mut tcp_server =
        MemcacheTcpServer::new(memc_config, ctxt.cache(), cancellation_token.clone());
    runtime.spawn(async move {
        if let Err(err) = tcp_server.run(addr).await {
            error!("Listener failed: {}", err);
            cancellation_token.cancel();
        }
    });
    Ok(runtime)
}

pub fn create_memrecall_server(
    config: MemrecalldConfig,
    ctxt: &ServerContext,
) -> io::Result<Runtime> {
    match config.runtime_type {
        RuntimeType::CurrentThread => create_current_thread_server(config, ctxt),
        RuntimeType::MultiThread => create_threadpool_server(config, ctxt),
    }
}

/// Runs the server until the context's cancellation token is cancelled.
pub fn start_memrecall_server_with_ctxt(
    config: MemrecalldConfig,
    ctxt: ServerContext,
) -> io::Result<()> {
    let parent_runtime = create_memrecall_server(config, &ctxt)?;
    let cancellation_token = ctxt.cancellation_token();
    parent_runtime.block_on(cancellation_token.cancelled());
    Ok(())
}

/// Same as [`start_memrecall_server_with_ctxt`] but also stops on Ctrl-C.
pub fn start_memrecall_server(config: MemrecalldConfig, ctxt: ServerContext) -> io::Result<()> {
    let parent_runtime = create_memrecall_server(config, &ctxt)?;
    let cancellation_token = ctxt.cancellation_token();
    parent_runtime.block_on(async move {
        tokio::select! {
            _ = cancellation_token.cancelled() => {}
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    info!("Interrupted, shutting down");
                    cancellation_token.cancel();
                }
                Err(err) => {
                    error!("Cannot listen for shutdown signal: {}", err);
                    cancellation_token.cancelled().await;
                }
            }
        }
    });
    Ok(())
}
