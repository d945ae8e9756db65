use crate::connection::TextConnection;
use crate::params_parser::MemcacheClientConfig;
use log::{debug, info};
use rand::Rng;
use std::io;
use std::net::SocketAddr;
use std::thread;
use std::time::{Duration, Instant};

fn server_addr(config: &MemcacheClientConfig) -> SocketAddr {
    SocketAddr::new(config.server_address, config.port)
}

fn timed<T>(action: impl FnOnce() -> io::Result<T>) -> io::Result<(T, Duration)> {
    let started = Instant::now();
    let result = action()?;
    Ok((result, started.elapsed()))
}

fn report(label: &str, response: &str, elapsed: Duration) {
    println!("{} ({:?}):\n{}", label, elapsed, response.trim_end());
}

/// Runs the fixed sequence over a single connection and prints every response.
pub fn smoke(config: &MemcacheClientConfig) -> io::Result<()> {
    let mut connection = TextConnection::connect(server_addr(config), config.encoding)?;

    let (response, elapsed) = timed(|| connection.get(&["key_1"]))?;
    report("GET key_1", &response, elapsed);
    let (response, elapsed) = timed(|| connection.get(&["key_1", "key_2"]))?;
    report("GET key_1 key_2", &response, elapsed);
    let (response, elapsed) = timed(|| connection.set("key_1", "value_1"))?;
    report("SET key_1", &response, elapsed);
    let (response, elapsed) = timed(|| connection.get(&["key_1"]))?;
    report("GET key_1", &response, elapsed);
    let (response, elapsed) = timed(|| connection.set("key_2", "value for key 2"))?;
    report("SET key_2", &response, elapsed);
    let (response, elapsed) = timed(|| connection.get(&["key_1", "key_2", "key_3"]))?;
    report("GET key_1 key_2 key_3", &response, elapsed);
    Ok(())
}

fn create_random_value(size: usize) -> String {
    let mut rng = rand::rng();
    (0..size)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect()
}

fn run_client(
    client: u32,
    addr: SocketAddr,
    config: MemcacheClientConfig,
) -> io::Result<(u32, Duration)> {
    let mut connection = TextConnection::connect(addr, config.encoding)?;
    let value = create_random_value(config.value_size as usize);
    let writes = config.requests / 2;
    let mut total = Duration::ZERO;
    let mut rng = rand::rng();

    for idx in 0..writes {
        let key = format!("client_{}_key_{}", client, idx);
        let (_response, elapsed) = timed(|| connection.set(&key, &value))?;
        total += elapsed;
    }
    for _ in 0..(config.requests - writes) {
        let key = format!("client_{}_key_{}", client, rng.random_range(0..writes));
        let (_response, elapsed) = timed(|| connection.get(&[key.as_str()]))?;
        total += elapsed;
    }
    debug!("Client {} done in {:?}", client, total);
    Ok((config.requests, total))
}

/// Spawns the configured number of clients, each on its own thread.
pub fn load(config: &MemcacheClientConfig) -> io::Result<()> {
    let addr = server_addr(config);
    let handles: Vec<_> = (0..config.clients)
        .map(|client| {
            let config = config.clone();
            thread::spawn(move || run_client(client, addr, config))
        })
        .collect();

    let mut requests: u32 = 0;
    let mut total = Duration::ZERO;
    for handle in handles {
        let (client_requests, client_total) = handle
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "client thread panicked"))??;
        requests += client_requests;
        total += client_total;
    }

    info!("Requests sent: {}", requests);
    println!(
        "{} clients, {} requests, average latency {:?}",
        config.clients,
        requests,
        total / requests.max(1)
    );
    Ok(())
}
