pub const MEMRECALL_VERSION: &str = env!("CARGO_PKG_VERSION");
