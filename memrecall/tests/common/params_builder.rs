use memrecall::{memcache::cli::parser::RuntimeType, protocol::text::encoding::TextEncoding};

pub struct MemrecalldServerParamsBuilder {
    runtime: RuntimeType,
    encoding: TextEncoding,
    capacity: usize,
    threads: usize,
    port: u16,
}

impl MemrecalldServerParamsBuilder {
    pub fn new() -> MemrecalldServerParamsBuilder {
        MemrecalldServerParamsBuilder {
            runtime: RuntimeType::CurrentThread,
            encoding: TextEncoding::Utf16Le,
            capacity: 2048,
            threads: 2,
            port: 11211,
        }
    }

    #[allow(dead_code)]
    pub fn with_runtime(&mut self, runtime: RuntimeType) -> &mut Self {
        self.runtime = runtime;
        self
    }

    #[allow(dead_code)]
    pub fn with_encoding(&mut self, encoding: TextEncoding) -> &mut Self {
        self.encoding = encoding;
        self
    }

    #[allow(dead_code)]
    pub fn with_capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    pub fn with_port(&mut self, port: u16) -> &mut Self {
        self.port = port;
        self
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn build(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        result.push(String::from("./target/debug/memrecalld"));
        match self.runtime {
            RuntimeType::CurrentThread => {
                result.push(String::from("--runtime-type"));
                result.push(String::from("current-thread"));
            }
            RuntimeType::MultiThread => {
                result.push(String::from("--runtime-type"));
                result.push(String::from("multi-thread"));
            }
        }

        match self.encoding {
            TextEncoding::Utf16Le => {
                result.push(String::from("--encoding"));
                result.push(String::from("utf16-le"));
            }
            TextEncoding::Utf8 => {
                result.push(String::from("--encoding"));
                result.push(String::from("utf8"));
            }
        }

        result.push(String::from("--capacity"));
        result.push(self.capacity.to_string());

        result.push(String::from("--threads"));
        result.push(self.threads.to_string());

        result.push(String::from("--port"));
        result.push(self.port.to_string());
        // result.push(String::from("-vvv"));
        result
    }
}
