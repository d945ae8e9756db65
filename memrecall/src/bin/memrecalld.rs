use std::env;
extern crate memrecall;

fn main() {
    let args: Vec<String> = env::args().collect();
    memrecall::server::main::run(args);
}
