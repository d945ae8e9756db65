use lazy_static::lazy_static;

use std::sync::Mutex;

const STARTING_PORT: u16 = 20000;
pub struct PseudoRandomMemrecalldPort {
    port: u16,
}

impl PseudoRandomMemrecalldPort {
    pub fn new() -> PseudoRandomMemrecalldPort {
        PseudoRandomMemrecalldPort {
            port: STARTING_PORT,
        }
    }

    pub fn get_next_port(&mut self) -> u16 {
        self.port += 10;
        self.port
    }
}

lazy_static! {
    pub static ref pseudo_random_port: Mutex<PseudoRandomMemrecalldPort> =
        Mutex::new(PseudoRandomMemrecalldPort::new());
}
