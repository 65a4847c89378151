use log::error;

fn main() {
    if let Err(e) = landing_behaviors::start() {
        error!("Failed to start landing behaviors: {:?}", e);
    }
}
