use clap::Parser;
use geosquare::app::{GeosquareApp, GeosquareAppError};

fn main() -> Result<(), GeosquareAppError> {
    env_logger::init();
    let args = GeosquareApp::parse();
    args.op.run()
}
