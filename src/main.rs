use beatbuddy_lib::BeatBuddyError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match beatbuddy_lib::run() {
        Ok(()) => {}
        Err(BeatBuddyError::Usage(usage)) => {
            eprintln!("{}", usage);
            std::process::exit(2);
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
