#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary TOML must either parse into a Config or fail cleanly, and
    // validation of whatever parses must never panic.
    match toml::from_str::<thermolog_config::Config>(data) {
        Ok(cfg) => {
            let _ = cfg.validate();
        }
        Err(_) => {}
    }
});
