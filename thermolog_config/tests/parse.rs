use thermolog_config::{PolicyKind, load_toml};

#[test]
fn full_config_parses() {
    let toml = r#"
[adc]
channel = 6
unit = 1
attenuation_db = 12
bit_width = 10
sample_rate_hz = 20000
samples_per_read = 100
max_store_samples = 512

[report]
interval_ms = 1000
policy = "polynomial"

[calibration]
vref_v = 3.3

[calibration.polynomial]
corr_c0 = 40.4597
corr_c1 = 0.976323
corr_c2 = 0.000163748
corr_c3 = -1.76614e-7
temp_c0 = 129.85
temp_c1 = -0.150499
temp_c2 = 0.0000343308

[calibration.linear]
slope_c_per_code = -0.11373
offset_c = 121.657

[logging]
level = "debug"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    assert_eq!(cfg.adc.channel, 6);
    assert_eq!(cfg.adc.sample_rate_hz, 20_000);
    assert_eq!(cfg.report.policy, PolicyKind::Polynomial);
    assert_eq!(cfg.calibration.polynomial.corr_c1, 0.976323);
    assert_eq!(cfg.calibration.linear.offset_c, 121.657);
    assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
    cfg.validate().expect("validate");
}

#[test]
fn empty_input_yields_the_shipping_defaults() {
    let cfg = load_toml("").expect("parse empty TOML");
    assert_eq!(cfg.adc.sample_rate_hz, 20_000);
    assert_eq!(cfg.adc.samples_per_read, 100);
    assert_eq!(cfg.adc.bit_width, 10);
    assert_eq!(cfg.report.interval_ms, 1000);
    assert_eq!(cfg.report.policy, PolicyKind::Polynomial);
    assert_eq!(cfg.calibration.vref_v, 3.3);
    assert!(cfg.logging.file.is_none());
}

#[test]
fn partial_sections_keep_the_remaining_defaults() {
    let cfg = load_toml("[adc]\nsample_rate_hz = 40000\n").expect("parse TOML");
    assert_eq!(cfg.adc.sample_rate_hz, 40_000);
    assert_eq!(cfg.adc.samples_per_read, 100);
    assert_eq!(cfg.adc.max_store_samples, 512);
}

#[test]
fn linear_policy_parses() {
    let cfg = load_toml("[report]\npolicy = \"linear\"\n").expect("parse TOML");
    assert_eq!(cfg.report.policy, PolicyKind::Linear);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    assert!(load_toml("[report]\npolicy = \"cubic\"\n").is_err());
}
