use rstest::rstest;
use thermolog_config::{Config, ConfigError, load_toml};

#[rstest]
#[case(100)]
#[case(610)]
#[case(83_334)]
#[case(200_000)]
fn rejects_out_of_band_sample_rates(#[case] hz: u32) {
    let toml = format!("[adc]\nsample_rate_hz = {hz}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("rate must be rejected, not clamped");
    assert!(
        matches!(err, ConfigError::SampleRateOutOfRange { .. }),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case(611)]
#[case(20_000)]
#[case(83_333)]
fn accepts_in_band_sample_rates(#[case] hz: u32) {
    let toml = format!("[adc]\nsample_rate_hz = {hz}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    cfg.validate().expect("in-band rate must validate");
}

#[test]
fn default_config_validates() {
    Config::default().validate().expect("shipping defaults");
}

#[test]
fn rejects_zero_samples_per_read() {
    let cfg = load_toml("[adc]\nsamples_per_read = 0\n").expect("parse TOML");
    assert_eq!(
        cfg.validate().expect_err("zero read budget"),
        ConfigError::ZeroSamplesPerRead
    );
}

#[test]
fn rejects_read_budget_larger_than_store() {
    let cfg = load_toml("[adc]\nsamples_per_read = 600\nmax_store_samples = 512\n")
        .expect("parse TOML");
    let err = cfg.validate().expect_err("budget beyond store");
    assert!(matches!(err, ConfigError::ReadLargerThanStore { .. }));
}

#[rstest]
#[case(8)]
#[case(13)]
fn rejects_unsupported_bit_widths(#[case] bits: u8) {
    let toml = format!("[adc]\nbit_width = {bits}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    assert_eq!(
        cfg.validate().expect_err("unsupported width"),
        ConfigError::UnsupportedBitWidth(bits)
    );
}

#[rstest]
#[case(9)]
#[case(12)]
fn accepts_supported_bit_widths(#[case] bits: u8) {
    let toml = format!("[adc]\nbit_width = {bits}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    cfg.validate().expect("supported width");
}

#[test]
fn rejects_zero_report_interval() {
    let cfg = load_toml("[report]\ninterval_ms = 0\n").expect("parse TOML");
    assert_eq!(
        cfg.validate().expect_err("zero interval"),
        ConfigError::ZeroReportInterval
    );
}

#[rstest]
#[case("0.0")]
#[case("-3.3")]
#[case("nan")]
fn rejects_non_positive_vref(#[case] vref: &str) {
    let toml = format!("[calibration]\nvref_v = {vref}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("bad vref");
    assert!(matches!(err, ConfigError::InvalidVref(_)));
}

#[test]
fn rejects_non_finite_coefficients() {
    let toml = "[calibration.polynomial]\ncorr_c1 = inf\n";
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("non-finite coefficient");
    assert_eq!(err, ConfigError::NonFiniteCoefficient("polynomial.corr_c1"));
}
