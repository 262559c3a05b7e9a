use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use time::macros::date;
use toml::Value;

use carerota_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

static NEXT_FILE: AtomicU64 = AtomicU64::new(0);

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: &str) -> PathBuf {
	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock before epoch.").as_nanos();
	let seq = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
	let path = env::temp_dir().join(format!("carerota_config_{nanos}_{seq}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load(payload: &str) -> carerota_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = carerota_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn validation_message(result: carerota_config::Result<Config>) -> String {
	match result {
		Err(Error::Validation { message }) => message,
		other => panic!("Expected validation error, got {other:?}."),
	}
}

#[test]
fn loads_template_config() {
	let cfg = load(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Template config should load.");

	assert_eq!(cfg.service.log_level, "info");
	assert!(!cfg.resolution.include_inactive);
	assert_eq!(cfg.resolution.max_range_days, 366);
	assert!(!cfg.ingest.strict_batch);
	assert_eq!(cfg.clock.fixed_today, None);
	assert_eq!(carerota_config::fixed_today(&cfg), None);
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let cfg = carerota_config::parse(Path::new("inline.toml"), "[service]\nlog_level = \"debug\"\n")
		.expect("Minimal config should load.");

	assert!(!cfg.resolution.include_inactive);
	assert_eq!(cfg.resolution.max_range_days, 366);
	assert!(!cfg.ingest.strict_batch);
	assert_eq!(cfg.clock.fixed_today, None);
}

#[test]
fn fixed_today_is_parsed() {
	let payload = sample_toml_with("clock", "fixed_today", Value::String("2024-01-08".to_string()));
	let cfg = load(&payload).expect("Config with fixed_today should load.");

	assert_eq!(carerota_config::fixed_today(&cfg), Some(date!(2024 - 01 - 08)));
}

#[test]
fn malformed_fixed_today_is_rejected() {
	let payload = sample_toml_with("clock", "fixed_today", Value::String("01/08/2024".to_string()));

	assert!(validation_message(load(&payload)).contains("clock.fixed_today"));
}

#[test]
fn zero_range_limit_is_rejected() {
	let payload = sample_toml_with("resolution", "max_range_days", Value::Integer(0));

	assert_eq!(
		validation_message(load(&payload)),
		"resolution.max_range_days must be greater than zero."
	);
}

#[test]
fn blank_log_level_is_rejected() {
	let payload = sample_toml_with("service", "log_level", Value::String("  ".to_string()));

	assert_eq!(validation_message(load(&payload)), "service.log_level must be non-empty.");
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("carerota_config_missing_file.toml");
	let err = carerota_config::load(&path).expect_err("Missing file should fail.");

	assert!(matches!(err, Error::ReadConfig { path: reported, .. } if reported == path));
}

#[test]
fn malformed_toml_is_a_parse_error() {
	let err = carerota_config::parse(Path::new("broken.toml"), "[service\nlog_level = 1")
		.expect_err("Broken TOML should fail.");

	assert!(matches!(err, Error::ParseConfig { .. }));
	assert!(err.to_string().starts_with("Carerota config at \"broken.toml\" is not valid TOML"));
}

#[test]
fn validation_errors_name_the_config() {
	let err = carerota_config::parse(
		Path::new("inline.toml"),
		"[service]\nlog_level = \"info\"\n\n[resolution]\nmax_range_days = 0\n",
	)
	.expect_err("Zero range limit should fail.");

	assert_eq!(
		err.to_string(),
		"Invalid carerota config: resolution.max_range_days must be greater than zero."
	);
}
