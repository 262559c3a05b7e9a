mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Clock, Config, Ingest, Resolution, Service};

use std::{fs, path::Path};

use time::{Date, macros::format_description};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(path, &raw)
}

pub fn parse(path: &Path, raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.resolution.max_range_days == 0 {
		return Err(Error::Validation {
			message: "resolution.max_range_days must be greater than zero.".to_string(),
		});
	}

	if let Some(raw) = cfg.clock.fixed_today.as_deref()
		&& parse_fixed_today(raw).is_none()
	{
		return Err(Error::Validation {
			message: format!("clock.fixed_today must be a YYYY-MM-DD date, got {raw:?}."),
		});
	}

	Ok(())
}

/// The pinned "today" from `clock.fixed_today`, if configured.
pub fn fixed_today(cfg: &Config) -> Option<Date> {
	cfg.clock.fixed_today.as_deref().and_then(parse_fixed_today)
}

fn parse_fixed_today(raw: &str) -> Option<Date> {
	Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

fn normalize(cfg: &mut Config) {
	if cfg.clock.fixed_today.as_deref().map(|value| value.trim().is_empty()).unwrap_or(false) {
		cfg.clock.fixed_today = None;
	}

	cfg.service.log_level = cfg.service.log_level.trim().to_string();
}
