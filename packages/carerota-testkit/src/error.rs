pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Domain(#[from] carerota_domain::Error),
	#[error(transparent)]
	Config(#[from] carerota_config::Error),
}
