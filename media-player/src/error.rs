use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("API error: {0}")]
    Api(#[from] player_api::ApiError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
