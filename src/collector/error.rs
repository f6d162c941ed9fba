#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("collector requires a {0}")]
    MissingCollaborator(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
