use crate::ExerciseName;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("workout contains no sets")]
    EmptyWorkout,
    #[error("{0} is still active")]
    ExerciseActive(ExerciseName),
    #[error("workout rejected with status {0}")]
    Rejected(u16),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for SubmitError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => SubmitError::Storage(storage),
            ReadError::Other(other) => SubmitError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}
