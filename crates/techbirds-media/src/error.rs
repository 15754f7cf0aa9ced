use techbirds_core::MediaId;

/// Transitions a controller refuses to make. Network failures never surface
/// here; they become messages in controller state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    #[error("No media item is open")]
    NoItemOpen,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("No media items selected")]
    NothingSelected,

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Select a file to upload")]
    NoFileSelected,

    #[error("Media item {0} is not in the current listing")]
    NotListed(MediaId),
}
