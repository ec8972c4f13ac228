use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A map row carries a type outside `Collaborative`, `Competitive`, `Personal`.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown map type '{0}' stored in database")]
    UnknownMapType(String),

    /// A participant row carries a role outside `Owner`, `Collaborator`, `Competitor`.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown participant role '{0}' stored in database")]
    UnknownParticipantRole(String),
}
