pub mod controller;
pub mod pending;
pub mod ports;
pub mod runner;

pub use controller::{
    PendingResult, QuizSession, SessionError, SessionOutcome, SessionStatus,
    DEFAULT_SESSION_TIME_LIMIT_SECS,
};
pub use pending::PendingResults;
pub use ports::{IdentityProvider, QuestionSource, ResultSink};
pub use runner::{run_session, SessionCommand, SessionSnapshot};
