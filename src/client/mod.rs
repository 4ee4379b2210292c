//! Client side of the task API.
//!
//! [`TaskApiClient`] talks HTTP, [`SessionHolder`] keeps the signed-in
//! session across runs, and [`TaskBoard`] turns fetched snapshots into the
//! filtered, ordered list shown to the user.

mod board;
mod error;
mod http;
mod record;
mod session;

#[cfg(test)]
mod tests;

pub use board::{RefreshTicket, TaskBoard};
pub use error::{ClientError, SessionFileError};
pub use http::TaskApiClient;
pub use record::{TaskDraft, TaskPatch, TaskRecord};
pub use session::{SessionFile, SessionHolder};
