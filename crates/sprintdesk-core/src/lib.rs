pub mod error;
pub mod history;
pub mod points;
pub mod request;
pub mod sprint;
pub mod summary;

pub use error::SprintdeskError;
pub use history::{ChangeKind, HistoryEntry};
pub use points::Points;
pub use request::{Commitment, Request, RequestStatus, RequestType};
pub use sprint::Sprint;
pub use summary::SprintSummary;
