//! Repository layer for database access.
//!
//! Repositories own a `DatabaseConnection` and mediate between the HTTP
//! layer and the entities: fetch, validate through the core services, then
//! persist.

mod approval;
mod definition;
mod notification;

pub use approval::{ApprovalRepository, PendingApproval, SubmittedRequest};
pub use definition::{DefinitionRepository, DefinitionWithSteps, NewDefinitionStep};
pub use notification::NotificationRepository;
