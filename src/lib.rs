pub mod catalog;
pub mod error;
pub mod games;
pub mod result;
pub mod route;
pub mod session;
pub mod store;

#[cfg(feature = "gui")]
pub mod ui;

pub use catalog::{PROBLEMS, Problem, ProblemKind, problem_by_id};
pub use error::StoreError;
pub use games::{Controller, PendingStep, SolvedRule, Status, Tally};
pub use result::{Encouragement, GameResult};
pub use route::{Navigator, Route};
pub use session::Session;
pub use store::Storage;
