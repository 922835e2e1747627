pub mod amount;
pub mod config;
pub mod csv;
pub mod model;
pub mod query;
pub mod session;

pub use amount::{Amount, Rate};
pub use config::SessionConfig;
pub use model::{Action, Budget, Debt, DebtKind, Mode, ShiftEntry, ShiftId, WorkShift};
pub use query::{CreditTier, Severity, Summary};
pub use session::{Session, SessionError, ShiftFormError, TogglePolicy};
