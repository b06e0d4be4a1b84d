pub mod inputs;
pub mod schema;

pub use inputs::{normalize_key, InputBag, InputError};
pub use schema::{
    HybridStrategy, ModelKind, OperationalModel, OutsourceStrategy, PlatformStrategy,
    SolutionKind, SolutionStrategy, TeamModel, TicketModel, UnknownModelError,
    UnknownSolutionError,
};
