pub mod bot;
pub mod campus;
pub mod date;
pub mod engine;
pub mod lexer;
pub mod resolver;
pub mod trigger;

pub use crate::domain::model::{
    Campus, DateSpec, Outcome, Query, ReferenceClock, ResolutionFailure,
};
pub use crate::domain::ports::MenuProvider;
pub use crate::utils::error::Result;
