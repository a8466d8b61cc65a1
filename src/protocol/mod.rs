//! The request/response protocol between the engine and its players.
//!
//! - `request`: request shapes and all-or-nothing response validation
//! - `channel`: the decision channel the engine blocks on, and the
//!   `Process` result every event produces

pub mod request;
pub mod channel;

pub use request::{
    Choice, RawResponse, RawResponses, Request, RequestBatch, RequestField, Response, Responses,
};
pub use channel::{DecisionChannel, IntoProcess, Process, RandomChannel, Reply};
