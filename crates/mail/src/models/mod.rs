//! Domain models for label metadata

mod label;
mod message;

pub use label::{Label, LabelDetail, LabelId};
pub use message::MessageListResult;
