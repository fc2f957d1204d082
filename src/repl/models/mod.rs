//! # Models Module
//!
//! Data owned by the state machine: the input slots, the multi-line buffers,
//! the read-only viewer, the response snapshot and the collection.

pub mod collection_model;
pub mod request_model;
pub mod response_model;
pub mod text_area;
pub mod text_input;
pub mod viewer;

pub use collection_model::{accumulate, Collection, EndpointEntry, RequestTarget};
pub use request_model::{HttpHeaders, RequestDraft};
pub use response_model::{ResponseSnapshot, StatusBand};
pub use text_area::TextArea;
pub use text_input::TextInput;
pub use viewer::Viewer;
