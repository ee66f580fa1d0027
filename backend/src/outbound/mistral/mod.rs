//! Chat-completion outbound adapter (Mistral-compatible wire format).

mod dto;
mod http_source;

pub use http_source::{
    MistralHttpSource, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT,
};
