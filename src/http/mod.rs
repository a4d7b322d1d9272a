//! HTTP protocol layer module
//!
//! Response builders shared by the router, the demo handlers and the connection layer.

pub mod response;

pub use response::{
    build_400_response, build_404_response, build_413_response, build_json_response,
    build_text_response,
};
