//! Transport layer: wire-format details (JSON encoding/decoding).

mod envelope;
mod template;
mod transmission;

pub use envelope::TransportError;
pub use template::{
    decode_template_created_response, decode_template_response, encode_template_json,
};
pub use transmission::{decode_transmission_created_response, encode_transmission_json};
