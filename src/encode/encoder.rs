//! The encoder.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::sync::{Arc, LazyLock};
use bytes::Bytes;
use crate::error::EncodeError;
use crate::schema::Schema;
use crate::value::Value;
use super::Options;
use super::dispatch::Dispatcher;
use super::registry::Registry;


//------------ Encoder -------------------------------------------------------

/// Encodes values into OER.
///
/// An encoder uses the item encoders of a single [`Registry`]. It is cheap
/// to create and can be shared between threads.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    dispatcher: Dispatcher,
}

impl Encoder {
    /// Creates an encoder using the default registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder using the given registry.
    pub fn with_registry(registry: impl Into<Arc<Registry>>) -> Self {
        Encoder { dispatcher: Dispatcher::new(registry.into()) }
    }

    /// Returns the dispatcher of the encoder.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Encodes a value.
    ///
    /// The value is encoded as `schema` if given or as its own schema
    /// otherwise. Constructed values are framed according to the options.
    pub fn encode(
        &self,
        value: &Value,
        schema: Option<&Schema>,
        options: Options,
    ) -> Result<Bytes, EncodeError> {
        let encoded = self.dispatcher.dispatch(value, schema, options)?;
        let mut res = Vec::with_capacity(encoded.framed_len(options));
        encoded.append_framed(options, &mut res);
        Ok(res.into())
    }
}


//------------ encode --------------------------------------------------------

/// The encoder used by [`encode`].
static DEFAULT_ENCODER: LazyLock<Encoder> = LazyLock::new(Encoder::new);

/// Encodes a value using the default registry.
///
/// This is a shortcut for [`Encoder::encode`] on a process-wide encoder.
pub fn encode(
    value: &Value,
    schema: Option<&Schema>,
    options: Options,
) -> Result<Bytes, EncodeError> {
    DEFAULT_ENCODER.encode(value, schema, options)
}


//============ Tests =========================================================
