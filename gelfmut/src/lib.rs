/*!
Build GELF messages from raw log payloads and encode them as compact JSON.

The crate is split into a few main components, in order of where they appear in the life of a log event:

- **Message**: The canonical GELF message. It's constructed from a raw payload and
ambient host/facility context, and encoded by splicing its additional fields into the
serialized core fields.
- **Mutate**: Mutants that decode structured payloads (plain GELF JSON, zerolog output)
once and apply the extracted fields to any number of messages. This is where any
transformations over fields are made.
- **Path** and **Stack**: Source path cleanup and call stack inspection used to enrich
messages with the application call site.
*/

#![deny(unsafe_code)]

#[macro_use]
extern crate serde_derive;

#[macro_use]
pub mod diagnostics;

pub mod config;
pub mod error;
pub mod message;
pub mod mutate;
pub mod path;
pub mod stack;

pub use anyhow::Error;

pub use self::{
    config::Config,
    message::Message,
    mutate::{Mutant, Mutation, Pipeline},
};
