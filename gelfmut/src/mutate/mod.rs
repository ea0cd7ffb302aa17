/*!
Mutants extract fields from raw payloads and apply them to messages.

Building a mutation from a payload decodes it once. The mutation can then
be applied to any number of messages. Mutants are composed in a `Pipeline`,
where later mutants override the fields set by earlier ones.
*/

pub mod caller;
pub mod gelf;
pub mod zerolog;

use serde_json::{Map, Value};

use crate::{
    diagnostics::emit_debug_err,
    error::InvalidField,
    message::Message,
    Error,
};

pub use self::{caller::Caller, gelf::Gelf, zerolog::Zerolog};

metrics! {
    mutation_ok,
    mutation_err,
    decode_err
}

/**
Build a mutation from a raw payload.
*/
pub trait Mutant: Send + Sync {
    fn mutation(&self, raw: &[u8]) -> Result<Box<dyn Mutation>, Error>;
}

impl<F> Mutant for F
where
    F: Fn(&[u8]) -> Result<Box<dyn Mutation>, Error> + Send + Sync,
{
    fn mutation(&self, raw: &[u8]) -> Result<Box<dyn Mutation>, Error> {
        (self)(raw)
    }
}

/**
A set of changes to apply to a message.

Applying a mutation may fail part way through, leaving the fields it has
already set on the message.
*/
pub trait Mutation: Send + Sync {
    fn apply(&self, msg: &mut Message) -> Result<(), Error>;
}

impl<F> Mutation for F
where
    F: Fn(&mut Message) -> Result<(), Error> + Send + Sync,
{
    fn apply(&self, msg: &mut Message) -> Result<(), Error> {
        (self)(msg)
    }
}

/**
An ordered set of mutants.
*/
#[derive(Default)]
pub struct Pipeline {
    mutants: Vec<Box<dyn Mutant>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    /**
    Add a mutant to the end of the pipeline.
    */
    pub fn with(mut self, mutant: impl Mutant + 'static) -> Self {
        self.push(mutant);
        self
    }

    pub fn push(&mut self, mutant: impl Mutant + 'static) {
        self.mutants.push(Box::new(mutant));
    }

    pub fn len(&self) -> usize {
        self.mutants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutants.is_empty()
    }

    /**
    Build the mutations for a raw payload.

    If any mutant fails to build its mutation then nothing is returned.
    */
    pub fn mutation(&self, raw: &[u8]) -> Result<Mutations, Error> {
        let mutations = self
            .mutants
            .iter()
            .map(|mutant| mutant.mutation(raw))
            .collect::<Result<_, _>>()?;

        Ok(Mutations(mutations))
    }

    /**
    Build the mutations for a raw payload and apply them to a message.
    */
    pub fn apply(&self, raw: &[u8], msg: &mut Message) -> Result<(), Error> {
        self.mutation(raw)?.apply(msg)
    }
}

impl Mutant for Pipeline {
    fn mutation(&self, raw: &[u8]) -> Result<Box<dyn Mutation>, Error> {
        Ok(Box::new(Pipeline::mutation(self, raw)?))
    }
}

/**
An ordered set of mutations, applied left to right.
*/
pub struct Mutations(Vec<Box<dyn Mutation>>);

impl Mutation for Mutations {
    fn apply(&self, msg: &mut Message) -> Result<(), Error> {
        for mutation in &self.0 {
            match mutation.apply(msg) {
                Ok(()) => {
                    increment!(mutate.mutation_ok);
                }
                Err(err) => {
                    increment!(mutate.mutation_err);
                    emit_debug_err(&err, "GELF mutation failed");

                    return Err(err);
                }
            }
        }

        Ok(())
    }
}

/**
Decode a raw payload as a JSON object.
*/
pub(crate) fn decode(raw: &[u8]) -> Result<Map<String, Value>, Error> {
    serde_json::from_slice(raw).map_err(|e| {
        increment!(mutate.decode_err);

        Error::from(e).context(format!(
            "could not parse JSON from: {:?}",
            String::from_utf8_lossy(raw)
        ))
    })
}

pub(crate) fn string(k: &str, v: &Value) -> Result<String, Error> {
    match v {
        Value::String(s) => Ok(s.clone()),
        _ => Err(InvalidField::new(k).into()),
    }
}

pub(crate) fn float(k: &str, v: &Value) -> Result<f64, Error> {
    v.as_f64().ok_or_else(|| InvalidField::new(k).into())
}

pub(crate) fn level(k: &str, v: &Value) -> Result<i32, Error> {
    // Fractional levels are truncated towards zero
    float(k, v).map(|level| level as i32)
}
