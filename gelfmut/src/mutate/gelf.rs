use serde_json::{Map, Value};

use crate::{message::Message, Error};

use super::{decode, float, level, string, Mutant, Mutation};

/**
A mutant for payloads that are already GELF-shaped JSON.

Fields prefixed with `_` are additional fields and are kept in `extra`.
Core GELF fields are copied onto the message. Anything else is ignored.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct Gelf;

impl Gelf {
    pub fn parse(raw: &[u8]) -> Result<GelfMutation, Error> {
        Ok(GelfMutation {
            fields: decode(raw)?,
        })
    }
}

impl Mutant for Gelf {
    fn mutation(&self, raw: &[u8]) -> Result<Box<dyn Mutation>, Error> {
        Ok(Box::new(Gelf::parse(raw)?))
    }
}

/**
The fields decoded from a GELF payload.
*/
#[derive(Debug, Clone)]
pub struct GelfMutation {
    fields: Map<String, Value>,
}

impl Mutation for GelfMutation {
    fn apply(&self, msg: &mut Message) -> Result<(), Error> {
        for (k, v) in &self.fields {
            if k.starts_with('_') {
                msg.extra.insert(k.clone(), v.clone());
                continue;
            }

            match k.as_str() {
                "version" => msg.version = string(k, v)?,
                "host" => msg.host = string(k, v)?,
                "short_message" => msg.short = string(k, v)?,
                "full_message" => msg.full = string(k, v)?,
                "timestamp" => msg.time_unix = float(k, v)?,
                "level" => msg.level = level(k, v)?,
                "facility" => msg.facility = string(k, v)?,
                _ => (),
            }
        }

        Ok(())
    }
}
