use serde_json::{Map, Value};

use crate::{
    error::InvalidField,
    message::{level, Message},
    path, Error,
};

use super::{decode, float, string, Mutant, Mutation};

/**
A mutant for JSON lines written by `zerolog`.

`message` is accepted as the short message and textual levels are mapped
onto Syslog severities. Fields that aren't part of GELF are kept in `extra`
rather than ignored.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct Zerolog;

impl Zerolog {
    pub fn parse(raw: &[u8]) -> Result<ZerologMutation, Error> {
        Ok(ZerologMutation {
            fields: decode(raw)?,
        })
    }
}

impl Mutant for Zerolog {
    fn mutation(&self, raw: &[u8]) -> Result<Box<dyn Mutation>, Error> {
        Ok(Box::new(Zerolog::parse(raw)?))
    }
}

/**
The fields decoded from a `zerolog` line.
*/
#[derive(Debug, Clone)]
pub struct ZerologMutation {
    fields: Map<String, Value>,
}

impl Mutation for ZerologMutation {
    fn apply(&self, msg: &mut Message) -> Result<(), Error> {
        for (k, v) in &self.fields {
            match k.as_str() {
                "error" | "time" => {
                    msg.extra.insert(k.clone(), Value::String(string(k, v)?));
                }
                "caller" => {
                    let caller = string(k, v)?;
                    let mut parts = path::normalize(&caller).split(':');

                    if let Some(file) = parts.next() {
                        msg.extra.insert("caller".to_owned(), file.into());
                    }

                    if let Some(line) = parts.next() {
                        msg.extra.insert("caller_line".to_owned(), line.into());
                    }
                }
                "version" => msg.version = string(k, v)?,
                "host" => msg.host = string(k, v)?,
                "short_message" | "message" => msg.short = string(k, v)?,
                "full_message" => msg.full = string(k, v)?,
                "timestamp" => msg.time_unix = float(k, v)?,
                "level" => {
                    msg.level = match v {
                        Value::Number(_) => super::level(k, v)?,
                        Value::String(name) => level_from_name(name),
                        _ => return Err(InvalidField::new(k.as_str()).into()),
                    }
                }
                "facility" => msg.facility = string(k, v)?,
                _ => {
                    msg.extra.insert(k.clone(), v.clone());
                }
            }
        }

        Ok(())
    }
}

/**
Map a `zerolog` level name onto a Syslog severity.

Names are matched exactly. Unknown names are treated as `EMERG`.
*/
pub fn level_from_name(name: &str) -> i32 {
    match name {
        "trace" => level::TRACE,
        "debug" => level::DEBUG,
        "info" => level::INFO,
        "notice" => level::NOTICE,
        "warn" => level::WARNING,
        "error" => level::ERR,
        "fatal" | "panic" => level::CRIT,
        _ => level::EMERG,
    }
}
