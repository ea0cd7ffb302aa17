/*!
The canonical GELF message and its encoding.
*/

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};
use chrono::Utc;
use serde_json::Value;

use crate::{error::InvalidRawExtra, Error};

metrics! {
    encode_ok,
    encode_err
}

/**
The version of GELF messages produced.
*/
pub const PROTOCOL_VERSION: &str = "1.1";

/**
Severity levels.

These are the standard Syslog levels, with an extra `TRACE` level below `DEBUG`.
*/
pub mod level {
    pub const TRACE: i32 = -1;
    pub const EMERG: i32 = 0;
    pub const ALERT: i32 = 1;
    pub const CRIT: i32 = 2;
    pub const ERR: i32 = 3;
    pub const WARNING: i32 = 4;
    pub const NOTICE: i32 = 5;
    pub const INFO: i32 = 6;
    pub const DEBUG: i32 = 7;
}

/**
A GELF message.

Core fields are serialized in declaration order. `full_message`, `level`
and `facility` are left out of the encoded message when they're empty or zero.
*/
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub version: String,
    pub host: String,
    #[serde(rename = "short_message")]
    pub short: String,
    #[serde(rename = "full_message")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full: String,
    #[serde(rename = "timestamp")]
    pub time_unix: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub level: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub facility: String,

    /**
    Additional fields, merged into the top level of the encoded message.
    */
    #[serde(skip)]
    pub extra: HashMap<String, Value>,

    /**
    A serialized JSON object whose members are merged verbatim into the
    top level of the encoded message.
    */
    #[serde(skip)]
    pub raw_extra: Bytes,
}

fn is_zero(level: &i32) -> bool {
    *level == 0
}

impl Message {
    /**
    Create a message for a raw payload.

    The payload is kept as the full message, with surrounding whitespace removed.
    Its contents aren't inspected; use a mutant to extract structured fields.
    */
    pub fn new(payload: &[u8], host: impl Into<String>, facility: impl Into<String>) -> Self {
        Message {
            version: PROTOCOL_VERSION.to_owned(),
            host: host.into(),
            short: String::new(),
            full: String::from_utf8_lossy(payload).trim().to_owned(),
            time_unix: now(),
            level: 0,
            facility: facility.into(),
            extra: HashMap::new(),
            raw_extra: Bytes::new(),
        }
    }

    /**
    Encode the message as JSON into the given buffer.

    The core fields are serialized first. Before the closing brace, the
    members of `extra` and then the members of `raw_extra` are spliced in.
    `raw_extra` is copied byte-for-byte and never re-serialized.

    If encoding fails then the contents of the buffer are undefined and it
    should be discarded.
    */
    pub fn encode(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        match self.encode_inner(buf) {
            Ok(()) => {
                increment!(message.encode_ok);
                Ok(())
            }
            Err(err) => {
                increment!(message.encode_err);
                Err(err)
            }
        }
    }

    fn encode_inner(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        let core = serde_json::to_vec(self)?;

        // Write everything up until the final `}`
        buf.put_slice(&core[..core.len() - 1]);

        if !self.extra.is_empty() {
            let extra = serde_json::to_vec(&self.extra)?;

            buf.put_u8(b',');
            buf.put_slice(&extra[1..extra.len() - 1]);
        }

        if !self.raw_extra.is_empty() {
            let members = raw_members(&self.raw_extra)?;

            if !members.is_empty() {
                buf.put_u8(b',');
                buf.put_slice(members);
            }
        }

        buf.put_u8(b'}');

        Ok(())
    }

    /**
    Encode the message as JSON into a new buffer.
    */
    pub fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::with_capacity(256);
        self.encode(&mut buf)?;

        Ok(buf.freeze())
    }
}

/**
The members of a serialized JSON object, without its enclosing braces.
*/
fn raw_members(raw: &[u8]) -> Result<&[u8], Error> {
    let raw = trim_ascii(raw);

    match raw {
        [b'{', members @ .., b'}'] => Ok(trim_ascii(members)),
        _ => Err(InvalidRawExtra.into()),
    }
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }

    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }

    bytes
}

fn now() -> f64 {
    let now = Utc::now();

    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1_000_000_000f64
}
