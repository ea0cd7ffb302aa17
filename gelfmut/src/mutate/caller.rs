use std::sync::Arc;

use serde_json::Value;

use crate::{message::Message, stack, Error};

use super::{Mutant, Mutation};

/**
Configuration for caller enrichment.
*/
#[derive(Debug, Clone)]
pub struct Config {
    /**
    The number of frames to skip above the function applying the mutation.
    */
    pub depth: usize,
    /**
    Path suffixes of frames to skip over, matched against normalized paths.

    These are the files of logging plumbing that sit between the application
    and the mutation. Matching is by suffix only, so the defaults also skip an
    application's own `mutate/mod.rs` or `mutate/caller.rs`. Replace the list
    if those paths exist in the calling crate.
    */
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            depth: 0,
            ignore: vec!["mutate/mod.rs".to_owned(), "mutate/caller.rs".to_owned()],
        }
    }
}

/**
A mutant that records the source location the message was produced from.

The payload isn't inspected. When applied, the mutation walks the call stack
and stores the first file and line outside the ignored paths into the `file`
and `line` extra fields. If no frame qualifies then `???` and `0` are stored.
*/
#[derive(Debug, Clone)]
pub struct Caller {
    depth: usize,
    ignore: Arc<[String]>,
}

impl Caller {
    pub fn new(config: Config) -> Self {
        Caller {
            depth: config.depth,
            ignore: config.ignore.into(),
        }
    }

    pub fn parse(&self, _: &[u8]) -> CallerMutation {
        CallerMutation {
            depth: self.depth,
            ignore: self.ignore.clone(),
        }
    }
}

impl Default for Caller {
    fn default() -> Self {
        Caller::new(Config::default())
    }
}

impl Mutant for Caller {
    fn mutation(&self, raw: &[u8]) -> Result<Box<dyn Mutation>, Error> {
        Ok(Box::new(self.parse(raw)))
    }
}

#[derive(Debug, Clone)]
pub struct CallerMutation {
    depth: usize,
    ignore: Arc<[String]>,
}

impl Mutation for CallerMutation {
    #[inline(never)]
    fn apply(&self, msg: &mut Message) -> Result<(), Error> {
        let caller = stack::find_caller(self.depth, &self.ignore[..]);

        msg.extra.insert("file".to_owned(), Value::String(caller.file));
        msg.extra.insert("line".to_owned(), caller.line.into());

        Ok(())
    }
}
