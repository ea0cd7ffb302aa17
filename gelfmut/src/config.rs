use std::{env, str::FromStr};

use crate::{diagnostics, message::Message, mutate::caller, Error};

/**
Ambient context for building messages.
*/
#[derive(Debug, Clone)]
pub struct Config {
    /**
    The host reported on every message.
    */
    pub host: String,
    /**
    The facility reported on every message.
    */
    pub facility: String,
    pub caller: caller::Config,
    pub diagnostics: diagnostics::Config,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "localhost".to_owned(),
            facility: String::new(),
            caller: Default::default(),
            diagnostics: Default::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Config::default();

        read_environment(&mut config.host, "HOSTNAME")?;
        read_environment(&mut config.host, "GELF_HOST")?;
        read_environment(&mut config.facility, "GELF_FACILITY")?;
        read_environment(&mut config.caller.depth, "GELF_CALLER_DEPTH")?;

        let mut ignore = String::new();
        read_environment(&mut ignore, "GELF_CALLER_IGNORE")?;
        if !ignore.is_empty() {
            config.caller.ignore = split_list(&ignore);
        }

        if is_truthy("GELF_ENABLE_DIAGNOSTICS")? {
            config.diagnostics.min_level = diagnostics::Level::Debug;
        }

        Ok(config)
    }

    /**
    Create a message for a raw payload using the configured host and facility.
    */
    pub fn message(&self, payload: &[u8]) -> Message {
        Message::new(payload, self.host.as_str(), self.facility.as_str())
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn is_truthy(name: impl AsRef<str>) -> Result<bool, Error> {
    match env::var(name.as_ref()) {
        // The environment variable contains a truthy value
        Ok(ref v) if v == "True" || v == "true" => Ok(true),
        // The environment variable is not set or doesn't contain
        // a truthy value
        Ok(_) | Err(env::VarError::NotPresent) => Ok(false),
        // The environment variable is invalid
        Err(e) => Err(e.into()),
    }
}

fn read_environment<T>(into: &mut T, name: impl AsRef<str>) -> Result<(), Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let name = name.as_ref();

    match env::var(name) {
        // The environment variable exists, but is empty
        Ok(ref v) if v.is_empty() => Ok(()),
        // The environment variable does not exist
        Err(env::VarError::NotPresent) => Ok(()),
        // The environment variable is invalid
        Err(e) => Err(e.into()),
        // The environment variable has a value
        Ok(v) => {
            *into = T::from_str(&v).map_err(|e| {
                Error::from(e).context(format!("could not read {} from {:?}", name, v))
            })?;

            Ok(())
        }
    }
}
