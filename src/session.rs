use log::{debug, warn};

use crate::model::IpSet;
use crate::runner::{CommandRunner, Runner};
use crate::types::{type_name, Error, SetType};

/// This is the main entry for all the operations. A session holds no state
/// besides the runner, every call spawns the utility once and waits for it.
#[derive(Debug, Clone, Default)]
pub struct Session<R = CommandRunner> {
    runner: R,
}

impl Session {
    /// A session running `ipset` found through `PATH`.
    pub fn new() -> Session {
        Self::default()
    }
}

impl<R: Runner> Session<R> {
    pub fn with_runner(runner: R) -> Session<R> {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn run_cmd(&self, args: &[&str]) -> Result<String, Error> {
        debug!("ipset {:?}", args);
        self.runner.run(args)
    }

    /// Run the commands taking a name, an argument and pass-through options, like create/add
    fn options_cmd(&self, cmd: &str, name: &str, arg: &str, options: &[&str]) -> Result<(), Error> {
        let mut args = Vec::with_capacity(3 + options.len());
        args.extend_from_slice(&[cmd, name, arg]);
        args.extend_from_slice(options);
        self.run_cmd(&args).map(|_| ())
    }

    /// Create a set `name` of type `typename`, e.g. `hash:net`. `options` are
    /// forwarded as is, e.g. `["timeout", "60", "family", "inet6"]`.
    pub fn create(&self, name: &str, typename: &str, options: &[&str]) -> Result<(), Error> {
        self.options_cmd("create", name, typename, options)
    }

    /// Same as `create`, with the type name built from a set type.
    pub fn create_typed<T: SetType>(&self, name: &str, options: &[&str]) -> Result<(), Error> {
        self.create(name, &type_name::<T>(), options)
    }

    /// Destroy the set `name`.
    ///
    /// The name is forwarded unchecked: an empty `name` makes the utility
    /// destroy every set.
    pub fn destroy(&self, name: &str) -> Result<(), Error> {
        if name.is_empty() {
            warn!("destroy called without a set name, all sets will be destroyed");
        }
        self.run_cmd(&["destroy", name]).map(|_| ())
    }

    /// Clear all the entries of the set `name`.
    pub fn flush(&self, name: &str) -> Result<(), Error> {
        self.run_cmd(&["flush", name]).map(|_| ())
    }

    /// Add `entry` into the set `name`, `options` are forwarded as is, e.g. `["timeout", "60"]`.
    pub fn add(&self, name: &str, entry: &str, options: &[&str]) -> Result<(), Error> {
        self.options_cmd("add", name, entry, options)
    }

    /// Delete `entry` from the set `name`.
    pub fn del(&self, name: &str, entry: &str) -> Result<(), Error> {
        self.run_cmd(&["del", name, entry]).map(|_| ())
    }

    /// Ask the kernel if `entry` is matched by the set `name`. Unlike
    /// `IpSet::contains_entry` this honours the set semantics, e.g. an address
    /// is matched by a network entry.
    pub fn test(&self, name: &str, entry: &str) -> Result<bool, Error> {
        self.run_cmd(&["test", name, entry])
            .map(|_| true)
            .or_else(|err| {
                if err.cmd_contains("is NOT in set") {
                    Ok(false)
                } else {
                    Err(err)
                }
            })
    }

    /// List all the sets with their members, in the order reported by the utility.
    pub fn list(&self) -> Result<Vec<IpSet>, Error> {
        let output = self.run_cmd(&["list", "-o", "xml"])?;
        let sets = IpSet::from_list_xml(&output)?;
        debug!("ipset listed {} sets", sets.len());
        Ok(sets)
    }

    /// Get the set `name`, `None` if no such set exists.
    pub fn get(&self, name: &str) -> Result<Option<IpSet>, Error> {
        Ok(self.list()?.into_iter().find(|set| set.name == name))
    }
}
