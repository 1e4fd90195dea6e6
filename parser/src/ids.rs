//! Value and argument identifier assignment.
//!
//! Value ids decide which declarations share a value slot. Within a command,
//! an argument is keyed by its alias or name, and an option by its alias or
//! its flags; the first declaration using a key allocates the id and later
//! ones reuse it. Subcommands allocate above the highest id of their parent,
//! while sibling subcommands may reuse the same numbers since they are never
//! active at the same time.
//!
//! Argument ids are unique across the whole tree and are assigned in
//! depth-first pre-order: a command, then its arguments, its options and
//! finally its subcommands.

use std::collections::HashMap;
use std::rc::Rc;

use crate::command::CommandSpec;
use crate::types::{ArgumentId, OptionOperation, ValueId};

struct ValueIdMaker {
    ids: HashMap<String, ValueId>,
    last: ValueId,
}

impl ValueIdMaker {
    fn new(start: ValueId) -> Self {
        Self {
            ids: HashMap::new(),
            last: start,
        }
    }

    fn find(&self, name: &str) -> Option<ValueId> {
        self.ids.get(name).copied()
    }

    fn make(&mut self, name: &str) -> ValueId {
        if let Some(id) = self.find(name) {
            return id;
        }
        self.last = ValueId(self.last.0 + 1);
        self.ids.insert(name.to_string(), self.last);
        self.last
    }

    fn make_for_all(&mut self, names: &[String]) -> ValueId {
        if let Some(id) = names.iter().find_map(|n| self.find(n)) {
            return id;
        }
        self.last = ValueId(self.last.0 + 1);
        for name in names {
            self.ids.entry(name.clone()).or_insert(self.last);
        }
        self.last
    }

    fn alias(&mut self, name: &str, id: ValueId) {
        self.ids.entry(name.to_string()).or_insert(id);
    }
}

/// Assigns value ids to the arguments and options of `cmd`, not its
/// subcommands. Returns the highest id in use.
pub(crate) fn assign_value_ids(cmd: &mut CommandSpec, start: ValueId) -> ValueId {
    let mut maker = ValueIdMaker::new(start);
    for arg in &mut cmd.arguments {
        if arg.alias.is_empty() {
            arg.value_id = maker.make(&arg.name);
        } else {
            arg.value_id = maker.make(&arg.alias);
            maker.alias(&arg.name, arg.value_id);
        }
    }
    for opt in &mut cmd.options {
        if opt.operation == OptionOperation::None {
            continue;
        }
        if opt.alias.is_empty() {
            opt.value_id = maker.make_for_all(&opt.flags);
        } else {
            opt.value_id = maker.make(&opt.alias);
            for flag in &opt.flags {
                maker.alias(flag, opt.value_id);
            }
        }
    }
    maker.last
}

/// Numbers `cmd` and everything below it, starting after `last`. Returns the
/// last id used.
pub(crate) fn assign_argument_ids(cmd: &mut CommandSpec, last: ArgumentId) -> ArgumentId {
    let mut n = last.0;
    let mut next = || {
        n += 1;
        ArgumentId(n)
    };
    cmd.argument_id = next();
    for arg in &mut cmd.arguments {
        arg.argument_id = next();
    }
    for opt in &mut cmd.options {
        opt.argument_id = next();
    }
    let mut last = ArgumentId(n);
    for sub in &mut cmd.commands {
        last = assign_argument_ids(Rc::make_mut(sub), last);
    }
    last
}
