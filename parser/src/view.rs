//! Read-only handles to declared arguments, options and commands.
//!
//! A view keeps the finished command it belongs to alive, so it stays valid
//! after the parser and the iterator are gone.

use std::ops::Deref;
use std::rc::Rc;

use crate::argument::ArgumentSpec;
use crate::command::CommandSpec;
use crate::option::OptionSpec;
use crate::types::{ArgumentId, ValueId};

#[derive(Debug, Clone)]
pub struct ArgumentView {
    command: Rc<CommandSpec>,
    index: usize,
}

impl ArgumentView {
    pub(crate) fn new(command: Rc<CommandSpec>, index: usize) -> Self {
        Self { command, index }
    }
}

impl Deref for ArgumentView {
    type Target = ArgumentSpec;

    fn deref(&self) -> &ArgumentSpec {
        &self.command.arguments[self.index]
    }
}

#[derive(Debug, Clone)]
pub struct OptionView {
    command: Rc<CommandSpec>,
    index: usize,
}

impl OptionView {
    pub(crate) fn new(command: Rc<CommandSpec>, index: usize) -> Self {
        Self { command, index }
    }
}

impl Deref for OptionView {
    type Target = OptionSpec;

    fn deref(&self) -> &OptionSpec {
        &self.command.options[self.index]
    }
}

#[derive(Debug, Clone)]
pub struct CommandView {
    command: Rc<CommandSpec>,
}

impl CommandView {
    pub(crate) fn new(command: Rc<CommandSpec>) -> Self {
        Self { command }
    }

    pub(crate) fn rc(&self) -> &Rc<CommandSpec> {
        &self.command
    }
}

impl Deref for CommandView {
    type Target = CommandSpec;

    fn deref(&self) -> &CommandSpec {
        &self.command
    }
}

/// Any declared item.
#[derive(Debug, Clone)]
pub enum ItemView {
    Argument(ArgumentView),
    Option(OptionView),
    Command(CommandView),
}

impl ItemView {
    /// Finds the argument or option of `command` with the given id.
    pub(crate) fn find(command: &Rc<CommandSpec>, id: ArgumentId) -> Option<ItemView> {
        if id.is_none() {
            return None;
        }
        if let Some(i) = command.arguments.iter().position(|a| a.argument_id == id) {
            return Some(ItemView::Argument(ArgumentView::new(Rc::clone(command), i)));
        }
        command
            .options
            .iter()
            .position(|o| o.argument_id == id)
            .map(|i| ItemView::Option(OptionView::new(Rc::clone(command), i)))
    }

    /// The argument name, the option flags joined by `", "`, or the command
    /// name.
    pub fn display_name(&self) -> String {
        match self {
            ItemView::Argument(a) => a.name().to_string(),
            ItemView::Option(o) => o.joined_flags(),
            ItemView::Command(c) => c.name().to_string(),
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            ItemView::Argument(a) => a.id(),
            ItemView::Option(o) => o.id(),
            ItemView::Command(c) => c.id(),
        }
    }

    pub fn argument_id(&self) -> ArgumentId {
        match self {
            ItemView::Argument(a) => a.argument_id(),
            ItemView::Option(o) => o.argument_id(),
            ItemView::Command(c) => c.argument_id(),
        }
    }

    /// Commands have no value slot and return the zero id.
    pub fn value_id(&self) -> ValueId {
        match self {
            ItemView::Argument(a) => a.value_id(),
            ItemView::Option(o) => o.value_id(),
            ItemView::Command(_) => ValueId::default(),
        }
    }
}
