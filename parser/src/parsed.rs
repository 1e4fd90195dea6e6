//! The result of parsing a command line.

use std::io;
use std::rc::Rc;

use argos_text::Output;
use tracing::warn;

use crate::error::{ArgosError, Result};
use crate::store::StoreRef;
use crate::types::{ArgumentId, ParserResultCode, ValueId};
use crate::value::{ArgumentValue, ArgumentValues};
use crate::view::{ArgumentView, CommandView, ItemView, OptionView};

fn lookup(store: &StoreRef, name: &str) -> Result<(ValueId, ArgumentId)> {
    store
        .borrow()
        .lookup(name)
        .ok_or_else(|| ArgosError::UnknownValue(name.to_string()))
}

fn value_of(store: &StoreRef, name: &str) -> Result<ArgumentValue> {
    let (value_id, argument_id) = lookup(store, name)?;
    let stored = {
        let s = store.borrow();
        match s.values(value_id) {
            [] => None,
            [single] => Some(single.clone()),
            _ => return Err(ArgosError::MultipleValues),
        }
    };
    Ok(match stored {
        Some((value, id)) => ArgumentValue::new(Some(value), value_id, id, Rc::clone(store)),
        None => ArgumentValue::new(None, value_id, argument_id, Rc::clone(store)),
    })
}

fn values_of(store: &StoreRef, name: &str) -> Result<ArgumentValues> {
    let (value_id, _) = lookup(store, name)?;
    let values = store.borrow().values(value_id).to_vec();
    Ok(ArgumentValues::new(values, value_id, Rc::clone(store)))
}

/// Appends the unprocessed tokens of `store` and its subcommands, depth
/// first, which is the order they appeared in on the command line.
fn collect_unprocessed(store: &StoreRef, out: &mut Vec<String>) {
    let store = store.borrow();
    out.extend(store.unprocessed().iter().cloned());
    for sub in store.subcommands() {
        collect_unprocessed(sub, out);
    }
}

fn write_quoted(out: &mut dyn io::Write, label: &str, values: &[&str]) -> io::Result<()> {
    write!(out, "{label}:")?;
    for value in values {
        write!(out, " \"{value}\"")?;
    }
    writeln!(out)
}

/// Parsed values of one command level.
///
/// The top-level result is returned by
/// [`ArgumentParser::parse`](crate::ArgumentParser::parse); each subcommand
/// that was invoked has its own result, available through
/// [`subcommands`](Self::subcommands).
///
/// # Examples
///
/// ```
/// use argos::{ArgumentParser, ArgumentSpec, OptionSpec, ParserResultCode};
///
/// let args = ArgumentParser::new("prog")
///     .with_auto_exit(false)
///     .add_option(OptionSpec::new(["-v", "--verbose"]))
///     .add_argument(ArgumentSpec::new("FILE"))
///     .parse(["-v", "notes.txt"])
///     .unwrap();
/// assert_eq!(args.result_code(), ParserResultCode::Success);
/// assert!(args.value("--verbose").unwrap().as_bool(false));
/// assert_eq!(args.value("FILE").unwrap().as_string(""), "notes.txt");
/// ```
#[derive(Debug, Clone)]
pub struct ParsedArguments {
    store: StoreRef,
}

impl ParsedArguments {
    pub(crate) fn new(store: StoreRef) -> Self {
        Self { store }
    }

    /// The command name, or the program name at the top level.
    pub fn command_name(&self) -> String {
        self.store.borrow().command.name.clone()
    }

    pub fn command(&self) -> CommandView {
        CommandView::new(Rc::clone(&self.store.borrow().command))
    }

    /// `true` if a value was stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgosError::UnknownValue`] if no argument or option of this
    /// command is known by `name`.
    pub fn has(&self, name: &str) -> Result<bool> {
        let (value_id, _) = lookup(&self.store, name)?;
        Ok(self.store.borrow().has(value_id))
    }

    /// The single value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgosError::UnknownValue`] for unknown names and
    /// [`ArgosError::MultipleValues`] if several values were stored.
    pub fn value(&self, name: &str) -> Result<ArgumentValue> {
        value_of(&self.store, name)
    }

    /// All values stored under `name`.
    pub fn values(&self, name: &str) -> Result<ArgumentValues> {
        values_of(&self.store, name)
    }

    /// Results of the subcommands invoked directly below this level.
    pub fn subcommands(&self) -> Vec<ParsedArguments> {
        self.store
            .borrow()
            .subcommands()
            .iter()
            .map(|s| ParsedArguments::new(Rc::clone(s)))
            .collect()
    }

    pub fn all_arguments(&self) -> Vec<ArgumentView> {
        let command = Rc::clone(&self.store.borrow().command);
        (0..command.arguments.len())
            .map(|i| ArgumentView::new(Rc::clone(&command), i))
            .collect()
    }

    pub fn all_options(&self) -> Vec<OptionView> {
        let command = Rc::clone(&self.store.borrow().command);
        (0..command.options.len())
            .map(|i| OptionView::new(Rc::clone(&command), i))
            .collect()
    }

    pub fn all_subcommands(&self) -> Vec<CommandView> {
        let command = Rc::clone(&self.store.borrow().command);
        command.commands.iter().map(|c| CommandView::new(Rc::clone(c))).collect()
    }

    pub fn result_code(&self) -> ParserResultCode {
        self.store.borrow().result_code()
    }

    /// The help, exit or stop option that ended parsing, if any.
    pub fn stop_option(&self) -> Option<OptionView> {
        self.store.borrow().stop_option().cloned()
    }

    /// Tokens that were not parsed: unknown flags and surplus arguments when
    /// they are ignored, and everything after a stop option or an error.
    pub fn unprocessed_arguments(&self) -> Vec<String> {
        self.store.borrow().unprocessed().to_vec()
    }

    /// Removes all parsed tokens from `argv`, keeping the program name and
    /// the unprocessed arguments of this level and every subcommand level
    /// below it in their original order.
    pub fn filter_parsed_arguments(&self, argv: &mut Vec<String>) {
        if argv.len() <= 1 {
            return;
        }
        let mut unprocessed = Vec::new();
        collect_unprocessed(&self.store, &mut unprocessed);
        let mut pending = unprocessed.iter().peekable();
        let mut index = 0;
        argv.retain(|arg| {
            index += 1;
            if index == 1 {
                return true;
            }
            if pending.peek().is_some_and(|p| *p == arg) {
                pending.next();
                return true;
            }
            false
        });
    }

    /// Reports `message` as a parse error for this command level.
    pub fn error(&self, message: &str) -> ArgosError {
        self.store.borrow().report(message, ArgumentId::default());
        ArgosError::Callback(message.to_string())
    }

    pub fn write_help_text(&self) {
        self.store.borrow().write_help();
    }

    /// Writes every value slot and the unprocessed arguments to `out`, one
    /// line each. Meant for debugging.
    pub fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let mut items: Vec<ItemView> = self
            .all_arguments()
            .into_iter()
            .map(ItemView::Argument)
            .chain(self.all_options().into_iter().map(ItemView::Option))
            .filter(|item| !item.value_id().is_none())
            .collect();
        items.sort_by_key(ItemView::value_id);

        let mut labels: Vec<(ValueId, String)> = Vec::new();
        for item in &items {
            match labels.last_mut() {
                Some((id, label)) if *id == item.value_id() => {
                    label.push_str(", ");
                    label.push_str(&item.display_name());
                }
                _ => labels.push((item.value_id(), item.display_name())),
            }
        }

        let store = self.store.borrow();
        for (value_id, label) in &labels {
            let values: Vec<&str> = store.values(*value_id).iter().map(|(v, _)| v.as_str()).collect();
            write_quoted(out, label, &values)?;
        }
        if !store.unprocessed().is_empty() {
            let values: Vec<&str> = store.unprocessed().iter().map(String::as_str).collect();
            write_quoted(out, "Unprocessed arguments", &values)?;
        }
        Ok(())
    }
}

/// Read and write access to the parsed values from inside a callback.
#[derive(Debug, Clone)]
pub struct ParsedArgumentsBuilder {
    store: StoreRef,
}

impl ParsedArgumentsBuilder {
    pub(crate) fn new(store: StoreRef) -> Self {
        Self { store }
    }

    /// Adds `value` to the values stored under `name`.
    pub fn append(&self, name: &str, value: &str) -> Result<&Self> {
        let (value_id, _) = lookup(&self.store, name)?;
        self.store
            .borrow_mut()
            .append(value_id, value.to_string(), ArgumentId::default());
        Ok(self)
    }

    /// Replaces the values stored under `name` with `value`.
    pub fn assign(&self, name: &str, value: &str) -> Result<&Self> {
        let (value_id, _) = lookup(&self.store, name)?;
        self.store
            .borrow_mut()
            .assign(value_id, value.to_string(), ArgumentId::default());
        Ok(self)
    }

    pub fn clear(&self, name: &str) -> Result<&Self> {
        let (value_id, _) = lookup(&self.store, name)?;
        self.store.borrow_mut().clear(value_id);
        Ok(self)
    }

    pub fn value(&self, name: &str) -> Result<ArgumentValue> {
        value_of(&self.store, name)
    }

    pub fn values(&self, name: &str) -> Result<ArgumentValues> {
        values_of(&self.store, name)
    }

    pub fn has(&self, name: &str) -> Result<bool> {
        let (value_id, _) = lookup(&self.store, name)?;
        Ok(self.store.borrow().has(value_id))
    }

    /// Writes `message` as a parse error and returns the error for the
    /// callback to propagate. Exits if auto-exit is enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use argos::{ArgumentParser, OptionSpec, ParserResultCode, Output, SharedBuffer};
    ///
    /// let buffer = SharedBuffer::new();
    /// let args = ArgumentParser::new("prog")
    ///     .with_auto_exit(false)
    ///     .with_output(Output::Buffer(buffer.clone()))
    ///     .add_option(OptionSpec::new(["--now"]).with_callback(|cb| Err(cb.builder.error("Too late."))))
    ///     .parse(["--now"])
    ///     .unwrap();
    /// assert_eq!(args.result_code(), ParserResultCode::Failure);
    /// assert!(buffer.contents().starts_with("prog: Too late.\n"));
    /// ```
    pub fn error(&self, message: &str) -> ArgosError {
        self.store.borrow().report(message, ArgumentId::default());
        ArgosError::Callback(message.to_string())
    }

    /// The sink help text is written to.
    pub fn output(&self) -> Output {
        self.store.borrow().data.output_or(Output::Stdout)
    }

    pub fn program_name(&self) -> String {
        self.store.borrow().data.command.name.clone()
    }

    /// Writes `text` to the help output, logging failures.
    pub fn write(&self, text: &str) {
        if let Err(e) = self.output().write_str(text) {
            warn!(error = %e, "Failed to write to help output");
        }
    }
}
