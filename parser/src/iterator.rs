//! The parsing state machine.
//!
//! Tokens are consumed one at a time. Flags are looked up in the option index
//! of the command level being parsed, other tokens either enter a subcommand
//! or are handed to the argument counter. Subcommands push a new level onto
//! the stack; in multi-command grammars a token naming a subcommand of an
//! ancestor closes the levels below that ancestor and enters the new command
//! as a sibling.

use std::rc::Rc;

use argos_core::starts_with;
use tracing::{debug, warn};

use crate::callbacks::{ArgumentCallbackArgs, OptionCallbackArgs};
use crate::command::CommandSpec;
use crate::counter::ArgumentCounter;
use crate::data::ParserData;
use crate::error::{ArgosError, Result};
use crate::index::find_option;
use crate::parsed::{ParsedArguments, ParsedArgumentsBuilder};
use crate::store::{ArgumentStore, StoreRef};
use crate::tokens::TokenIterator;
use crate::types::{ArgumentId, Callback, OptionOperation, OptionStyle, OptionType, ParserResultCode};
use crate::view::{ArgumentView, CommandView, OptionView};

/// One step of the parse.
#[derive(Debug, Clone)]
pub enum IteratorItem {
    /// A positional argument and its value.
    Argument(ArgumentView, String),
    /// An option and the value taken from the command line. The value is
    /// empty for options that store a constant.
    Option(OptionView, String),
    /// A subcommand was entered.
    Command(CommandView),
    /// An undefined flag or surplus argument that was stored as unprocessed.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ArgumentsAndOptions,
    ArgumentsOnly,
    Done,
    Error,
}

#[derive(Debug)]
struct Level {
    command: Rc<CommandSpec>,
    store: StoreRef,
    counter: ArgumentCounter,
}

fn is_option(token: &str, style: OptionStyle) -> bool {
    token.len() >= 2 && token.starts_with(style.prefix())
}

fn invoke<A>(callbacks: &[Callback<dyn Fn(&mut A) -> Result<()>>], args: &mut A) -> Result<()> {
    for callback in callbacks {
        (callback.0)(args)?;
    }
    Ok(())
}

/// Parses a command line step by step.
///
/// Created by [`ArgumentParser::make_iterator`](crate::ArgumentParser::make_iterator).
/// Each call to `next` consumes one token and returns what it was
/// recognized as. Iteration ends when all tokens have been consumed, when a
/// stop option is encountered, or on the first error.
///
/// # Examples
///
/// ```
/// use argos::{ArgumentParser, ArgumentSpec, IteratorItem, OptionSpec, ParserResultCode};
///
/// let mut it = ArgumentParser::new("prog")
///     .with_auto_exit(false)
///     .add_option(OptionSpec::new(["-n"]).with_argument("N"))
///     .add_argument(ArgumentSpec::new("FILE"))
///     .make_iterator(["-n", "3", "a.txt"])
///     .unwrap();
/// match it.next() {
///     Some(IteratorItem::Option(opt, value)) => {
///         assert_eq!(opt.flags(), ["-n"]);
///         assert_eq!(value, "3");
///     }
///     other => panic!("unexpected item: {other:?}"),
/// }
/// assert!(matches!(it.next(), Some(IteratorItem::Argument(_, _))));
/// assert!(it.next().is_none());
/// assert_eq!(it.parsed_arguments().result_code(), ParserResultCode::Success);
/// ```
#[derive(Debug)]
pub struct ArgumentIterator {
    data: Rc<ParserData>,
    tokens: TokenIterator,
    stack: Vec<Level>,
    root: StoreRef,
    state: State,
}

impl ArgumentIterator {
    pub(crate) fn new(args: Vec<String>, data: Rc<ParserData>) -> Self {
        let command = Rc::clone(&data.command);
        let store =
            ArgumentStore::new(Rc::clone(&data), Rc::clone(&command), command.name.clone()).into_ref();
        let tokens = TokenIterator::new(args, data.settings.option_style);
        let mut iterator = Self {
            data,
            tokens,
            stack: Vec::new(),
            root: Rc::clone(&store),
            state: State::ArgumentsAndOptions,
        };
        iterator.push_level(command, store);
        iterator
    }

    /// Results of the top-level command. Subcommand results are reached
    /// through [`ParsedArguments::subcommands`].
    pub fn parsed_arguments(&self) -> ParsedArguments {
        ParsedArguments::new(Rc::clone(&self.root))
    }

    /// Consumes all remaining tokens.
    pub(crate) fn run(mut self) -> ParsedArguments {
        while self.next().is_some() {}
        self.parsed_arguments()
    }

    fn settings(&self) -> &crate::settings::ParserSettings {
        &self.data.settings
    }

    fn top(&self) -> &Level {
        &self.stack[self.stack.len() - 1]
    }

    fn top_store(&self) -> StoreRef {
        Rc::clone(&self.top().store)
    }

    fn push_level(&mut self, command: Rc<CommandSpec>, store: StoreRef) {
        {
            let mut s = store.borrow_mut();
            for option in command.options.iter().filter(|o| !o.initial_value.is_empty()) {
                if !option.value_id.is_none() {
                    s.append(option.value_id, option.initial_value.clone(), option.argument_id);
                }
            }
        }
        let counter = self.make_counter(&command);
        self.stack.push(Level {
            command,
            store,
            counter,
        });
    }

    /// Plans the argument allocation of `command`, which is about to be
    /// pushed on the stack.
    fn make_counter(&self, command: &CommandSpec) -> ArgumentCounter {
        if ArgumentCounter::requires_argument_count(&command.arguments) {
            let total = self.count_arguments(command, self.stack.len());
            ArgumentCounter::with_count(&command.arguments, total)
        } else {
            ArgumentCounter::new(&command.arguments)
        }
    }

    /// Counts the positional tokens that remain for `command`, stopping at
    /// options that end parsing and at the first name of a multi-command
    /// sibling that can follow the mandatory arguments. `depth` is the number
    /// of stack levels above `command`.
    fn count_arguments(&self, command: &CommandSpec, depth: usize) -> usize {
        let settings = self.settings();
        let (min_count, _) = ArgumentCounter::min_max_count(&command.arguments);
        let mut it = self.tokens.clone();
        let mut arguments_only = self.state == State::ArgumentsOnly;
        let mut result = 0;
        loop {
            let token = if arguments_only { it.next_value() } else { it.next() };
            let Some(token) = token else {
                return result;
            };
            if !arguments_only {
                let found = find_option(
                    command,
                    &token,
                    settings.allow_abbreviated_options,
                    settings.case_insensitive,
                );
                if let Some(index) = found {
                    let option = &command.options[index];
                    if !option.argument.is_empty() {
                        it.next_value();
                    }
                    match option.option_type {
                        OptionType::Help | OptionType::LastArgument | OptionType::Stop => {
                            return result;
                        }
                        OptionType::LastOption => arguments_only = true,
                        _ => {}
                    }
                    continue;
                }
                if is_option(&token, settings.option_style) {
                    continue;
                }
            }
            if result >= min_count && self.find_command_above(depth, &token).is_some() {
                return result;
            }
            result += 1;
        }
    }

    /// Re-plans the argument allocation of the current level after tokens
    /// were inserted, keeping the tokens already handed out.
    fn recount(&mut self) {
        let command = Rc::clone(&self.top().command);
        if !ArgumentCounter::requires_argument_count(&command.arguments) {
            return;
        }
        let done = self.top().counter.count();
        let total = done + self.count_arguments(&command, self.stack.len() - 1);
        let mut counter = ArgumentCounter::with_count(&command.arguments, total);
        for _ in 0..done {
            counter.next_argument();
        }
        if let Some(level) = self.stack.last_mut() {
            level.counter = counter;
        }
    }

    fn insert_tokens(&mut self, tokens: Vec<String>) {
        if tokens.is_empty() {
            return;
        }
        self.tokens.insert(tokens);
        self.recount();
    }

    fn set_result_code(&self, code: ParserResultCode) {
        for level in &self.stack {
            level.store.borrow_mut().set_result_code(code);
        }
    }

    fn copy_remaining_arguments(&self) {
        let store = self.top_store();
        let mut s = store.borrow_mut();
        for token in self.tokens.remaining_arguments() {
            s.add_unprocessed(token);
        }
    }

    /// Reports `message` for the command at `level` and ends parsing with
    /// [`ParserResultCode::Failure`]. Without a message, the error has already
    /// been written.
    fn error(&mut self, level: usize, message: Option<&str>) {
        if let Some(message) = message {
            self.stack[level].store.borrow().report(message, ArgumentId::default());
        }
        debug!(message = message.unwrap_or_default(), "Parsing failed");
        self.copy_remaining_arguments();
        self.set_result_code(ParserResultCode::Failure);
        self.state = State::Error;
    }

    fn callback_failed(&mut self, err: ArgosError) {
        let level = self.stack.len() - 1;
        match err {
            ArgosError::Callback(_) | ArgosError::InvalidValue(_) => self.error(level, None),
            other => {
                warn!(error = %other, "Callback failed");
                self.error(level, Some(&other.to_string()));
            }
        }
    }

    /// Checks the mandatory options, argument counts and required subcommand
    /// of the command at `level`.
    fn check_level(&mut self, level: usize) -> bool {
        let message = {
            let Level {
                command,
                store,
                counter,
            } = &self.stack[level];
            let store = store.borrow();
            if let Some(option) = command
                .options
                .iter()
                .find(|o| !o.optional && !store.has(o.value_id))
            {
                Some(format!("Mandatory option \"{}\" is missing.", option.joined_flags()))
            } else if !counter.is_complete() {
                let (lo, hi) = ArgumentCounter::min_max_count(&command.arguments);
                let expected = if lo == hi { "Expected" } else { "Expected at least" };
                Some(format!(
                    "Too few arguments. {expected} {lo}, received {}.",
                    counter.count()
                ))
            } else if command.require_command == Some(true) && store.subcommands().is_empty() {
                Some("No command given.".to_string())
            } else {
                None
            }
        };
        match message {
            Some(message) => {
                self.error(level, Some(&message));
                false
            }
            None => true,
        }
    }

    /// Checks every open level, innermost first, and ends parsing with
    /// [`ParserResultCode::Success`] if all are complete.
    fn finish(&mut self) -> bool {
        for level in (0..self.stack.len()).rev() {
            if !self.check_level(level) {
                return false;
            }
        }
        self.set_result_code(ParserResultCode::Success);
        self.state = State::Done;
        debug!(command = %self.top().command.name, "Parsing finished");
        true
    }

    fn stop(&mut self, option: &OptionView) {
        self.state = State::Done;
        self.set_result_code(ParserResultCode::Stop);
        self.top().store.borrow_mut().set_stop_option(option.clone());
    }

    fn apply_operation(&mut self, option: &OptionView, flag: &str) -> Option<String> {
        let store = self.top_store();
        let (value_id, argument_id) = (option.value_id, option.argument_id);
        match option.operation {
            OptionOperation::Assign | OptionOperation::Append => {
                let append = option.operation == OptionOperation::Append;
                let (stored, value) = if !option.constant.is_empty() {
                    (option.constant.clone(), String::new())
                } else if let Some(value) = self.tokens.next_value() {
                    (value.clone(), value)
                } else {
                    let level = self.stack.len() - 1;
                    self.error(level, Some(&format!("{flag}: no value given.")));
                    return None;
                };
                let mut s = store.borrow_mut();
                if append {
                    s.append(value_id, stored, argument_id);
                } else {
                    s.assign(value_id, stored, argument_id);
                }
                Some(value)
            }
            OptionOperation::Clear => {
                store.borrow_mut().clear(value_id);
                Some(String::new())
            }
            OptionOperation::None => Some(String::new()),
        }
    }

    fn process_option(&mut self, flag: String) -> Option<IteratorItem> {
        let command = Rc::clone(&self.top().command);
        let settings = self.settings();
        let found = find_option(
            &command,
            &flag,
            settings.allow_abbreviated_options,
            settings.case_insensitive,
        );
        let Some(index) = found else {
            let current = self.tokens.current().unwrap_or_default().to_string();
            if self.settings().ignore_undefined_options && starts_with(&current, &flag, false) {
                debug!(token = %current, "Ignoring undefined option");
                self.top().store.borrow_mut().add_unprocessed(current.clone());
                return Some(IteratorItem::Unknown(current));
            }
            let level = self.stack.len() - 1;
            self.error(level, Some(&format!("Unknown option: {current}")));
            return None;
        };

        let option = OptionView::new(command, index);
        debug!(flag = %flag, option = %option.joined_flags(), "Matched option");
        let value = self.apply_operation(&option, &flag)?;

        let callbacks: Vec<_> = option
            .callback
            .iter()
            .chain(self.settings().option_callback.iter())
            .cloned()
            .collect();
        if !callbacks.is_empty() {
            let mut args = OptionCallbackArgs {
                view: option.clone(),
                value: value.clone(),
                builder: ParsedArgumentsBuilder::new(self.top_store()),
                new_arguments: Vec::new(),
            };
            if let Err(err) = invoke(&callbacks, &mut args) {
                self.callback_failed(err);
                return None;
            }
            self.insert_tokens(args.new_arguments);
        }

        match option.option_type {
            OptionType::Normal => {}
            OptionType::Help | OptionType::Exit => {
                if option.option_type == OptionType::Help {
                    self.top().store.borrow().write_help();
                }
                self.stop(&option);
                let exit = self.settings().exit;
                if exit.auto_exit {
                    std::process::exit(exit.normal_code);
                }
                self.copy_remaining_arguments();
            }
            OptionType::Stop => {
                self.stop(&option);
                self.copy_remaining_arguments();
            }
            OptionType::LastArgument => {
                if !self.finish() {
                    return None;
                }
                self.copy_remaining_arguments();
            }
            OptionType::LastOption => self.state = State::ArgumentsOnly,
        }
        Some(IteratorItem::Option(option, value))
    }

    fn process_argument(&mut self, token: String) -> Option<IteratorItem> {
        let command = Rc::clone(&self.top().command);
        let next = self.stack.last_mut().and_then(|l| l.counter.next_argument());
        let Some(index) = next else {
            if self.settings().ignore_undefined_arguments {
                debug!(token = %token, "Ignoring surplus argument");
                self.top().store.borrow_mut().add_unprocessed(token.clone());
                return Some(IteratorItem::Unknown(token));
            }
            let level = self.stack.len() - 1;
            self.error(
                level,
                Some(&format!("Too many arguments, starting with \"{token}\".")),
            );
            return None;
        };

        let argument = ArgumentView::new(command, index);
        self.top()
            .store
            .borrow_mut()
            .append(argument.value_id, token.clone(), argument.argument_id);

        let callbacks: Vec<_> = argument
            .callback
            .iter()
            .chain(self.settings().argument_callback.iter())
            .cloned()
            .collect();
        if !callbacks.is_empty() {
            let mut args = ArgumentCallbackArgs {
                view: argument.clone(),
                value: token.clone(),
                builder: ParsedArgumentsBuilder::new(self.top_store()),
                new_arguments: Vec::new(),
            };
            if let Err(err) = invoke(&callbacks, &mut args) {
                self.callback_failed(err);
                return None;
            }
            self.insert_tokens(args.new_arguments);
        }
        Some(IteratorItem::Argument(argument, token))
    }

    /// A command among the first `depth` stack levels that allows several
    /// subcommands and has one named `name`.
    fn find_command_above(&self, depth: usize, name: &str) -> Option<(usize, usize)> {
        let ci = self.settings().case_insensitive;
        (0..depth).rev().find_map(|level| {
            let command = &self.stack[level].command;
            if !command.multi_command {
                return None;
            }
            command.find_command(name, ci).map(|index| (level, index))
        })
    }

    /// Closes all levels below `level`.
    fn leave_levels(&mut self, level: usize) -> bool {
        for closing in (level + 1..self.stack.len()).rev() {
            if !self.check_level(closing) {
                return false;
            }
            self.stack[closing]
                .store
                .borrow_mut()
                .set_result_code(ParserResultCode::Success);
        }
        self.stack.truncate(level + 1);
        true
    }

    fn enter_command(&mut self, parent: usize, index: usize) -> IteratorItem {
        let (command, store) = {
            let level = &self.stack[parent];
            let command = Rc::clone(&level.command.commands[index]);
            let display_name = format!("{} {}", level.store.borrow().display_name, command.name);
            let store =
                ArgumentStore::new(Rc::clone(&self.data), Rc::clone(&command), display_name)
                    .into_ref();
            level.store.borrow_mut().add_subcommand(Rc::clone(&store));
            (command, store)
        };
        debug!(command = %store.borrow().display_name, "Entered subcommand");
        self.push_level(Rc::clone(&command), store);
        IteratorItem::Command(CommandView::new(command))
    }

    fn process_token(&mut self, token: String) -> Option<IteratorItem> {
        let top = self.stack.len() - 1;
        let command = Rc::clone(&self.top().command);
        if self.top().counter.is_complete() {
            if let Some(index) = command.find_command(&token, self.settings().case_insensitive) {
                return Some(self.enter_command(top, index));
            }
            if let Some((level, index)) = self.find_command_above(self.stack.len() - 1, &token) {
                debug!(command = %token, level, "Re-entering multi-command level");
                if !self.leave_levels(level) {
                    return None;
                }
                return Some(self.enter_command(level, index));
            }
        }
        if command.commands.is_empty() {
            return self.process_argument(token);
        }
        if self.settings().ignore_undefined_arguments {
            self.top().store.borrow_mut().add_unprocessed(token.clone());
            return Some(IteratorItem::Unknown(token));
        }
        self.error(top, Some(&format!("Unknown command: {token}")));
        None
    }
}

impl Iterator for ArgumentIterator {
    type Item = IteratorItem;

    fn next(&mut self) -> Option<IteratorItem> {
        let token = match self.state {
            State::Done | State::Error => return None,
            State::ArgumentsAndOptions => self.tokens.next(),
            State::ArgumentsOnly => self.tokens.next_value(),
        };
        let Some(token) = token else {
            self.finish();
            return None;
        };
        debug!(token = %token, "Processing token");
        if self.state == State::ArgumentsAndOptions && is_option(&token, self.settings().option_style)
        {
            self.process_option(token)
        } else {
            self.process_token(token)
        }
    }
}
