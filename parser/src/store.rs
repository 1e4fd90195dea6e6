//! Storage of parsed values for one command level.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::command::CommandSpec;
use crate::data::ParserData;
use crate::help::{write_error_message, write_help_text};
use crate::types::{ArgumentId, OptionOperation, ParserResultCode, ValueId};
use crate::view::OptionView;

pub(crate) type StoreRef = Rc<RefCell<ArgumentStore>>;

/// A stored value and the declaration it came from.
pub(crate) type StoredValue = (String, ArgumentId);

#[derive(Debug)]
pub(crate) struct ArgumentStore {
    pub(crate) data: Rc<ParserData>,
    pub(crate) command: Rc<CommandSpec>,
    /// The command path as typed, e.g. `"git remote add"`.
    pub(crate) display_name: String,
    values: BTreeMap<ValueId, Vec<StoredValue>>,
    /// Every name a value can be looked up by, sorted.
    ids: Vec<(String, ValueId, ArgumentId)>,
    unprocessed: Vec<String>,
    subcommands: Vec<StoreRef>,
    result_code: ParserResultCode,
    stop_option: Option<OptionView>,
}

impl ArgumentStore {
    pub(crate) fn new(data: Rc<ParserData>, command: Rc<CommandSpec>, display_name: String) -> Self {
        let mut ids = Vec::new();
        for a in &command.arguments {
            ids.push((a.name.clone(), a.value_id, a.argument_id));
            if !a.alias.is_empty() {
                ids.push((a.alias.clone(), a.value_id, a.argument_id));
            }
        }
        for o in command.options.iter().filter(|o| o.operation != OptionOperation::None) {
            for flag in &o.flags {
                ids.push((flag.clone(), o.value_id, o.argument_id));
            }
            if !o.alias.is_empty() {
                ids.push((o.alias.clone(), o.value_id, o.argument_id));
            }
        }
        ids.sort();
        // A name used by several declarations does not identify any one of them.
        for i in 1..ids.len() {
            if ids[i].0 == ids[i - 1].0 && ids[i].2 != ids[i - 1].2 {
                ids[i].2 = ArgumentId::default();
                ids[i - 1].2 = ArgumentId::default();
            }
        }
        ids.dedup();

        Self {
            data,
            command,
            display_name,
            values: BTreeMap::new(),
            ids,
            unprocessed: Vec::new(),
            subcommands: Vec::new(),
            result_code: ParserResultCode::None,
            stop_option: None,
        }
    }

    pub(crate) fn into_ref(self) -> StoreRef {
        Rc::new(RefCell::new(self))
    }

    pub(crate) fn append(&mut self, value_id: ValueId, value: String, argument_id: ArgumentId) {
        self.values.entry(value_id).or_default().push((value, argument_id));
    }

    /// Replaces all values in the slot with `value`.
    pub(crate) fn assign(&mut self, value_id: ValueId, value: String, argument_id: ArgumentId) {
        self.values.insert(value_id, vec![(value, argument_id)]);
    }

    pub(crate) fn clear(&mut self, value_id: ValueId) {
        self.values.remove(&value_id);
    }

    pub(crate) fn has(&self, value_id: ValueId) -> bool {
        self.values.contains_key(&value_id)
    }

    pub(crate) fn values(&self, value_id: ValueId) -> &[StoredValue] {
        self.values.get(&value_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// The value id and declaration registered under `name`.
    pub(crate) fn lookup(&self, name: &str) -> Option<(ValueId, ArgumentId)> {
        let pos = self.ids.partition_point(|(n, _, _)| n.as_str() < name);
        self.ids
            .get(pos)
            .filter(|(n, _, _)| n == name)
            .map(|(_, value_id, argument_id)| (*value_id, *argument_id))
    }

    pub(crate) fn unprocessed(&self) -> &[String] {
        &self.unprocessed
    }

    pub(crate) fn add_unprocessed(&mut self, arg: String) {
        self.unprocessed.push(arg);
    }

    pub(crate) fn subcommands(&self) -> &[StoreRef] {
        &self.subcommands
    }

    pub(crate) fn add_subcommand(&mut self, store: StoreRef) {
        self.subcommands.push(store);
    }

    pub(crate) fn result_code(&self) -> ParserResultCode {
        self.result_code
    }

    pub(crate) fn set_result_code(&mut self, code: ParserResultCode) {
        self.result_code = code;
    }

    pub(crate) fn stop_option(&self) -> Option<&OptionView> {
        self.stop_option.as_ref()
    }

    pub(crate) fn set_stop_option(&mut self, option: OptionView) {
        self.result_code = ParserResultCode::Stop;
        self.stop_option = Some(option);
    }

    /// Writes the help text for this command level.
    pub(crate) fn write_help(&self) {
        if let Err(e) = write_help_text(&self.data, &self.command, &self.display_name) {
            warn!(command = %self.display_name, error = %e, "Failed to write help text");
        }
    }

    /// Writes `message` with the usage synopsis and exits if the parser is
    /// configured to do so.
    pub(crate) fn report(&self, message: &str, argument_id: ArgumentId) {
        debug!(command = %self.display_name, message, "Reporting error");
        if let Err(e) = write_error_message(
            &self.data,
            &self.command,
            &self.display_name,
            message,
            argument_id,
        ) {
            warn!(command = %self.display_name, error = %e, "Failed to write error message");
        }
        let exit = self.data.settings.exit;
        if exit.auto_exit {
            std::process::exit(exit.error_code);
        }
    }
}
