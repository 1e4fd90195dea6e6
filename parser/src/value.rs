//! Typed access to parsed values.
//!
//! Conversion failures are reported like parse errors: the message is
//! written to the error output together with the usage synopsis, and the
//! process exits if auto-exit is enabled. Otherwise the accessor returns
//! [`ArgosError::InvalidValue`].

use std::rc::Rc;

use argos_core::{ParseNumber, parse_number, split_string};

use crate::error::{ArgosError, Result};
use crate::store::{StoreRef, StoredValue};
use crate::types::{ArgumentId, ValueId};
use crate::view::ItemView;

fn max_split(max_parts: usize) -> usize {
    if max_parts == 0 {
        usize::MAX
    } else {
        max_parts - 1
    }
}

fn report(store: &StoreRef, message: String, argument_id: ArgumentId) -> ArgosError {
    store.borrow().report(&message, argument_id);
    ArgosError::InvalidValue(message)
}

fn as_bool(value: &str) -> bool {
    !value.is_empty() && value != "0" && value != "false"
}

/// A single parsed value, or the absence of one.
///
/// # Examples
///
/// ```
/// use argos::{ArgumentParser, OptionSpec};
///
/// let args = ArgumentParser::new("prog")
///     .with_auto_exit(false)
///     .add_option(OptionSpec::new(["--size"]).with_argument("W,H"))
///     .parse(["--size", "640,480"])
///     .unwrap();
/// let size = args.value("--size").unwrap().split(',', 2, 2).unwrap();
/// assert_eq!(size.as_u32s(&[]).unwrap(), [640, 480]);
/// assert_eq!(args.value("-h").unwrap().as_bool(false), false);
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentValue {
    value: Option<String>,
    value_id: ValueId,
    argument_id: ArgumentId,
    store: StoreRef,
}

impl ArgumentValue {
    pub(crate) fn new(
        value: Option<String>,
        value_id: ValueId,
        argument_id: ArgumentId,
        store: StoreRef,
    ) -> Self {
        Self {
            value,
            value_id,
            argument_id,
            store,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn value_id(&self) -> ValueId {
        self.value_id
    }

    /// The declaration that stored the value. Zero when unknown or shared.
    pub fn argument_id(&self) -> ArgumentId {
        self.argument_id
    }

    /// The argument or option that stored the value.
    pub fn argument(&self) -> Option<ItemView> {
        ItemView::find(&self.store.borrow().command, self.argument_id)
    }

    /// `false` for `""`, `"0"` and `"false"`, `true` for everything else.
    pub fn as_bool(&self, default: bool) -> bool {
        self.value.as_deref().map_or(default, as_bool)
    }

    /// Parses the value as a number. Integers may use `0x`, `0o` and `0b`
    /// prefixes.
    pub fn as_number<T: ParseNumber>(&self, default: T) -> Result<T> {
        let Some(value) = self.value.as_deref() else {
            return Ok(default);
        };
        parse_number::<T>(value).map_err(|_| self.error(&format!("Invalid value: {value}.")))
    }

    pub fn as_i32(&self, default: i32) -> Result<i32> {
        self.as_number(default)
    }

    pub fn as_u32(&self, default: u32) -> Result<u32> {
        self.as_number(default)
    }

    pub fn as_i64(&self, default: i64) -> Result<i64> {
        self.as_number(default)
    }

    pub fn as_u64(&self, default: u64) -> Result<u64> {
        self.as_number(default)
    }

    pub fn as_f32(&self, default: f32) -> Result<f32> {
        self.as_number(default)
    }

    pub fn as_f64(&self, default: f64) -> Result<f64> {
        self.as_number(default)
    }

    pub fn as_string(&self, default: &str) -> String {
        self.value.clone().unwrap_or_else(|| default.to_string())
    }

    /// Splits the value at `separator` into at most `max_parts` parts (zero
    /// means no limit). Fewer than `min_parts` parts is an error.
    pub fn split(&self, separator: char, min_parts: usize, max_parts: usize) -> Result<ArgumentValues> {
        let Some(value) = self.value.as_deref() else {
            return Ok(ArgumentValues::new(Vec::new(), self.value_id, Rc::clone(&self.store)));
        };
        let parts = split_string(value, separator, max_split(max_parts));
        if parts.len() < min_parts {
            return Err(self.error(&format!(
                "Invalid value: \"{value}\". Must have at least {min_parts} values separated by \"{separator}\"."
            )));
        }
        let values = parts
            .into_iter()
            .map(|p| (p.to_string(), self.argument_id))
            .collect();
        Ok(ArgumentValues::new(values, self.value_id, Rc::clone(&self.store)))
    }

    /// Splits the value into exactly `num_parts` parts.
    pub fn split_n(&self, separator: char, num_parts: usize) -> Result<ArgumentValues> {
        self.split(separator, num_parts, num_parts)
    }

    /// Reports `message` as an error concerning this value.
    pub fn error(&self, message: &str) -> ArgosError {
        report(&self.store, message.to_string(), self.argument_id)
    }
}

/// All values stored for an argument or option.
#[derive(Debug, Clone)]
pub struct ArgumentValues {
    values: Vec<StoredValue>,
    value_id: ValueId,
    store: StoreRef,
}

impl ArgumentValues {
    pub(crate) fn new(values: Vec<StoredValue>, value_id: ValueId, store: StoreRef) -> Self {
        Self {
            values,
            value_id,
            store,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_id(&self) -> ValueId {
        self.value_id
    }

    /// The declaration that stored all the values, or zero if they come
    /// from different ones.
    pub fn argument_id(&self) -> ArgumentId {
        let Some((_, first)) = self.values.first() else {
            return ArgumentId::default();
        };
        if self.values.iter().all(|(_, id)| id == first) {
            *first
        } else {
            ArgumentId::default()
        }
    }

    pub fn value(&self, index: usize) -> Option<ArgumentValue> {
        self.values.get(index).map(|(v, id)| {
            ArgumentValue::new(Some(v.clone()), self.value_id, *id, Rc::clone(&self.store))
        })
    }

    pub fn values(&self) -> Vec<ArgumentValue> {
        (0..self.len()).filter_map(|i| self.value(i)).collect()
    }

    pub fn raw_values(&self) -> Vec<&str> {
        self.values.iter().map(|(v, _)| v.as_str()).collect()
    }

    /// The values as strings, or `default` if there are none.
    pub fn as_strings(&self, default: &[&str]) -> Vec<String> {
        if self.values.is_empty() {
            return default.iter().map(|s| s.to_string()).collect();
        }
        self.values.iter().map(|(v, _)| v.clone()).collect()
    }

    pub fn as_numbers<T: ParseNumber>(&self, default: &[T]) -> Result<Vec<T>> {
        if self.values.is_empty() {
            return Ok(default.to_vec());
        }
        self.values
            .iter()
            .map(|(v, _)| {
                parse_number::<T>(v).map_err(|_| self.error(&format!("Invalid value: {v}.")))
            })
            .collect()
    }

    pub fn as_i32s(&self, default: &[i32]) -> Result<Vec<i32>> {
        self.as_numbers(default)
    }

    pub fn as_u32s(&self, default: &[u32]) -> Result<Vec<u32>> {
        self.as_numbers(default)
    }

    pub fn as_i64s(&self, default: &[i64]) -> Result<Vec<i64>> {
        self.as_numbers(default)
    }

    pub fn as_u64s(&self, default: &[u64]) -> Result<Vec<u64>> {
        self.as_numbers(default)
    }

    pub fn as_f32s(&self, default: &[f32]) -> Result<Vec<f32>> {
        self.as_numbers(default)
    }

    pub fn as_f64s(&self, default: &[f64]) -> Result<Vec<f64>> {
        self.as_numbers(default)
    }

    /// Splits every value at `separator` and returns all parts in order.
    pub fn split(&self, separator: char, min_parts: usize, max_parts: usize) -> Result<ArgumentValues> {
        let mut values = Vec::new();
        for (value, id) in &self.values {
            let parts = split_string(value, separator, max_split(max_parts));
            if parts.len() < min_parts {
                return Err(self.error(&format!(
                    "Invalid value: \"{value}\". Must be at least {min_parts} values separated by \"{separator}\"."
                )));
            }
            values.extend(parts.into_iter().map(|p| (p.to_string(), *id)));
        }
        Ok(ArgumentValues::new(values, self.value_id, Rc::clone(&self.store)))
    }

    pub fn split_n(&self, separator: char, num_parts: usize) -> Result<ArgumentValues> {
        self.split(separator, num_parts, num_parts)
    }

    pub fn error(&self, message: &str) -> ArgosError {
        report(&self.store, message.to_string(), self.argument_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ParserData;
    use crate::settings::ExitPolicy;
    use crate::store::ArgumentStore;
    use crate::{CommandSpec, OptionSpec};
    use argos_text::{Output, SharedBuffer};

    fn store(buffer: &SharedBuffer) -> StoreRef {
        let mut data = ParserData {
            command: Rc::new(CommandSpec::new("test").with_option(OptionSpec::new(["-n"]).with_argument("N"))),
            ..ParserData::default()
        };
        data.settings.exit = ExitPolicy { auto_exit: false, ..ExitPolicy::default() };
        data.help.output = Some(Output::Buffer(buffer.clone()));
        data.finish().unwrap();
        let command = Rc::clone(&data.command);
        ArgumentStore::new(Rc::new(data), command, "test".into()).into_ref()
    }

    fn value(store: &StoreRef, s: Option<&str>) -> ArgumentValue {
        let (value_id, argument_id) = store.borrow().lookup("-n").unwrap();
        ArgumentValue::new(s.map(String::from), value_id, argument_id, Rc::clone(store))
    }

    #[test]
    fn test_bool_values() {
        let store = store(&SharedBuffer::new());
        assert!(value(&store, Some("1")).as_bool(false));
        assert!(value(&store, Some("yes")).as_bool(false));
        assert!(!value(&store, Some("0")).as_bool(true));
        assert!(!value(&store, Some("false")).as_bool(true));
        assert!(!value(&store, Some("")).as_bool(true));
        assert!(value(&store, None).as_bool(true));
    }

    #[test]
    fn test_numbers_and_defaults() {
        let store = store(&SharedBuffer::new());
        assert_eq!(value(&store, Some("0x10")).as_i32(0).unwrap(), 16);
        assert_eq!(value(&store, None).as_i32(7).unwrap(), 7);
        assert_eq!(value(&store, Some("2.5")).as_f64(0.0).unwrap(), 2.5);
        assert_eq!(value(&store, None).as_string("none"), "none");
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let buffer = SharedBuffer::new();
        let store = store(&buffer);
        let err = value(&store, Some("abc")).as_u32(0).unwrap_err();
        assert!(matches!(err, ArgosError::InvalidValue(ref m) if m == "Invalid value: abc."));
        assert!(buffer.contents().starts_with("test: -n: Invalid value: abc.\n"));
    }

    #[test]
    fn test_split_limits() {
        let store = store(&SharedBuffer::new());
        let parts = value(&store, Some("a:b:c")).split(':', 0, 0).unwrap();
        assert_eq!(parts.raw_values(), ["a", "b", "c"]);
        let parts = value(&store, Some("a:b:c")).split(':', 0, 2).unwrap();
        assert_eq!(parts.raw_values(), ["a", "b:c"]);
        assert!(value(&store, Some("a")).split_n(':', 2).is_err());
        assert!(value(&store, None).split(':', 2, 2).unwrap().is_empty());
    }

    #[test]
    fn test_values_split_and_argument_id() {
        let store = store(&SharedBuffer::new());
        let (value_id, argument_id) = store.borrow().lookup("-n").unwrap();
        let values = ArgumentValues::new(
            vec![("1:2".into(), argument_id), ("3".into(), argument_id)],
            value_id,
            Rc::clone(&store),
        );
        assert_eq!(values.argument_id(), argument_id);
        assert_eq!(values.split(':', 0, 0).unwrap().as_i64s(&[]).unwrap(), [1, 2, 3]);
        assert!(values.split(':', 2, 0).is_err());
        assert_eq!(values.value(1).unwrap().value(), Some("3"));
        assert!(values.value(2).is_none());
    }
}
