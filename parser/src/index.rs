//! Sorted flag index used to look up options.

use std::cmp::Ordering;

use argos_core::{are_equal, are_equal_ci, compare_ci, starts_with};
use tracing::debug;

use crate::command::CommandSpec;
use crate::error::ConfigError;

fn compare(a: &str, b: &str, case_insensitive: bool) -> Ordering {
    if case_insensitive {
        compare_ci(a, b)
    } else {
        a.cmp(b)
    }
}

/// Sorts the flags of `cmd` and rejects duplicate or conflicting ones.
pub(crate) fn build_option_index(
    cmd: &mut CommandSpec,
    case_insensitive: bool,
) -> Result<(), ConfigError> {
    let mut index: Vec<(String, usize)> = cmd
        .options
        .iter()
        .enumerate()
        .flat_map(|(i, o)| o.flags.iter().map(move |f| (f.clone(), i)))
        .collect();
    index.sort_by(|a, b| compare(&a.0, &b.0, case_insensitive));

    if let Some(pair) = index
        .windows(2)
        .find(|w| are_equal(&w[0].0, &w[1].0, case_insensitive))
    {
        let (first, second) = (&pair[0].0, &pair[1].0);
        if first == second {
            return Err(ConfigError::DuplicateFlag(first.clone()));
        }
        return Err(ConfigError::ConflictingFlags(first.clone(), second.clone()));
    }

    debug!(command = %cmd.name, flags = index.len(), "Built option index");
    cmd.option_index = index;
    Ok(())
}

fn find_option_impl(
    cmd: &CommandSpec,
    flag: &str,
    allow_abbreviations: bool,
    case_insensitive: bool,
) -> Option<usize> {
    let index = &cmd.option_index;
    let pos = index.partition_point(|(f, _)| compare(f, flag, case_insensitive) == Ordering::Less);
    let (found, option) = index.get(pos)?;
    if found == flag || (case_insensitive && are_equal_ci(found, flag)) {
        return Some(*option);
    }
    if !allow_abbreviations || !starts_with(found, flag, case_insensitive) {
        return None;
    }
    if let Some((next, _)) = index.get(pos + 1) {
        if starts_with(next, flag, case_insensitive) {
            return None;
        }
    }
    Some(*option)
}

/// Finds the option matching `flag`, returning its index in `cmd.options`.
///
/// A flag given as `--name=` also matches an option declared as `--name`,
/// but only if that option takes an argument.
pub(crate) fn find_option(
    cmd: &CommandSpec,
    flag: &str,
    allow_abbreviations: bool,
    case_insensitive: bool,
) -> Option<usize> {
    let found = find_option_impl(cmd, flag, allow_abbreviations, case_insensitive);
    if found.is_some() || flag.len() <= 2 || !flag.ends_with('=') {
        return found;
    }
    let trimmed = &flag[..flag.len() - 1];
    find_option_impl(cmd, trimmed, allow_abbreviations, case_insensitive)
        .filter(|&i| !cmd.options[i].argument.is_empty())
}
