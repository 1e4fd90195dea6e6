//! Help text and error message rendering.
//!
//! The help text consists of, in order: the initial text, the usage
//! synopsis, the about text, the argument sections and the final text. Each
//! part can be replaced or removed with a custom [`TextId`] text.

use argos_core::count_code_points;
use argos_text::{CURRENT_COLUMN, TextError, TextFormatter};

use crate::argument::ArgumentSpec;
use crate::command::CommandSpec;
use crate::data::ParserData;
use crate::option::OptionSpec;
use crate::types::{ArgumentId, TextId};

type Result<T> = std::result::Result<T, TextError>;

/// A section heading and its (label, description) pairs.
type Section = (String, Vec<(String, String)>);

const MAX_LABEL_WIDTH: usize = 32;

fn is_empty(text: &Option<String>) -> bool {
    text.as_deref().is_none_or(str::is_empty)
}

fn argument_name(arg: &ArgumentSpec) -> String {
    let name = &arg.name;
    if name.starts_with('<') || name.starts_with('[') {
        return name.clone();
    }

    let mut result = vec![format!("<{name}>"); arg.min_count as usize].join(" ");
    if arg.max_count == arg.min_count {
        return result;
    }
    if !result.is_empty() {
        result.push(' ');
    }
    if arg.max_count - arg.min_count == 1 {
        result.push_str(&format!("[<{name}>]"));
    } else {
        result.push_str(&format!("[<{name}>]..."));
    }
    result
}

fn push_flag(text: &mut String, flag: &str, argument: &str) {
    text.push_str(flag);
    if argument.is_empty() {
        return;
    }
    if !flag.ends_with('=') {
        text.push(' ');
    }
    if argument.starts_with('<') {
        text.push_str(argument);
    } else {
        text.push('<');
        text.push_str(argument);
        text.push('>');
    }
}

fn brief_option_name(opt: &OptionSpec, prefer_long: bool) -> String {
    let braces = opt.optional && !opt.option_type.is_stop();
    let long = prefer_long
        .then(|| opt.flags.iter().find(|f| f.len() > 2))
        .flatten();
    let Some(flag) = long.or_else(|| opt.flags.first()) else {
        return String::new();
    };

    let mut text = String::new();
    if braces {
        text.push('[');
    }
    push_flag(&mut text, flag, &opt.argument);
    if braces {
        text.push(']');
    }
    text
}

fn long_option_name(opt: &OptionSpec) -> String {
    let mut text = String::new();
    for flag in &opt.flags {
        if !text.is_empty() {
            text.push_str(", ");
        }
        push_flag(&mut text, flag, &opt.argument);
    }
    text
}

fn write_custom_text(
    formatter: &mut TextFormatter,
    cmd: &CommandSpec,
    id: TextId,
    prepend_newline: bool,
) -> Option<String> {
    let text = cmd.text(id);
    if let Some(t) = text.as_deref().filter(|t| !t.is_empty()) {
        if prepend_newline {
            formatter.newline();
        }
        formatter.write_words(t);
        if !formatter.is_current_line_empty() {
            formatter.newline();
        }
    }
    text
}

fn write_stop_and_help_usage(
    formatter: &mut TextFormatter,
    cmd: &CommandSpec,
    name: &str,
) -> Result<()> {
    for opt in &cmd.options {
        if !opt.visibility.in_usage() || !opt.option_type.is_stop() {
            continue;
        }
        formatter.write_words(name);
        formatter.write_words(" ");
        formatter.push_indentation(CURRENT_COLUMN);
        formatter.write_lines(&brief_option_name(opt, true));
        formatter.write_words(" ");
        formatter.pop_indentation()?;
        formatter.newline();
    }
    Ok(())
}

/// Width of the label column, or zero if descriptions must go on the line
/// after their labels.
fn label_width(formatter: &TextFormatter, sections: &[Section]) -> usize {
    let items = sections.iter().flat_map(|(_, items)| items);
    let name_width = items.clone().map(|(name, _)| count_code_points(name)).max().unwrap_or(0) + 3;
    let text_width = items.map(|(_, text)| count_code_points(text)).max().unwrap_or(0);
    if name_width > MAX_LABEL_WIDTH || name_width + text_width > formatter.line_width() {
        0
    } else {
        name_width
    }
}

fn add_to_section(sections: &mut Vec<Section>, section: &str, name: String, text: String) {
    match sections.iter_mut().find(|(s, _)| s == section) {
        Some((_, items)) => items.push((name, text)),
        None => sections.push((section.to_string(), vec![(name, text)])),
    }
}

fn collect_sections(cmd: &CommandSpec) -> Vec<Section> {
    let mut sections = Vec::new();

    let title = cmd.text(TextId::CommandsTitle).unwrap_or_else(|| "COMMANDS".into());
    for c in cmd.commands.iter().filter(|c| c.visibility.in_text()) {
        let section = if c.section.is_empty() { &title } else { &c.section };
        add_to_section(&mut sections, section, c.name.clone(), c.help());
    }

    let title = cmd.text(TextId::ArgumentsTitle).unwrap_or_else(|| "ARGUMENTS".into());
    for a in cmd.arguments.iter().filter(|a| a.visibility.in_text()) {
        let section = if a.section.is_empty() { &title } else { &a.section };
        add_to_section(&mut sections, section, argument_name(a), a.help());
    }

    let title = cmd.text(TextId::OptionsTitle).unwrap_or_else(|| "OPTIONS".into());
    for o in cmd.options.iter().filter(|o| o.visibility.in_text()) {
        let section = if o.section.is_empty() { &title } else { &o.section };
        add_to_section(&mut sections, section, long_option_name(o), o.help());
    }
    sections
}

fn write_argument_sections(
    formatter: &mut TextFormatter,
    cmd: &CommandSpec,
    mut prepend_newline: bool,
) -> Result<()> {
    let sections = collect_sections(cmd);
    if sections.is_empty() {
        return Ok(());
    }
    let width = label_width(formatter, &sections);

    for (section, items) in &sections {
        if prepend_newline {
            formatter.newline();
        }
        formatter.write_words(section);
        formatter.newline();
        formatter.push_indentation(2);
        for (name, text) in items {
            formatter.write_words(name);
            if !text.is_empty() {
                if width > 0 {
                    if formatter.current_line_width() >= width {
                        formatter.write_words("  ");
                    }
                    formatter.push_indentation(width);
                } else {
                    formatter.newline();
                    formatter.push_indentation(8);
                }
                formatter.write_words(text);
                formatter.pop_indentation()?;
            }
            formatter.newline();
        }
        formatter.pop_indentation()?;
        prepend_newline = true;
    }
    Ok(())
}

fn write_brief_usage(
    formatter: &mut TextFormatter,
    cmd: &CommandSpec,
    name: &str,
    prepend_newline: bool,
) -> Result<()> {
    if prepend_newline {
        formatter.newline();
    }

    formatter.push_indentation(2);
    write_stop_and_help_usage(formatter, cmd, name)?;
    formatter.write_words(name);
    formatter.write_words(" ");
    formatter.push_indentation(CURRENT_COLUMN);

    for opt in &cmd.options {
        if opt.visibility.in_usage() && !opt.option_type.is_stop() {
            formatter.write_lines(&brief_option_name(opt, false));
            formatter.write_words(" ");
        }
    }
    for arg in cmd.arguments.iter().filter(|a| a.visibility.in_usage()) {
        formatter.write_lines(&argument_name(arg));
        formatter.write_words(" ");
    }
    if !cmd.commands.is_empty() {
        let brackets = !cmd.require_command.unwrap_or(false);
        if brackets {
            formatter.write_words("[");
        }
        let names: Vec<&str> = cmd
            .commands
            .iter()
            .filter(|c| c.visibility.in_usage())
            .map(|c| c.name.as_str())
            .collect();
        formatter.write_words(&names.join("|"));
        if brackets {
            formatter.write_words("]");
        }
    }

    formatter.pop_indentation()?;
    formatter.newline();
    formatter.pop_indentation()
}

/// Writes the usage block. Returns `true` if anything was written.
fn write_usage(
    formatter: &mut TextFormatter,
    cmd: &CommandSpec,
    name: &str,
    mut prepend_newline: bool,
) -> Result<bool> {
    if cmd.text(TextId::Usage).is_some_and(|t| t.is_empty()) {
        return Ok(false);
    }

    let title = write_custom_text(formatter, cmd, TextId::UsageTitle, prepend_newline);
    if title.is_none() {
        if prepend_newline {
            formatter.newline();
        }
        formatter.write_words("USAGE");
        formatter.newline();
        prepend_newline = false;
    } else {
        prepend_newline = prepend_newline && is_empty(&title);
    }

    let usage = write_custom_text(formatter, cmd, TextId::Usage, prepend_newline);
    if usage.is_some() {
        return Ok(!is_empty(&title) || !is_empty(&usage));
    }
    write_brief_usage(formatter, cmd, name, prepend_newline)?;
    Ok(true)
}

/// Display name of the argument or option of `cmd` with the given id.
fn item_name(cmd: &CommandSpec, argument_id: ArgumentId) -> Option<String> {
    if argument_id.is_none() {
        return None;
    }
    if let Some(a) = cmd.arguments.iter().find(|a| a.argument_id == argument_id) {
        return Some(a.name.clone());
    }
    cmd.options
        .iter()
        .find(|o| o.argument_id == argument_id)
        .map(OptionSpec::joined_flags)
}

/// Writes the help text of `cmd`, which is invoked as `name`.
pub(crate) fn write_help_text(data: &ParserData, cmd: &CommandSpec, name: &str) -> Result<()> {
    let mut formatter = data.help_formatter()?;
    let mut newline = !is_empty(&write_custom_text(&mut formatter, cmd, TextId::InitialText, false));
    newline = write_usage(&mut formatter, cmd, name, newline)? || newline;
    let about = write_custom_text(&mut formatter, cmd, TextId::About, newline);
    newline = !is_empty(&about) || newline;
    write_argument_sections(&mut formatter, cmd, newline)?;
    write_custom_text(&mut formatter, cmd, TextId::FinalText, true);
    formatter.flush();
    Ok(())
}

/// Writes `message` followed by the usage synopsis. When `argument_id`
/// belongs to an argument or option of `cmd`, the message is prefixed with
/// its name.
pub(crate) fn write_error_message(
    data: &ParserData,
    cmd: &CommandSpec,
    name: &str,
    message: &str,
    argument_id: ArgumentId,
) -> Result<()> {
    let mut formatter = data.error_formatter()?;
    formatter.write_words(&format!("{name}: "));
    match item_name(cmd, argument_id) {
        Some(item) => formatter.write_words(&format!("{item}: {message}")),
        None => formatter.write_words(message),
    }
    formatter.newline();
    if write_custom_text(&mut formatter, cmd, TextId::ErrorUsage, false).is_none() {
        write_usage(&mut formatter, cmd, name, false)?;
    }
    formatter.flush();
    Ok(())
}
