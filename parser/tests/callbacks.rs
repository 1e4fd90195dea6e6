//! Integration tests for option and argument callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use argos::{
    ArgumentParser, ArgumentSpec, OptionSpec, Output, ParserResultCode, SharedBuffer,
};

/// A parser that writes to a buffer and never exits.
fn parser(name: &str) -> (ArgumentParser, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let parser = ArgumentParser::new(name)
        .with_auto_exit(false)
        .with_output(Output::Buffer(buffer.clone()));
    (parser, buffer)
}

#[test]
fn test_option_callback_sees_value() {
    let (parser, _) = parser("test");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let args = parser
        .add_option(
            OptionSpec::new(["-n", "--number"])
                .with_argument("N")
                .with_callback(move |cb| {
                    log.borrow_mut().push(format!("{}={}", cb.view.joined_flags(), cb.value));
                    Ok(())
                }),
        )
        .parse(["-n", "4", "--number=5"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    assert_eq!(*seen.borrow(), ["-n, --number=4", "-n, --number=5"]);
}

#[test]
fn test_argument_callback_can_rewrite_values() {
    let (parser, _) = parser("test");
    let args = parser
        .add_argument(ArgumentSpec::new("WORD").with_counts(1, 3).with_callback(|cb| {
            let upper = cb.value.to_uppercase();
            cb.builder.append("UPPER", &upper)?;
            Ok(())
        }))
        .add_option(
            OptionSpec::new(["--upper"])
                .with_alias("UPPER")
                .with_argument("W")
                .with_visibility(argos::Visibility::Hidden),
        )
        .parse(["ab", "cd"])
        .unwrap();
    assert_eq!(args.values("WORD").unwrap().as_strings(&[]), ["ab", "cd"]);
    assert_eq!(args.values("UPPER").unwrap().as_strings(&[]), ["AB", "CD"]);
}

#[test]
fn test_global_callbacks_run_after_own() {
    let (parser, _) = parser("test");
    let order = Rc::new(RefCell::new(Vec::new()));
    let (own, global_opt, global_arg) = (Rc::clone(&order), Rc::clone(&order), Rc::clone(&order));
    let args = parser
        .with_option_callback(move |cb| {
            global_opt.borrow_mut().push(format!("global {}", cb.view.joined_flags()));
            Ok(())
        })
        .with_argument_callback(move |cb| {
            global_arg.borrow_mut().push(format!("global {}", cb.view.name()));
            Ok(())
        })
        .add_option(OptionSpec::new(["-a"]).with_callback(move |_| {
            own.borrow_mut().push("own -a".to_string());
            Ok(())
        }))
        .add_option(OptionSpec::new(["-b"]))
        .add_argument(ArgumentSpec::new("FILE"))
        .parse(["-a", "x", "-b"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    assert_eq!(
        *order.borrow(),
        ["own -a", "global -a", "global FILE", "global -b"]
    );
}

#[test]
fn test_callback_inserts_tokens() {
    let (parser, _) = parser("test");
    let parser = parser
        .add_option(OptionSpec::new(["-a"]).with_callback(|cb| {
            cb.new_arguments = vec!["-b".to_string(), "-d".to_string()];
            Ok(())
        }))
        .add_option(OptionSpec::new(["-b"]))
        .add_option(OptionSpec::new(["-c"]))
        .add_option(OptionSpec::new(["-d"]));

    let args = parser.parse(["-a"]).unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    assert!(args.value("-b").unwrap().as_bool(false));
    assert!(!args.value("-c").unwrap().as_bool(false));
    assert!(args.value("-d").unwrap().as_bool(false));
}

#[test]
fn test_inserted_tokens_count_as_arguments() {
    let (parser, _) = parser("test");
    let args = parser
        .add_option(OptionSpec::new(["--defaults"]).with_callback(|cb| {
            cb.new_arguments = vec!["in.txt".to_string()];
            Ok(())
        }))
        .add_argument(ArgumentSpec::new("INPUT"))
        .add_argument(ArgumentSpec::new("OUTPUT"))
        .parse(["--defaults", "out.txt"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Success);
    assert_eq!(args.value("INPUT").unwrap().as_string(""), "in.txt");
    assert_eq!(args.value("OUTPUT").unwrap().as_string(""), "out.txt");
}

#[test]
fn test_callback_error_ends_parsing() {
    let (parser, buffer) = parser("test");
    let args = parser
        .add_option(
            OptionSpec::new(["--level"])
                .with_argument("N")
                .with_callback(|cb| {
                    if cb.value.parse::<u8>().is_ok_and(|n| n <= 3) {
                        Ok(())
                    } else {
                        Err(cb.builder.error("Level must be between 0 and 3."))
                    }
                }),
        )
        .add_argument(ArgumentSpec::new("FILE").with_counts(0, 2))
        .parse(["--level", "7", "a", "b"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Failure);
    assert_eq!(args.unprocessed_arguments(), ["a", "b"]);
    assert!(buffer
        .contents()
        .starts_with("test: Level must be between 0 and 3.\n"));
}

#[test]
fn test_other_callback_errors_are_reported() {
    let (parser, buffer) = parser("test");
    let args = parser
        .add_option(OptionSpec::new(["-x"]).with_callback(|cb| {
            cb.builder.assign("--nope", "1")?;
            Ok(())
        }))
        .parse(["-x"])
        .unwrap();
    assert_eq!(args.result_code(), ParserResultCode::Failure);
    assert!(buffer.contents().starts_with("test: Unknown value: --nope\n"));
}

#[test]
fn test_builder_reads_earlier_values() {
    let (parser, _) = parser("test");
    let args = parser
        .add_option(OptionSpec::new(["--base"]).with_argument("N"))
        .add_option(
            OptionSpec::new(["--offset"])
                .with_argument("N")
                .with_callback(|cb| {
                    let base = cb.builder.value("--base")?.as_i32(0)?;
                    let offset: i32 = cb.value.parse().map_err(|_| cb.builder.error("Bad offset."))?;
                    cb.builder.assign("--base", &(base + offset).to_string())?;
                    Ok(())
                }),
        )
        .parse(["--base", "10", "--offset", "5"])
        .unwrap();
    assert_eq!(args.value("--base").unwrap().as_i32(0).unwrap(), 15);
    assert_eq!(args.values("--base").unwrap().len(), 1);
}
