//! Resolution and dispatch tests against small command trees.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use flagtree::util::testing;
use flagtree::{Command, DomainError, Flag, Resolution};
use rstest::{fixture, rstest};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn test_cli(returns: bool, executes: bool) -> Command<String> {
    Command::new("testCli")
        .unwrap()
        .description("Testing the CLI")
        .return_handler_result(returns)
        .execute_handlers(executes)
}

fn prepend(word: &'static str) -> impl Fn(&[String], String) -> String {
    move |args: &[String], msg: String| {
        if args.is_empty() {
            format!("{word} {msg}")
        } else {
            format!("{word} {} {msg}", args.join(" "))
        }
    }
}

fn fold_greeting(seed: &'static str) -> impl Fn(&[&Flag<String>]) -> String {
    move |selected: &[&Flag<String>]| {
        let output = selected
            .iter()
            .fold(seed.to_string(), |acc, flag| flag.call(acc));
        format!("have a {output}")
    }
}

fn good_day_wisher() -> Command<String> {
    Command::new("good")
        .unwrap()
        .description("Wishes you a good day")
        .register_flag(
            Flag::new("very")
                .unwrap()
                .short('v')
                .description("Wishes you a very good day")
                .handler(prepend("very")),
        )
        .unwrap()
        .register_flag(
            Flag::new("rather")
                .unwrap()
                .short('r')
                .description("Wishes you a rather good day")
                .handler(prepend("rather")),
        )
        .unwrap()
        .register_handler(fold_greeting("good day"))
}

fn bad_day_wisher() -> Command<String> {
    Command::new("bad")
        .unwrap()
        .description("Wishes you a bad day")
        .register_flag(
            Flag::new("quite")
                .unwrap()
                .short('q')
                .description("Wishes you a quite bad day")
                .handler(prepend("quite")),
        )
        .unwrap()
        .register_flag(
            Flag::new("truly")
                .unwrap()
                .short('t')
                .description("Wishes you a truly bad day")
                .handler(prepend("truly")),
        )
        .unwrap()
        .register_handler(fold_greeting("bad day"))
}

#[fixture]
fn processable_cli() -> Command<String> {
    test_cli(true, true)
        .register_command(good_day_wisher())
        .unwrap()
        .register_command(bad_day_wisher())
        .unwrap()
}

// ============================================================
// Resolution through subcommands
// ============================================================

#[rstest]
#[case(&["good", "-v", "-r"], "have a very rather good day")]
#[case(&["good", "-r"], "have a rather good day")]
#[case(&["bad", "-t", "-q"], "have a truly quite bad day")]
#[case(&["bad", "-q"], "have a quite bad day")]
#[case(&["bad", "-q", "truly", "awful"], "have a quite truly awful bad day")]
#[case(&["good", "--very", "--rather"], "have a very rather good day")]
fn given_subcommand_tokens_when_resolving_then_returns_handler_result(
    mut processable_cli: Command<String>,
    #[case] tokens: &[&str],
    #[case] expected: &str,
) {
    let result = processable_cli.resolve_to(tokens, &mut io::sink()).unwrap();
    assert_eq!(result.into_value().as_deref(), Some(expected));
}

#[rstest]
fn given_return_mode_on_root_when_resolving_then_child_keeps_it(
    mut processable_cli: Command<String>,
) {
    assert!(!processable_cli.find_command("good").unwrap().returns_handler_result());
    processable_cli
        .resolve_to(&["good"], &mut io::sink())
        .unwrap();
    assert!(processable_cli.find_command("good").unwrap().returns_handler_result());
}

#[rstest]
fn given_variadic_flag_when_resolving_then_args_stop_at_next_flag(
    mut processable_cli: Command<String>,
) {
    processable_cli
        .resolve_to(&["bad", "-q", "truly", "awful", "-t"], &mut io::sink())
        .unwrap();
    let bad = processable_cli.find_command("bad").unwrap();
    assert_eq!(bad.flag("quite").unwrap().arguments(), ["truly", "awful"]);
    assert!(bad.flag("truly").unwrap().arguments().is_empty());

    let names: Vec<&str> = bad.selected_flags().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["truly", "quite"]);
}

#[rstest]
fn given_unknown_flag_when_resolving_then_fails_naming_token(
    mut processable_cli: Command<String>,
) {
    let err = processable_cli
        .resolve_to(&["bad", "-x"], &mut io::sink())
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidFlag(ref token) if token == "-x"));
    assert_eq!(err.to_string(), "invalid flag: -x");
}

#[rstest]
#[case(&["nonsense"])]
#[case(&["--"])]
#[case(&["-"])]
#[case(&["-vr"])]
#[case(&["--very=1"])]
fn given_non_flag_token_at_leaf_when_resolving_then_fails(#[case] tokens: &[&str]) {
    let mut good = good_day_wisher();
    let err = good.resolve_to(tokens, &mut io::sink()).unwrap_err();
    assert!(matches!(err, DomainError::InvalidFlag(ref token) if token == tokens[0]));
}

#[rstest]
fn given_subcommand_name_after_flag_when_resolving_then_it_is_an_argument(
    processable_cli: Command<String>,
) {
    let mut root = processable_cli
        .execute_handlers(false)
        .register_flag(Flag::new("mode").unwrap())
        .unwrap();
    let result = root.resolve_to(&["-m", "good"], &mut io::sink()).unwrap();
    let command = result.command().expect("root resolves itself");
    assert_eq!(command.name(), "testCli");
    assert_eq!(command.flag("mode").unwrap().arguments(), ["good"]);
}

// ============================================================
// Dispatch modes
// ============================================================

#[test]
fn given_handler_without_return_mode_when_resolving_then_calls_handler_and_returns_node() {
    let called = Rc::new(Cell::new(false));
    let flag = Rc::clone(&called);
    let mut cli = test_cli(false, true).register_handler(move |_| {
        flag.set(true);
        String::new()
    });

    let result = cli.resolve_to::<&str>(&[], &mut io::sink()).unwrap();

    assert!(matches!(result, Resolution::Command(c) if c.name() == "testCli"));
    assert!(called.get());
}

#[test]
fn given_execution_disabled_when_resolving_without_help_then_returns_node_untouched() {
    let called = Rc::new(Cell::new(false));
    let flag = Rc::clone(&called);
    let mut cli = test_cli(false, false).register_handler(move |_| {
        flag.set(true);
        String::new()
    });
    let mut out = Vec::new();

    let result = cli.resolve_to::<&str>(&[], &mut out).unwrap();

    assert!(matches!(result, Resolution::Command(_)));
    assert!(!called.get());
    assert!(out.is_empty());
}

#[test]
fn given_no_command_handler_when_resolving_then_calls_selected_flag_handlers_in_order() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let record = |name: &'static str| {
        let calls = Rc::clone(&calls);
        move |_: &[String], v: String| {
            calls.borrow_mut().push(name);
            v
        }
    };
    let mut cli = test_cli(false, true)
        .register_flag(
            Flag::new("scrantonicity")
                .unwrap()
                .short('s')
                .description("The best Police cover band in Scranton")
                .handler(record("scrantonicity")),
        )
        .unwrap()
        .register_flag(
            Flag::new("jokersandtokers")
                .unwrap()
                .short('j')
                .description("The best Steve Miller cover band in Scranton")
                .handler(record("jokersandtokers")),
        )
        .unwrap()
        .register_flag(
            Flag::new("dundermifflinwarehouseband")
                .unwrap()
                .short('d')
                .description("This band didn't let Kevin play")
                .handler(record("dundermifflinwarehouseband")),
        )
        .unwrap();

    let result = cli.resolve_to(&["-s", "-j"], &mut io::sink()).unwrap();

    assert!(matches!(result, Resolution::Command(_)));
    assert_eq!(*calls.borrow(), ["jokersandtokers", "scrantonicity"]);
}

#[test]
fn given_flags_without_handlers_when_dispatching_then_they_are_skipped() {
    let mut cli = test_cli(false, true)
        .register_flag(Flag::new("quiet").unwrap())
        .unwrap();
    let result = cli.resolve_to(&["-q", "-h"], &mut io::sink()).unwrap();
    let command = result.command().unwrap();
    assert_eq!(command.selected_flags().len(), 2);
}

// ============================================================
// Registration
// ============================================================

#[test]
fn given_child_when_registering_then_it_is_reachable_by_name() {
    let cli = Command::<String>::new("external")
        .unwrap()
        .register_command(Command::new("internal").unwrap())
        .unwrap();
    assert_eq!(cli.find_command("internal").unwrap().name(), "internal");
    assert!(cli.children().contains_key("internal"));
    assert!(cli.find_command("missing").is_none());
}

#[rstest]
fn given_children_when_registering_then_iteration_follows_registration_order(
    processable_cli: Command<String>,
) {
    let names: Vec<&str> = processable_cli.children().keys().map(String::as_str).collect();
    assert_eq!(names, ["good", "bad"]);
}

#[test]
fn given_same_child_name_twice_when_registering_then_fails_naming_it() {
    let result = test_cli(false, true)
        .register_command(test_cli(false, true))
        .unwrap()
        .register_command(test_cli(false, true));

    let err = result.unwrap_err();
    assert!(matches!(err, DomainError::DuplicateCommand(ref name) if name == "testCli"));
    assert_eq!(err.to_string(), "command testCli has already been defined");
}

#[test]
fn given_extra_flags_when_registering_then_help_flag_is_kept() {
    let cli = test_cli(false, true)
        .register_flag(Flag::new("boss").unwrap().description("Test Flag"))
        .unwrap()
        .register_flag(Flag::new("jim").unwrap().description("Farewell Flag"))
        .unwrap();
    assert_eq!(cli.flags().len(), 3);
    assert_eq!(cli.flags()[0].name(), "help");
}

#[test]
fn given_shadowed_short_name_when_resolving_then_first_registration_wins() {
    let mut cli = test_cli(false, false)
        .register_flag(Flag::new("hello").unwrap())
        .unwrap();
    assert_eq!(cli.find_flag("-h").unwrap().name(), "help");
    assert_eq!(cli.find_flag("--hello").unwrap().name(), "hello");

    cli.resolve_to(&["--hello"], &mut io::sink()).unwrap();
    assert!(cli.is_selected("hello"));
}

#[test]
fn given_registered_flags_when_finding_then_long_and_short_forms_match() {
    let cli = test_cli(false, true)
        .register_flag(Flag::new("test1").unwrap().short('1'))
        .unwrap()
        .register_flag(Flag::new("test2").unwrap().short('2'))
        .unwrap();

    for flag in cli.flags() {
        let long = format!("--{}", flag.name());
        let short = format!("-{}", flag.short_name());
        assert_eq!(cli.find_flag(&long).unwrap().name(), flag.name());
        assert_eq!(cli.find_flag(&short).unwrap().name(), flag.name());
        assert_eq!(cli.find_short_flag(&short).unwrap().name(), flag.name());
    }
    assert!(cli.find_flag("--").is_none());
    assert!(cli.find_flag("-3").is_none());
    assert!(cli.find_short_flag("ab").is_none());
}
