//! Demo command tree wired into the `flagtree` binary
//!
//! `good` and `bad` each fold their selected flags over a greeting. Flags prepend
//! themselves, so the most recently matched flag ends up innermost.

use crate::domain::{Command, DomainResult, Flag};

/// Fold the selected flags over `seed`, most recently matched flag first.
fn wish(seed: &str, selected: &[&Flag<String>]) -> String {
    let output = selected
        .iter()
        .fold(seed.to_string(), |acc, flag| flag.call(acc));
    format!("have a {output}")
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

pub fn good_day_wisher(execute: bool) -> DomainResult<Command<String>> {
    Command::new("good")?
        .description("Wishes you a good day")
        .execute_handlers(execute)
        .register_flag(
            Flag::new("very")?
                .short('v')
                .description("Wishes you a very good day")
                .handler(prepend("very")),
        )?
        .register_flag(
            Flag::new("rather")?
                .short('r')
                .description("Wishes you a rather good day")
                .handler(prepend("rather")),
        )
        .map(|cmd| cmd.register_handler(|selected| wish("good day", selected)))
}

pub fn bad_day_wisher(execute: bool) -> DomainResult<Command<String>> {
    Command::new("bad")?
        .description("Wishes you a bad day")
        .execute_handlers(execute)
        .register_flag(
            Flag::new("quite")?
                .short('q')
                .description("Wishes you a quite bad day")
                .handler(prepend("quite")),
        )?
        .register_flag(
            Flag::new("truly")?
                .short('t')
                .description("Wishes you a truly bad day")
                .handler(prepend("truly")),
        )
        .map(|cmd| cmd.register_handler(|selected| wish("bad day", selected)))
}

/// Root namespace `wish`: never executes, so a bare `-h` prints the full help.
///
/// Return mode is set on the root and sticks for the subcommands, so `good`/`bad`
/// resolve to their greeting.
pub fn wisher_tree(execute: bool) -> DomainResult<Command<String>> {
    Command::new("wish")?
        .description("Wishes you a day of some quality")
        .return_handler_result(true)
        .execute_handlers(false)
        .register_command(good_day_wisher(execute)?)?
        .register_command(bad_day_wisher(execute)?)
}
