//! CLI argument definitions and command builders
//!
//! Each verb is its own `clap::Command`; all of them accept the same target,
//! flags, and trailing `key=value` settings.

use clap::{Arg, ArgAction, Command};

pub const FILE_USAGE: &str = "A custom path to a config file";
pub const WINDOWS_USAGE: &str =
    "List of windows to start. If session exists, those windows will be attached to current session";
pub const ATTACH_USAGE: &str = "Force switch client for a session";
pub const DETACH_USAGE: &str = "Detach tmux session. The same as -d flag in the tmux";
pub const INSIDE_USAGE: &str = "Create all windows inside current session";
pub const DEBUG_USAGE: &str = "Print all commands to ~/.config/gmux/gmux.log";

pub fn after_help_text(examples: &[&str]) -> String {
    let mut text = String::from("EXAMPLES:\n");
    for example in examples {
        text.push_str("  ");
        text.push_str(example);
        text.push('\n');
    }
    text
}

pub fn build_cli() -> Command {
    Command::new("gmux")
        .version(env!("CARGO_PKG_VERSION"))
        .about("gmux - session manager for tmux")
        .disable_help_subcommand(true)
        .subcommand(cmd_list())
        .subcommand(cmd_edit())
        .subcommand(cmd_new())
        .subcommand(cmd_start())
        .subcommand(cmd_stop())
        .subcommand(cmd_print())
        .after_help(after_help_text(&[
            "gmux list",
            "gmux edit work",
            "gmux new work",
            "gmux start work",
            "gmux start work:win1",
            "gmux start work -w win1",
            "gmux start work:win1,win2",
            "gmux stop work",
            "gmux start work --attach",
            "gmux print > ~/.config/gmux/work.yml",
        ]))
}

pub fn cmd_list() -> Command {
    with_target_args(Command::new("list").about("List available project configurations"))
}

pub fn cmd_edit() -> Command {
    with_target_args(Command::new("edit").about("Edit project configuration"))
}

pub fn cmd_new() -> Command {
    with_target_args(Command::new("new").about("New project configuration"))
}

pub fn cmd_start() -> Command {
    with_target_args(
        Command::new("start")
            .about("Start project session")
            .after_help(after_help_text(&[
                "gmux start work                  Start every non-manual window",
                "gmux start work:win1,win2        Start only win1 and win2",
                "gmux start work -w win1 -w win2  Same, with flags",
                "gmux start work branch=main      Substitute $branch in the project file",
                "gmux start -f ./gmux.yml         Start from a file outside ~/.config/gmux",
            ])),
    )
}

pub fn cmd_stop() -> Command {
    with_target_args(Command::new("stop").about("Stop project session"))
}

pub fn cmd_print() -> Command {
    with_target_args(Command::new("print").about("Session configuration to stdout"))
}

fn with_target_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("args")
            .value_name("ARGS")
            .num_args(1..)
            .action(ArgAction::Append)
            .help("Project target (project or project:win1,win2) followed by key=value settings"),
    )
    .arg(
        Arg::new("file")
            .long("file")
            .short('f')
            .value_name("FILE")
            .help(FILE_USAGE),
    )
    .arg(
        Arg::new("windows")
            .long("windows")
            .short('w')
            .value_name("WINDOW")
            .action(ArgAction::Append)
            .help(WINDOWS_USAGE),
    )
    .arg(
        Arg::new("attach")
            .long("attach")
            .short('a')
            .action(ArgAction::SetTrue)
            .help(ATTACH_USAGE),
    )
    .arg(
        Arg::new("detach")
            .long("detach")
            .action(ArgAction::SetTrue)
            .help(DETACH_USAGE),
    )
    .arg(
        Arg::new("inside-current-session")
            .long("inside-current-session")
            .short('i')
            .action(ArgAction::SetTrue)
            .help(INSIDE_USAGE),
    )
    .arg(
        Arg::new("debug")
            .long("debug")
            .short('d')
            .action(ArgAction::SetTrue)
            .help(DEBUG_USAGE),
    )
}
