//! Configuration loading helpers for the sqlbridge CLI.
//!
//! The logic here filters CLI arguments destined for `ortho-config` so the
//! loader only receives supported flags while the command parser operates
//! on the remaining tokens.

use std::ffi::{OsStr, OsString};

/// Configuration flags recognised ahead of the subcommand.
///
/// Every flag listed here takes a value; the splitter forwards the flag and
/// its value to the configuration loader. Flags must appear before the
/// subcommand, otherwise they are treated as command arguments.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--runtime",
    "--script",
    "--read-dialect",
    "--write-dialect",
    "--log-filter",
    "--log-format",
];

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn classify_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let mut flag_parts = argument_text.splitn(2, '=');
    let Some(flag) = flag_parts.next() else {
        return FlagAction::Skip;
    };
    let has_inline_value = flag_parts.next().is_some();

    if CONFIG_CLI_FLAGS.contains(&flag) {
        return FlagAction::Include {
            needs_value: !has_inline_value,
        };
    }

    FlagAction::Skip
}

/// Result of partitioning argv into configuration flags and command tokens.
pub(crate) struct ConfigArgumentSplit {
    /// Binary name plus the configuration flags and their values.
    pub(crate) config_arguments: Vec<OsString>,
    /// Index of the first command token in the original argv.
    pub(crate) command_start: usize,
}

/// Partitions argv: leading configuration flags go to the loader, the rest
/// to the command parser.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(binary) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered: Vec<OsString> = vec![binary.clone()];
    let mut command_start = 1usize;
    let mut index = 1usize;
    let mut pending_values = 0usize;

    while let Some(argument) = args.get(index) {
        if pending_values > 0 {
            filtered.push(argument.clone());
            pending_values -= 1;
            index += 1;
            command_start = index;
            continue;
        }

        match classify_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                index += 1;
                command_start = index;
                if needs_value {
                    pending_values = 1;
                }
            }
            FlagAction::Skip => {
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}
