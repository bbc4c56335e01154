//! Per-command help screen (`<command> --help`).

use super::command::CommandDefinition;
use crate::colors::{GREEN, PURPLE};
use crate::config::DEFAULT_TITLE;
use crate::format::{text_width, wordwrap};
use crate::output::Output;

/// Help column for an option: `-f, --force`, `    --env [input]`.
fn option_label(alias: Option<char>, name: &str, is_valuable: bool) -> String {
    let mut label = match alias {
        Some(alias) => format!("-{}, ", alias),
        None => "    ".to_string(),
    };
    label.push_str("--");
    label.push_str(name);
    if is_valuable {
        label.push_str(" [input]");
    }
    label
}

/// Render the Help/Usage/Arguments/Options sections for `definition`.
pub fn render_help(output: &mut Output, definition: &CommandDefinition, app_title: &str) {
    let mut usage = vec![definition.name.clone()];
    let mut arg_rows = Vec::with_capacity(definition.arguments.len());
    for arg in &definition.arguments {
        usage.push(format!("[{}]", arg.name));
        let mut label = arg.name.clone();
        if arg.is_optional {
            label.push_str(" [optional]");
        }
        arg_rows.push((label, arg.description.as_str()));
    }
    usage.push("[options]".to_string());

    let opt_rows: Vec<(String, &str)> = definition
        .options
        .iter()
        .map(|opt| {
            (
                option_label(opt.alias, &opt.name, opt.is_valuable),
                opt.description.as_str(),
            )
        })
        .collect();

    let pad = arg_rows
        .iter()
        .chain(opt_rows.iter())
        .map(|(label, _)| text_width(label))
        .max()
        .unwrap_or(0)
        + 3;

    if app_title == DEFAULT_TITLE {
        output.robot(&format!(
            "How to get started with command -> {}",
            definition.name
        ));
    }

    output.writeln_styled("Help:", &[PURPLE]);
    output.writeln(&format!(" {}", wordwrap(&definition.description, 100, false)));
    output.new_line(1);
    output.writeln_styled("Usage:", &[PURPLE]);
    output.writeln(&format!("  {}", usage.join(" ")));
    output.new_line(1);

    output.writeln_styled("Arguments:", &[PURPLE]);
    write_rows(output, &arg_rows, pad);
    output.new_line(1);

    output.writeln_styled("Options:", &[PURPLE]);
    write_rows(output, &opt_rows, pad);
    output.new_line(1);
}

fn write_rows(output: &mut Output, rows: &[(String, &str)], pad: usize) {
    for (label, description) in rows {
        let name = output.style(label, &[GREEN]);
        let gap = " ".repeat(pad.saturating_sub(text_width(label)));
        output.writeln(&format!("  {}{}{}", name, gap, description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputConfig;

    fn help_for(signature: &str, description: &str) -> String {
        let def = CommandDefinition::inline(signature, description, |_, _| Ok(()));
        let (mut output, captured) = Output::capture(OutputConfig::default());
        render_help(&mut output, &def, "Tools");
        captured.contents()
    }

    #[test]
    fn test_usage_line_lists_arguments_in_order() {
        let text = help_for("copy {source} {dest?} {--f|force}", "Copy a file");
        assert!(text.contains("Help:\n Copy a file\n"));
        assert!(text.contains("Usage:\n  copy [source] [dest] [options]\n"));
    }

    #[test]
    fn test_argument_and_option_rows() {
        // widest label is "    --env [input]" (17), so labels pad to 20
        let text = help_for(
            "deploy {target::Where to deploy} {tag?} {--f|force::Skip checks} {--env=staging}",
            "",
        );
        assert!(text.contains(&format!("  target{}Where to deploy\n", " ".repeat(14))));
        assert!(text.contains(&format!("  tag [optional]{}\n", " ".repeat(6))));
        assert!(text.contains(&format!("  -f, --force{}Skip checks\n", " ".repeat(9))));
        assert!(text.contains(&format!("      --env [input]{}\n", " ".repeat(3))));
    }

    #[test]
    fn test_robot_only_for_default_title() {
        let def = CommandDefinition::inline("about", "", |_, _| Ok(()));
        let (mut output, captured) = Output::capture(OutputConfig::default());
        render_help(&mut output, &def, DEFAULT_TITLE);
        assert!(captured.contents().contains("How to get started with command -> about"));

        assert!(!help_for("about", "").contains("How to get started"));
    }
}
