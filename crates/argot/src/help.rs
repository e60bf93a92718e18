//! Usage line and option list rendering.

use crate::schema::{OptionSchema, ParserSchema};

fn format_usage_entry(option: &OptionSchema) -> String {
    let mut entry = option.aliases.join("|");
    if let Some(metavar) = &option.metavar {
        entry.push(' ');
        entry.push_str(metavar);
    }
    if option.required {
        entry
    } else {
        format!("[{entry}]")
    }
}

impl ParserSchema {
    /// `usage: PROGRAM [-h|--help] -m|--message MESSAGE [-n N]`
    pub fn usage(&self) -> String {
        let mut out = format!("usage: {}", self.program);
        for option in &self.options {
            out.push(' ');
            out.push_str(&format_usage_entry(option));
        }
        out
    }

    /// Usage line followed by one line per option, in registration order.
    pub fn help(&self) -> String {
        let mut out = self.usage();
        out.push('\n');

        if self.options.is_empty() {
            return out;
        }

        out.push_str("options:\n");
        let rows: Vec<(String, &str)> = self
            .options
            .iter()
            .map(|o| (o.aliases.join(", "), o.help.trim()))
            .collect();
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (left, help) in rows {
            if help.is_empty() {
                out.push_str(&format!("  {left}\n"));
            } else {
                out.push_str(&format!("  {left:width$}  {help}\n"));
            }
        }
        out
    }
}
