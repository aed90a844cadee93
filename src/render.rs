//! Plain terminal rendering of analysis results.

use crate::session::View;
use crate::snippet::{Snippet, SnippetGroup};
use colored::Colorize;
use std::io::{self, Write};

/// Print the view to stdout
pub fn print(view: &View<'_>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_view(&mut out, view)
}

pub fn write_view<W: Write>(out: &mut W, view: &View<'_>) -> io::Result<()> {
    match view {
        View::Loading => writeln!(out, "{}", "Analyzing...".cyan()),
        View::Failed(message) => {
            writeln!(out, "{}", "Analysis Failed".red().bold())?;
            writeln!(out, "{}", message.red())
        }
        View::Idle { has_code: true } => placeholder(
            out,
            "Ready to Analyze",
            "Run analysis to extract snippets.",
        ),
        View::Idle { has_code: false } => placeholder(
            out,
            "Code Snippets Appear Here",
            "Paste or upload your code to get started.",
        ),
        View::Empty => placeholder(
            out,
            "No Snippets Found",
            "The model could not extract any distinct snippets from the provided code.",
        ),
        View::Results(groups) => write_groups(out, groups),
    }
}

fn placeholder<W: Write>(out: &mut W, title: &str, hint: &str) -> io::Result<()> {
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", hint.dimmed())
}

fn write_groups<W: Write>(out: &mut W, groups: &[SnippetGroup]) -> io::Result<()> {
    writeln!(out, "{}\n", "Analysis Results".bold().underline())?;

    for (g, group) in groups.iter().enumerate() {
        writeln!(out, "{}", group.group_title.cyan().bold())?;
        if !group.group_description.is_empty() {
            writeln!(out, "{}", group.group_description.dimmed())?;
        }
        writeln!(out)?;

        for (s, snippet) in group.snippets.iter().enumerate() {
            write_card(out, &format!("{}.{}", g + 1, s + 1), snippet)?;
        }
    }
    Ok(())
}

fn write_card<W: Write>(out: &mut W, id: &str, snippet: &Snippet) -> io::Result<()> {
    writeln!(
        out,
        "  {} {}  {}",
        format!("[{}]", id).yellow(),
        snippet.title.bold(),
        snippet.highlight_language().magenta()
    )?;
    writeln!(out, "  {}", snippet.description.italic())?;
    writeln!(out, "  {}", "─".repeat(40).dimmed())?;
    for line in snippet.code.lines() {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out, "  {}\n", "─".repeat(40).dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(view: View<'_>) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_view(&mut buf, &view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn placeholders() {
        assert!(render(View::Idle { has_code: false }).contains("Paste or upload"));
        assert!(render(View::Idle { has_code: true }).contains("Ready to Analyze"));
        assert!(render(View::Empty).contains("No Snippets Found"));
        assert!(render(View::Failed("try again")).contains("Analysis Failed\ntry again"));
    }

    #[test]
    fn results_number_snippets_by_group() {
        let groups = vec![SnippetGroup {
            group_title: "Helpers".into(),
            group_description: "Small helpers.".into(),
            snippets: vec![Snippet {
                title: "greet".into(),
                description: "Says hello.".into(),
                language: "JavaScript".into(),
                code: "console.log('hi');".into(),
            }],
        }];
        let text = render(View::Results(&groups));
        assert!(text.starts_with("Analysis Results"));
        assert!(text.contains("[1.1] greet  js"));
        assert!(text.contains("  console.log('hi');"));
    }
}
