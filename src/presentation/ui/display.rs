use colored::Colorize;
use console::measure_text_width;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::env;
use std::time::Duration;

const COLUMN_GAP: &str = "  ";

/// Display utilities for the CLI interface
#[derive(Debug, Clone, Copy)]
pub struct DisplayHelper {
    pub use_color: bool,
}

impl DisplayHelper {
    /// Create a new DisplayHelper
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Decide whether to color output.
    ///
    /// Color is off when `--no-color` is given, when `NO_COLOR` is set,
    /// or when stdout is not a terminal.
    pub fn detect(no_color_flag: bool) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let use_color = !no_color_flag && !no_color_env && atty::is(atty::Stream::Stdout);
        colored::control::set_override(use_color);
        Self::new(use_color)
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "Error:".red().bold(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "⚠".yellow().bold(), message);
        } else {
            eprintln!("[WARNING] {}", message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[SUCCESS] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "::".blue().bold(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Create a spinner on stderr, hidden when stderr is not a terminal
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !atty::is(atty::Stream::Stderr) {
            return ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        let style = ProgressStyle::default_spinner()
            .tick_strings(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈", ""])
            .template("{spinner:.green} {msg}");
        if let Ok(style) = style {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }

    /// Lay out a table as text.
    ///
    /// Cells may already carry ANSI color; widths are measured on the
    /// visible text.
    pub fn render_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut col_widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = col_widths.get_mut(i) {
                    *width = (*width).max(measure_text_width(cell));
                }
            }
        }

        let mut out = String::new();

        let header_cells: Vec<String> = headers
            .iter()
            .map(|h| {
                if self.use_color {
                    h.bold().to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();
        push_line(&mut out, &header_cells, &col_widths);

        let rule = if self.use_color { "─" } else { "-" };
        let separator: Vec<String> = col_widths.iter().map(|w| rule.repeat(*w)).collect();
        push_line(&mut out, &separator, &col_widths);

        for row in rows {
            push_line(&mut out, row, &col_widths);
        }

        out
    }
}

fn push_line(out: &mut String, cells: &[String], col_widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let width = col_widths.get(i).copied().unwrap_or(0);
        let padding = width.saturating_sub(measure_text_width(cell));
        line.push_str(&" ".repeat(padding));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
