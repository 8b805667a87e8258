//! Terminal output for git-usr: labelled status lines, profile tables and the
//! switch spinner.
//!
//! # No-color detection (in priority order):
//! 1. `--no-color` CLI flag (highest priority)
//! 2. `NO_COLOR` environment variable (any value)
//! 3. `TERM=dumb` environment variable
//! 4. `--color always|never`, or TTY detection for `auto`

use anstream::{eprintln, println};
use anstyle::{AnsiColor, Color, Style};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets};
use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::io::IsTerminal;
use std::time::Duration;

use crate::profiles::Profile;

/// Color mode for output
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Always emit ANSI colors
    Always,
    /// Colors only on a TTY
    #[default]
    Auto,
    /// Never emit ANSI colors
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            _ => Err(format!("invalid color mode: {}", s)),
        }
    }
}

/// UI context holding resolved display settings
#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
    /// Spinners need both a TTY and color
    pub spinner_enabled: bool,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(ColorMode::Auto, false)
    }
}

impl Ui {
    /// Resolve color and spinner support for this run
    pub fn new(mode: ColorMode, force_no_color: bool) -> Self {
        let color_enabled = Self::resolve_color(mode, force_no_color);
        let spinner_enabled = color_enabled && std::io::stdout().is_terminal();

        if !color_enabled {
            anstream::ColorChoice::write_global(anstream::ColorChoice::Never);
        }

        Self {
            color_enabled,
            spinner_enabled,
        }
    }

    fn resolve_color(mode: ColorMode, force_no_color: bool) -> bool {
        if force_no_color {
            return false;
        }

        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
            return false;
        }

        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    // -------------------------------------------------------------------------
    // Labelled status lines
    // -------------------------------------------------------------------------

    fn style_label(&self, color: AnsiColor) -> Style {
        if self.color_enabled {
            Style::new().fg_color(Some(Color::Ansi(color))).bold()
        } else {
            Style::new()
        }
    }

    /// Print an OK line (green) to stdout
    pub fn ok(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Green);
        println!("{label}OK{label:#} {}", msg.as_ref());
    }

    /// Print a WARN line (yellow) to stdout
    pub fn warn(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Yellow);
        println!("{label}WARN{label:#} {}", msg.as_ref());
    }

    /// Print an ERROR line (red) to stderr
    pub fn err(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Red);
        eprintln!("{label}ERROR{label:#} {}", msg.as_ref());
    }

    /// Print an INFO line (cyan) to stdout
    pub fn info(&self, msg: impl AsRef<str>) {
        let label = self.style_label(AnsiColor::Cyan);
        println!("{label}INFO{label:#} {}", msg.as_ref());
    }

    // -------------------------------------------------------------------------
    // Inline styling
    // -------------------------------------------------------------------------

    /// Gray text for inline use
    pub fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(s, Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
    }

    /// Bold text for inline use
    pub fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(s, Style::new().bold())
    }

    fn paint(&self, s: impl AsRef<str>, style: Style) -> String {
        if self.color_enabled {
            format!("{style}{}{style:#}", s.as_ref())
        } else {
            s.as_ref().to_string()
        }
    }

    /// Marker placed next to the profile matching the current identity
    pub fn icon_current(&self) -> &'static str {
        if self.color_enabled { "👉" } else { "*" }
    }

    // -------------------------------------------------------------------------
    // Profile rendering
    // -------------------------------------------------------------------------

    /// Borderless table with one row per profile
    pub fn profile_table<'a, I>(&self, rows: I, current: Option<&str>) -> Table
    where
        I: IntoIterator<Item = (&'a String, &'a Profile)>,
    {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(presets::NOTHING);
        table.set_header(vec![
            self.header_cell(""),
            self.header_cell("Profile"),
            self.header_cell("Name"),
            self.header_cell("Email"),
        ]);

        for (profile_name, profile) in rows {
            let is_current = current == Some(profile_name.as_str());
            let marker = if is_current { self.icon_current() } else { "" };
            let name_cell = if is_current && self.color_enabled {
                Cell::new(profile_name)
                    .fg(comfy_table::Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(profile_name)
            };

            table.add_row(vec![
                Cell::new(marker),
                name_cell,
                Cell::new(&profile.name),
                Cell::new(&profile.email),
            ]);
        }

        table
    }

    fn header_cell(&self, content: &str) -> Cell {
        let cell = Cell::new(content);
        if self.color_enabled {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }

    /// Indented `Name:` / `Email:` lines under a status message
    pub fn profile_details(&self, profile: &Profile) {
        println!("   {} {}", self.dim("Name: "), profile.name);
        println!("   {} {}", self.dim("Email:"), profile.email);
    }

    // -------------------------------------------------------------------------
    // Spinner (indicatif)
    // -------------------------------------------------------------------------

    /// A spinner while git runs; hidden when spinners are disabled
    pub fn spinner(&self, message: impl Into<Cow<'static, str>>) -> ProgressBar {
        let pb = if self.spinner_enabled {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
            {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message);
        pb
    }

    /// Clear the spinner and report success as an OK line
    pub fn spinner_finish_ok(&self, pb: &ProgressBar, msg: impl Into<Cow<'static, str>>) {
        let msg = msg.into();
        if self.spinner_enabled {
            pb.finish_and_clear();
        }
        self.ok(msg);
    }

    // -------------------------------------------------------------------------
    // Plain output
    // -------------------------------------------------------------------------

    /// Print a line to stdout
    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    /// Print an empty line
    pub fn newline(&self) {
        println!();
    }

    /// Print a bold section header
    pub fn section(&self, title: impl AsRef<str>) {
        println!("{}", self.bold(title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ProfileSet;

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("always".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!("AUTO".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("never".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_force_no_color_wins() {
        let ui = Ui::new(ColorMode::Always, true);
        assert!(!ui.color_enabled);
        assert!(!ui.spinner_enabled);
    }

    #[test]
    fn test_plain_styling_without_color() {
        let ui = Ui::new(ColorMode::Never, false);
        assert_eq!(ui.dim("x"), "x");
        assert_eq!(ui.bold("x"), "x");
        assert_eq!(ui.icon_current(), "*");
    }

    #[test]
    fn test_profile_table_marks_only_current() {
        let ui = Ui::new(ColorMode::Never, false);
        let set = ProfileSet::defaults();
        let rendered = ui.profile_table(&set, Some("work")).to_string();

        let marked: Vec<&str> = rendered.lines().filter(|l| l.contains('*')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("work"));
        assert!(rendered.contains("you@personal.com"));
    }

    #[test]
    fn test_hidden_spinner() {
        let ui = Ui::new(ColorMode::Never, false);
        let pb = ui.spinner("switching");
        assert!(pb.is_hidden());
        ui.spinner_finish_ok(&pb, "done");
    }
}
