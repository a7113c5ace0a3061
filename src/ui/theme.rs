use owo_colors::Style;
use std::sync::OnceLock;
use crate::book::ProgressBand;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Terminal styles for book listings and summaries
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub warn: Style,
    pub dim: Style,
    pub muted: Style,
    /// Progress bar colours, one per band
    pub barely_started: Style,
    pub midway: Style,
    pub nearly_done: Style,
}

impl Theme {
    /// Colours only when stdout is a terminal
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::colored()
        } else {
            Self::default()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().blue().bold(),
            success: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            dim: Style::new().dimmed(),
            muted: Style::new().bright_black(),
            barely_started: Style::new().red(),
            midway: Style::new().yellow(),
            nearly_done: Style::new().green(),
        }
    }

    pub fn progress(&self, band: ProgressBand) -> Style {
        match band {
            ProgressBand::Low => self.barely_started.clone(),
            ProgressBand::Medium => self.midway.clone(),
            ProgressBand::High => self.nearly_done.clone(),
        }
    }
}

impl Default for Theme {
    /// No styling at all
    fn default() -> Self {
        let plain = Style::new();
        Self {
            header: plain.clone(),
            success: plain.clone(),
            warn: plain.clone(),
            dim: plain.clone(),
            muted: plain.clone(),
            barely_started: plain.clone(),
            midway: plain.clone(),
            nearly_done: plain,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
