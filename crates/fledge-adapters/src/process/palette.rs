use owo_colors::OwoColorize;

/// Terminal colors used by the runner. Disabled means plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub const fn plain() -> Self {
        Self::new(false)
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn success_glyph(&self) -> String {
        self.paint("✓", |s| s.green().to_string())
    }

    pub fn failure_glyph(&self) -> String {
        self.paint("✗", |s| s.red().to_string())
    }

    pub fn error_text(&self, text: &str) -> String {
        self.paint(text, |s| s.red().to_string())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}
