//! Status line shown beneath the picture.

/// One-line status bar at the bottom of the screen.
///
/// Shows: active mode | last message
#[derive(Debug, Clone)]
pub struct StatusBar {
    /// Whether the status bar is visible
    pub visible: bool,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    /// Create a new status bar with default settings (visible).
    pub fn new() -> Self {
        Self { visible: true }
    }

    /// Create a status bar with the specified visibility.
    pub fn with_visibility(visible: bool) -> Self {
        Self { visible }
    }

    /// Rows taken from the screen.
    pub fn height(&self) -> u16 {
        if self.visible {
            1
        } else {
            0
        }
    }

    /// Fit `text` into exactly `width` columns: truncated with `…` when too
    /// long, padded with spaces otherwise.
    pub fn format(&self, text: &str, width: u16) -> String {
        let width = width as usize;
        if width == 0 {
            return String::new();
        }

        let len = text.chars().count();
        if len > width {
            let mut out: String = text.chars().take(width - 1).collect();
            out.push('…');
            out
        } else {
            let mut out = text.to_string();
            out.extend(std::iter::repeat(' ').take(width - len));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_follows_visibility() {
        assert_eq!(StatusBar::new().height(), 1);
        assert_eq!(StatusBar::with_visibility(false).height(), 0);
    }

    #[test]
    fn test_format_pads() {
        let bar = StatusBar::new();
        assert_eq!(bar.format(" sepia ", 10), " sepia    ");
    }

    #[test]
    fn test_format_truncates() {
        let bar = StatusBar::new();
        let out = bar.format("Switched to Thermal Vision Mode.", 12);
        assert_eq!(out.chars().count(), 12);
        assert!(out.ends_with('…'));
        assert!(out.starts_with("Switched to"));
    }

    #[test]
    fn test_format_zero_width() {
        assert_eq!(StatusBar::new().format("abc", 0), "");
    }
}
