use std::f64::consts::PI;

/// Typewriter reveal of a line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReveal {
    text: String,
}

impl TextReveal {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Visible prefix at `progress` in `[0, 1]`; out of range values clamp
    pub fn frame(&self, progress: f64) -> String {
        let total = self.text.chars().count();
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        let visible = (total as f64 * progress).round() as usize;
        self.text.chars().take(visible).collect()
    }

    /// Every frame from empty to the full text, `steps` apart
    pub fn frames(&self, steps: usize) -> Vec<String> {
        if steps == 0 {
            return vec![self.text.clone()];
        }
        (0..=steps)
            .map(|step| self.frame(step as f64 / steps as f64))
            .collect()
    }
}

/// Cycles through a fixed set of glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphingIcon {
    glyphs: &'static [&'static str],
}

impl MorphingIcon {
    pub const SPINNER: MorphingIcon = MorphingIcon {
        glyphs: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    };

    pub const WEATHER: MorphingIcon = MorphingIcon {
        glyphs: &["☀️", "⛅", "☁️", "🌦️"],
    };

    pub const fn new(glyphs: &'static [&'static str]) -> Self {
        Self { glyphs }
    }

    pub fn frame(&self, tick: u64) -> &'static str {
        if self.glyphs.is_empty() {
            return "";
        }
        self.glyphs[(tick % self.glyphs.len() as u64) as usize]
    }
}

/// Sinusoidal pulse in `[0, 1]` with the given period in seconds
pub fn glow_intensity(t: f64, period: f64) -> f64 {
    if period <= 0.0 {
        return 1.0;
    }
    0.5 - 0.5 * (2.0 * PI * t / period).cos()
}

/// Displacement of an underdamped spring released from `amplitude` at t = 0
pub fn spring_offset(t: f64, amplitude: f64) -> f64 {
    const STIFFNESS: f64 = 100.0;
    const DAMPING: f64 = 10.0;

    if t <= 0.0 {
        return amplitude;
    }
    let omega = STIFFNESS.sqrt();
    let decay = (-DAMPING / 2.0 * t).exp();
    amplitude * decay * (omega * t).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_reveal_progress() {
        let reveal = TextReveal::new("Hello");
        assert_eq!(reveal.frame(0.0), "");
        assert_eq!(reveal.frame(0.4), "He");
        assert_eq!(reveal.frame(1.0), "Hello");
        assert_eq!(reveal.frame(7.0), "Hello");
        assert_eq!(reveal.frame(-1.0), "");

        let frames = reveal.frames(5);
        assert_eq!(frames.len(), 6);
        assert_eq!(frames.first().map(String::as_str), Some(""));
        assert_eq!(frames.last().map(String::as_str), Some("Hello"));
    }

    #[test]
    fn test_text_reveal_handles_multibyte() {
        let reveal = TextReveal::new("🌅 hi");
        assert_eq!(reveal.frame(0.25), "🌅");
    }

    #[test]
    fn test_morphing_icon_wraps() {
        let icon = MorphingIcon::WEATHER;
        assert_eq!(icon.frame(0), "☀️");
        assert_eq!(icon.frame(4), "☀️");
        assert_eq!(icon.frame(5), "⛅");
        assert_eq!(MorphingIcon::new(&[]).frame(3), "");
    }

    #[test]
    fn test_glow_stays_in_range() {
        assert!(glow_intensity(0.0, 2.0).abs() < 1e-9);
        assert!((glow_intensity(1.0, 2.0) - 1.0).abs() < 1e-9);
        for step in 0..100 {
            let value = glow_intensity(step as f64 * 0.13, 2.0);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_spring_settles() {
        assert_eq!(spring_offset(0.0, 8.0), 8.0);
        assert!(spring_offset(2.0, 8.0).abs() < 0.01);
    }
}
