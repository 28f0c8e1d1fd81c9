use super::animation::glow_intensity;
use super::Palette;
use crate::email::DispatchState;

pub const SENT_MESSAGE: &str = "Summary sent! 📧";

const GLOW_LEVELS: [&str; 4] = ["·", "•", "●", "⬤"];

/// Email composer status for the current dispatch state. `t` is seconds since
/// startup, driving the glow on the sending indicator.
pub fn render_email(state: &DispatchState, palette: &Palette, t: f64) -> Vec<String> {
    let mut lines = vec![palette.heading("Email Summary")];

    match state {
        DispatchState::Idle => {
            lines.push(palette.muted("Set SUMMARY_EMAIL to get today's summary in your inbox"));
        }
        DispatchState::Sending => {
            let level = (glow_intensity(t, 1.5) * (GLOW_LEVELS.len() - 1) as f64).round() as usize;
            let glow = GLOW_LEVELS[level.min(GLOW_LEVELS.len() - 1)];
            lines.push(format!("{} Sending...", palette.accent(glow)));
        }
        DispatchState::Sent { recipient } => {
            lines.push(SENT_MESSAGE.to_string());
            lines.push(palette.muted(&format!("Check {} for your daily prep", recipient)));
        }
        DispatchState::Failed(message) => {
            lines.push(palette.error(&format!("Failed to send summary: {}", message)));
        }
    }

    lines
}

/// Preview box around the summary text
pub fn render_preview(summary: &str, palette: &Palette) -> Vec<String> {
    let mut lines = vec![palette.muted("Preview")];
    lines.extend(summary.lines().map(|line| format!("│ {}", line)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states() {
        let palette = Palette::plain();
        let sent = render_email(
            &DispatchState::Sent {
                recipient: "me@example.com".to_string(),
            },
            &palette,
            0.0,
        );
        assert_eq!(sent[1], SENT_MESSAGE);

        let failed = render_email(&DispatchState::Failed("HTTP 400".to_string()), &palette, 0.0);
        assert_eq!(failed[1], "Failed to send summary: HTTP 400");

        let sending = render_email(&DispatchState::Sending, &palette, 0.0);
        assert_eq!(sending[1], "· Sending...");
    }

    #[test]
    fn test_preview_prefixes_lines() {
        let lines = render_preview("a\n\nb", &Palette::plain());
        assert_eq!(lines, vec!["Preview", "│ a", "│ ", "│ b"]);
    }
}
