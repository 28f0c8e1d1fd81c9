use super::animation::spring_offset;
use super::{Palette, ViewState};
use crate::components::quotes::QuoteItem;

/// Columns the quote card starts displaced by before it settles
const BOB_AMPLITUDE: f64 = 4.0;

/// Quote card for the current widget state, `t` seconds into the session.
///
/// A populated card floats in from the right and settles on the margin.
pub fn render_quote(state: &ViewState<QuoteItem>, palette: &Palette, t: f64) -> Vec<String> {
    let mut lines = vec![palette.heading("Daily Inspiration")];

    match state {
        ViewState::Loading => lines.push(palette.muted("Finding today's inspiration...")),
        ViewState::Empty => lines.push(palette.muted("No quote today")),
        ViewState::Error(message) => lines.push(palette.error(message)),
        ViewState::Populated(quote) => {
            let indent = " ".repeat(spring_offset(t, BOB_AMPLITUDE).abs().round() as usize);
            lines.push(format!("{}\"{}\"", indent, quote.text));
            lines.push(format!(
                "{}— {}  {}",
                indent,
                quote.author,
                palette.accent(&format!("#{}", quote.category))
            ));
        }
    }

    lines
}
