use super::ThemeVariant;

/// Guess the terminal background from its luma. Falls back to dark when the
/// terminal does not answer the color query.
pub fn detect_terminal_theme() -> ThemeVariant {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeVariant::Light,
        Ok(_) => ThemeVariant::Dark,
        Err(e) => {
            tracing::debug!(error = %e, "terminal background detection failed");
            ThemeVariant::Dark
        }
    }
}
