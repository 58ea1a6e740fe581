//! Colors and inline styles shared by the header and map popups

use buracos_core::MarkerSummary;

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub success: &'static str,
}

pub const PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f8f9fa",
    text_primary: "#1a1a1a",
    text_secondary: "#5f6368",
    border: "#dadce0",
    accent: "#4f46e5",
    accent_text: "#ffffff",
    success: "#16a34a",
};

/// Round color button used by the severity picker
pub fn swatch_button_style(color: &str) -> String {
    format!(
        "background: {color}; width: 20px; height: 20px; border-radius: 50%; \
         border: 1px solid {}; margin-right: 6px; cursor: pointer;",
        PALETTE.border
    )
}

/// Text button used for votes
pub fn action_button_style() -> String {
    format!(
        "background: {}; color: {}; border: none; border-radius: 4px; \
         padding: 4px 10px; margin-right: 6px; cursor: pointer;",
        PALETTE.accent, PALETTE.accent_text
    )
}

/// One-line summary shown in the header
pub fn summary_text(summary: &MarkerSummary) -> String {
    match summary.total {
        0 => "Nenhum buraco registrado".to_string(),
        1 => format!(
            "1 buraco: {} ativo, {} consertado",
            summary.active, summary.resolved
        ),
        total => format!(
            "{total} buracos: {} ativos, {} consertados",
            summary.active, summary.resolved
        ),
    }
}
