use ratatui::style::{Color, Modifier, Style};

/// Console palette: chrome, table rows, form input, record state, alerts.
pub struct Theme {
    pub title: Style,
    pub frame: Style,
    pub column_header: Style,
    pub row: Style,
    pub cursor_row: Style,
    pub input: Style,
    pub label: Style,
    pub live: Style,
    pub disabled: Style,
    pub alert_error: Style,
    pub alert_ok: Style,
    pub hint_key: Style,
    pub hint_text: Style,
}

impl Theme {
    pub fn console() -> Self {
        let bold = |color: Color| Style::new().fg(color).add_modifier(Modifier::BOLD);
        Self {
            title: bold(Color::Cyan),
            frame: Style::new().fg(Color::DarkGray),
            column_header: bold(Color::White).add_modifier(Modifier::UNDERLINED),
            row: Style::new().fg(Color::White),
            cursor_row: bold(Color::Black).bg(Color::Cyan),
            input: Style::new().fg(Color::Cyan),
            label: Style::new().fg(Color::Gray),
            live: Style::new().fg(Color::Green),
            disabled: Style::new().fg(Color::Red),
            alert_error: bold(Color::Red),
            alert_ok: bold(Color::Green),
            hint_key: bold(Color::Yellow),
            hint_text: Style::new().fg(Color::DarkGray),
        }
    }

    /// Status and availability cells.
    pub fn record_state(&self, enabled: bool) -> Style {
        if enabled {
            self.live
        } else {
            self.disabled
        }
    }
}
