use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};
use shop_admin_client::AdminApi;
use shop_admin_core::{DraftField, SessionStore};

use crate::app::{App, Screen, Tab};
use crate::theme::Theme;

pub fn render<A: AdminApi, S: SessionStore>(frame: &mut Frame, app: &App<A, S>) {
    let theme = Theme::console();

    match &app.screen {
        Screen::SignIn => render_sign_in(frame, app, &theme),
        Screen::Dashboard => render_dashboard(frame, app, &theme),
        Screen::ConfirmLogout => {
            render_dashboard(frame, app, &theme);
            render_confirm_logout(frame, &theme);
        }
        Screen::Message(msg, is_error) => {
            if app.dashboard.is_signed_in() {
                render_dashboard(frame, app, &theme);
            } else {
                render_sign_in(frame, app, &theme);
            }
            render_message(frame, msg, *is_error, &theme);
        }
    }
}

fn render_sign_in<A, S>(frame: &mut Frame, app: &App<A, S>, theme: &Theme) {
    let area = center_rect(frame.area(), 60, 9);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(" Shop Admin Sign In ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // Info
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Input
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 1));

    let info = Paragraph::new("Paste your admin token")
        .style(theme.row)
        .alignment(Alignment::Center);
    frame.render_widget(info, layout[0]);

    let masked = if app.token_input.is_empty() {
        "_".to_string()
    } else {
        "*".repeat(app.token_input.chars().count())
    };
    let input = Paragraph::new(masked)
        .style(theme.input)
        .alignment(Alignment::Center);
    frame.render_widget(input, layout[2]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Enter ", theme.hint_key),
        Span::styled("Sign in", theme.hint_text),
        Span::raw("  "),
        Span::styled(" Esc ", theme.hint_key),
        Span::styled("Quit", theme.hint_text),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);
}

fn render_dashboard<A, S>(frame: &mut Frame, app: &App<A, S>, theme: &Theme) {
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.frame)
        .title(" Shop Admin Dashboard ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let layout = Layout::default()
        .constraints([
            Constraint::Length(2), // Tabs
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 1));

    let titles = Tab::all().map(|tab| tab_title(app, tab));
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(theme.hint_text)
        .highlight_style(theme.cursor_row)
        .divider("|");
    frame.render_widget(tabs, layout[0]);

    match app.tab {
        Tab::Users => render_users(frame, app, layout[1], theme),
        Tab::Products => render_products(frame, app, layout[1], theme),
        Tab::NewProduct => render_form(frame, app, layout[1], theme),
    }

    if let Some(status) = &app.status {
        let line = Paragraph::new(status.as_str()).style(theme.alert_error);
        frame.render_widget(line, layout[2]);
    }

    render_footer(frame, app.tab, layout[3], theme);
}

fn tab_title<A, S>(app: &App<A, S>, tab: Tab) -> String {
    match tab {
        Tab::Users => format!(" Users ({}) ", app.dashboard.users().len()),
        Tab::Products => format!(" Products ({}) ", app.dashboard.products().len()),
        Tab::NewProduct => " New Product ".to_string(),
    }
}

fn render_users<A, S>(frame: &mut Frame, app: &App<A, S>, area: Rect, theme: &Theme) {
    let users = app.dashboard.users();
    if users.is_empty() {
        render_empty(frame, "(No users)", area, theme);
        return;
    }

    let header = Row::new(["Email", "Status", "Action"]).style(theme.column_header);
    let rows = users.iter().map(|user| {
        Row::new(vec![
            Cell::from(user.email.as_str()),
            Cell::from(user.status_label()).style(theme.record_state(user.active)),
            Cell::from(user.action_label()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(60),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .row_highlight_style(theme.cursor_row)
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.user_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_products<A, S>(frame: &mut Frame, app: &App<A, S>, area: Rect, theme: &Theme) {
    let products = app.dashboard.products();
    if products.is_empty() {
        render_empty(frame, "(No products)", area, theme);
        return;
    }

    let header = Row::new(["Name", "Price", "Available", "Action"]).style(theme.column_header);
    let rows = products.iter().map(|product| {
        Row::new(vec![
            Cell::from(product.name.as_str()),
            Cell::from(format!("${}", product.price)),
            Cell::from(product.available_label()).style(theme.record_state(product.available)),
            Cell::from("Toggle"),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .row_highlight_style(theme.cursor_row)
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.product_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_form<A, S>(frame: &mut Frame, app: &App<A, S>, area: Rect, theme: &Theme) {
    let draft = app.dashboard.draft();
    let lines: Vec<Line> = DraftField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == app.field_index;
            let value = draft.get(*field);
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(
                    format!("{:>14}: ", field.label()),
                    if focused { theme.input } else { theme.label },
                ),
                Span::styled(
                    format!("{}{}", value, cursor),
                    if focused { theme.cursor_row } else { theme.row },
                ),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(form, area);
}

fn render_empty(frame: &mut Frame, msg: &str, area: Rect, theme: &Theme) {
    let p = Paragraph::new(msg)
        .style(theme.hint_text)
        .alignment(Alignment::Center);
    frame.render_widget(p, area);
}

fn render_footer(frame: &mut Frame, tab: Tab, area: Rect, theme: &Theme) {
    let mut hints = vec![
        Span::styled(" Tab ", theme.hint_key),
        Span::styled("Switch", theme.hint_text),
        Span::raw("  "),
        Span::styled(" ↑/↓ ", theme.hint_key),
        Span::styled("Navigate", theme.hint_text),
        Span::raw("  "),
    ];
    if tab == Tab::NewProduct {
        hints.extend([
            Span::styled(" Enter ", theme.hint_key),
            Span::styled("Submit", theme.hint_text),
            Span::raw("  "),
            Span::styled(" Esc ", theme.hint_key),
            Span::styled("Back", theme.hint_text),
        ]);
    } else {
        hints.extend([
            Span::styled(" Enter ", theme.hint_key),
            Span::styled("Toggle", theme.hint_text),
            Span::raw("  "),
            Span::styled(" r ", theme.hint_key),
            Span::styled("Refresh", theme.hint_text),
            Span::raw("  "),
            Span::styled(" L ", theme.hint_key),
            Span::styled("Logout", theme.hint_text),
            Span::raw("  "),
            Span::styled(" q ", theme.hint_key),
            Span::styled("Quit", theme.hint_text),
        ]);
    }

    let footer = Paragraph::new(Line::from(hints)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn render_confirm_logout(frame: &mut Frame, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 6);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.alert_error)
        .title(" Confirm Logout ")
        .title_style(theme.alert_error);

    frame.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::raw("Forget the stored token?"),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [Y] ", theme.hint_key),
            Span::styled("Yes, Logout", theme.alert_error),
            Span::raw("    "),
            Span::styled(" [N] ", theme.hint_key),
            Span::raw("Cancel"),
        ]),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(text, inner_rect(area, 1));
}

fn render_message(frame: &mut Frame, msg: &str, is_error: bool, theme: &Theme) {
    let area = center_rect(frame.area(), 60, 7);

    frame.render_widget(Clear, area);

    let style = if is_error {
        theme.alert_error
    } else {
        theme.alert_ok
    };
    let title = if is_error { " Error " } else { " Success " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style);

    frame.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::raw(msg),
        Line::raw(""),
        Line::from(Span::styled("Press any key to continue", theme.hint_text)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner_rect(area, 1));
}

// Helper: shrink rect by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::signed_in_app;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw<A: AdminApi, S: SessionStore>(app: &App<A, S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_users_table() {
        let mut app = signed_in_app();
        app.load().await;
        let screen = draw(&app);

        assert!(screen.contains("Users (2)"));
        assert!(screen.contains("Products (1)"));
        assert!(screen.contains("ada@shop.test"));
        assert!(screen.contains("Deactivate"));
        assert!(screen.contains("Activate"));
    }

    #[tokio::test]
    async fn test_products_table() {
        let mut app = signed_in_app();
        app.load().await;
        app.select_tab(Tab::Products);
        let screen = draw(&app);

        assert!(screen.contains("Desk Lamp"));
        assert!(screen.contains("$25"));
        assert!(screen.contains("Yes"));
        assert!(screen.contains("Toggle"));
    }

    #[tokio::test]
    async fn test_empty_table_before_load() {
        let app = signed_in_app();
        let screen = draw(&app);
        assert!(screen.contains("(No users)"));
        assert!(screen.contains("Users (0)"));
    }

    #[tokio::test]
    async fn test_form_shows_fields() {
        let mut app = signed_in_app();
        app.select_tab(Tab::NewProduct);
        app.push_str("Shoe");
        let screen = draw(&app);

        for field in DraftField::ALL {
            assert!(screen.contains(field.label()));
        }
        assert!(screen.contains("Shoe_"));
    }

    #[test]
    fn test_sign_in_masks_token() {
        let mut app = App::new(shop_admin_core::Dashboard::new(
            crate::test_support::StubApi::default(),
            shop_admin_core::MemorySessionStore::new(),
        ));
        app.token_input = "secret".to_string();
        let screen = draw(&app);

        assert!(screen.contains("******"));
        assert!(!screen.contains("secret"));
    }

    #[tokio::test]
    async fn test_status_line_and_message_popup() {
        let mut app = signed_in_app();
        app.status = Some("Could not update ada@shop.test".to_string());
        assert!(draw(&app).contains("Could not update ada@shop.test"));

        app.screen = Screen::Message("Please enter a valid price".to_string(), true);
        let screen = draw(&app);
        assert!(screen.contains("Please enter a valid price"));
        assert!(screen.contains("Press any key to continue"));
    }

    #[test]
    fn test_center_rect_fits_small_area() {
        let area = Rect::new(0, 0, 20, 4);
        let popup = center_rect(area, 50, 9);
        assert_eq!(popup.height, 4);
        assert_eq!(popup.width, 10);
    }
}
