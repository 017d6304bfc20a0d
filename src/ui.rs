//! Terminal drawing for the from-token panel and its popups

use ratatui::{prelude::*, widgets::*};

use crate::constants::{AMOUNT_PLACEHOLDER, APP_NAME};
use crate::messages::ui_events::{InputMode, SurfaceKind};
use crate::messages::RenderState;

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Wallet status
            Constraint::Length(7), // From token panel
            Constraint::Min(0),
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    draw_wallet_bar(f, state, chunks[0]);
    draw_from_token(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[3]);

    // At most one popup; the advisory replaces the token list
    match state.surface {
        SurfaceKind::Advisory => draw_advisory_popup(f, state, area),
        SurfaceKind::TokenList => draw_token_list_popup(f, state, area),
        SurfaceKind::None => {}
    }
}

fn draw_wallet_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let wallet = match &state.account {
        Some(account) => Span::styled(format!(" {} ", short_address(account)), Style::default().fg(Color::Green)),
        None => Span::styled(" not connected ", Style::default().fg(Color::DarkGray)),
    };
    let network_style = if state.network_mismatch {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Cyan)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(format!("[{}]", state.network_name), network_style),
        wallet,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_from_token(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = state.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Blue)
        })
        .title(" From ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(token) = &state.token else {
        let hint = Paragraph::new("Press t to select a token")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(3)])
        .split(inner);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(40)])
        .split(rows[0]);

    let name = Line::from(vec![
        Span::styled(token.name.as_str(), Style::default().bold()),
        Span::raw(" "),
        Span::styled(format!("({}) v", token.symbol), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(name), header[0]);
    f.render_widget(
        Paragraph::new(state.balance_text.as_str())
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Gray)),
        header[1],
    );

    let amount_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(rows[2]);

    let amount = if state.amount_input.is_empty() && !editing {
        Paragraph::new(AMOUNT_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.amount_input.as_str()).style(Style::default().bold())
    };
    f.render_widget(amount.block(Block::default().borders(Borders::BOTTOM)), amount_area[0]);

    let max = Paragraph::new(" Max ")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Blue).bg(Color::Rgb(230, 240, 255)));
    f.render_widget(max, Rect { height: 1, ..amount_area[1] });

    if editing {
        let max_x = amount_area[0].x + amount_area[0].width.saturating_sub(1);
        let cursor_x = (amount_area[0].x + state.cursor_position as u16).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, amount_area[0].y));
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = match (state.surface, state.input_mode) {
        (SurfaceKind::Advisory, _) => " any key:close ",
        (SurfaceKind::TokenList, _) => " ↑/↓:move | Enter:select | Esc:close ",
        (SurfaceKind::None, InputMode::Editing) => " ESC/Enter:stop editing | arrows:move ",
        (SurfaceKind::None, InputMode::Normal) => {
            " t:token | e:edit amount | m:max | c/d:connect/disconnect | n:network | q:quit "
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_advisory_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 20, area);
    let message = state.advisory.as_deref().unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ")
        .style(Style::default().bg(Color::Black));

    let popup = Paragraph::new(format!("\n{}", message))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn draw_token_list_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 50, area);

    let items: Vec<ListItem> = state
        .tokens
        .iter()
        .map(|token| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<8}", token.symbol), Style::default().bold()),
                Span::raw(token.name.as_str()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Select a token on {} ", state.network_name))
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.selected_token));
    f.render_widget(Clear, popup_area);
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

/// `0x1234...abcd` form of an address
fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
