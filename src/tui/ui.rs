use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

use crate::core::chats::Chat;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    Conversation, LoginForm, Placeholder, SettingsPanel, Sidebar, TitleBar,
};
use crate::tui::theme::Palette;
use crate::tui::{Focus, TuiState};

/// Sidebar width bounds (columns)
const SIDEBAR_MIN: u16 = 28;
const SIDEBAR_MAX: u16 = 42;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let palette = Palette::for_theme(app.settings.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(area);

    let user_label = if app.is_authenticated {
        format!("{} (@{})", app.user.name, app.user.handle)
    } else {
        String::new()
    };
    TitleBar {
        user_label,
        unread: app.settings.notifications.then(|| app.unread_total()),
        unread_label: app.t().unread,
        status_message: &app.status_message,
        palette: &palette,
    }
    .render(frame, title_area);

    if !app.is_authenticated {
        LoginForm::new(&tui.login, app, &palette, spinner_frame).render(frame, main_area);
        return;
    }

    draw_main(frame, main_area, app, tui, &palette);

    if let Some(panel) = &tui.settings_panel {
        SettingsPanel::new(panel, app, &palette).render(frame, area);
    }
}

fn sidebar_width(total: u16) -> u16 {
    ((u32::from(total) * 35 / 100) as u16)
        .clamp(SIDEBAR_MIN, SIDEBAR_MAX)
        .min(total)
}

fn draw_main(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, palette: &Palette) {
    use Constraint::{Length, Min};

    let [sidebar_area, pane_area] =
        Layout::horizontal([Length(sidebar_width(area.width)), Min(0)]).areas(area);

    let t = app.t();
    let overlay_open = tui.settings_panel.is_some();
    let visible: Vec<&Chat> = app.visible_chats();
    Sidebar {
        state: &mut tui.sidebar,
        chats: &visible,
        active_chat_id: app.active_chat_id.as_deref(),
        t,
        palette,
        search_focused: tui.focus == Focus::Search && !overlay_open,
        list_focused: tui.focus == Focus::ChatList && !overlay_open,
    }
    .render(frame, sidebar_area);

    let Some(chat) = app.active_chat() else {
        Placeholder {
            message: t.select_chat,
            palette,
        }
        .render(frame, pane_area);
        return;
    };

    // Sync composer props with App/TUI state
    tui.composer.palette = *palette;
    tui.composer.placeholder = t.write_message.to_string();
    tui.composer.focused = tui.focus == Focus::Composer && !overlay_open;

    let composer_height = tui.composer.calculate_height(pane_area.width);
    let [conversation_area, composer_area] =
        Layout::vertical([Min(0), Length(composer_height)]).areas(pane_area);

    Conversation {
        state: &mut tui.conversation,
        chat,
        messages: app.active_history(),
        font_size: app.settings.font_size,
        t,
        palette,
    }
    .render(frame, conversation_area);
    tui.composer.render(frame, composer_area);
}
