//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display-only components that receive all data as struct fields:
//! - `TitleBar`: top bar with user, unread total and status
//! - `MessageBubble`: a single chat message
//! - `Placeholder`: "select a chat" empty state
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components whose persistent state lives in `TuiState` and which are
//! wrapped per frame for rendering:
//! - `LoginFormState` / `LoginForm`: sign-in, registration, verification
//! - `SidebarState` / `Sidebar`: search box and chat list
//! - `ConversationState` / `Conversation`: header and scrolling bubbles
//! - `Composer`: multi-line message input
//! - `SettingsPanelState` / `SettingsPanel`: profile and appearance overlay
//! - `TextField`: the editable buffer behind every input
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`
//! on their own. Forms that need several `App` fields borrow `&App` as a prop.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! Sidebar { chats: &visible, active_chat_id, t, palette, .. }.render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! sidebar.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── text_field.rs      (editable buffer + bordered field view)
//! ├── composer.rs        (message input)
//! ├── login.rs           (auth screen)
//! ├── sidebar.rs         (search + chat list)
//! ├── conversation.rs    (open chat)
//! ├── message.rs         (single bubble)
//! ├── settings_panel.rs  (settings overlay)
//! ├── placeholder.rs     (empty conversation pane)
//! └── title_bar.rs       (top bar)
//! ```

pub mod composer;
pub mod conversation;
pub mod login;
pub mod message;
pub mod placeholder;
pub mod settings_panel;
pub mod sidebar;
pub mod text_field;
mod title_bar;

pub use composer::{Composer, ComposerEvent};
pub use conversation::{Conversation, ConversationState};
pub use login::{LoginForm, LoginFormState};
pub use placeholder::Placeholder;
pub use settings_panel::{SettingsPanel, SettingsPanelState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use title_bar::TitleBar;
