//! Static UI strings for every supported [`Language`].

use crate::core::settings::Language;

pub struct Translations {
    // Login / registration
    pub login_title: &'static str,
    pub login_subtitle: &'static str,
    pub register_title: &'static str,
    pub register_subtitle: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub sign_in: &'static str,
    pub sign_up: &'static str,
    pub need_account: &'static str,
    pub have_account: &'static str,
    pub account_not_found: &'static str,
    pub wrong_password: &'static str,
    pub user_exists: &'static str,
    pub verify_title: &'static str,
    pub verify_subtitle: &'static str,
    pub verify_code: &'static str,
    pub confirm: &'static str,
    pub resend: &'static str,
    pub code_resent: &'static str,
    pub back: &'static str,
    pub wrong_code: &'static str,
    pub please_wait: &'static str,
    pub cancelled: &'static str,

    // Settings
    pub settings: &'static str,
    pub edit_profile: &'static str,
    pub username: &'static str,
    pub bio: &'static str,
    pub save: &'static str,
    pub profile_saved: &'static str,
    pub appearance: &'static str,
    pub dark_mode: &'static str,
    pub font_size: &'static str,
    pub language: &'static str,
    pub notifications: &'static str,
    pub animations: &'static str,
    pub wallpaper: &'static str,
    pub logout: &'static str,
    pub username_taken: &'static str,

    // Main screen
    pub search: &'static str,
    pub global_search: &'static str,
    pub select_chat: &'static str,
    pub online: &'static str,
    pub offline: &'static str,
    pub write_message: &'static str,
    pub no_messages: &'static str,
    pub unread: &'static str,
}

pub static EN: Translations = Translations {
    login_title: "Sign in",
    login_subtitle: "Welcome back to Luminary",
    register_title: "Create account",
    register_subtitle: "Join Luminary in a minute",
    name: "Name",
    email: "Email",
    password: "Password",
    sign_in: "Sign in",
    sign_up: "Sign up",
    need_account: "Don't have an account?",
    have_account: "Already have an account?",
    account_not_found: "Account not found",
    wrong_password: "Wrong password",
    user_exists: "An account with this email already exists",
    verify_title: "Check your email",
    verify_subtitle: "We sent a verification code to",
    verify_code: "Verification code",
    confirm: "Confirm",
    resend: "Resend code",
    code_resent: "Code sent again",
    back: "Back",
    wrong_code: "Wrong code",
    please_wait: "Please wait",
    cancelled: "Cancelled",

    settings: "Settings",
    edit_profile: "Edit profile",
    username: "Username",
    bio: "Bio",
    save: "Save",
    profile_saved: "Profile saved",
    appearance: "Appearance",
    dark_mode: "Dark mode",
    font_size: "Font size",
    language: "Language",
    notifications: "Notifications",
    animations: "Animations",
    wallpaper: "Chat wallpaper",
    logout: "Log out",
    username_taken: "This username is already taken",

    search: "Search",
    global_search: "No chats found",
    select_chat: "Select a chat to start messaging",
    online: "online",
    offline: "last seen recently",
    write_message: "Write a message",
    no_messages: "No messages yet",
    unread: "unread",
};

pub static RU: Translations = Translations {
    login_title: "Вход",
    login_subtitle: "С возвращением в Luminary",
    register_title: "Регистрация",
    register_subtitle: "Создайте аккаунт за минуту",
    name: "Имя",
    email: "Почта",
    password: "Пароль",
    sign_in: "Войти",
    sign_up: "Зарегистрироваться",
    need_account: "Нет аккаунта?",
    have_account: "Уже есть аккаунт?",
    account_not_found: "Аккаунт не найден",
    wrong_password: "Неверный пароль",
    user_exists: "Аккаунт с такой почтой уже существует",
    verify_title: "Проверьте почту",
    verify_subtitle: "Мы отправили код подтверждения на",
    verify_code: "Код подтверждения",
    confirm: "Подтвердить",
    resend: "Отправить код повторно",
    code_resent: "Код отправлен повторно",
    back: "Назад",
    wrong_code: "Неверный код",
    please_wait: "Подождите",
    cancelled: "Отменено",

    settings: "Настройки",
    edit_profile: "Редактировать профиль",
    username: "Имя пользователя",
    bio: "О себе",
    save: "Сохранить",
    profile_saved: "Профиль сохранён",
    appearance: "Оформление",
    dark_mode: "Тёмная тема",
    font_size: "Размер шрифта",
    language: "Язык",
    notifications: "Уведомления",
    animations: "Анимации",
    wallpaper: "Обои чата",
    logout: "Выйти",
    username_taken: "Это имя пользователя уже занято",

    search: "Поиск",
    global_search: "Чаты не найдены",
    select_chat: "Выберите чат, чтобы начать общение",
    online: "в сети",
    offline: "был(а) недавно",
    write_message: "Написать сообщение",
    no_messages: "Сообщений пока нет",
    unread: "непрочитанных",
};

pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Ru => &RU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_language() {
        assert_eq!(translations(Language::En).sign_in, "Sign in");
        assert_eq!(translations(Language::Ru).sign_in, "Войти");
    }
}
