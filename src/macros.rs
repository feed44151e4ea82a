/// Key press with the given modifiers; usable as a value and as a pattern
#[macro_export]
macro_rules! key_event {
    ($modifiers:ident, $($code:tt)+) => {
        ::crossterm::event::KeyEvent {
            code: $($code)+,
            modifiers: ::crossterm::event::KeyModifiers::$modifiers,
            kind: ::crossterm::event::KeyEventKind::Press,
            state: ::crossterm::event::KeyEventState::NONE,
        }
    };
}

#[macro_export]
macro_rules! key {
    ($key:literal) => {
        $crate::key_event!(NONE, ::crossterm::event::KeyCode::Char($key))
    };
    ($key:tt) => {
        $crate::key_event!(NONE, ::crossterm::event::KeyCode::$key)
    };
}

#[macro_export]
macro_rules! ctrl {
    ($key:literal) => {
        $crate::key_event!(CONTROL, ::crossterm::event::KeyCode::Char($key))
    };
}

#[macro_export]
macro_rules! shift {
    ($key:tt) => {
        $crate::key_event!(SHIFT, ::crossterm::event::KeyCode::$key)
    };
}
