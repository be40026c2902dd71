//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for application shortcuts inside forms
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Show/hide the focused password
#[cfg(target_os = "macos")]
pub const REVEAL_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const REVEAL_SHORTCUT: &str = "Ctrl+R";

/// Jump from the signup form to login
#[cfg(target_os = "macos")]
pub const LOGIN_LINK_SHORTCUT: &str = "Cmd+L";

#[cfg(not(target_os = "macos"))]
pub const LOGIN_LINK_SHORTCUT: &str = "Ctrl+L";
