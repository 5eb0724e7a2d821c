//! ### English
//! UI key/button codes, target key/button codes and the translation tables between them.
//!
//! ### 中文
//! UI 键码/按键码、目标键码/按键码以及二者之间的转换表。
mod codes;
mod translate;
mod ui_code;

pub use codes::{buttons, keys};
pub use translate::{button_to_ui_button, key_to_ui_key, ui_button_to_button, ui_key_to_key};
pub use ui_code::{UiKeyCode, UiMouseButton};
