// src/lib.rs  —  loctable library root
pub mod config;
pub mod l10n;
pub mod tui;
pub mod widgets;
