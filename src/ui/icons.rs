//! Shared UI icons.
//!
//! Each icon falls back to ASCII on terminals without emoji support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");
pub static REVERT: Emoji<'_, '_> = Emoji("🔄 ", "[<-]");

// Lanes
pub static TODO: Emoji<'_, '_> = Emoji("📋 ", "");
pub static IN_PROGRESS: Emoji<'_, '_> = Emoji("🔧 ", "");
pub static DONE: Emoji<'_, '_> = Emoji("🏁 ", "");

// Misc
pub static BUG: Emoji<'_, '_> = Emoji("🐞 ", "");
pub static USER: Emoji<'_, '_> = Emoji("👤 ", "");
pub static COMMENT: Emoji<'_, '_> = Emoji("💬 ", "");
pub static IMAGE: Emoji<'_, '_> = Emoji("🖼️  ", "");
pub static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "...");
