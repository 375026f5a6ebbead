use crate::task::{Category, Priority};

pub const APP_TITLE: &str = "JARVIS";
pub const APP_TAGLINE: &str = "Plan smarter. Achieve more. Let JARVIS takeover.";
pub const EMPTY_LIST_MESSAGE: &str = "No tasks yet. Click “Add Task” to create one!";
pub const CARD_DESCRIPTION_CHARS: usize = 120;

/// Shortens `text` to at most `max_chars` characters, ending in `…` when cut.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

pub fn priority_tone(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

pub fn category_tone(category: Category) -> &'static str {
    match category {
        Category::Work => "work",
        Category::Personal => "personal",
        Category::General => "general",
    }
}
