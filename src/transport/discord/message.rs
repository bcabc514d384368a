//! Discord message payloads for rendered pages, notices and autocomplete.

use serde_json::{Value, json};

use super::types::{
    ButtonStyle, ComponentType, EPHEMERAL_FLAG, MAX_CHOICE_NAME, MAX_EMBED_DESCRIPTION,
    MAX_EMBED_FIELDS, MAX_EMBED_TITLE, MAX_EMBED_TOTAL, MAX_FIELD_NAME, MAX_FIELD_VALUE,
    MAX_FOOTER_TEXT,
};
use crate::pagination::{Direction, RenderedPage, SessionId, encode_control};

/// Shown where Discord requires a non-empty value.
const BLANK: &str = "\u{200b}";

/// Message data for `page`: one embed plus a Previous/Next row wired to
/// `session`.
pub fn page_message(session: &SessionId, page: &RenderedPage) -> Value {
    json!({
        "embeds": [page_embed(page)],
        "components": [navigation_row(session, page)],
    })
}

/// Ephemeral text reply.
pub fn notice_message(text: &str) -> Value {
    json!({
        "content": text,
        "flags": EPHEMERAL_FLAG,
    })
}

/// Autocomplete choices from `(name, value)` pairs.
pub fn autocomplete_choices(choices: impl IntoIterator<Item = (String, String)>) -> Value {
    let choices: Vec<Value> = choices
        .into_iter()
        .map(|(name, value)| json!({ "name": truncate(&name, MAX_CHOICE_NAME), "value": value }))
        .collect();
    json!({ "choices": choices })
}

fn page_embed(page: &RenderedPage) -> Value {
    let title = truncate(&page.title, MAX_EMBED_TITLE);
    let footer = truncate(&footer_text(page), MAX_FOOTER_TEXT);
    let description = if page.description.trim().is_empty() {
        None
    } else {
        Some(truncate(&page.description, MAX_EMBED_DESCRIPTION))
    };

    let used = title.chars().count()
        + footer.chars().count()
        + description.as_deref().map_or(0, |d| d.chars().count());
    let budget = MAX_EMBED_TOTAL.saturating_sub(used);

    let mut embed = json!({
        "title": title,
        "color": page.color,
        "timestamp": page.timestamp.to_rfc3339(),
        "fields": fit_fields(embed_fields(page), budget),
        "footer": { "text": footer },
    });
    if let Some(description) = description {
        embed["description"] = json!(description);
    }
    embed
}

fn footer_text(page: &RenderedPage) -> String {
    let position = page.page_label();
    if page.footer.trim().is_empty() {
        position
    } else {
        format!("{} • {position}", page.footer)
    }
}

/// Keep fields while their names and values fit in `budget` characters. The
/// field that crosses the line is cut short with `…` when part of its value
/// still fits; everything after it is dropped.
fn fit_fields(fields: Vec<(String, String, bool)>, budget: usize) -> Vec<Value> {
    let total = fields.len();
    let mut remaining = budget;
    let mut fitted = Vec::with_capacity(total);
    let mut cut = false;

    for (name, value, inline) in fields {
        let size = name.chars().count() + value.chars().count();
        if size <= remaining {
            remaining -= size;
            fitted.push(json!({ "name": name, "value": value, "inline": inline }));
            continue;
        }

        cut = true;
        let room = remaining.saturating_sub(name.chars().count());
        if room > 1 {
            let value = truncate(&value, room);
            fitted.push(json!({ "name": name, "value": value, "inline": inline }));
        }
        break;
    }

    if cut {
        tracing::warn!(
            fields = total,
            kept = fitted.len(),
            "page exceeds Discord's embed size limit; truncating"
        );
    }
    fitted
}

fn embed_fields(page: &RenderedPage) -> Vec<(String, String, bool)> {
    let mut fields = Vec::new();
    for field in &page.fields {
        let name = if field.name.trim().is_empty() {
            BLANK.to_string()
        } else {
            truncate(&field.name, MAX_FIELD_NAME)
        };
        let chunks = split_value(&field.value, MAX_FIELD_VALUE);
        for (i, chunk) in chunks.into_iter().enumerate() {
            let name = if i == 0 {
                name.clone()
            } else {
                truncate(&format!("{name} (cont.)"), MAX_FIELD_NAME)
            };
            fields.push((name, chunk, field.inline));
        }
    }
    if fields.len() > MAX_EMBED_FIELDS {
        tracing::warn!(
            fields = fields.len(),
            "page has more embed fields than Discord allows; truncating"
        );
        fields.truncate(MAX_EMBED_FIELDS);
    }
    fields
}

fn navigation_row(session: &SessionId, page: &RenderedPage) -> Value {
    json!({
        "type": ComponentType::ActionRow as u8,
        "components": [
            button("Previous", &encode_control(session, Direction::Prev), !page.has_prev),
            button("Next", &encode_control(session, Direction::Next), !page.has_next),
        ],
    })
}

fn button(label: &str, custom_id: &str, disabled: bool) -> Value {
    json!({
        "type": ComponentType::Button as u8,
        "style": ButtonStyle::Secondary as u8,
        "label": label,
        "custom_id": custom_id,
        "disabled": disabled,
    })
}

/// Split `value` into chunks of at most `max` characters, breaking after a
/// newline when one falls in the second half of a chunk. Empty input gives
/// one placeholder chunk.
fn split_value(value: &str, max: usize) -> Vec<String> {
    let value = value.trim_end();
    if value.is_empty() {
        return vec![BLANK.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = value;
    while !rest.is_empty() {
        if rest.chars().count() <= max {
            chunks.push(rest.to_string());
            break;
        }
        let hard_end = rest
            .char_indices()
            .nth(max)
            .map_or(rest.len(), |(idx, _)| idx);
        let head = &rest[..hard_end];
        let end = match head.rfind('\n') {
            Some(newline) if newline >= hard_end / 2 => newline + 1,
            _ => hard_end,
        };
        let chunk = rest[..end].trim_end();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        rest = &rest[end..];
    }
    chunks
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
