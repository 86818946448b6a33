//! Stateless HTML building blocks. Each style variant maps to a fixed class list.

use crate::utils::format::escape_html;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Default,
    Outline,
}

impl ButtonVariant {
    pub fn classes(self) -> &'static str {
        match self {
            ButtonVariant::Default => "btn btn-default",
            ButtonVariant::Outline => "btn btn-outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTone {
    Success,
    Error,
}

impl AlertTone {
    pub fn classes(self) -> &'static str {
        match self {
            AlertTone::Success => "alert alert-success",
            AlertTone::Error => "alert alert-error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AlertTone::Success => "&#10003;",
            AlertTone::Error => "&#9888;",
        }
    }
}

/// A form submit button. `label` is trusted markup; callers escape anything user-supplied.
pub fn button(variant: ButtonVariant, disabled: bool, label: &str) -> String {
    let disabled = if disabled { " disabled" } else { "" };

    format!(
        r#"<button type="submit" class="{}"{disabled}>{label}</button>"#,
        variant.classes()
    )
}

/// A link styled like a button. `href` is escaped here.
pub fn link_button(variant: ButtonVariant, href: &str, new_context: bool, label: &str) -> String {
    let target = if new_context {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };

    format!(
        r#"<a class="{}" href="{}"{target}>{label}</a>"#,
        variant.classes(),
        escape_html(href)
    )
}

pub fn text_input(id: &str, name: &str, value: &str, placeholder: &str, disabled: bool) -> String {
    let disabled = if disabled { " disabled" } else { "" };

    format!(
        r#"<input id="{id}" name="{name}" type="text" class="input" placeholder="{}" value="{}" autocomplete="off"{disabled}>"#,
        escape_html(placeholder),
        escape_html(value)
    )
}

pub fn badge(text: &str) -> String {
    format!(r#"<span class="badge">{}</span>"#, escape_html(text))
}

/// `body` is trusted markup.
pub fn alert(tone: AlertTone, body: &str) -> String {
    format!(
        r#"<div class="{}" role="alert"><span class="alert-icon">{}</span><div class="alert-body">{body}</div></div>"#,
        tone.classes(),
        tone.icon()
    )
}

pub fn card(title: &str, description: &str, content: &str) -> String {
    format!(
        r#"<section class="card"><header class="card-header"><h2 class="card-title">{}</h2><p class="card-description">{}</p></header><div class="card-content">{content}</div></section>"#,
        escape_html(title),
        escape_html(description)
    )
}
