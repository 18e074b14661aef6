use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Info,
    Danger,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Info => "alert alert-info alert-dismissible mt-3",
            AlertKind::Danger => "alert alert-danger alert-dismissible mt-3",
        }
    }
}

/// Bootstrap-style alert box. The close button hides it for as long as it
/// stays mounted; callers unmount it to clear it.
#[component]
pub fn Alert(kind: AlertKind, children: Element) -> Element {
    let mut dismissed = use_signal(|| false);

    if *dismissed.read() {
        return rsx! {};
    }

    rsx! {
        div { class: kind.class(), role: "alert",
            p { class: "mb-0", {children} }
            button {
                r#type: "button",
                class: "close",
                "aria-label": "Close",
                onclick: move |_| dismissed.set(true),
                "\u{d7}"
            }
        }
    }
}

/// Danger alert for a failed request.
#[component]
pub fn ErrorAlert(message: String) -> Element {
    rsx! {
        Alert { kind: AlertKind::Danger, "{message}" }
    }
}
