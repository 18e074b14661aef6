pub mod heatmaps;
pub mod incidents;
pub mod metrics;

use std::future::Future;

use dioxus::prelude::*;
use dispatch_shared::cache::{Lookup, SelectionState};

use crate::api::ApiError;
use crate::components::alert::ErrorAlert;

/// Fetch once on mount. There is no results panel for these, so a failure is
/// only logged and the memo stays `None`.
pub(crate) fn use_page_load<T, F>(
    what: &'static str,
    mut load: impl FnMut() -> F + 'static,
) -> Memo<Option<T>>
where
    T: Clone + PartialEq + 'static,
    F: Future<Output = Result<T, ApiError>> + 'static,
{
    let resource = use_resource(move || {
        let request = load();
        async move {
            request
                .await
                .inspect_err(|e| tracing::error!("failed to load {what}: {e}"))
                .ok()
        }
    });
    use_memo(move || resource.read().clone().flatten())
}

/// A select-driven form backed by a per-key response cache.
pub(crate) struct Selection<V: 'static> {
    state: Signal<SelectionState<String, V>>,
}

impl<V: 'static> Clone for Selection<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: 'static> Copy for Selection<V> {}

pub(crate) fn use_selection<V: 'static>() -> Selection<V> {
    Selection {
        state: use_signal(SelectionState::default),
    }
}

impl<V: Clone + 'static> Selection<V> {
    /// The chosen key, empty before the first submit.
    pub fn selected(&self) -> String {
        self.state.read().selected().cloned().unwrap_or_default()
    }

    pub fn failure(&self) -> Option<String> {
        self.state.read().failure().map(str::to_string)
    }

    /// The cached response for the current selection, if it has arrived.
    pub fn current(&self) -> Option<V> {
        self.state.read().current().cloned()
    }

    /// Select `key` and fetch it unless it is cached or already loading.
    pub fn submit<F>(self, key: String, fetch: impl FnOnce(String) -> F)
    where
        F: Future<Output = Result<V, ApiError>> + 'static,
    {
        let mut state = self.state;
        let lookup = state.write().submit(key.clone());
        match lookup {
            Lookup::Hit(_) => tracing::debug!(%key, "served from cache"),
            Lookup::InFlight => tracing::debug!(%key, "request already in flight"),
            Lookup::Miss => {
                let request = fetch(key.clone());
                spawn(async move {
                    let outcome = request.await.map_err(|e| {
                        tracing::error!(%key, "request failed: {e}");
                        e.alert_text()
                    });
                    state.write().settle(key, outcome);
                });
            }
        }
    }
}

/// Results container of a selection form: the failure alert, if any, above
/// the chart so the chart instance survives a failed request.
#[component]
pub(crate) fn SelectionResults(
    id: &'static str,
    #[props(!optional)] failure: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div { id: "{id}",
            if let Some(message) = failure {
                ErrorAlert { message }
            }
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::core::NoOpMutations;

    #[derive(Props, Clone, PartialEq)]
    struct PanelProps {
        failure: Option<String>,
    }

    #[component]
    fn Panel(props: PanelProps) -> Element {
        rsx! {
            SelectionResults { id: "trendResults", failure: props.failure,
                canvas { id: "battalionDistChart" }
            }
        }
    }

    fn render(failure: Option<&str>) -> String {
        let mut dom = VirtualDom::new_with_props(
            Panel,
            PanelProps {
                failure: failure.map(str::to_string),
            },
        );
        let mut noop = NoOpMutations {};
        dom.rebuild(&mut noop);
        dioxus_ssr::render(&mut dom)
    }

    #[test]
    fn test_failure_renders_one_alert_with_server_message() {
        let html = render(Some("No address provided. Please try again."));
        assert_eq!(html.matches("alert-danger").count(), 1, "{html}");
        assert!(html.contains("No address provided. Please try again."), "{html}");
        assert!(html.contains("battalionDistChart"), "{html}");
    }

    #[test]
    fn test_no_failure_renders_no_alert() {
        let html = render(None);
        assert!(html.contains("trendResults"), "{html}");
        assert!(!html.contains("alert"), "{html}");
        assert!(html.contains("battalionDistChart"), "{html}");
    }
}
