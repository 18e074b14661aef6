use dioxus::prelude::*;
use dispatch_shared::chart::{ChartConfig, ChartUpdate};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Chart.js 2.x bindings
// ---------------------------------------------------------------------------

#[wasm_bindgen]
extern "C" {
    /// A live Chart.js instance bound to one canvas.
    #[derive(Debug, Clone)]
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &JsValue, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method, setter)]
    fn set_data(this: &Chart, data: &JsValue);

    #[wasm_bindgen(method, getter)]
    fn options(this: &Chart) -> JsValue;

    #[wasm_bindgen(method, catch)]
    fn update(this: &Chart) -> Result<(), JsValue>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("chart library error: {0}")]
    Library(String),
    #[error("could not convert chart data: {0}")]
    Convert(String),
}

fn js_error(err: JsValue) -> RenderError {
    RenderError::Library(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, RenderError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| RenderError::Convert(e.to_string()))
}

/// Return `target[key]`, creating an empty object there when it is missing.
fn child_object(target: &JsValue, key: &str) -> Result<JsValue, RenderError> {
    let existing = Reflect::get(target, &key.into()).map_err(js_error)?;
    if existing.is_object() {
        return Ok(existing);
    }
    let created: JsValue = Object::new().into();
    Reflect::set(target, &key.into(), &created).map_err(js_error)?;
    Ok(created)
}

/// Tooltip callback that returns the label precomputed for each point.
fn tooltip_label_callback() -> Function {
    Function::new_with_args(
        "item, data",
        "var ds = data.datasets[item.datasetIndex]; \
         return ds.tooltipLabels ? ds.tooltipLabels[item.index] : '';",
    )
}

fn create(canvas_id: &str, config: &ChartConfig) -> Result<Chart, RenderError> {
    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .ok_or_else(|| RenderError::MissingElement(canvas_id.to_string()))?;

    let js_config = to_js(config)?;
    let options = child_object(&js_config, "options")?;
    let tooltips = child_object(&options, "tooltips")?;
    let callbacks = child_object(&tooltips, "callbacks")?;
    Reflect::set(&callbacks, &"label".into(), &tooltip_label_callback()).map_err(js_error)?;

    Chart::new(&canvas.into(), &js_config).map_err(js_error)
}

fn apply_update(chart: &Chart, update: &ChartUpdate) -> Result<(), RenderError> {
    chart.set_data(&to_js(&update.data)?);
    let options = chart.options();

    if let Some(text) = &update.title {
        let title = child_object(&options, "title")?;
        Reflect::set(&title, &"text".into(), &text.into()).map_err(js_error)?;
    }

    if let Some(max) = update.y_max {
        let scales = child_object(&options, "scales")?;
        let y_axes: Array = Reflect::get(&scales, &"yAxes".into())
            .map_err(js_error)?
            .dyn_into()
            .unwrap_or_else(|_| Array::new());
        for axis in y_axes.iter() {
            let ticks = child_object(&axis, "ticks")?;
            Reflect::set(&ticks, &"max".into(), &max.into()).map_err(js_error)?;
        }
    }

    chart.update().map_err(js_error)
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A canvas that draws `config` once it is available and redraws in place on
/// every later change.
#[component]
pub fn ChartCanvas(id: String, config: ReadSignal<Option<ChartConfig>>) -> Element {
    let mut chart = use_signal(|| None::<Chart>);
    let canvas_id = id.clone();

    use_effect(move || {
        let Some(config) = config.read().clone() else {
            return;
        };
        let existing = chart.peek().clone();
        match existing {
            Some(instance) => {
                tracing::debug!(canvas = %canvas_id, "updating chart");
                if let Err(e) = apply_update(&instance, &config.update()) {
                    tracing::error!(canvas = %canvas_id, "chart update failed: {e}");
                }
            }
            None => {
                tracing::debug!(canvas = %canvas_id, "creating chart");
                match create(&canvas_id, &config) {
                    Ok(instance) => chart.set(Some(instance)),
                    Err(e) => tracing::error!(canvas = %canvas_id, "chart creation failed: {e}"),
                }
            }
        }
    });

    rsx! {
        canvas { id: "{id}" }
    }
}
