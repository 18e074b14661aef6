use dioxus::prelude::*;
use dispatch_shared::heatmap::{
    dark_map_style, weighted_points, MapSettings, WeightedPoint, DARK_MAP_ID, DARK_MAP_NAME,
    GRADIENT,
};
use dispatch_shared::models::GeoPoint;
use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::chart_canvas::RenderError;

// ---------------------------------------------------------------------------
// Google Maps bindings
// ---------------------------------------------------------------------------

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Map")]
    fn new(element: &JsValue, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, getter = mapTypes)]
    fn map_types(this: &GoogleMap) -> MapTypeRegistry;

    #[wasm_bindgen(method, js_name = setMapTypeId)]
    fn set_map_type_id(this: &GoogleMap, id: &str);

    type MapTypeRegistry;

    #[wasm_bindgen(method)]
    fn set(this: &MapTypeRegistry, id: &str, map_type: &StyledMapType);

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    type StyledMapType;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"])]
    fn new(styles: &JsValue, options: &JsValue) -> Result<StyledMapType, JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = LatLng)]
    type MapsLatLng;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "LatLng")]
    fn new(lat: f64, lng: f64) -> Result<MapsLatLng, JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "maps", "visualization"])]
    #[derive(Debug, Clone)]
    pub type HeatmapLayer;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps", "visualization"])]
    fn new(options: &JsValue) -> Result<HeatmapLayer, JsValue>;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &HeatmapLayer, map: &JsValue);
}

fn js_error(err: JsValue) -> RenderError {
    RenderError::Library(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, RenderError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| RenderError::Convert(e.to_string()))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), RenderError> {
    Reflect::set(target, &key.into(), value)
        .map(|_| ())
        .map_err(js_error)
}

/// Create a map in `element_id` with the dark style registered and selected.
fn create_map(element_id: &str) -> Result<GoogleMap, RenderError> {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .ok_or_else(|| RenderError::MissingElement(element_id.to_string()))?;

    let map = GoogleMap::new(&element.into(), &to_js(&MapSettings::default())?).map_err(js_error)?;

    let style_options = Object::new();
    set(&style_options, "name", &DARK_MAP_NAME.into())?;
    let styled = StyledMapType::new(&to_js(&dark_map_style())?, &style_options).map_err(js_error)?;
    map.map_types().set(DARK_MAP_ID, &styled);
    map.set_map_type_id(DARK_MAP_ID);
    Ok(map)
}

fn weighted_locations(points: &[WeightedPoint]) -> Result<Array, RenderError> {
    let locations = Array::new();
    for p in points {
        let entry = Object::new();
        let location = MapsLatLng::new(p.lat, p.lng).map_err(js_error)?;
        set(&entry, "location", &location)?;
        set(&entry, "weight", &p.weight.into())?;
        locations.push(&entry);
    }
    Ok(locations)
}

fn create_layer(map: &GoogleMap, points: &[GeoPoint]) -> Result<HeatmapLayer, RenderError> {
    let options = Object::new();
    set(&options, "data", &weighted_locations(&weighted_points(points))?.into())?;
    set(&options, "gradient", &to_js(&GRADIENT)?)?;
    set(&options, "map", map)?;
    HeatmapLayer::new(&options).map_err(js_error)
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A dark-styled map whose heat overlay is replaced every time `points` changes.
#[component]
pub fn HeatmapView(id: String, points: ReadSignal<Option<Vec<GeoPoint>>>) -> Element {
    let mut map = use_signal(|| None::<GoogleMap>);
    let mut layer = use_signal(|| None::<HeatmapLayer>);
    let element_id = id.clone();

    use_effect(move || {
        let Some(points) = points.read().clone() else {
            return;
        };

        let existing = map.peek().clone();
        let current = match existing {
            Some(m) => m,
            None => match create_map(&element_id) {
                Ok(m) => {
                    map.set(Some(m.clone()));
                    m
                }
                Err(e) => {
                    tracing::error!(map = %element_id, "map creation failed: {e}");
                    return;
                }
            },
        };

        if let Some(previous) = layer.write().take() {
            previous.set_map(&JsValue::NULL);
        }
        tracing::debug!(map = %element_id, points = points.len(), "drawing heatmap");
        match create_layer(&current, &points) {
            Ok(l) => layer.set(Some(l)),
            Err(e) => tracing::error!(map = %element_id, "heatmap layer failed: {e}"),
        }
    });

    rsx! {
        div { id: "{id}", class: "heatmap" }
    }
}
