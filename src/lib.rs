pub mod config;
pub mod geometry;
pub mod routing;
pub mod scene;

use wasm_bindgen::prelude::*;

use routing::RoutingEngine;
use scene::SceneFile;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Route the connections of a JSON scene and return a JSON report,
/// one entry per connection.
#[wasm_bindgen(js_name = "routeConnections")]
pub fn route_connections(scene_json: &str) -> Result<String, String> {
    let report = route_scene_json(scene_json)?;
    serde_json::to_string(&report).map_err(|e| e.to_string())
}

/// Parse a scene file and route it.
pub fn route_scene_json(scene_json: &str) -> Result<Vec<routing::RouteReport>, String> {
    let file = SceneFile::from_json(scene_json).map_err(|e| e.to_string())?;
    let (scene, config, connections) = file.into_parts();
    scene.validate().map_err(|e| e.to_string())?;

    let engine = RoutingEngine::new(config).map_err(|e| e.to_string())?;
    let index = scene.index();
    Ok(engine.route_report(&index, &connections))
}
