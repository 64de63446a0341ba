use wasm_bindgen::prelude::*;

// ============================================================================
// ZEN SAND - Rake strokes accumulated on a sand grid
// ============================================================================
//
// The host feeds pointer positions (local to the sand area) and reads back
// either the raw f64 grid or the encoded mark buffer after each event.

pub mod error;
pub mod garden;
pub mod geom;
pub mod rake;
pub mod render;
pub mod sand;

mod logging;

use crate::geom::Point;
use crate::rake::RakeStyle;
use crate::render::Encoder;
use crate::sand::{SandConfig, SandLayer};

/// Panic hook + console logging. Call once from the host before anything else.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

#[wasm_bindgen]
pub fn set_log_level(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    log::set_max_level(level);
}

#[wasm_bindgen]
pub struct SandSurface {
    layer: SandLayer,
    encoder: Encoder,
}

#[wasm_bindgen]
impl SandSurface {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, cell_size: f64) -> Result<SandSurface, JsValue> {
        Self::build(SandConfig::new(width, height).with_cell_size(cell_size))
    }

    /// Build from a JSON `SandConfig`; missing fields take defaults.
    pub fn from_config(json: &str) -> Result<SandSurface, JsValue> {
        let config = SandConfig::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Self::build(config)
    }

    fn build(config: SandConfig) -> Result<SandSurface, JsValue> {
        let layer = SandLayer::new(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let encoder = Encoder::for_grid(layer.grid());
        Ok(Self { layer, encoder })
    }

    // Pointer input (area-local coordinates). Returns cells touched.

    pub fn pointer_down(&mut self, x: f64, y: f64) -> usize {
        let touched = self.layer.on_pointer_down(Point::new(x, y));
        if touched > 0 { self.encode(); }
        touched
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> usize {
        let touched = self.layer.on_pointer_move(Point::new(x, y));
        if touched > 0 { self.encode(); }
        touched
    }

    pub fn pointer_up(&mut self) {
        self.layer.on_pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.layer.on_pointer_leave();
    }

    pub fn is_raking(&self) -> bool {
        self.layer.is_raking()
    }

    // Rake settings

    /// Unknown names fall back to `simple`.
    pub fn set_rake_type(&mut self, name: &str) {
        self.layer.set_rake_type(RakeStyle::from_name_or_default(name));
    }

    pub fn rake_type(&self) -> String {
        self.layer.rake_type().name().to_owned()
    }

    /// Style names in catalog order.
    pub fn rake_styles() -> js_sys::Array {
        rake::list_styles()
            .into_iter()
            .map(|style| JsValue::from_str(style.name()))
            .collect()
    }

    pub fn enable_rake_mode(&mut self) {
        self.layer.enable_rake_mode();
    }

    pub fn disable_rake_mode(&mut self) {
        self.layer.disable_rake_mode();
    }

    pub fn reseed(&mut self, seed: u32) {
        self.layer.reseed(seed as u64);
    }

    // Grid maintenance

    /// One settling step at the configured decay rate.
    pub fn settle(&mut self) {
        self.layer.settle();
        self.encode();
    }

    /// Settle at an explicit rate. Returns false (and changes nothing) for
    /// a negative or non-finite rate.
    pub fn decay(&mut self, rate: f64) -> bool {
        let applied = self.layer.decay_step(rate);
        if applied { self.encode(); }
        applied
    }

    pub fn clear(&mut self) {
        self.layer.clear();
        self.encoder.clear();
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.layer.resize(width, height).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.encode();
        Ok(())
    }

    fn encode(&mut self) {
        self.encoder.encode(self.layer.grid());
    }

    // Accessors for WASM
    pub fn cols(&self) -> usize { self.layer.grid().cols() }
    pub fn rows(&self) -> usize { self.layer.grid().rows() }
    pub fn cell_size(&self) -> f64 { self.layer.config().cell_size }
    pub fn grid_ptr(&self) -> *const f64 { self.layer.grid().as_ptr() }
    pub fn grid_len(&self) -> usize { self.layer.grid().len() }
    pub fn output_ptr(&self) -> *const u8 { self.encoder.ptr() }
    pub fn output_len(&self) -> usize { self.encoder.len() }
}

impl SandSurface {
    pub fn layer(&self) -> &SandLayer {
        &self.layer
    }

    pub fn output(&self) -> &[u8] {
        self.encoder.as_slice()
    }
}
