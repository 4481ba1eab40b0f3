use go_rules::{Engine, EngineConfig, Stone};
use wasm_bindgen::prelude::*;

/// Two `Math.random()` draws folded into a 64-bit seed for the position-hash table.
fn js_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

fn cell(stone: Option<Stone>) -> i8 {
    stone.map(Stone::to_cell).unwrap_or(0)
}

#[wasm_bindgen]
pub struct WasmGame {
    inner: Engine,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(cols: u8, rows: u8) -> Result<WasmGame, JsError> {
        let config = EngineConfig {
            cols,
            rows,
            seed: Some(js_seed()),
        };
        Self::build(&config)
    }

    /// Build from a JSON config such as `{"cols":13,"rows":13}`.
    pub fn from_config(json: &str) -> Result<WasmGame, JsError> {
        let mut config = EngineConfig::from_json(json)?;
        config.seed.get_or_insert_with(js_seed);
        Self::build(&config)
    }

    fn build(config: &EngineConfig) -> Result<WasmGame, JsError> {
        let inner = Engine::from_config(config)?;
        Ok(WasmGame { inner })
    }

    // -- Commands --

    pub fn attempt_place_stone(&mut self, x: i16, y: i16) -> bool {
        self.inner.attempt_place_stone((x, y))
    }

    pub fn pass(&mut self) {
        self.inner.pass();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn is_legal(&self, x: i16, y: i16) -> bool {
        self.inner.is_legal((x, y))
    }

    // -- Queries (WASM-friendly types) --

    pub fn board(&self) -> js_sys::Int8Array {
        js_sys::Int8Array::from(self.inner.board().cells())
    }

    pub fn cols(&self) -> u8 {
        self.inner.cols()
    }

    pub fn rows(&self) -> u8 {
        self.inner.rows()
    }

    pub fn current_player(&self) -> i8 {
        self.inner.current_player().to_cell()
    }

    /// 1 Black, -1 White, 0 empty or off the board.
    pub fn stone_at(&self, x: i16, y: i16) -> i8 {
        cell(self.inner.stone_at((x, y)))
    }

    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    pub fn stage(&self) -> String {
        self.inner.stage().to_string()
    }

    pub fn score_black(&self) -> u32 {
        self.inner.score_black()
    }

    pub fn score_white(&self) -> u32 {
        self.inner.score_white()
    }

    pub fn status_message(&self) -> String {
        self.inner.status_message().to_string()
    }

    pub fn move_count(&self) -> usize {
        self.inner.moves().len()
    }

    /// Territory owner per cell of the current position (1, -1 or 0).
    pub fn ownership(&self) -> js_sys::Int8Array {
        let owners = go_rules::scoring::ownership(self.inner.board());
        js_sys::Int8Array::from(owners.as_slice())
    }

    // -- JSON serialization (WASM boundary) --

    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.inner.game_state()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn moves_json(&self) -> String {
        serde_json::to_string(self.inner.moves()).unwrap_or_else(|_| "[]".to_string())
    }
}
