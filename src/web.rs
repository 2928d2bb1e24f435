//! Browser binding
//!
//! The page owns the canvas, the overlays and `requestAnimationFrame`. It
//! forwards key events and button clicks here, calls `frame()` once per
//! animation frame and draws the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::assets::{AssetLoadError, Sprite};
use crate::session::{Session, UiCommand};
use crate::sim::TickInput;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Gigi Run core loaded");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One game on one canvas
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be omitted to use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(js_err)?,
            None => Tuning::default(),
        };
        Ok(Self {
            session: Session::new(tuning, width, height),
            input: TickInput::default(),
        })
    }

    /// Returns false for keys the game does not use
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.apply_key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.apply_key(key, false)
    }

    /// Button handler. `name` is one of `play`, `instructions`, `back`,
    /// `choose`, `retry`, `menu`; `choose` takes the character id as `arg`.
    /// Returns the new phase name.
    pub fn command(&mut self, name: &str, arg: Option<String>) -> Result<String, JsValue> {
        let command = match (name, arg) {
            ("play", _) => UiCommand::Play,
            ("instructions", _) => UiCommand::ShowInstructions,
            ("back", _) => UiCommand::Back,
            ("choose", Some(id)) => UiCommand::ChooseCharacter(id),
            ("retry", _) => UiCommand::Retry,
            ("menu", _) => UiCommand::ToMenu,
            (other, _) => return Err(JsValue::from_str(&format!("Unknown command '{other}'"))),
        };
        let phase = self.session.apply(command).map_err(js_err)?;
        Ok(format!("{phase:?}"))
    }

    /// Run one animation frame and return the snapshot as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let input = self.input;
        self.session.frame(&input);
        serde_json::to_string(&self.session.snapshot()).map_err(js_err)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    /// Sprite keys the page still has to load, as a JSON array
    pub fn pending_assets(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.assets().pending_keys()).map_err(js_err)
    }

    pub fn asset_loaded(&self, key: &str, width: u32, height: u32, rgba: Vec<u8>) {
        self.session
            .assets()
            .complete(key, Ok(Sprite { width, height, rgba }));
    }

    pub fn asset_failed(&self, key: &str, reason: &str) {
        self.session.assets().complete(
            key,
            Err(AssetLoadError {
                key: key.to_string(),
                reason: reason.to_string(),
            }),
        );
    }
}
