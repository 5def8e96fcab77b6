//! Browser bindings (WASM only)
//!
//! JavaScript owns the canvas and the animation loop. Each frame it pushes
//! input, calls `frame(dt)` and draws the JSON snapshot.

use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::audio::{AudioCue, AudioDispatcher, CueSink, Sound};
use crate::persistence::default_store;
use crate::settings::Settings;
use crate::session::Session;
use crate::sim::TickInput;
use crate::tuning::Tuning;

/// Base pitch for synthesized kill beeps
const TONE_HZ: f32 = 440.0;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Zach's Spider Adventure loaded");
}

/// Web Audio playback: samples through `<audio>`, tones through an oscillator
struct WebAudioSink {
    ctx: Option<AudioContext>,
}

impl WebAudioSink {
    fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Square);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(&self, pitch: f32, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = Self::create_osc(ctx, TONE_HZ * pitch) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    fn play_sample(name: &str, vol: f32) {
        match HtmlAudioElement::new_with_src(&format!("sound/{name}")) {
            Ok(el) => {
                el.set_volume(f64::from(vol));
                // Autoplay rejections are not our concern
                let _ = el.play();
            }
            Err(_) => log::warn!("Could not load sound/{}", name),
        }
    }
}

impl CueSink for WebAudioSink {
    fn play(&mut self, _cue: AudioCue, sound: &Sound, volume: f32) {
        match sound {
            Sound::Sample(name) => Self::play_sample(name, volume),
            Sound::Tone { pitch } => self.play_tone(*pitch, volume),
        }
    }
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    input: TickInput,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` may be empty for the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let settings = Settings::load();
        let audio = AudioDispatcher::with_settings(Box::new(WebAudioSink::new()), &settings);
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        Ok(WebGame {
            session: Session::new(tuning, seed, default_store(), audio),
            input: TickInput::default(),
            settings,
        })
    }

    /// Held keys for the coming frame
    pub fn set_input(&mut self, left: bool, right: bool, jump: bool) {
        self.input.left = left;
        self.input.right = right;
        self.input.jump = jump;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn toggle_idle_mode(&mut self) {
        self.input.idle_mode = !self.input.idle_mode;
        log::info!("Idle mode: {}", self.input.idle_mode);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.session.audio_mut().set_muted(muted);
        self.settings.save();
    }

    /// Advance by a frame delta in seconds; returns ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.session.advance(dt, &mut self.input)
    }

    /// Current snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot_for(&self.settings))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
