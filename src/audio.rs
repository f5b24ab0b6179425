//! Audio system using Web Audio API
//!
//! Procedurally generated tones for effect events - no external files needed.
//! Every sound is fire-and-forget; a missing AudioContext silences the game
//! without affecting play.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{EffectEvent, Tone};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the cue for an effect event
    pub fn play(&self, event: &EffectEvent) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let cue = event.cue();
        for (i, &tone) in cue.notes.iter().enumerate() {
            self.play_tone(ctx, tone, i as f64 * f64::from(cue.spacing));
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single decaying tone starting `delay` seconds from now
    fn play_tone(&self, ctx: &AudioContext, tone: Tone, delay: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.frequency, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time() + delay;
        let end = t + f64::from(tone.duration);
        let (start_gain, end_gain) = Tone::envelope(self.volume);

        gain.gain().set_value_at_time(start_gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(end_gain, end)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(end).ok();
    }
}
