use crate::constants::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sensorium_core::audio::*;
use sensorium_core::Waveform;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Nodes of the persistent graph.
///
/// voice -> panner -> master -> filter -> analyser -> destination, with every
/// panner also feeding the reverb send and high voices the delay send.
struct AudioGraph {
    ctx: web::AudioContext,
    master: web::GainNode,
    filter: web::BiquadFilterNode,
    analyser: web::AnalyserNode,
    reverb_in: web::ConvolverNode,
    delay_in: web::DelayNode,
}

/// Process-wide sound service owned by the shell and lent to chambers.
///
/// Every operation is best-effort: before `initialize` succeeds, or if the
/// platform refuses, calls are silent no-ops.
#[derive(Default)]
pub struct AudioEngine {
    graph: RefCell<Option<AudioGraph>>,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[audio] {} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn build_reverb(ctx: &web::AudioContext, master: &web::GainNode) -> Result<web::ConvolverNode, ()> {
    let convolver = web::ConvolverNode::new(ctx).map_err(|e| {
        log::error!("[audio] ConvolverNode error: {:?}", e);
    })?;
    let sample_rate = ctx.sample_rate();
    let mut rng = StdRng::from_entropy();
    let channels = impulse_response(sample_rate, REVERB_SECONDS, REVERB_DECAY, &mut rng);
    let len = channels[0].len() as u32;
    let buffer = ctx.create_buffer(2, len, sample_rate).map_err(|e| {
        log::error!("[audio] impulse buffer error: {:?}", e);
    })?;
    for (ch, mut data) in channels.into_iter().enumerate() {
        if let Err(e) = buffer.copy_to_channel(&mut data, ch as i32) {
            log::warn!("[audio] impulse channel {} copy failed: {:?}", ch, e);
        }
    }
    convolver.set_buffer(Some(&buffer));
    let ret = create_gain(ctx, REVERB_RETURN_GAIN, "Reverb return")?;
    _ = convolver.connect_with_audio_node(&ret);
    _ = ret.connect_with_audio_node(master);
    Ok(convolver)
}

fn build_delay(ctx: &web::AudioContext, master: &web::GainNode) -> Result<web::DelayNode, ()> {
    let delay = ctx
        .create_delay_with_max_delay_time(DELAY_MAX_SEC)
        .map_err(|e| {
            log::error!("[audio] DelayNode error: {:?}", e);
        })?;
    delay.delay_time().set_value(DELAY_TIME_SEC);
    let feedback = create_gain(ctx, DELAY_FEEDBACK_GAIN, "Delay feedback")?;
    _ = delay.connect_with_audio_node(&feedback);
    _ = feedback.connect_with_audio_node(&delay);
    _ = delay.connect_with_audio_node(master);
    Ok(delay)
}

fn build_graph() -> Result<AudioGraph, ()> {
    let ctx = web::AudioContext::new().map_err(|e| {
        log::error!("[audio] AudioContext error: {:?}", e);
    })?;
    let master = create_gain(&ctx, MASTER_GAIN, "Master")?;

    let filter = web::BiquadFilterNode::new(&ctx).map_err(|e| {
        log::error!("[audio] BiquadFilterNode error: {:?}", e);
    })?;
    filter.set_type(web::BiquadFilterType::Lowpass);
    filter.frequency().set_value(FILTER_OPEN_HZ);
    filter.q().set_value(FILTER_Q);

    let analyser = web::AnalyserNode::new(&ctx).map_err(|e| {
        log::error!("[audio] AnalyserNode error: {:?}", e);
    })?;
    analyser.set_fft_size(FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);

    _ = master.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&analyser);
    _ = analyser.connect_with_audio_node(&ctx.destination());

    let reverb_in = build_reverb(&ctx, &master)?;
    let delay_in = build_delay(&ctx, &master)?;

    Ok(AudioGraph {
        ctx,
        master,
        filter,
        analyser,
        reverb_in,
        delay_in,
    })
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Triangle => web::OscillatorType::Triangle,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph on first call; later calls do nothing.
    pub fn initialize(&self) {
        let mut graph = self.graph.borrow_mut();
        if graph.is_some() {
            return;
        }
        if let Ok(g) = build_graph() {
            log::info!(
                "[audio] graph ready at {} Hz, {} analyser bins",
                g.ctx.sample_rate(),
                g.analyser.frequency_bin_count()
            );
            *graph = Some(g);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.graph.borrow().is_some()
    }

    /// Resume a suspended context; must follow a user gesture.
    pub fn resume(&self) {
        let Some(ctx) = self.graph.borrow().as_ref().map(|g| g.ctx.clone()) else {
            return;
        };
        if ctx.state() == web::AudioContextState::Running {
            return;
        }
        match ctx.resume() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] resume refused: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[audio] resume failed: {:?}", e),
        }
    }

    /// Schedule one self-releasing voice.
    pub fn play_tone(&self, tone: &ToneEvent) {
        let graph = self.graph.borrow();
        let Some(g) = graph.as_ref() else {
            return;
        };
        if let Err(e) = Self::schedule_voice(g, tone) {
            log::debug!("[audio] voice dropped: {:?}", e);
        }
    }

    fn schedule_voice(g: &AudioGraph, tone: &ToneEvent) -> Result<(), wasm_bindgen::JsValue> {
        let ctx = &g.ctx;
        let osc = web::OscillatorNode::new(ctx)?;
        osc.set_type(oscillator_type(tone.waveform));
        osc.frequency().set_value(tone.frequency_hz);

        let env = web::GainNode::new(ctx)?;
        let panner = web::StereoPannerNode::new(ctx)?;
        panner.pan().set_value(tone.pan.clamp(-1.0, 1.0));

        let now = ctx.current_time();
        let gain = env.gain();
        gain.set_value_at_time(0.0, now)?;
        gain.linear_ramp_to_value_at_time(VOICE_PEAK_GAIN, now + VOICE_ATTACK_SEC)?;
        gain.exponential_ramp_to_value_at_time(VOICE_FLOOR_GAIN, now + VOICE_DECAY_END_SEC)?;

        osc.connect_with_audio_node(&env)?;
        env.connect_with_audio_node(&panner)?;
        panner.connect_with_audio_node(&g.master)?;
        panner.connect_with_audio_node(&g.reverb_in)?;
        if tone.uses_delay_send() {
            panner.connect_with_audio_node(&g.delay_in)?;
        }

        let (osc_end, env_end, pan_end) = (osc.clone(), env.clone(), panner.clone());
        let on_ended = Closure::once_into_js(move || {
            _ = osc_end.disconnect();
            _ = env_end.disconnect();
            _ = pan_end.disconnect();
        });
        osc.set_onended(Some(on_ended.unchecked_ref()));

        osc.start_with_when(now)?;
        osc.stop_with_when(now + VOICE_LIFETIME_SEC)?;
        Ok(())
    }

    /// Move the master lowpass toward the cutoff for `value` in [0, 1].
    pub fn set_expressive_filter(&self, value: f32) {
        let graph = self.graph.borrow();
        let Some(g) = graph.as_ref() else {
            return;
        };
        let cutoff = expressive_cutoff_hz(value);
        _ = g
            .filter
            .frequency()
            .set_target_at_time(cutoff, g.ctx.current_time(), EXPRESSIVE_TAU_SEC);
    }

    /// Copy the analyser's current view into `out`, resizing it to the bin
    /// count. Leaves `out` empty when audio is unavailable.
    pub fn spectrum(&self, mode: SpectrumMode, out: &mut Vec<u8>) {
        let graph = self.graph.borrow();
        let Some(g) = graph.as_ref() else {
            out.clear();
            return;
        };
        match mode {
            SpectrumMode::Frequency => {
                out.resize(g.analyser.frequency_bin_count() as usize, 0);
                g.analyser.get_byte_frequency_data(out);
            }
            SpectrumMode::Time => {
                out.resize(g.analyser.fft_size() as usize, 0);
                g.analyser.get_byte_time_domain_data(out);
            }
        }
    }
}
