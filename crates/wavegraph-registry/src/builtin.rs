//! Built-in node table.
//!
//! Port names, order and defaults match the saved-graph schema, so graphs
//! written by earlier versions of the editor still bind.

use crate::invoke::{Args, NodeOutput};
use crate::ports::PortDescriptor as P;
use crate::{NodeCategory, NodeDescriptor, NodeRegistry};
use wavegraph_core::Signal;
use wavegraph_nodes::generators::{
    self, DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_LENGTH, ToneSettings, Waveform,
};
use wavegraph_nodes::output::{DEFAULT_EXPORT_PATH, ProcessSettings};
use wavegraph_nodes::{MixMode, filters, input, mixers, output, spectral};

const GENERAL: &str = "General";

const SIGNAL_OUT: &[P] = &[P::signal("signal")];
const SAMPLES_OUT: &[P] = &[P::samples("samplesOut")];

const CONSTANT_IN: &[P] = &[
    P::float("value"),
    P::signal("lenSignal"),
    P::float_or("length", DEFAULT_LENGTH),
];
const LENGTH_ONLY_IN: &[P] = &[P::signal("lenSignal"), P::float_or("length", DEFAULT_LENGTH)];
const REMAP_IN: &[P] = &[
    P::signal("signalIn"),
    P::float("inLow"),
    P::float("inHigh"),
    P::float("outLow"),
    P::float("outHigh"),
];
const LINEAR_IN: &[P] = &[
    P::float("slope"),
    P::float("yIntercept"),
    P::signal("lenSignal"),
    P::float_or("length", DEFAULT_LENGTH),
];
const AB_RAMP_IN: &[P] = &[
    P::float("a"),
    P::float("b"),
    P::signal("lenSignal"),
    P::float_or("length", DEFAULT_LENGTH),
];
const PROCESS_IN: &[P] = &[
    P::signal("signal"),
    P::int_or("scale", i16::MAX as i64),
    P::bool_or("play", true),
    P::bool_or("export", true),
    P::text_or("path", DEFAULT_EXPORT_PATH),
];
const TONE_IN: &[P] = &[
    P::signal("freqSignal"),
    P::signal("ampSignal"),
    P::signal("lenSignal"),
    P::float_or("frequency", DEFAULT_FREQUENCY),
    P::float_or("amplitude", DEFAULT_AMPLITUDE),
    P::float_or("length", DEFAULT_LENGTH),
    P::float_or("delay", 0.0),
];
const NOISE_IN: &[P] = &[
    P::signal("ampSignal"),
    P::signal("lenSignal"),
    P::float_or("amplitude", DEFAULT_AMPLITUDE),
    P::float_or("length", DEFAULT_LENGTH),
    P::float_or("delay", 0.0),
];
const MIXER_IN: &[P] = &[P::signal("a"), P::signal("b")];
const FILE_IN: &[P] = &[P::text("path")];
const SIGNAL_IN: &[P] = &[P::signal("signalIn")];
const VOLUME_IN: &[P] = &[
    P::signal("signalIn"),
    P::float_or("volume", filters::DEFAULT_VOLUME),
];
const SHIFT_IN: &[P] = &[P::signal("signalIn"), P::float("shift")];
const GATE_IN: &[P] = &[P::signal("signalIn"), P::float("cutoff"), P::float("floor")];

const fn node(
    id: &'static str,
    name: &'static str,
    category: NodeCategory,
    description: &'static str,
    inputs: &'static [P],
) -> NodeDescriptor {
    NodeDescriptor {
        id,
        name,
        category,
        subcategory: GENERAL,
        description,
        terminal: false,
        inputs,
        outputs: SIGNAL_OUT,
    }
}

fn tone_settings(args: &Args<'_>) -> ToneSettings {
    ToneSettings {
        frequency: args.float("frequency"),
        amplitude: args.float("amplitude"),
        length: args.float("length"),
        delay: args.float("delay"),
    }
}

fn oscillator(waveform: Waveform, args: &Args<'_>) -> NodeOutput {
    NodeOutput::Signal(generators::oscillator(
        waveform,
        args.signal("freqSignal"),
        args.signal("ampSignal"),
        args.signal("lenSignal"),
        &tone_settings(args),
    ))
}

fn mixer(mode: MixMode, args: &Args<'_>) -> NodeOutput {
    NodeOutput::Signal(mixers::mix(args.signal("a"), args.signal("b"), mode))
}

fn signal_in<'a>(args: &'a Args<'_>) -> &'a Signal {
    args.signal("signalIn")
}

pub(crate) fn register_all(registry: &mut NodeRegistry) {
    use NodeCategory::{Fft, Filters, Inputs, Math, Mixers, Noise, Tone};

    // Math
    registry.register(
        node("constant", "Constant", Math, "Provides a constant number.", CONSTANT_IN),
        |args, _| {
            NodeOutput::Signal(generators::constant(
                args.float("value"),
                args.signal("lenSignal"),
                args.float("length"),
            ))
        },
    );
    registry.register(
        node("int16_max", "Int16.Max", Math, "Provides a constant number.", LENGTH_ONLY_IN),
        |args, _| {
            NodeOutput::Signal(generators::int16_max(
                args.signal("lenSignal"),
                args.float("length"),
            ))
        },
    );
    registry.register(
        node("int16_min", "Int16.Min", Math, "Provides a constant number.", LENGTH_ONLY_IN),
        |args, _| {
            NodeOutput::Signal(generators::int16_min(
                args.signal("lenSignal"),
                args.float("length"),
            ))
        },
    );
    registry.register(
        node("remap", "Remap", Math, "Remaps a signal to another range.", REMAP_IN),
        |args, _| {
            NodeOutput::Signal(generators::remap(
                signal_in(args),
                args.float("inLow"),
                args.float("inHigh"),
                args.float("outLow"),
                args.float("outHigh"),
            ))
        },
    );
    registry.register(
        node("linear", "Linear", Math, "Creates a linear range.", LINEAR_IN),
        |args, _| {
            NodeOutput::Signal(generators::linear(
                args.float("slope"),
                args.float("yIntercept"),
                args.signal("lenSignal"),
                args.float("length"),
            ))
        },
    );
    registry.register(
        node("exponential", "Exponential", Math, "Creates a exponential range.", AB_RAMP_IN),
        |args, _| {
            NodeOutput::Signal(generators::exponential(
                args.float("a"),
                args.float("b"),
                args.signal("lenSignal"),
                args.float("length"),
            ))
        },
    );
    registry.register(
        node("quadratic", "Quadratic", Math, "Creates a quadratic range.", AB_RAMP_IN),
        |args, _| {
            NodeOutput::Signal(generators::quadratic(
                args.float("a"),
                args.float("b"),
                args.signal("lenSignal"),
                args.float("length"),
            ))
        },
    );

    // Output
    registry.register(
        NodeDescriptor {
            id: "process",
            name: "Process",
            category: NodeCategory::Output,
            subcategory: GENERAL,
            description: "Processes the sound.",
            terminal: true,
            inputs: PROCESS_IN,
            outputs: SAMPLES_OUT,
        },
        |args, ctx| {
            let settings = ProcessSettings {
                scale: args.int("scale").clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16,
                play: args.bool("play"),
                export: args.bool("export"),
                path: args.text("path").into(),
            };
            let signal = args
                .is_connected("signal")
                .then(|| args.signal("signal"));
            NodeOutput::Samples(output::process(
                signal,
                &settings,
                &mut *ctx.playback,
                &mut *ctx.notifier,
            ))
        },
    );

    // Tone
    registry.register(
        node("sine_wave", "Sine Wave", Tone, "Generates a sine wave tone.", TONE_IN),
        |args, _| oscillator(Waveform::Sine, args),
    );
    registry.register(
        node("square_wave", "Square Wave", Tone, "Generates a square wave tone.", TONE_IN),
        |args, _| oscillator(Waveform::Square, args),
    );
    registry.register(
        node("sawtooth_wave", "Sawtooth Wave", Tone, "Generates a sawtooth wave tone.", TONE_IN),
        |args, _| oscillator(Waveform::Sawtooth, args),
    );
    registry.register(
        node("triangle_wave", "Triangle Wave", Tone, "Generates a triangle wave tone.", TONE_IN),
        |args, _| oscillator(Waveform::Triangle, args),
    );

    // Noise
    registry.register(
        node("white_noise", "White Noise", Noise, "Generates white noise.", NOISE_IN),
        |args, ctx| {
            NodeOutput::Signal(generators::white_noise(
                &mut *ctx.rng,
                args.signal("ampSignal"),
                args.signal("lenSignal"),
                &tone_settings(args),
            ))
        },
    );

    // Mixers
    registry.register(
        node(
            "additive_mixer",
            "Additive Mixer",
            Mixers,
            "Performs additive mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Additive, args),
    );
    registry.register(
        node(
            "multiply_mixer",
            "Multiply Mixer",
            Mixers,
            "Performs multiply mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Multiply, args),
    );
    registry.register(
        node(
            "subtractive_mixer",
            "Subtractive Mixer",
            Mixers,
            "Performs subtractive mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Subtractive, args),
    );
    registry.register(
        node(
            "division_mixer",
            "Division Mixer",
            Mixers,
            "Performs division mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Division, args),
    );
    registry.register(
        node(
            "modulus_mixer",
            "Modulus Mixer",
            Mixers,
            "Performs division mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Modulus, args),
    );
    registry.register(
        node(
            "screen_mixer",
            "Screen Mixer",
            Mixers,
            "Performs additive mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Screen, args),
    );
    registry.register(
        node(
            "overlay_mixer",
            "Overlay Mixer",
            Mixers,
            "Performs additive mixing of signals.",
            MIXER_IN,
        ),
        |args, _| mixer(MixMode::Overlay, args),
    );

    // Inputs
    registry.register(
        node("file_in", "File In", Inputs, "An existing wave file.", FILE_IN),
        |args, ctx| NodeOutput::Signal(input::file_in(args.text("path"), &mut *ctx.notifier)),
    );

    // Filters
    registry.register(
        node("invert", "Invert", Filters, "Inverts a signal.", SIGNAL_IN),
        |args, _| NodeOutput::Signal(filters::invert(signal_in(args))),
    );
    registry.register(
        node(
            "volume",
            "Volume Multiplier",
            Filters,
            "Changes the volume of the signal.",
            VOLUME_IN,
        ),
        |args, _| NodeOutput::Signal(filters::volume(signal_in(args), args.float("volume"))),
    );
    registry.register(
        node(
            "time_shift",
            "Time Shift",
            Filters,
            "Changes the start position of the signal.",
            SHIFT_IN,
        ),
        |args, _| NodeOutput::Signal(filters::time_shift(signal_in(args), args.float("shift"))),
    );
    registry.register(
        node(
            "amplitude_highpass",
            "Amplitude Highpass",
            Filters,
            "Allows signal values above a certain amount to pass, sets the rest to floor.",
            GATE_IN,
        ),
        |args, _| {
            NodeOutput::Signal(filters::amplitude_highpass(
                signal_in(args),
                args.float("cutoff"),
                args.float("floor"),
            ))
        },
    );
    registry.register(
        node(
            "amplitude_lowpass",
            "Amplitude Lowpass",
            Filters,
            "Allows signal values below a certain amount to pass, sets the rest to floor.",
            GATE_IN,
        ),
        |args, _| {
            NodeOutput::Signal(filters::amplitude_lowpass(
                signal_in(args),
                args.float("cutoff"),
                args.float("floor"),
            ))
        },
    );

    // FFT
    registry.register(
        node("fft", "FFT", Fft, "FFT", SIGNAL_IN),
        |args, _| NodeOutput::Signal(spectral::forward_fft(signal_in(args))),
    );
    registry.register(
        node("reverse_fft", "Reverse FFT", Fft, "FFT", SIGNAL_IN),
        |args, _| NodeOutput::Signal(spectral::inverse_fft(signal_in(args))),
    );
}
