//! Decoders for the pattern kinds shipped with the crate

use super::{Fields, PatternRegistry};
use crate::{
    error::ComposerResult,
    frame::Frame,
    pattern::{
        Chronometer, Crop, Cycle, FramePattern, Gradient, Loop, Mixer, PatternKind, PatternSlot,
        PingPong, Rainbow, Repeated, Rotate, Scale, StaticColor, Transition,
    },
};

pub(super) fn register_all(registry: &mut PatternRegistry) {
    for kind in PatternKind::ALL {
        registry.register(kind.as_str(), decoder_for(kind));
    }
}

fn decoder_for(kind: PatternKind) -> super::PatternDecoder {
    match kind {
        PatternKind::Color => decode_color,
        PatternKind::Frame => decode_frame,
        PatternKind::Rainbow => decode_rainbow,
        PatternKind::Repeated => decode_repeated,
        PatternKind::Gradient => decode_gradient,
        PatternKind::Transition => decode_transition,
        PatternKind::Cycle => decode_cycle,
        PatternKind::Loop => decode_loop,
        PatternKind::Rotate => decode_rotate,
        PatternKind::PingPong => decode_ping_pong,
        PatternKind::Chronometer => decode_chronometer,
        PatternKind::Crop => decode_crop,
        PatternKind::Scale => decode_scale,
        PatternKind::Mixer => decode_mixer,
    }
}

fn decode_color(_: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(StaticColor::new(fields.color("color")?).into())
}

fn decode_frame(_: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(FramePattern::new(fields.value::<Frame>("frame")?).into())
}

fn decode_rainbow(_: &PatternRegistry, _: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Rainbow::new().into())
}

fn decode_repeated(_: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Repeated::new(fields.value::<Frame>("base")?).into())
}

fn decode_gradient(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Gradient::new(
        fields.pattern(registry, "left")?,
        fields.pattern(registry, "right")?,
        fields.value("curve")?,
    )
    .into())
}

fn decode_transition(
    registry: &PatternRegistry,
    fields: &mut Fields,
) -> ComposerResult<PatternSlot> {
    Ok(Transition::new(
        fields.pattern(registry, "before")?,
        fields.pattern(registry, "after")?,
        fields.value("offset_ms")?,
        fields.value("duration_ms")?,
    )
    .with_curve(fields.value("curve")?)
    .into())
}

fn decode_cycle(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Cycle::new(
        fields.patterns(registry, "frames")?,
        fields.value("frame_duration_ms")?,
    )
    .into())
}

fn decode_loop(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Loop::new(
        fields.patterns(registry, "patterns")?,
        fields.value("show_ms")?,
        fields.value("transition_ms")?,
    )
    .with_curve(fields.value("curve")?)
    .into())
}

fn decode_rotate(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Rotate::new(fields.pattern(registry, "child")?, fields.value("moves_per_sec")?).into())
}

fn decode_ping_pong(
    registry: &PatternRegistry,
    fields: &mut Fields,
) -> ComposerResult<PatternSlot> {
    Ok(PingPong::new(fields.pattern(registry, "child")?, fields.value("moves_per_sec")?).into())
}

fn decode_chronometer(
    registry: &PatternRegistry,
    fields: &mut Fields,
) -> ComposerResult<PatternSlot> {
    Ok(Chronometer::new(fields.pattern(registry, "child")?).into())
}

fn decode_crop(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Crop::new(
        fields.pattern(registry, "child")?,
        fields.value("start")?,
        fields.value("length")?,
    )
    .into())
}

fn decode_scale(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    let child = fields.pattern(registry, "child")?;
    let interpolation = fields.value("interpolation")?;
    let length = fields.value("length")?;
    let ratio = fields.value("ratio")?;
    let mut scale = Scale::to_length(child, interpolation, length);
    scale.ratio = ratio;
    Ok(scale.into())
}

fn decode_mixer(registry: &PatternRegistry, fields: &mut Fields) -> ComposerResult<PatternSlot> {
    Ok(Mixer::new(fields.patterns(registry, "patterns")?, fields.value("weights")?).into())
}
