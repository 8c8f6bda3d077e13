/// RGBA color with each channel normalized to `[0, 1]`.
pub type Rgba<T = f32> = [T; 4];

/// Unpack a color stored as `0xRRGGBBAA` into normalized channels.
pub fn unpack_rgba(packed: u32) -> Rgba {
    packed.to_be_bytes().map(|c| c as f32 / 255.)
}

/// Pack normalized channels into a `0xRRGGBBAA` value.
///
/// Channels are scaled by 255 and truncated, after clamping to `[0, 1]`.
pub fn pack_rgba(color: Rgba) -> u32 {
    u32::from_be_bytes(color.map(|c| (c.clamp(0., 1.) * 255.) as u8))
}

/// Linearly interpolate between two colors, channel by channel.
///
/// `t = 0` returns `a` and `t = 1` returns `b`.
pub fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    std::array::from_fn(|i| a[i] * (1. - t) + b[i] * t)
}
