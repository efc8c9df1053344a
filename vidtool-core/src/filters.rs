//! Filter graph builders.
//!
//! Each function returns the complete `-vf` value for one operation.

/// `scale_cuda` resize to `height`, width computed to keep the aspect ratio.
/// Expects frames to stay on the GPU (`-hwaccel_output_format cuda`).
#[must_use]
pub fn cuda_scale(height: u32) -> String {
    format!("scale_cuda=-1:{height}:interp_algo=lanczos")
}

/// Two-pass palette graph for GIF output: lanczos scale to `width`, split,
/// generate a palette from one branch, apply it to the other, then set the
/// output frame rate.
#[must_use]
pub fn gif_palette(width: u32, fps: u32) -> String {
    format!(
        "scale={width}:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse,fps={fps}"
    )
}

/// Presentation-timestamp stretch used for slow motion.
#[must_use]
pub fn setpts(factor: f64) -> String {
    format!("setpts={}*PTS", format_decimal(factor))
}

/// Slow-down factor for footage shot at `rate_in` played back at `rate_out`.
#[must_use]
pub fn slowdown_factor(rate_in: u32, rate_out: u32) -> f64 {
    f64::from(rate_in) / f64::from(rate_out)
}

/// Formats a float with at least one fractional digit (`2` -> `2.0`,
/// `29.97` -> `29.97`), which is how rates and factors appear on the
/// command line.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}
