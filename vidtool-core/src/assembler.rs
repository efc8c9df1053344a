// ============================================================================
// vidtool-core/src/assembler.rs
// ============================================================================
//
// ASSEMBLER: Operation -> TranscodeSpec
//
// Turns a validated `Operation` into the engine invocations it needs. Batch
// operations yield one spec per input, in input order. `clipify` is the only
// operation that consults the prober and may yield nothing.

use crate::config::{CLIPIFY_THRESHOLD_FPS, SLOMO_OUTPUT_FPS};
use crate::error::{CoreError, CoreResult};
use crate::external::FfprobeExecutor;
use crate::filters;
use crate::naming::{MediaPath, resolve_output};
use crate::operations::{
    ClipifyParams, ConvertParams, CutParams, GifParams, Operation, ReencodeParams, ResizeParams,
    SilenceParams, SlomoOutputRate, SlomoParams,
};
use crate::transcode::{AudioCodec, HwDecode, InputSpec, TranscodeSpec, VideoCodec};

/// Builds every engine invocation for `op`, in execution order.
pub fn assemble<P: FfprobeExecutor + ?Sized>(
    op: &Operation,
    prober: &P,
) -> CoreResult<Vec<TranscodeSpec>> {
    let specs: Vec<TranscodeSpec> = match op {
        Operation::Clipify(p) => clipify(p, prober)?.into_iter().collect(),
        Operation::Convert(p) => convert(p)?,
        Operation::Cut(p) => vec![cut(p)?],
        Operation::Gif(p) => vec![gif(p)?],
        Operation::Reencode(p) => reencode(p)?,
        Operation::Silence(p) => vec![silence(p)?],
        Operation::Resize(p) => vec![resize(p)?],
        Operation::Slomo(p) => vec![slomo(p)?],
    };
    log::debug!("Assembled {} command(s) for {}", specs.len(), op.kind());
    Ok(specs)
}

/// Halves the frame rate when it is above the threshold. Returns `None`
/// when there is nothing to do, including when no rate can be probed.
pub fn clipify<P: FfprobeExecutor + ?Sized>(
    params: &ClipifyParams,
    prober: &P,
) -> CoreResult<Option<TranscodeSpec>> {
    let media = MediaPath::new(&params.input)?;

    let rate = match prober.get_frame_rate(media.path()) {
        Ok(rate) => rate,
        Err(CoreError::ProbeUnavailable(path)) => {
            log::info!("No video frame rate found for {path}; leaving it unchanged");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let fps = rate.fps();
    if fps <= CLIPIFY_THRESHOLD_FPS {
        log::info!(
            "{} runs at {:.3} fps (not above {CLIPIFY_THRESHOLD_FPS}); leaving it unchanged",
            media.path().display(),
            fps
        );
        return Ok(None);
    }

    let target = fps / 2.0;
    log::info!(
        "{} runs at {:.3} fps; reducing to {:.3} fps",
        media.path().display(),
        fps,
        target
    );
    Ok(Some(
        TranscodeSpec::new(
            InputSpec::new(media.path()).with_hw_decode(HwDecode::Cuda),
            media.with_suffix("-clip"),
        )
        .frame_rate(filters::format_decimal(target))
        .video(VideoCodec::Nvenc)
        .audio(AudioCodec::Copy),
    ))
}

pub fn convert(params: &ConvertParams) -> CoreResult<Vec<TranscodeSpec>> {
    let extension = params.extension.trim_start_matches('.');
    params
        .inputs
        .iter()
        .map(|input| {
            let media = MediaPath::new(input)?;
            Ok(
                TranscodeSpec::new(InputSpec::new(media.path()), media.with_extension(extension))
                    .video(VideoCodec::Copy)
                    .audio(AudioCodec::Copy),
            )
        })
        .collect()
}

pub fn cut(params: &CutParams) -> CoreResult<TranscodeSpec> {
    let media = MediaPath::new(&params.input)?;
    let output = resolve_output(params.name.as_deref(), || media.with_suffix("-cut"));
    Ok(
        TranscodeSpec::new(
            InputSpec::new(media.path()).with_trim(params.range.clone()),
            output,
        )
        .video(VideoCodec::Nvenc)
        .audio(AudioCodec::Copy),
    )
}

pub fn gif(params: &GifParams) -> CoreResult<TranscodeSpec> {
    let media = MediaPath::new(&params.input)?;
    let output = resolve_output(params.name.as_deref(), || media.with_extension("gif"));
    Ok(TranscodeSpec::new(
        InputSpec::new(media.path()).with_trim(params.range.clone()),
        output,
    )
    .filter(filters::gif_palette(params.scale, params.fps)))
}

pub fn reencode(params: &ReencodeParams) -> CoreResult<Vec<TranscodeSpec>> {
    let audio = if params.reencode_audio {
        AudioCodec::Aac
    } else {
        AudioCodec::Copy
    };
    params
        .inputs
        .iter()
        .map(|input| {
            let media = MediaPath::new(input)?;
            let output = resolve_output(params.name.as_deref(), || media.with_suffix("-reencoded"));
            Ok(TranscodeSpec::new(
                InputSpec::new(media.path()).with_hw_decode(HwDecode::Cuda),
                output,
            )
            .video(VideoCodec::Nvenc)
            .audio(audio))
        })
        .collect()
}

pub fn silence(params: &SilenceParams) -> CoreResult<TranscodeSpec> {
    let media = MediaPath::new(&params.input)?;
    let output = resolve_output(params.name.as_deref(), || media.with_suffix("-noaudio"));
    Ok(TranscodeSpec::new(InputSpec::new(media.path()), output)
        .video(VideoCodec::Copy)
        .audio(AudioCodec::Drop))
}

pub fn resize(params: &ResizeParams) -> CoreResult<TranscodeSpec> {
    let media = MediaPath::new(&params.input)?;
    Ok(TranscodeSpec::new(
        InputSpec::new(media.path()).with_hw_decode(HwDecode::CudaFrames),
        media.with_suffix("-resized"),
    )
    .filter(filters::cuda_scale(params.height))
    .video(VideoCodec::Nvenc)
    .audio(AudioCodec::Copy))
}

pub fn slomo(params: &SlomoParams) -> CoreResult<TranscodeSpec> {
    let media = MediaPath::new(&params.input)?;
    let output = resolve_output(params.name.as_deref(), || media.with_suffix("-slow"));
    let factor = filters::slowdown_factor(params.rate_in, params.rate_out);
    let output_fps = match params.output_rate {
        SlomoOutputRate::Fixed => SLOMO_OUTPUT_FPS,
        SlomoOutputRate::MatchRateOut => params.rate_out,
    };
    Ok(TranscodeSpec::new(
        InputSpec::new(media.path()).with_hw_decode(HwDecode::Cuda),
        output,
    )
    .filter(filters::setpts(factor))
    .frame_rate(output_fps.to_string())
    .video(VideoCodec::Nvenc)
    .audio(AudioCodec::Copy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockFfprobeExecutor;
    use crate::frame_rate::FrameRate;
    use std::path::{Path, PathBuf};

    #[test]
    fn default_names() {
        assert_eq!(cut(&CutParams::new("clip.mp4")).unwrap().output, PathBuf::from("clip-cut.mp4"));
        assert_eq!(
            resize(&ResizeParams::new("clip.mp4")).unwrap().output,
            PathBuf::from("clip-resized.mp4")
        );
        assert_eq!(gif(&GifParams::new("clip.mov")).unwrap().output, PathBuf::from("clip.gif"));
        assert_eq!(
            silence(&SilenceParams::new("clip.mp4")).unwrap().output,
            PathBuf::from("clip-noaudio.mp4")
        );
        assert_eq!(
            slomo(&SlomoParams::new("clip.mp4", 60)).unwrap().output,
            PathBuf::from("clip-slow.mp4")
        );
        assert_eq!(
            reencode(&ReencodeParams::new(vec!["clip.mp4".into()])).unwrap()[0].output,
            PathBuf::from("clip-reencoded.mp4")
        );
    }

    #[test]
    fn explicit_names_are_used_verbatim() {
        let mut params = CutParams::new("clip.mp4");
        params.name = Some("highlight.mkv".into());
        assert_eq!(cut(&params).unwrap().output, PathBuf::from("highlight.mkv"));

        let mut params = GifParams::new("clip.mov");
        params.name = Some("loop.gif".into());
        assert_eq!(gif(&params).unwrap().output, PathBuf::from("loop.gif"));
    }

    #[test]
    fn convert_copies_both_streams_per_file() {
        let mut params = ConvertParams::new(vec!["a.mov".into(), "b.mov".into()]);
        params.extension = "mkv".to_string();
        let specs = convert(&params).unwrap();

        let outputs: Vec<_> = specs.iter().map(|s| s.output.clone()).collect();
        assert_eq!(outputs, [PathBuf::from("a.mkv"), PathBuf::from("b.mkv")]);
        for spec in &specs {
            assert_eq!(spec.video, VideoCodec::Copy);
            assert_eq!(spec.audio, AudioCodec::Copy);
            assert!(!spec.requires_hardware());
        }
    }

    #[test]
    fn convert_accepts_dotted_extension() {
        let mut params = ConvertParams::new(vec!["a.mov".into()]);
        params.extension = ".mp4".to_string();
        assert_eq!(convert(&params).unwrap()[0].output, PathBuf::from("a.mp4"));
    }

    #[test]
    fn reencode_audio_choice() {
        let mut params = ReencodeParams::new(vec!["a.mp4".into()]);
        assert_eq!(reencode(&params).unwrap()[0].audio, AudioCodec::Copy);
        params.reencode_audio = true;
        let spec = &reencode(&params).unwrap()[0];
        assert_eq!(spec.audio, AudioCodec::Aac);
        assert_eq!(spec.video, VideoCodec::Nvenc);
        assert_eq!(spec.input.hw_decode, HwDecode::Cuda);
    }

    #[test]
    fn slomo_fixed_output_rate() {
        let mut params = SlomoParams::new("clip.mp4", 60);
        params.rate_out = 30;
        let spec = slomo(&params).unwrap();
        assert_eq!(spec.filter.as_deref(), Some("setpts=2.0*PTS"));
        assert_eq!(spec.frame_rate.as_deref(), Some("30"));

        params.rate_out = 15;
        let spec = slomo(&params).unwrap();
        assert_eq!(spec.filter.as_deref(), Some("setpts=4.0*PTS"));
        assert_eq!(spec.frame_rate.as_deref(), Some("30"));
    }

    #[test]
    fn slomo_can_match_rate_out() {
        let mut params = SlomoParams::new("clip.mp4", 120);
        params.rate_out = 24;
        params.output_rate = SlomoOutputRate::MatchRateOut;
        let spec = slomo(&params).unwrap();
        assert_eq!(spec.filter.as_deref(), Some("setpts=5.0*PTS"));
        assert_eq!(spec.frame_rate.as_deref(), Some("24"));
    }

    #[test]
    fn resize_uses_gpu_scaler() {
        let spec = resize(&ResizeParams::new("clip.mp4")).unwrap();
        assert_eq!(spec.input.hw_decode, HwDecode::CudaFrames);
        assert_eq!(spec.filter.as_deref(), Some("scale_cuda=-1:640:interp_algo=lanczos"));
    }

    #[test]
    fn gif_has_no_codec_overrides() {
        let spec = gif(&GifParams::new("clip.mov")).unwrap();
        assert_eq!(spec.video, VideoCodec::EngineDefault);
        assert_eq!(spec.audio, AudioCodec::EngineDefault);
        assert!(!spec.requires_hardware());
        assert!(spec.input.trim.as_ref().unwrap().is_whole_file());
    }

    #[test]
    fn clipify_halves_high_rates() {
        let prober = MockFfprobeExecutor::new();
        prober.expect_frame_rate(Path::new("clip.mp4"), FrameRate::new(60, 1));

        let spec = clipify(&ClipifyParams::new("clip.mp4"), &prober)
            .unwrap()
            .unwrap();
        assert_eq!(spec.output, PathBuf::from("clip-clip.mp4"));
        assert_eq!(spec.frame_rate.as_deref(), Some("30.0"));
        assert_eq!(spec.video, VideoCodec::Nvenc);
    }

    #[test]
    fn clipify_leaves_low_rates_alone() {
        let prober = MockFfprobeExecutor::new();
        prober.expect_frame_rate(Path::new("at.mp4"), FrameRate::new(45, 1));
        prober.expect_frame_rate(Path::new("below.mp4"), FrameRate::new(30000, 1001));
        prober.expect_frame_rate(Path::new("none.mp4"), None);

        for name in ["at.mp4", "below.mp4", "none.mp4"] {
            assert!(clipify(&ClipifyParams::new(name), &prober).unwrap().is_none());
        }
    }

    #[test]
    fn clipify_surfaces_probe_failures() {
        // No expectation registered: the mock reports a probe error.
        let prober = MockFfprobeExecutor::new();
        assert!(matches!(
            clipify(&ClipifyParams::new("corrupt.mp4"), &prober),
            Err(CoreError::FfprobeParse(_))
        ));
    }

    #[test]
    fn assemble_dispatches_every_variant() {
        let prober = MockFfprobeExecutor::new();
        prober.expect_frame_rate(Path::new("fast.mp4"), FrameRate::new(120, 1));
        let ops = [
            Operation::Clipify(ClipifyParams::new("fast.mp4")),
            Operation::Convert(ConvertParams::new(vec!["a.mov".into(), "b.mov".into()])),
            Operation::Cut(CutParams::new("clip.mp4")),
            Operation::Gif(GifParams::new("clip.mov")),
            Operation::Reencode(ReencodeParams::new(vec!["clip.mp4".into()])),
            Operation::Silence(SilenceParams::new("clip.mp4")),
            Operation::Resize(ResizeParams::new("clip.mp4")),
            Operation::Slomo(SlomoParams::new("clip.mp4", 60)),
        ];
        let counts: Vec<usize> = ops
            .iter()
            .map(|op| assemble(op, &prober).unwrap().len())
            .collect();
        assert_eq!(counts, [1, 2, 1, 1, 1, 1, 1, 1]);
    }
}
