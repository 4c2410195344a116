use super::{CancelToken, EncodedImage, ExportOptions, ExportRequest, rasterize_frame};
use crate::error::ExportError;
use crate::frame::Frame;
use image::codecs::gif::{GifEncoder, Repeat};
use image::Delay;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Quantizer speed, 1 (best) to 30 (fastest).
const ENCODER_SPEED: i32 = 10;

/// Encodes `frames` in order as an endlessly looping GIF into `writer`.
///
/// `token` is checked before each frame. Returns the number of frames written.
pub fn encode_gif<W: Write>(
    frames: &[Frame],
    options: &ExportOptions,
    writer: W,
    token: &CancelToken,
) -> Result<usize, ExportError> {
    options.check(frames.len())?;

    let delay = Delay::from_saturating_duration(options.frame_delay);
    let mut encoder = GifEncoder::new_with_speed(writer, ENCODER_SPEED);
    encoder.set_repeat(Repeat::Infinite)?;

    for (index, frame) in frames.iter().enumerate() {
        if token.is_cancelled() {
            log::warn!("export cancelled before frame {index}");
            return Err(ExportError::Cancelled);
        }
        let raster = rasterize_frame(frame, options.canvas_size, options.width, options.height)?;
        encoder.encode_frame(image::Frame::from_parts(raster, 0, 0, delay))?;
        log::debug!("encoded frame {}/{}", index + 1, frames.len());
    }

    // Dropping the encoder writes the GIF trailer.
    drop(encoder);
    Ok(frames.len())
}

fn partial_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.gif".to_owned());
    destination.with_file_name(format!(".{name}.{}.partial", Uuid::new_v4().simple()))
}

fn write_partial(
    request: &ExportRequest,
    partial: &Path,
    token: &CancelToken,
) -> Result<usize, ExportError> {
    let mut writer = BufWriter::new(File::create(partial)?);
    let written = encode_gif(&request.frames, &request.options, &mut writer, token)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(written)
}

/// Runs `request` to completion, leaving either the finished file at its
/// destination or nothing at all.
pub fn write_gif_file(
    request: &ExportRequest,
    token: &CancelToken,
) -> Result<EncodedImage, ExportError> {
    write_gif_file_guarded(request, token, || ())
}

/// Like [`write_gif_file`], but holds whatever `commit_guard` returns across
/// the final cancellation check and the rename. A canceller holding the same
/// lock either stops the job or sees its file already in place.
pub(crate) fn write_gif_file_guarded<G>(
    request: &ExportRequest,
    token: &CancelToken,
    commit_guard: impl FnOnce() -> G,
) -> Result<EncodedImage, ExportError> {
    request.options.check(request.frames.len())?;
    if let Some(parent) = request.destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(&request.destination);
    let result = write_partial(request, &partial, token).and_then(|frame_count| {
        let _guard = commit_guard();
        if token.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        fs::rename(&partial, &request.destination)?;
        Ok(frame_count)
    });

    match result {
        Ok(frame_count) => {
            log::info!(
                "exported {frame_count} frames to {}",
                request.destination.display()
            );
            Ok(EncodedImage {
                path: request.destination.clone(),
                frame_count,
                width: request.options.width,
                height: request.options.height,
            })
        }
        Err(err) => {
            if partial.exists() {
                if let Err(cleanup) = fs::remove_file(&partial) {
                    log::warn!("failed to remove {}: {cleanup}", partial.display());
                }
            }
            if !err.is_cancelled() {
                log::error!("export to {} failed: {err}", request.destination.display());
            }
            Err(err)
        }
    }
}
