//! File I/O for the jugo audio toolkit.
//!
//! WAV reading and writing in mono and stereo, with integer and float
//! formats normalized to `f32` on the way in:
//!
//! ```rust,ignore
//! use jugo_io::{read_wav_stereo, write_wav_stereo, WavSpec};
//!
//! let (samples, spec) = read_wav_stereo("input.wav")?;
//! // ... process samples.left / samples.right ...
//! write_wav_stereo("output.wav", &samples, spec)?;
//! ```

mod wav;

pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_stereo,
    write_wav, write_wav_stereo,
};

/// Error type for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's channel layout cannot be handled.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(u16),
}

/// Result alias for file I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
