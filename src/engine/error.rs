/// Errors raised while creating or driving an audio context
#[derive(Debug)]
pub enum AudioError {
    /// The host exposes no output device
    NoOutputDevice,
    /// The device refused to report a usable output configuration
    DeviceConfig(cpal::DefaultStreamConfigError),
    /// The output stream could not be built
    BuildStream(cpal::BuildStreamError),
    /// The output stream could not be started
    PlayStream(cpal::PlayStreamError),
    /// The device wants a sample format the mixer does not render
    UnsupportedFormat(cpal::SampleFormat),
    /// The audio thread is not keeping up with control messages
    QueueFull,
    /// The context was shut down
    Closed,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no default output device available"),
            AudioError::DeviceConfig(err) => {
                write!(f, "failed to fetch default output config: {}", err)
            }
            AudioError::BuildStream(err) => write!(f, "failed to build output stream: {}", err),
            AudioError::PlayStream(err) => write!(f, "failed to start output stream: {}", err),
            AudioError::UnsupportedFormat(format) => {
                write!(f, "unsupported output sample format: {:?}", format)
            }
            AudioError::QueueFull => write!(f, "tone queue is full"),
            AudioError::Closed => write!(f, "audio context has been shut down"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::DeviceConfig(err) => Some(err),
            AudioError::BuildStream(err) => Some(err),
            AudioError::PlayStream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        AudioError::DeviceConfig(err)
    }
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        AudioError::BuildStream(err)
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        AudioError::PlayStream(err)
    }
}
