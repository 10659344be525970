mod symphonia_audio_decoder;

pub use symphonia_audio_decoder::SymphoniaAudioDecoder;
