//! 음향 계산 모듈 모음: 삽입손실, 자생소음, 하류 소음 합성.

pub mod attenuation;
pub mod downstream_noise;
pub mod level;
pub mod regenerated_noise;

pub use attenuation::{attenuation, AttenuationBand, AttenuationResult};
pub use downstream_noise::{downstream_noise, DownstreamBand, DownstreamResult, NoiseMode};
pub use level::{energetic_sum, round_to};
pub use regenerated_noise::{regenerated_noise, RegeneratedBand, RegeneratedNoiseResult};
