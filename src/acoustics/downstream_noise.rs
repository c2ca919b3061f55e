use serde::{Deserialize, Serialize};

use crate::acoustics::attenuation::AttenuationBand;
use crate::acoustics::level::{energy_to_level, level_to_energy, round_to};
use crate::acoustics::regenerated_noise::RegeneratedBand;
use crate::band::{BandMap, SpectrumMap};

/// 하류 합성에 사용할 자생소음 표현.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// 선형 L_w,i
    #[default]
    Linear,
    /// A-가중 L_w,i + A(f)
    AWeighted,
}

impl NoiseMode {
    fn pick(self, band: &RegeneratedBand) -> f64 {
        match self {
            NoiseMode::Linear => band.lw_linear,
            NoiseMode::AWeighted => band.lw_a_weighted,
        }
    }
}

/// 밴드별 하류 소음 내역 [dB].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DownstreamBand {
    pub l_up: f64,
    pub d_est: f64,
    pub l_after_att: f64,
    pub l_reg: f64,
    pub l_down: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownstreamResult {
    pub bands: BandMap<DownstreamBand>,
    pub global_down: f64,
}

/// 상류 스펙트럼에 삽입손실을 적용하고 자생소음과 에너지 합성한다.
///
/// 상류 값이 하나도 없거나 모두 0이면 `None`(결과 블록 생략).
/// 상류 항목이 있는 밴드(0 포함)만 감쇠된 에너지를 더하고, 항목이 없는 밴드는
/// 자생소음만 남는다. 자생소음 레벨이 정확히 0이면(유속 없음) 음원이 없는 것으로 보고,
/// 음수 레벨(A-가중 저유속 등)은 그대로 에너지를 더한다.
pub fn downstream_noise(
    upstream: &SpectrumMap,
    attenuation: &BandMap<AttenuationBand>,
    regenerated: &BandMap<RegeneratedBand>,
    mode: NoiseMode,
) -> Option<DownstreamResult> {
    if !upstream.has_nonzero() {
        return None;
    }

    let mut total_energy = 0.0;
    let bands = BandMap::from_fn(|band| {
        let source = upstream[band].filter(|level| level.is_finite());
        let l_up = source.unwrap_or(0.0);
        let d_est = attenuation[band].d_est;
        let l_after_att = l_up - d_est;
        let l_reg = mode.pick(&regenerated[band]);

        let energy_source = if source.is_some() {
            level_to_energy(l_after_att)
        } else {
            0.0
        };
        let energy_reg = if l_reg != 0.0 {
            level_to_energy(l_reg)
        } else {
            0.0
        };
        let energy = energy_source + energy_reg;
        total_energy += energy;

        DownstreamBand {
            l_up: round_to(l_up, 1),
            d_est: round_to(d_est, 1),
            l_after_att: round_to(l_after_att, 1),
            l_reg: round_to(l_reg, 1),
            l_down: round_to(energy_to_level(energy), 1),
        }
    });

    let global_down = round_to(energy_to_level(total_energy), 1);
    log::debug!("하류 소음({mode:?}): 전체 {global_down} dB");
    Some(DownstreamResult { bands, global_down })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::FrequencyBand;

    fn attenuation_of(d_est: f64) -> BandMap<AttenuationBand> {
        BandMap::from_fn(|_| AttenuationBand {
            d_est,
            ..AttenuationBand::default()
        })
    }

    #[test]
    fn empty_or_zero_upstream_yields_none() {
        let att = attenuation_of(10.0);
        let reg = BandMap::default();
        assert!(downstream_noise(&SpectrumMap::empty(), &att, &reg, NoiseMode::Linear).is_none());
        let zeros = SpectrumMap::from_array([Some(0.0); 8]);
        assert!(downstream_noise(&zeros, &att, &reg, NoiseMode::Linear).is_none());
    }

    #[test]
    fn silent_regenerated_noise_leaves_attenuated_upstream() {
        let upstream = SpectrumMap::from_array([
            Some(85.0),
            Some(82.0),
            Some(80.0),
            Some(78.0),
            Some(75.0),
            Some(72.0),
            Some(70.0),
            Some(66.0),
        ]);
        let att = attenuation_of(12.3);
        let res = downstream_noise(&upstream, &att, &BandMap::default(), NoiseMode::Linear)
            .expect("upstream present");
        for (band, b) in res.bands.iter() {
            let expected = round_to(upstream[band].unwrap_or(0.0) - 12.3, 1);
            assert!((b.l_down - expected).abs() < 1e-9, "{band}: {} vs {expected}", b.l_down);
        }
    }

    #[test]
    fn missing_band_keeps_regenerated_floor_only() {
        let mut upstream = SpectrumMap::empty();
        upstream[FrequencyBand::Hz500] = Some(70.0);
        let reg = BandMap::from_fn(|_| RegeneratedBand {
            delta: 0.0,
            lw_linear: 30.0,
            lw_a_weighted: 25.0,
        });
        let res = downstream_noise(&upstream, &attenuation_of(20.0), &reg, NoiseMode::Linear)
            .expect("upstream present");
        assert_eq!(res.bands[FrequencyBand::Hz63].l_down, 30.0);
        // 50 dB + 30 dB → 50.04 dB
        assert_eq!(res.bands[FrequencyBand::Hz500].l_down, 50.0);

        let weighted = downstream_noise(&upstream, &attenuation_of(20.0), &reg, NoiseMode::AWeighted)
            .expect("upstream present");
        assert_eq!(weighted.bands[FrequencyBand::Hz63].l_reg, 25.0);
    }

    #[test]
    fn explicit_zero_band_still_contributes_source_energy() {
        let mut upstream = SpectrumMap::empty();
        upstream[FrequencyBand::Hz63] = Some(0.0);
        upstream[FrequencyBand::Hz1000] = Some(60.0);
        let res = downstream_noise(&upstream, &attenuation_of(0.0), &BandMap::default(), NoiseMode::Linear)
            .expect("upstream present");
        // 0 dB 항목 → 에너지 1 → 0 dB, 항목 없는 밴드도 0 dB이지만 에너지는 0
        assert_eq!(res.bands[FrequencyBand::Hz63].l_down, 0.0);
        let expected_global = round_to(energy_to_level(1.0 + level_to_energy(60.0)), 1);
        assert_eq!(res.global_down, expected_global);
    }

    #[test]
    fn negative_regenerated_levels_still_add_energy() {
        let mut upstream = SpectrumMap::empty();
        upstream[FrequencyBand::Hz63] = Some(9.0);
        let reg = BandMap::from_fn(|_| RegeneratedBand {
            delta: 0.0,
            lw_linear: -1.0,
            lw_a_weighted: -12.5,
        });
        let res = downstream_noise(&upstream, &attenuation_of(10.0), &reg, NoiseMode::Linear)
            .expect("upstream present");
        // -1 dB + -1 dB → 2.0 dB
        assert_eq!(res.bands[FrequencyBand::Hz63].l_after_att, -1.0);
        assert_eq!(res.bands[FrequencyBand::Hz63].l_down, 2.0);
        // 상류 항목이 없는 밴드는 자생소음 레벨이 그대로 남는다.
        assert_eq!(res.bands[FrequencyBand::Hz1000].l_down, -1.0);

        let weighted = downstream_noise(&upstream, &attenuation_of(10.0), &reg, NoiseMode::AWeighted)
            .expect("upstream present");
        assert_eq!(weighted.bands[FrequencyBand::Hz4000].l_down, -12.5);
    }
}
