//! 옥타브 밴드 정의와 밴드별 값 컨테이너.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// 계산 전반에서 사용하는 8개 옥타브 밴드 중심 주파수.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrequencyBand {
    Hz63,
    Hz125,
    Hz250,
    Hz500,
    Hz1000,
    Hz2000,
    Hz4000,
    Hz8000,
}

impl FrequencyBand {
    /// 오름차순 전체 밴드.
    pub const ALL: [FrequencyBand; 8] = [
        FrequencyBand::Hz63,
        FrequencyBand::Hz125,
        FrequencyBand::Hz250,
        FrequencyBand::Hz500,
        FrequencyBand::Hz1000,
        FrequencyBand::Hz2000,
        FrequencyBand::Hz4000,
        FrequencyBand::Hz8000,
    ];

    /// 중심 주파수 [Hz]
    pub fn hz(self) -> u32 {
        match self {
            FrequencyBand::Hz63 => 63,
            FrequencyBand::Hz125 => 125,
            FrequencyBand::Hz250 => 250,
            FrequencyBand::Hz500 => 500,
            FrequencyBand::Hz1000 => 1000,
            FrequencyBand::Hz2000 => 2000,
            FrequencyBand::Hz4000 => 4000,
            FrequencyBand::Hz8000 => 8000,
        }
    }

    /// 중심 주파수로 밴드를 찾는다. 8개 밴드 외의 값은 None.
    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.hz() == hz)
    }

    /// 표준 A-가중 보정값 [dB]
    pub fn a_weighting_db(self) -> f64 {
        match self {
            FrequencyBand::Hz63 => -26.2,
            FrequencyBand::Hz125 => -16.1,
            FrequencyBand::Hz250 => -8.6,
            FrequencyBand::Hz500 => -3.2,
            FrequencyBand::Hz1000 => 0.0,
            FrequencyBand::Hz2000 => 1.2,
            FrequencyBand::Hz4000 => 1.0,
            FrequencyBand::Hz8000 => -1.1,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hz())
    }
}

/// 밴드마다 값 하나를 담는 고정 크기 맵. 순회 순서는 항상 63 Hz → 8 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandMap<T> {
    values: [T; 8],
}

/// 상류 소음 등 밴드별 음압/음향파워 레벨. `None`은 해당 밴드에 음원이 없음을 뜻한다.
pub type SpectrumMap = BandMap<Option<f64>>;

impl<T> BandMap<T> {
    pub fn from_array(values: [T; 8]) -> Self {
        Self { values }
    }

    /// 밴드별로 함수를 호출해 맵을 만든다.
    pub fn from_fn(mut f: impl FnMut(FrequencyBand) -> T) -> Self {
        Self {
            values: FrequencyBand::ALL.map(&mut f),
        }
    }

    pub fn get(&self, band: FrequencyBand) -> &T {
        &self.values[band.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrequencyBand, &T)> {
        FrequencyBand::ALL.into_iter().zip(self.values.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(FrequencyBand, &T) -> U) -> BandMap<U> {
        BandMap::from_fn(|band| f(band, &self.values[band.index()]))
    }
}

impl<T> Index<FrequencyBand> for BandMap<T> {
    type Output = T;

    fn index(&self, band: FrequencyBand) -> &T {
        &self.values[band.index()]
    }
}

impl<T> IndexMut<FrequencyBand> for BandMap<T> {
    fn index_mut(&mut self, band: FrequencyBand) -> &mut T {
        &mut self.values[band.index()]
    }
}

impl SpectrumMap {
    /// 모든 밴드가 비어 있는 스펙트럼.
    pub fn empty() -> Self {
        Self::from_array([None; 8])
    }

    /// 정의된(유한한) 값이 하나라도 0이 아닌지 여부.
    pub fn has_nonzero(&self) -> bool {
        self.values()
            .any(|v| matches!(v, Some(level) if level.is_finite() && *level != 0.0))
    }

    /// 정의된 밴드 값만 모은다.
    pub fn defined_levels(&self) -> Vec<f64> {
        self.values()
            .filter_map(|v| v.filter(|level| level.is_finite()))
            .collect()
    }
}
