//! 데시벨 레벨 연산 공통 함수.

/// 에너지(로그) 합산: `10·log10(Σ 10^(L/10))`.
///
/// 입력이 비어 있거나 에너지 합이 0이면 -∞ 대신 0.0을 돌려준다.
pub fn energetic_sum<I>(levels: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let energy: f64 = levels.into_iter().map(level_to_energy).sum();
    energy_to_level(energy)
}

/// dB 값을 상대 에너지로 환산한다.
pub fn level_to_energy(level_db: f64) -> f64 {
    10f64.powf(level_db / 10.0)
}

/// 상대 에너지를 dB로 환산한다. 0 이하 에너지는 0.0 dB로 처리한다.
pub fn energy_to_level(energy: f64) -> f64 {
    if energy > 0.0 && energy.is_finite() {
        10.0 * energy.log10()
    } else {
        0.0
    }
}

/// 소수점 `decimals` 자리로 반올림한다.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
