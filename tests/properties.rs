//! 계산 모델의 성질 기반 테스트(proptest).

use baffle_silencer_toolbox::acoustics::{
    attenuation, downstream_noise, energetic_sum, regenerated_noise, round_to, NoiseMode,
};
use baffle_silencer_toolbox::air::{pressure_loss, PressureLossOptions};
use baffle_silencer_toolbox::band::{BandMap, SpectrumMap};
use baffle_silencer_toolbox::geometry::Geometry;
use baffle_silencer_toolbox::pricing::{box_cost, keys, PriceCategory, PriceTable};
use baffle_silencer_toolbox::tables::ReferenceTables;
use proptest::prelude::*;

fn standard_thickness() -> impl Strategy<Value = f64> {
    prop_oneof![Just(100.0), Just(200.0), Just(300.0)]
}

fn geometry(width_mm: f64, thickness_mm: f64, baffle_count: u32) -> Geometry {
    Geometry {
        width_mm,
        height_mm: 800.0,
        depth_mm: 1000.0,
        thickness_mm,
        baffle_count,
    }
}

// ── 레벨 합산 ─────────────────────────────────────────────────────────

proptest! {
    /// 순서를 바꿔도 에너지 합은 같다.
    #[test]
    fn energetic_sum_is_order_independent(levels in prop::collection::vec(0.0f64..120.0, 1..10)) {
        let forward = energetic_sum(levels.iter().copied());
        let backward = energetic_sum(levels.iter().rev().copied());
        prop_assert!((forward - backward).abs() < 1e-9);
        prop_assert!(forward + 1e-9 >= levels.iter().copied().fold(f64::MIN, f64::max));
    }

    /// 값 하나의 에너지 합은 자기 자신이다.
    #[test]
    fn energetic_sum_of_single_level_is_identity(level in 1.0f64..120.0) {
        prop_assert!((energetic_sum([level]) - level).abs() < 1e-9);
    }
}

// ── 형상/유속 ────────────────────────────────────────────────────────

proptest! {
    /// 유효한 간극에서 v·A·3600 = Q.
    #[test]
    fn velocity_times_area_recovers_flow(
        width in 500.0f64..3000.0,
        thickness in standard_thickness(),
        count in 1u32..8,
        flow in 100.0f64..50_000.0,
    ) {
        let g = geometry(width, thickness, count);
        prop_assume!(g.has_valid_gap());
        let v = g.gap_velocity_m_per_s(flow);
        let recovered = v * g.free_area_m2() * 3600.0;
        prop_assert!((recovered - flow).abs() <= 1e-9 * flow.max(1.0));
    }

    /// 배플이 폭을 다 채우면 압력손실과 자생소음은 0.
    #[test]
    fn blocked_width_has_no_pressure_loss(
        thickness in standard_thickness(),
        count in 1u32..10,
        shortfall in 1.0f64..100.0,
        flow in 100.0f64..50_000.0,
    ) {
        let width = f64::from(count) * thickness - shortfall;
        let g = geometry(width, thickness, count);
        let res = pressure_loss(&g, flow, &ReferenceTables::default(), &PressureLossOptions::default());
        prop_assert_eq!(res.zeta, 0.0);
        prop_assert_eq!(res.delta_p_pa, 0.0);
        prop_assert!(regenerated_noise(&g, flow).is_zero());
    }
}

// ── 하류 합성 ────────────────────────────────────────────────────────

proptest! {
    /// 자생소음이 없으면 하류 레벨은 상류 − D_est.
    #[test]
    fn silent_regenerated_keeps_attenuated_upstream(
        levels in prop::array::uniform8(40.0f64..110.0),
        thickness in standard_thickness(),
        count in 1u32..6,
    ) {
        let g = geometry(1800.0, thickness, count);
        let att = attenuation(&g, &ReferenceTables::default());
        let upstream = SpectrumMap::from_array(levels.map(Some));
        let res = downstream_noise(&upstream, &att.bands, &BandMap::default(), NoiseMode::Linear)
            .expect("upstream present");
        for (band, b) in res.bands.iter() {
            let expected = round_to(levels[band as usize] - att.bands[band].d_est, 1);
            prop_assert!((b.l_down - expected).abs() < 0.11, "{} {} {}", band, b.l_down, expected);
        }
    }
}

// ── 가격 ─────────────────────────────────────────────────────────────

proptest! {
    /// 간접비율과 이윤율이 커지면 판매가는 줄지 않는다.
    #[test]
    fn price_is_monotonic_in_markup(
        indirect in 0.0f64..80.0,
        extra_indirect in 0.0f64..20.0,
        margin in 0.0f64..40.0,
        extra_margin in 0.0f64..20.0,
    ) {
        let g = geometry(1200.0, 200.0, 4);
        let mut low = PriceTable::default_box();
        low.set(keys::INDIRECT, PriceCategory::Factor, indirect);
        low.set(keys::MARGIN, PriceCategory::Factor, margin);
        let mut high = low.clone();
        high.set(keys::INDIRECT, PriceCategory::Factor, indirect + extra_indirect);
        high.set(keys::MARGIN, PriceCategory::Factor, margin + extra_margin);

        let low_price = box_cost(&g, &low).cost.final_price;
        let high_price = box_cost(&g, &high).cost.final_price;
        prop_assert!(high_price + 1e-9 >= low_price);
    }

    /// 계산에 쓰이지 않는 항목은 가격에 영향을 주지 않는다.
    #[test]
    fn unknown_line_items_contribute_nothing(
        name in "[a-z]{4,12}",
        value in 0.0f64..1000.0,
    ) {
        let g = geometry(1200.0, 200.0, 4);
        let base = PriceTable::default_box();
        let mut extended = base.clone();
        extended.set(&format!("zz {name}"), PriceCategory::Material, value);
        prop_assert_eq!(box_cost(&g, &base).cost, box_cost(&g, &extended).cost);
    }
}
