//! 기준 형상(1200×800×1000 mm, 200 mm 배플 4장, 5000 m³/h) 회귀 테스트.
use baffle_silencer_toolbox::{
    acoustics::{energetic_sum, NoiseMode},
    band::{FrequencyBand, SpectrumMap},
    config::{self, Config},
    geometry::Geometry,
    sizing::{size_silencer, SizingInput},
    tables::ReferenceTables,
};

fn assert_close(label: &str, actual: f64, expected: f64, abs_tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= abs_tol,
        "{label} expected {expected:.4} got {actual:.4} (diff {diff:.4}, tol {abs_tol})"
    );
}

fn reference_geometry() -> Geometry {
    Geometry {
        width_mm: 1200.0,
        height_mm: 800.0,
        depth_mm: 1000.0,
        thickness_mm: 200.0,
        baffle_count: 4,
    }
}

fn reference_spectrum() -> SpectrumMap {
    SpectrumMap::from_array([
        Some(85.0),
        Some(82.0),
        Some(80.0),
        Some(78.0),
        Some(75.0),
        Some(72.0),
        Some(70.0),
        Some(66.0),
    ])
}

fn input(geometry: Geometry, upstream: Option<SpectrumMap>) -> SizingInput {
    SizingInput {
        geometry,
        flow_m3_per_h: 5000.0,
        upstream,
    }
}

#[test]
fn reference_case_end_to_end() {
    let report = size_silencer(
        &input(reference_geometry(), None),
        &ReferenceTables::default(),
        &Config::default(),
    );

    assert!(report.check.is_valid());
    assert_eq!(report.model_code, "SRC YD 1200X800X1000");
    assert_close("gap", report.check.gap_mm, 100.0, 1e-9);
    assert_close("area", report.check.free_area_m2, 0.32, 1e-12);
    assert_close("v", report.check.velocity_m_per_s, 4.3403, 1e-4);

    assert_close(
        "D_est 1k",
        report.attenuation.bands[FrequencyBand::Hz1000].d_est,
        35.0,
        1e-9,
    );
    assert_close("zeta", report.pressure_loss.zeta, 2.0, 1e-9);
    assert_close("dp", report.pressure_loss.delta_p_pa, 23.0, 1e-9);
    assert_close("Lw", report.regenerated.lw, 33.9, 0.11);

    assert!(report.downstream.is_none());
    assert!(report.upstream_global.is_none());

    let box_cost = report.price.box_cost.cost;
    assert_close("box materials", box_cost.materials, 54.32, 0.011);
    assert_close("box labor", box_cost.labor, 18.63, 0.011);
    assert_close("box price", box_cost.final_price, 113.25, 0.011);
    assert_close("baffle price", report.price.baffles.cost.final_price, 152.91, 0.011);
    assert_close("total", report.price.total, 266.16, 0.011);
    assert!(report.price.lateral.is_none());
}

#[test]
fn upstream_spectrum_adds_downstream_block() {
    let report = size_silencer(
        &input(reference_geometry(), Some(reference_spectrum())),
        &ReferenceTables::default(),
        &Config::default(),
    );
    let upstream_global = report.upstream_global.expect("upstream global");
    assert_close("L_up global", upstream_global, 88.4, 0.051);

    let downstream = report.downstream.expect("downstream block");
    for (band, b) in downstream.bands.iter() {
        assert!(b.l_down + 0.11 >= b.l_after_att, "{band}: {b:?}");
        assert!(b.l_down + 0.11 >= b.l_reg, "{band}: {b:?}");
    }
    assert!(downstream.global_down < upstream_global);
}

#[test]
fn noise_mode_from_config_selects_weighted_regenerated_levels() {
    let cfg = Config {
        noise_mode: NoiseMode::AWeighted,
        ..Config::default()
    };
    let report = size_silencer(
        &input(reference_geometry(), Some(reference_spectrum())),
        &ReferenceTables::default(),
        &cfg,
    );
    let downstream = report.downstream.expect("downstream block");
    for (band, b) in downstream.bands.iter() {
        assert_eq!(b.l_reg, report.regenerated.bands[band].lw_a_weighted);
    }
}

#[test]
fn missing_upstream_band_leaves_regenerated_floor() {
    let mut upstream = SpectrumMap::empty();
    upstream[FrequencyBand::Hz500] = Some(70.0);
    let report = size_silencer(
        &input(reference_geometry(), Some(upstream)),
        &ReferenceTables::default(),
        &Config::default(),
    );
    let downstream = report.downstream.expect("downstream block");
    let b = downstream.bands[FrequencyBand::Hz63];
    assert_close("L_down 63", b.l_down, b.l_reg, 1e-9);
    assert_close("L_up global", report.upstream_global.unwrap_or_default(), 70.0, 1e-9);
}

#[test]
fn low_flow_a_weighted_regenerated_floor_is_kept() {
    let cfg = Config {
        noise_mode: NoiseMode::AWeighted,
        ..Config::default()
    };
    let mut upstream = SpectrumMap::empty();
    upstream[FrequencyBand::Hz500] = Some(70.0);
    let report = size_silencer(
        &SizingInput {
            geometry: reference_geometry(),
            flow_m3_per_h: 2000.0,
            upstream: Some(upstream),
        },
        &ReferenceTables::default(),
        &cfg,
    );
    let downstream = report.downstream.expect("downstream block");
    for band in [FrequencyBand::Hz63, FrequencyBand::Hz8000] {
        let b = downstream.bands[band];
        assert!(b.l_reg < 0.0, "{band}: {b:?}");
        assert_close("L_down floor", b.l_down, b.l_reg, 1e-9);
    }
}

#[test]
fn zero_baffles_still_produce_a_report() {
    let geometry = Geometry {
        baffle_count: 0,
        ..reference_geometry()
    };
    let report = size_silencer(
        &input(geometry, Some(reference_spectrum())),
        &ReferenceTables::default(),
        &Config::default(),
    );
    assert!(!report.check.gap_valid);
    assert_eq!(report.pressure_loss.zeta, 0.0);
    assert_eq!(report.pressure_loss.delta_p_pa, 0.0);
    assert!(report.regenerated.is_zero());
    assert!(report.attenuation.global_est.is_finite());
    assert_eq!(report.price.baffles.cost.final_price, 0.0);
    assert_eq!(report.price.box_cost.quantities.rivets, 0);
    assert!(report.price.box_cost.cost.final_price > 0.0);
    assert!(report.model_code.starts_with("SRC Y?"));
}

#[test]
fn lateral_faces_from_config_are_priced() {
    let cfg = Config {
        lateral_faces: 2,
        ..Config::default()
    };
    let report = size_silencer(
        &input(reference_geometry(), None),
        &ReferenceTables::default(),
        &cfg,
    );
    let lateral = report.price.lateral.expect("lateral baffles");
    // 2면 × 0.8 m × 1.0 m
    assert_close("lateral area", lateral.quantities.acoustic_area_m2, 1.6, 1e-9);
    let sum = report.price.box_cost.cost.final_price
        + report.price.baffles.cost.final_price
        + lateral.cost.final_price;
    assert_close("total", report.price.total, sum, 0.011);
}

#[test]
fn custom_tables_file_replaces_reference_data() {
    let text = r#"
[[attenuation]]
thickness_mm = 200.0
frequency_hz = 1000
d_ref_db = 30.0

[[pressure_loss]]
thickness_mm = 200.0
a1 = 0.255
a2 = 0.015
b1 = 0.012
b2 = -2.91

[[box_prices]]
description = "Box labour (per m2)"
category = "labor"
value = 10.0
"#;
    let tables: ReferenceTables = toml::from_str(text).expect("tables");
    assert!(tables.baffle_prices.is_none());

    let report = size_silencer(&input(reference_geometry(), None), &tables, &Config::default());
    assert_close("D_est 1k", report.attenuation.bands[FrequencyBand::Hz1000].d_est, 30.0, 1e-9);
    assert_eq!(report.attenuation.bands[FrequencyBand::Hz63].d_ref, 0.0);
    // 자재 단가가 없으므로 박스는 인건비만 남는다: 4.14 m² × 10
    assert_close("box materials", report.price.box_cost.cost.materials, 0.0, 1e-12);
    assert_close("box labor", report.price.box_cost.cost.labor, 41.4, 0.011);
    // 배플은 박스 단가표로 폴백하며 해당 항목이 없다.
    assert_eq!(report.price.baffles.cost.subtotal, 0.0);
}

#[test]
fn config_file_is_created_then_reloaded() {
    let dir = std::env::temp_dir().join(format!("baffle_silencer_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("config.toml");
    let _ = std::fs::remove_file(&path);

    let created = config::load_or_default_at(&path).expect("create");
    assert!(path.exists());
    assert_eq!(created.currency, "EUR");

    let changed = Config {
        lateral_faces: 3,
        ..created
    };
    changed.save_to(&path).expect("save");
    let reloaded = config::load_or_default_at(&path).expect("reload");
    assert_eq!(reloaded.lateral_faces, 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn upstream_global_matches_energetic_sum_of_defined_bands() {
    let spectrum = reference_spectrum();
    let report = size_silencer(
        &input(reference_geometry(), Some(spectrum)),
        &ReferenceTables::default(),
        &Config::default(),
    );
    let expected = energetic_sum(spectrum.defined_levels());
    assert_close("L_up global", report.upstream_global.unwrap_or_default(), expected, 0.051);
}
