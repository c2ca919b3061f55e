use std::io::{self, Write};

use crate::acoustics::{
    attenuation, regenerated_noise, AttenuationResult, DownstreamResult, NoiseMode,
    RegeneratedNoiseResult,
};
use crate::air::{pressure_loss, PressureLossResult, ZetaModel};
use crate::app::AppError;
use crate::band::{FrequencyBand, SpectrumMap};
use crate::config::Config;
use crate::geometry::{check_design, model_code, DesignCheck, Geometry};
use crate::i18n::{keys, Translator};
use crate::pricing::{price_total, CostBreakdown, PriceResult, PriceTable};
use crate::sizing::{size_silencer, SizingInput, SizingReport};
use crate::tables::ReferenceTables;
use crate::units::*;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FullSizing,
    Attenuation,
    PressureLoss,
    RegeneratedNoise,
    Price,
    Tables,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_SIZING,
        keys::MAIN_MENU_ATTENUATION,
        keys::MAIN_MENU_PRESSURE_LOSS,
        keys::MAIN_MENU_REGENERATED,
        keys::MAIN_MENU_PRICE,
        keys::MAIN_MENU_TABLES,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line_or_eof(tr.t(keys::PROMPT_MENU_SELECT))?;
        match menu_choice(sel.as_deref()) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 메뉴 입력을 해석한다. 입력 스트림이 끝났으면(`None`) 종료로 본다.
pub fn menu_choice(input: Option<&str>) -> Option<MenuChoice> {
    let Some(sel) = input else {
        return Some(MenuChoice::Exit);
    };
    match sel.trim() {
        "1" => Some(MenuChoice::FullSizing),
        "2" => Some(MenuChoice::Attenuation),
        "3" => Some(MenuChoice::PressureLoss),
        "4" => Some(MenuChoice::RegeneratedNoise),
        "5" => Some(MenuChoice::Price),
        "6" => Some(MenuChoice::Tables),
        "7" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 전체 사이징 메뉴를 처리한다.
pub fn handle_full_sizing(tr: &Translator, cfg: &Config, tables: &ReferenceTables) -> Result<(), AppError> {
    let geometry = read_geometry(tr, cfg)?;
    let flow_m3_per_h = read_flow(tr, cfg)?;
    let upstream = read_upstream(tr)?;
    let input = SizingInput {
        geometry,
        flow_m3_per_h,
        upstream,
    };
    let report = size_silencer(&input, tables, cfg);
    print_report(tr, cfg, &report);
    Ok(())
}

/// 삽입손실 메뉴를 처리한다.
pub fn handle_attenuation(tr: &Translator, cfg: &Config, tables: &ReferenceTables) -> Result<(), AppError> {
    let geometry = read_geometry(tr, cfg)?;
    print_attenuation(tr, &attenuation(&geometry, tables));
    Ok(())
}

/// 압력손실 메뉴를 처리한다.
pub fn handle_pressure_loss(tr: &Translator, cfg: &Config, tables: &ReferenceTables) -> Result<(), AppError> {
    let geometry = read_geometry(tr, cfg)?;
    let flow = read_flow(tr, cfg)?;
    let check = check_design(&geometry, flow, cfg.max_velocity_m_per_s);
    print_check(tr, cfg, &check, &model_code(&geometry));
    let result = pressure_loss(&geometry, flow, tables, &cfg.pressure_loss_options());
    print_pressure_loss(tr, cfg, &result);
    Ok(())
}

/// 자생소음 메뉴를 처리한다.
pub fn handle_regenerated_noise(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let geometry = read_geometry(tr, cfg)?;
    let flow = read_flow(tr, cfg)?;
    print_regenerated(tr, &regenerated_noise(&geometry, flow));
    Ok(())
}

/// 판매가 메뉴를 처리한다.
pub fn handle_price(tr: &Translator, cfg: &Config, tables: &ReferenceTables) -> Result<(), AppError> {
    let geometry = read_geometry(tr, cfg)?;
    let price = price_total(
        &geometry,
        &tables.box_prices,
        tables.baffle_prices(),
        cfg.lateral_faces,
    );
    print_price(tr, cfg, &price);
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "ζ: {:?}, aero: {} (x{}), noise: {:?}, v_max: {} m/s, lateral: {}, lang: {}, units: {} {} {} {}",
        cfg.zeta_model,
        cfg.aero_profile.apply,
        cfg.aero_profile.factor,
        cfg.noise_mode,
        cfg.max_velocity_m_per_s,
        cfg.lateral_faces,
        cfg.language,
        cfg.default_units.length.symbol(),
        cfg.default_units.flow.symbol(),
        cfg.default_units.pressure.symbol(),
        cfg.default_units.velocity.symbol()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => {}
        "1" => {
            cfg.zeta_model = match cfg.zeta_model {
                ZetaModel::Polynomial => ZetaModel::Vdi2081,
                ZetaModel::Vdi2081 => ZetaModel::Polynomial,
            };
        }
        "2" => {
            cfg.aero_profile.apply = !cfg.aero_profile.apply;
            if cfg.aero_profile.apply {
                cfg.aero_profile.factor = read_f64_or(tr, "factor", cfg.aero_profile.factor)?;
            }
        }
        "3" => {
            cfg.noise_mode = match cfg.noise_mode {
                NoiseMode::Linear => NoiseMode::AWeighted,
                NoiseMode::AWeighted => NoiseMode::Linear,
            };
        }
        "4" => {
            cfg.max_velocity_m_per_s = read_f64_or(tr, "v_max [m/s]", cfg.max_velocity_m_per_s)?;
        }
        "5" => {
            cfg.lateral_faces = read_u32_or(tr, "lateral", cfg.lateral_faces)?;
        }
        "6" => {
            let lang = read_line("ko / en / auto: ")?;
            let lang = lang.trim();
            if !lang.is_empty() {
                cfg.language = lang.to_string();
                return Ok(true);
            }
        }
        "7" => {
            let text = read_line(tr.t(keys::SETTINGS_PROMPT_UNITS))?;
            if let Err(e) = cfg.default_units.apply_symbols(&text) {
                println!("{}: {}", tr.t(keys::ERROR_PREFIX), AppError::from(e));
            }
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(false)
}

/// 쉼표 또는 공백으로 구분된 8개 밴드 레벨을 해석한다. `-`는 값 없음.
pub fn parse_spectrum(text: &str) -> Result<SpectrumMap, AppError> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != FrequencyBand::ALL.len() {
        return Err(AppError::Spectrum(format!(
            "밴드 값 {}개가 필요하지만 {}개를 받았습니다",
            FrequencyBand::ALL.len(),
            tokens.len()
        )));
    }
    let mut spectrum = SpectrumMap::empty();
    for (band, token) in FrequencyBand::ALL.into_iter().zip(tokens) {
        spectrum[band] = match token {
            "-" => None,
            value => Some(
                value
                    .parse::<f64>()
                    .map_err(|_| AppError::Spectrum(format!("{band}: '{value}'")))?,
            ),
        };
    }
    Ok(spectrum)
}

/// 사이징 결과 전체를 출력한다.
pub fn print_report(tr: &Translator, cfg: &Config, report: &SizingReport) {
    print_check(tr, cfg, &report.check, &report.model_code);
    print_attenuation(tr, &report.attenuation);
    print_pressure_loss(tr, cfg, &report.pressure_loss);
    print_regenerated(tr, &report.regenerated);
    if let Some(downstream) = &report.downstream {
        print_downstream(tr, report.upstream_global, downstream);
    }
    print_price(tr, cfg, &report.price);
}

pub fn print_check(tr: &Translator, cfg: &Config, check: &DesignCheck, code: &str) {
    let units = &cfg.default_units;
    println!("\n{}: {code}", tr.t(keys::REPORT_MODEL));
    println!(
        "{}: {:.1} {}",
        tr.t(keys::REPORT_GAP),
        convert_length(check.gap_mm, LengthUnit::Millimeter, units.length),
        units.length.symbol()
    );
    println!("{}: {:.3} m²", tr.t(keys::REPORT_FREE_AREA), check.free_area_m2);
    println!(
        "{}: {:.2} {}",
        tr.t(keys::REPORT_VELOCITY),
        convert_velocity(check.velocity_m_per_s, VelocityUnit::MeterPerSecond, units.velocity),
        units.velocity.symbol()
    );
    if !check.gap_valid {
        println!("{}", tr.t(keys::REPORT_GAP_INVALID));
    } else if !check.velocity_valid {
        println!(
            "{} (> {} m/s)",
            tr.t(keys::REPORT_VELOCITY_EXCEEDED),
            check.max_velocity_m_per_s
        );
    } else {
        println!("{}", tr.t(keys::REPORT_PROCEED));
    }
}

pub fn print_attenuation(tr: &Translator, result: &AttenuationResult) {
    println!("{}", tr.t(keys::REPORT_ATTENUATION));
    println!("{:>8} {:>8} {:>8} {:>8} {:>8}", "f [Hz]", "D_ref", "ΔD_r", "D_corr", "D_est");
    for (band, b) in result.bands.iter() {
        println!(
            "{:>8} {:>8.1} {:>8.2} {:>8.2} {:>8.2}",
            band.hz(),
            b.d_ref,
            b.delta,
            b.d_corr,
            b.d_est
        );
    }
    println!("{}: {:.1} dB", tr.t(keys::REPORT_ATTENUATION_GLOBAL), result.global_est);
}

pub fn print_pressure_loss(tr: &Translator, cfg: &Config, result: &PressureLossResult) {
    let unit = cfg.default_units.pressure;
    println!("{}", tr.t(keys::REPORT_PRESSURE_LOSS));
    println!("{}: {:.2}", tr.t(keys::REPORT_ZETA), result.zeta);
    println!(
        "{}: {} {}",
        tr.t(keys::REPORT_DELTA_P),
        convert_pressure(result.delta_p_pa, PressureUnit::Pascal, unit),
        unit.symbol()
    );
    if !result.velocity_valid {
        println!("{}", tr.t(keys::REPORT_VELOCITY_EXCEEDED));
    }
}

pub fn print_regenerated(tr: &Translator, result: &RegeneratedNoiseResult) {
    println!("{}", tr.t(keys::REPORT_REGENERATED));
    println!("{:>8} {:>8} {:>8} {:>8}", "f [Hz]", "ΔL_okt", "L_w", "L_wA");
    for (band, b) in result.bands.iter() {
        println!(
            "{:>8} {:>8.1} {:>8.1} {:>8.1}",
            band.hz(),
            b.delta,
            b.lw_linear,
            b.lw_a_weighted
        );
    }
    println!("{}: {:.1} dB", tr.t(keys::REPORT_LW_GLOBAL), result.lw);
    println!("{}: {:.1} dB(A)", tr.t(keys::REPORT_LWA_GLOBAL), result.lw_a_global);
}

pub fn print_downstream(tr: &Translator, upstream_global: Option<f64>, result: &DownstreamResult) {
    println!("{}", tr.t(keys::REPORT_DOWNSTREAM));
    println!(
        "{:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "f [Hz]", "L_up", "D_est", "L_att", "L_reg", "L_down"
    );
    for (band, b) in result.bands.iter() {
        println!(
            "{:>8} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            band.hz(),
            b.l_up,
            b.d_est,
            b.l_after_att,
            b.l_reg,
            b.l_down
        );
    }
    if let Some(level) = upstream_global {
        println!("{}: {level:.1} dB", tr.t(keys::REPORT_UPSTREAM_GLOBAL));
    }
    println!("{}: {:.1} dB", tr.t(keys::REPORT_DOWNSTREAM_GLOBAL), result.global_down);
}

pub fn print_price(tr: &Translator, cfg: &Config, price: &PriceResult) {
    println!("{}", tr.t(keys::PRICE_HEADING));
    print_cost(tr, tr.t(keys::PRICE_BOX), &price.box_cost.cost, &cfg.currency);
    print_cost(tr, tr.t(keys::PRICE_BAFFLES), &price.baffles.cost, &cfg.currency);
    if let Some(lateral) = &price.lateral {
        print_cost(tr, tr.t(keys::PRICE_LATERAL), &lateral.cost, &cfg.currency);
    }
    println!("{}: {:.2} {}", tr.t(keys::PRICE_TOTAL), price.total, cfg.currency);
}

fn print_cost(tr: &Translator, label: &str, cost: &CostBreakdown, currency: &str) {
    println!(
        "{label}: {} {:.2} / {} {:.2} / {} {:.2} / {} {:.2} → {} {:.2} {currency}",
        tr.t(keys::PRICE_MATERIALS),
        cost.materials,
        tr.t(keys::PRICE_LABOR),
        cost.labor,
        tr.t(keys::PRICE_INDIRECT),
        cost.indirect,
        tr.t(keys::PRICE_MARGIN),
        cost.margin,
        tr.t(keys::PRICE_FINAL),
        cost.final_price,
    );
}

/// 참조표를 출력한다.
pub fn print_tables(tr: &Translator, tables: &ReferenceTables) {
    println!("{}", tr.t(keys::TABLES_HEADING));
    println!("{}", tr.t(keys::TABLES_ATTENUATION));
    for entry in &tables.attenuation {
        println!(
            "  d={:>5} mm  {:>5} Hz  {:>6.1}",
            entry.thickness_mm, entry.frequency_hz, entry.d_ref_db
        );
    }
    println!("{}", tr.t(keys::TABLES_PRESSURE_LOSS));
    for c in &tables.pressure_loss {
        println!(
            "  d={:>5} mm  a1={} a2={} b1={} b2={}",
            c.thickness_mm, c.a1, c.a2, c.b1, c.b2
        );
    }
    print_price_table(tr.t(keys::TABLES_BOX_PRICES), &tables.box_prices);
    print_price_table(tr.t(keys::TABLES_BAFFLE_PRICES), tables.baffle_prices());
}

fn print_price_table(title: &str, table: &PriceTable) {
    println!("{title}");
    for item in table.items() {
        let category = format!("{:?}", item.category);
        println!("  {:<16} {category:<10} {}", item.description, item.value);
    }
}

fn read_geometry(tr: &Translator, cfg: &Config) -> Result<Geometry, AppError> {
    let unit = cfg.default_units.length;
    let defaults = &cfg.default_geometry;
    let read_length = |key: &str, default_mm: f64| -> Result<f64, AppError> {
        let prompt = format!("{} [{}]", tr.t(key), unit.symbol());
        let value = read_f64_or(tr, &prompt, convert_length(default_mm, LengthUnit::Millimeter, unit))?;
        Ok(convert_length(value, unit, LengthUnit::Millimeter))
    };
    let width_mm = read_length(keys::PROMPT_WIDTH, defaults.width_mm)?;
    let height_mm = read_length(keys::PROMPT_HEIGHT, defaults.height_mm)?;
    let depth_mm = read_length(keys::PROMPT_DEPTH, defaults.depth_mm)?;
    // 두께는 표준 등급(100/200/300) 판정 때문에 mm로만 받는다.
    let thickness_prompt = format!("{} [mm]", tr.t(keys::PROMPT_THICKNESS));
    let thickness_mm = read_f64_or(tr, &thickness_prompt, defaults.thickness_mm)?;
    let baffle_count = read_u32_or(tr, tr.t(keys::PROMPT_BAFFLE_COUNT), defaults.baffle_count)?;
    Ok(Geometry {
        width_mm,
        height_mm,
        depth_mm,
        thickness_mm,
        baffle_count,
    })
}

fn read_flow(tr: &Translator, cfg: &Config) -> Result<f64, AppError> {
    let unit = cfg.default_units.flow;
    let prompt = format!("{} [{}]", tr.t(keys::PROMPT_FLOW), unit.symbol());
    let default = convert_flow(cfg.default_geometry.flow_m3_per_h, FlowUnit::CubicMeterPerHour, unit);
    let value = read_f64_or(tr, &prompt, default)?;
    Ok(convert_flow(value, unit, FlowUnit::CubicMeterPerHour))
}

fn read_upstream(tr: &Translator) -> Result<Option<SpectrumMap>, AppError> {
    loop {
        let line = read_line(tr.t(keys::PROMPT_UPSTREAM))?;
        if line.trim().is_empty() {
            return Ok(None);
        }
        match parse_spectrum(&line) {
            Ok(spectrum) => return Ok(Some(spectrum)),
            Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    Ok(read_line_or_eof(prompt)?.unwrap_or_default())
}

/// 한 줄을 읽는다. 입력 스트림이 끝나 0바이트를 읽으면 `None`.
fn read_line_or_eof(prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

fn read_f64_or(tr: &Translator, label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} ({} {default}): ", tr.t(keys::PROMPT_DEFAULT_HINT)))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_u32_or(tr: &Translator, label: &str, default: u32) -> Result<u32, AppError> {
    loop {
        let s = read_line(&format!("{label} ({} {default}): ", tr.t(keys::PROMPT_DEFAULT_HINT)))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_accepts_dash_for_missing_band() {
        let s = parse_spectrum("85, 82 - 78,75 72 70 66").expect("eight tokens");
        assert_eq!(s[FrequencyBand::Hz63], Some(85.0));
        assert_eq!(s[FrequencyBand::Hz250], None);
        assert_eq!(s[FrequencyBand::Hz8000], Some(66.0));
    }

    #[test]
    fn menu_input_maps_to_choice() {
        assert_eq!(menu_choice(Some("1\n")), Some(MenuChoice::FullSizing));
        assert_eq!(menu_choice(Some(" 7 ")), Some(MenuChoice::Settings));
        assert_eq!(menu_choice(Some("0")), Some(MenuChoice::Exit));
        assert_eq!(menu_choice(Some("")), None);
        assert_eq!(menu_choice(Some("9")), None);
    }

    #[test]
    fn closed_input_stream_exits_menu() {
        assert_eq!(menu_choice(None), Some(MenuChoice::Exit));
    }

    #[test]
    fn bad_unit_symbol_converts_to_unit_error() {
        let mut cfg = Config::default();
        let err = cfg.default_units.apply_symbols("mm parsec/h").expect_err("unknown unit");
        assert!(matches!(AppError::from(err), AppError::Unit(_)));
    }

    #[test]
    fn spectrum_rejects_wrong_count_or_text() {
        assert!(matches!(parse_spectrum("1 2 3"), Err(AppError::Spectrum(_))));
        assert!(matches!(
            parse_spectrum("1 2 3 4 5 6 7 x"),
            Err(AppError::Spectrum(_))
        ));
    }
}
