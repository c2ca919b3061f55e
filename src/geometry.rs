//! 소음기 박스/배플 형상과 유량 기반 파생값.

use serde::{Deserialize, Serialize};

/// 기본 허용 간극 유속 [m/s]
pub const DEFAULT_MAX_VELOCITY_M_PER_S: f64 = 20.0;

/// 소음기 형상 입력. 치수는 모두 mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// 폭 [mm] (배플이 나란히 놓이는 방향)
    pub width_mm: f64,
    /// 높이 [mm]
    pub height_mm: f64,
    /// 길이 [mm] (기류 방향)
    pub depth_mm: f64,
    /// 배플 두께 [mm]
    pub thickness_mm: f64,
    /// 배플 개수
    pub baffle_count: u32,
}

impl Geometry {
    /// 배플 사이 간극 폭 s [m]. 배플이 없으면 0.
    ///
    /// s = (W − n·d) / n
    pub fn gap_m(&self) -> f64 {
        if self.baffle_count == 0 {
            return 0.0;
        }
        let n = f64::from(self.baffle_count);
        (self.width_mm / 1000.0 - n * self.thickness_mm / 1000.0) / n
    }

    pub fn gap_mm(&self) -> f64 {
        self.gap_m() * 1000.0
    }

    /// 간극/두께 비 r = s / d. 두께가 0 이하이면 0.
    pub fn gap_ratio(&self) -> f64 {
        let thickness_m = self.thickness_mm / 1000.0;
        if thickness_m > 0.0 {
            self.gap_m() / thickness_m
        } else {
            0.0
        }
    }

    /// 간극 높이 s_h [m]
    pub fn gap_height_m(&self) -> f64 {
        self.height_mm / 1000.0
    }

    /// 전면 면적 S = W·H [m²]
    pub fn face_area_m2(&self) -> f64 {
        self.width_mm / 1000.0 * self.height_mm / 1000.0
    }

    /// 자유 통과 면적 A = n·s·s_h [m²]. 간극이 음수인 형상에서도 0 미만으로 내려가지 않는다.
    pub fn free_area_m2(&self) -> f64 {
        let area = f64::from(self.baffle_count) * self.gap_m() * self.gap_height_m();
        area.max(0.0)
    }

    /// 간극 수력직경 d_h = 2·s·s_h / (s + s_h) [m]. 무효 형상이면 0.
    pub fn hydraulic_diameter_m(&self) -> f64 {
        let s = self.gap_m();
        let s_h = self.gap_height_m();
        if s <= 0.0 || s_h <= 0.0 {
            return 0.0;
        }
        2.0 * s * s_h / (s + s_h)
    }

    /// 간극 유속 v = (Q/3600) / A [m/s]. 자유 면적이 0이면 0.
    pub fn gap_velocity_m_per_s(&self, flow_m3_per_h: f64) -> f64 {
        let area = self.free_area_m2();
        if area > 0.0 {
            flow_m3_per_h / 3600.0 / area
        } else {
            0.0
        }
    }

    /// 간극이 양수인 유효한 배치인지 여부.
    pub fn has_valid_gap(&self) -> bool {
        self.baffle_count > 0 && self.gap_m() > 0.0 && self.gap_height_m() > 0.0
    }
}

/// 표준 배플 두께 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThicknessClass {
    T100,
    T200,
    T300,
}

impl ThicknessClass {
    pub const ALL: [ThicknessClass; 3] = [
        ThicknessClass::T100,
        ThicknessClass::T200,
        ThicknessClass::T300,
    ];

    /// 두께[mm]에 해당하는 등급. 표준 두께가 아니면 None.
    pub fn from_mm(thickness_mm: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| (c.mm() - thickness_mm).abs() < 1e-9)
    }

    pub fn mm(self) -> f64 {
        match self {
            ThicknessClass::T100 => 100.0,
            ThicknessClass::T200 => 200.0,
            ThicknessClass::T300 => 300.0,
        }
    }

    /// 모델 코드에 쓰이는 두께 문자.
    pub fn code_letter(self) -> char {
        match self {
            ThicknessClass::T100 => 'X',
            ThicknessClass::T200 => 'Y',
            ThicknessClass::T300 => 'Z',
        }
    }
}

/// 형상/유속 검증 결과. 계산은 항상 진행되며 이 값은 "진행" 가능 여부만 판단한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignCheck {
    pub gap_mm: f64,
    pub free_area_m2: f64,
    pub velocity_m_per_s: f64,
    pub max_velocity_m_per_s: f64,
    pub gap_valid: bool,
    pub velocity_valid: bool,
}

impl DesignCheck {
    pub fn is_valid(&self) -> bool {
        self.gap_valid && self.velocity_valid
    }
}

/// 간극과 유속 한계를 검사한다.
pub fn check_design(geometry: &Geometry, flow_m3_per_h: f64, max_velocity_m_per_s: f64) -> DesignCheck {
    let velocity = geometry.gap_velocity_m_per_s(flow_m3_per_h);
    let gap_valid = geometry.has_valid_gap();
    let velocity_valid = velocity <= max_velocity_m_per_s;
    if !gap_valid {
        log::warn!(
            "간극이 0 이하인 배치: 폭 {} mm, 배플 {} x {} mm",
            geometry.width_mm,
            geometry.baffle_count,
            geometry.thickness_mm
        );
    } else if !velocity_valid {
        log::warn!("간극 유속 {velocity:.2} m/s가 허용치 {max_velocity_m_per_s} m/s를 초과");
    }
    DesignCheck {
        gap_mm: geometry.gap_mm(),
        free_area_m2: geometry.free_area_m2(),
        velocity_m_per_s: velocity,
        max_velocity_m_per_s,
        gap_valid,
        velocity_valid,
    }
}

/// 제품 모델 코드: `SRC <두께 문자><배플 수 문자> <W>X<H>X<D>`.
///
/// 배플 수 문자는 A=1 … Z=26, 범위 밖이거나 비표준 두께면 `?`.
pub fn model_code(geometry: &Geometry) -> String {
    let thickness = ThicknessClass::from_mm(geometry.thickness_mm)
        .map(ThicknessClass::code_letter)
        .unwrap_or('?');
    let count = match geometry.baffle_count {
        n @ 1..=26 => char::from(b'A' + (n - 1) as u8),
        _ => '?',
    };
    format!(
        "SRC {thickness}{count} {}X{}X{}",
        geometry.width_mm, geometry.height_mm, geometry.depth_mm
    )
}
