use serde::Serialize;

use crate::acoustics::level::round_to;
use crate::geometry::Geometry;
use crate::pricing::price_table::{keys, PriceTable};

/// 판금 손실 여유율
pub const SHEET_WASTE_FACTOR: f64 = 1.2;
/// 흡음재 손실 여유율
pub const WOOL_WASTE_FACTOR: f64 = 1.05;
/// 박스 벽 접힘 여유 [mm]
const BOX_FOLD_ALLOWANCE_MM: f64 = 35.0;
/// 배플 프레임 플랜지 합계 [mm] (양쪽 20 mm)
const FRAME_FLANGE_MM: f64 = 40.0;
const CORNERS_PER_BOX: u32 = 8;
const RIVETS_PER_BAFFLE: u32 = 12;
const PALLETS_PER_BOX: u32 = 1;

/// 직접비 → 간접비 → 이윤 → 판매가 내역. 금액은 소수 둘째 자리.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostBreakdown {
    pub materials: f64,
    pub labor: f64,
    pub subtotal: f64,
    pub indirect: f64,
    pub margin: f64,
    pub final_price: f64,
}

impl CostBreakdown {
    /// 직접비에 단가표의 간접비(%)와 이윤(%)을 차례로 얹는다.
    ///
    /// 간접비 = 소계 × 간접비율, 이윤 = (소계 + 간접비) × 이윤율
    pub fn from_direct(materials: f64, labor: f64, table: &PriceTable) -> Self {
        let subtotal = materials + labor;
        let indirect = subtotal * table.fraction(keys::INDIRECT);
        let margin = (subtotal + indirect) * table.fraction(keys::MARGIN);
        let final_price = subtotal + indirect + margin;
        Self {
            materials: round_to(materials, 2),
            labor: round_to(labor, 2),
            subtotal: round_to(subtotal, 2),
            indirect: round_to(indirect, 2),
            margin: round_to(margin, 2),
            final_price: round_to(final_price, 2),
        }
    }
}

/// 물량과 원가를 함께 담는 구성품 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricedComponent<Q> {
    pub quantities: Q,
    pub cost: CostBreakdown,
}

/// 외함(박스) 물량.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoxQuantities {
    /// 벽 면적(여유율 적용 전) [m²], 인건비 기준
    pub wall_area_m2: f64,
    /// 0.8 mm 판금 [m²]
    pub sheet_08_m2: f64,
    /// P30 프로파일 [m]
    pub profile_m: f64,
    pub corners: u32,
    pub rivets: u32,
    pub pallets: u32,
}

/// 배플(흡음 스플리터) 물량.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BaffleQuantities {
    /// 흡음면 면적(여유율 적용 전) [m²], 인건비 기준
    pub acoustic_area_m2: f64,
    /// 흡음재 [m²]
    pub wool_m2: f64,
    /// 0.6 mm 프레임 판금 [m²]
    pub sheet_06_m2: f64,
}

/// 외함 물량을 산출한다.
pub fn box_quantities(geometry: &Geometry) -> BoxQuantities {
    let w = geometry.width_mm;
    let h = geometry.height_mm;
    let l = geometry.depth_mm;
    let wall_area_m2 =
        (2.0 * l * (h + BOX_FOLD_ALLOWANCE_MM) + 2.0 * l * (w + BOX_FOLD_ALLOWANCE_MM)) / 1e6;
    BoxQuantities {
        wall_area_m2,
        sheet_08_m2: wall_area_m2 * SHEET_WASTE_FACTOR,
        profile_m: 4.0 * (w + h) / 1000.0,
        corners: CORNERS_PER_BOX,
        rivets: geometry.baffle_count * RIVETS_PER_BAFFLE,
        pallets: PALLETS_PER_BOX,
    }
}

/// 외함 원가. 인건비 = 벽 면적 × 박스 인건비 단가.
pub fn box_cost(geometry: &Geometry, table: &PriceTable) -> PricedComponent<BoxQuantities> {
    let q = box_quantities(geometry);
    let materials = q.sheet_08_m2 * table.value(keys::SHEET_08)
        + q.profile_m * table.value(keys::PROFILE_P30)
        + f64::from(q.corners) * table.value(keys::CORNERS)
        + f64::from(q.rivets) * table.value(keys::RIVETS)
        + f64::from(q.pallets) * table.value(keys::PALLET);
    let labor = q.wall_area_m2 * table.value(keys::LABOR_BOX);
    PricedComponent {
        quantities: rounded_box(q),
        cost: CostBreakdown::from_direct(materials, labor, table),
    }
}

/// 내부 배플 물량. 배플 한 장은 양면 흡음, 프레임은 둘레 × (두께 + 플랜지).
pub fn baffle_quantities(geometry: &Geometry) -> BaffleQuantities {
    if geometry.baffle_count == 0 {
        return BaffleQuantities::default();
    }
    let n = f64::from(geometry.baffle_count);
    let h = geometry.height_mm;
    let l = geometry.depth_mm;
    let acoustic_area_m2 = 2.0 * h * l * n / 1e6;
    let frame_m2 = n * 2.0 * (h + l) * (geometry.thickness_mm + FRAME_FLANGE_MM) / 1e6;
    BaffleQuantities {
        acoustic_area_m2,
        wool_m2: acoustic_area_m2 * WOOL_WASTE_FACTOR,
        sheet_06_m2: frame_m2 * SHEET_WASTE_FACTOR,
    }
}

/// 배플 원가. 인건비 = 흡음면 면적 × 배플 인건비 단가.
pub fn baffle_cost(geometry: &Geometry, table: &PriceTable) -> PricedComponent<BaffleQuantities> {
    let q = baffle_quantities(geometry);
    let materials =
        q.wool_m2 * table.value(keys::WOOL) + q.sheet_06_m2 * table.value(keys::SHEET_06);
    let labor = q.acoustic_area_m2 * table.value(keys::LABOR_BAFFLES);
    PricedComponent {
        quantities: rounded_baffle(q),
        cost: CostBreakdown::from_direct(materials, labor, table),
    }
}

/// 측벽 배플 물량(면 수 합계). 측벽 배플은 한 면만 흡음하며 두께는 내부 배플의 절반이다.
pub fn lateral_quantities(geometry: &Geometry, faces: u32) -> BaffleQuantities {
    if faces == 0 {
        return BaffleQuantities::default();
    }
    let faces = f64::from(faces);
    let h = geometry.height_mm;
    let l = geometry.depth_mm;
    let acoustic_area_m2 = faces * h * l / 1e6;
    let frame_m2 = faces * 2.0 * (h + l) * (geometry.thickness_mm / 2.0 + FRAME_FLANGE_MM) / 1e6;
    BaffleQuantities {
        acoustic_area_m2,
        wool_m2: acoustic_area_m2 * WOOL_WASTE_FACTOR,
        sheet_06_m2: frame_m2 * SHEET_WASTE_FACTOR,
    }
}

/// 측벽 배플 원가. 필름 없는 흡음재와 측벽 인건비 단가를 쓴다.
pub fn lateral_cost(
    geometry: &Geometry,
    faces: u32,
    table: &PriceTable,
) -> PricedComponent<BaffleQuantities> {
    let q = lateral_quantities(geometry, faces);
    let materials = q.wool_m2 * table.value(keys::WOOL_NO_FILM)
        + q.sheet_06_m2 * table.value(keys::SHEET_06);
    let labor = q.acoustic_area_m2 * table.value(keys::LABOR_LATERAL);
    PricedComponent {
        quantities: rounded_baffle(q),
        cost: CostBreakdown::from_direct(materials, labor, table),
    }
}

fn rounded_box(q: BoxQuantities) -> BoxQuantities {
    BoxQuantities {
        wall_area_m2: round_to(q.wall_area_m2, 3),
        sheet_08_m2: round_to(q.sheet_08_m2, 3),
        profile_m: round_to(q.profile_m, 2),
        ..q
    }
}

fn rounded_baffle(q: BaffleQuantities) -> BaffleQuantities {
    BaffleQuantities {
        acoustic_area_m2: round_to(q.acoustic_area_m2, 3),
        wool_m2: round_to(q.wool_m2, 3),
        sheet_06_m2: round_to(q.sheet_06_m2, 3),
    }
}
