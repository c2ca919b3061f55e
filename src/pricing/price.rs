use serde::Serialize;

use crate::acoustics::level::round_to;
use crate::geometry::Geometry;
use crate::pricing::components::{
    baffle_cost, box_cost, lateral_cost, BaffleQuantities, BoxQuantities, PricedComponent,
};
use crate::pricing::price_table::PriceTable;

/// 판매가 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceResult {
    pub box_cost: PricedComponent<BoxQuantities>,
    pub baffles: PricedComponent<BaffleQuantities>,
    /// 측벽 배플(면 수가 0이면 없음)
    pub lateral: Option<PricedComponent<BaffleQuantities>>,
    /// 구성품 판매가 합계
    pub total: f64,
}

/// 박스·배플(·측벽 배플) 판매가를 합산한다.
///
/// 박스는 `box_table`, 배플과 측벽 배플은 `baffle_table`의 단가와 간접비/이윤율을 쓴다.
pub fn price_total(
    geometry: &Geometry,
    box_table: &PriceTable,
    baffle_table: &PriceTable,
    lateral_faces: u32,
) -> PriceResult {
    let box_part = box_cost(geometry, box_table);
    let baffles = baffle_cost(geometry, baffle_table);
    let lateral = (lateral_faces > 0).then(|| lateral_cost(geometry, lateral_faces, baffle_table));

    let total = box_part.cost.final_price
        + baffles.cost.final_price
        + lateral.as_ref().map_or(0.0, |l| l.cost.final_price);
    log::debug!(
        "판매가: 박스 {:.2}, 배플 {:.2}, 합계 {total:.2}",
        box_part.cost.final_price,
        baffles.cost.final_price
    );

    PriceResult {
        box_cost: box_part,
        baffles,
        lateral,
        total: round_to(total, 2),
    }
}
