use serde::{Deserialize, Serialize};

/// 단가표 항목 설명 문자열(조회 키).
pub mod keys {
    pub const SHEET_08: &str = "Sheet metal 0.8 mm (m2)";
    pub const SHEET_06: &str = "Sheet metal 0.6 mm (m2)";
    pub const PROFILE_P30: &str = "Profile P30 (m)";
    pub const CORNERS: &str = "Metal corners (pc)";
    pub const RIVETS: &str = "Rivets (pc)";
    pub const PALLET: &str = "Pallet + packaging (pc)";
    pub const WOOL: &str = "Mineral wool (m2)";
    pub const WOOL_NO_FILM: &str = "Mineral wool without film (m2)";
    pub const LABOR_BOX: &str = "Box labour (per m2)";
    pub const LABOR_BAFFLES: &str = "Baffle labour (per m2)";
    pub const LABOR_LATERAL: &str = "Lateral baffle labour (per m2)";
    pub const INDIRECT: &str = "Indirect costs (%)";
    pub const MARGIN: &str = "Profit margin (%)";
}

/// 단가 항목 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Material,
    Labor,
    /// 백분율 계수(간접비, 이윤)
    Factor,
}

/// 단가표 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineItem {
    pub description: String,
    pub category: PriceCategory,
    /// 단위당 금액, 또는 Factor 항목이면 정수 백분율(35 = 35 %)
    pub value: f64,
}

impl PriceLineItem {
    pub fn new(description: &str, category: PriceCategory, value: f64) -> Self {
        Self {
            description: description.to_string(),
            category,
            value,
        }
    }
}

/// 관리자가 편집하는 단가표. 설명 문자열로 조회하며 없는 항목은 0으로 본다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    items: Vec<PriceLineItem>,
}

impl PriceTable {
    pub fn new(items: Vec<PriceLineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[PriceLineItem] {
        &self.items
    }

    /// 설명 문자열로 값을 찾는다. 없으면 경고를 남기고 0.
    pub fn value(&self, description: &str) -> f64 {
        match self.items.iter().find(|item| item.description == description) {
            Some(item) => item.value,
            None => {
                log::warn!("단가표에 '{description}' 항목이 없어 0으로 계산합니다.");
                0.0
            }
        }
    }

    /// 백분율 항목을 소수로 돌려준다(35 → 0.35).
    pub fn fraction(&self, description: &str) -> f64 {
        self.value(description) / 100.0
    }

    /// 같은 설명의 항목 값을 바꾸거나 새로 추가한다.
    pub fn set(&mut self, description: &str, category: PriceCategory, value: f64) {
        match self
            .items
            .iter_mut()
            .find(|item| item.description == description)
        {
            Some(item) => {
                item.category = category;
                item.value = value;
            }
            None => self
                .items
                .push(PriceLineItem::new(description, category, value)),
        }
    }

    /// 기본 박스 단가표.
    pub fn default_box() -> Self {
        use PriceCategory::*;
        Self::new(vec![
            PriceLineItem::new(keys::SHEET_08, Material, 7.50),
            PriceLineItem::new(keys::PROFILE_P30, Material, 1.30),
            PriceLineItem::new(keys::CORNERS, Material, 0.15),
            PriceLineItem::new(keys::RIVETS, Material, 0.02),
            PriceLineItem::new(keys::PALLET, Material, 4.50),
            PriceLineItem::new(keys::LABOR_BOX, Labor, 4.50),
            PriceLineItem::new(keys::INDIRECT, Factor, 35.0),
            PriceLineItem::new(keys::MARGIN, Factor, 15.0),
        ])
    }

    /// 기본 배플 단가표.
    pub fn default_baffle() -> Self {
        use PriceCategory::*;
        Self::new(vec![
            PriceLineItem::new(keys::SHEET_06, Material, 5.50),
            PriceLineItem::new(keys::WOOL, Material, 6.50),
            PriceLineItem::new(keys::WOOL_NO_FILM, Material, 4.00),
            PriceLineItem::new(keys::LABOR_BAFFLES, Labor, 5.00),
            PriceLineItem::new(keys::LABOR_LATERAL, Labor, 5.00),
            PriceLineItem::new(keys::INDIRECT, Factor, 35.0),
            PriceLineItem::new(keys::MARGIN, Factor, 15.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_description_prices_at_zero() {
        let table = PriceTable::default_box();
        assert_eq!(table.value("Unobtainium (kg)"), 0.0);
        assert_eq!(table.value(keys::SHEET_08), 7.5);
    }

    #[test]
    fn factors_are_whole_percentages() {
        let table = PriceTable::default_baffle();
        assert!((table.fraction(keys::INDIRECT) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn set_replaces_or_appends() {
        let mut table = PriceTable::default();
        table.set(keys::RIVETS, PriceCategory::Material, 0.03);
        table.set(keys::RIVETS, PriceCategory::Material, 0.05);
        assert_eq!(table.items().len(), 1);
        assert_eq!(table.value(keys::RIVETS), 0.05);
    }
}
