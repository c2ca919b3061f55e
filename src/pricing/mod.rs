//! 박스/배플 자재 물량과 원가, 간접비·이윤을 포함한 판매가 계산.

pub mod components;
pub mod price;
pub mod price_table;

pub use components::*;
pub use price::*;
pub use price_table::{keys, PriceCategory, PriceLineItem, PriceTable};
