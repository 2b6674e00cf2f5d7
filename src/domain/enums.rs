//! 平台的列舉值表
//!
//! 每個 [`EnumDomain`] 只提供成員檢查與正規化；未知值由
//! [`crate::core::normalize::normalize_enum`] 轉成 `InvalidInput`。

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDomain {
    pub name: &'static str,
    pub codes: &'static [&'static str],
}

impl EnumDomain {
    pub const fn new(name: &'static str, codes: &'static [&'static str]) -> Self {
        Self { name, codes }
    }

    /// 回傳表中的標準寫法；比對時忽略大小寫與前後空白
    pub fn canonical(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.codes
            .iter()
            .copied()
            .find(|code| code.eq_ignore_ascii_case(value))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.canonical(value).is_some()
    }
}

pub const SORT_DIRECTION: EnumDomain = EnumDomain::new("sort_direction", &["asc", "desc"]);

pub const POSTING_STATUS: EnumDomain = EnumDomain::new(
    "posting_status",
    &[
        "awaiting_registration",
        "acceptance_in_progress",
        "awaiting_approve",
        "awaiting_packaging",
        "awaiting_deliver",
        "arbitration",
        "client_arbitration",
        "delivering",
        "driver_pickup",
        "delivered",
        "cancelled",
        "not_accepted",
    ],
);

pub const VISIBILITY: EnumDomain = EnumDomain::new(
    "visibility",
    &[
        "ALL",
        "VISIBLE",
        "INVISIBLE",
        "EMPTY_STOCK",
        "NOT_MODERATED",
        "MODERATED",
        "DISABLED",
        "STATE_FAILED",
        "READY_TO_SUPPLY",
        "VALIDATION_STATE_PENDING",
        "VALIDATION_STATE_FAIL",
        "VALIDATION_STATE_SUCCESS",
        "TO_SUPPLY",
        "IN_SALE",
        "REMOVED_FROM_SALE",
        "BANNED",
        "OVERPRICED",
        "CRITICALLY_OVERPRICED",
        "EMPTY_BARCODE",
        "BARCODE_EXISTS",
        "QUARANTINE",
        "ARCHIVED",
        "OVERPRICED_WITH_STOCK",
        "PARTIAL_APPROVED",
        "IMAGE_ABSENT",
        "MODERATION_BLOCK",
    ],
);

pub const LANGUAGE: EnumDomain = EnumDomain::new("language", &["DEFAULT", "RU", "EN", "TR", "ZH_HANS"]);

pub const ATTRIBUTE_TYPE: EnumDomain = EnumDomain::new("attribute_type", &["ALL", "REQUIRED", "OPTIONAL"]);

pub const VAT: EnumDomain = EnumDomain::new("vat", &["0", "0.1", "0.2"]);

pub const WEIGHT_UNIT: EnumDomain = EnumDomain::new("weight_unit", &["g", "kg", "lb"]);

pub const DIMENSION_UNIT: EnumDomain = EnumDomain::new("dimension_unit", &["mm", "cm", "in"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortDirection {
    type Err = crate::utils::error::SellerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match SORT_DIRECTION.canonical(s) {
            Some("asc") => Ok(SortDirection::Asc),
            Some(_) => Ok(SortDirection::Desc),
            None => Err(crate::utils::error::SellerError::invalid_input(
                "sort_dir",
                format!("'{}' is not a member of {}", s, SORT_DIRECTION.name),
            )),
        }
    }
}
