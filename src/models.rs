// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Id of the persistent fallback wallet.
pub const UNKNOWN_WALLET_ID: &str = "unknown";

/// Largest amount a single transaction may carry (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// A validated, non-negative transaction amount. The sign of a transaction
/// is carried by its [`TxType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> LedgerResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        if value > MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        Ok(Amount(value.normalize()))
    }

    /// Parse user input such as `"12.50"`. Anything that is not a plain
    /// non-negative decimal up to [`MAX_AMOUNT`] is rejected.
    pub fn parse(s: &str) -> LedgerResult<Self> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| LedgerError::InvalidAmount(s.to_string()))?;
        Amount::new(value)
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(a: Amount) -> Self {
        a.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    /// Effect of `amount` on a wallet balance.
    pub fn signed(self, amount: Amount) -> Decimal {
        match self {
            TxType::Income => amount.value(),
            TxType::Expense => -amount.value(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub r#type: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_persistent: bool,
}

impl Wallet {
    pub fn unknown() -> Self {
        Wallet {
            id: UNKNOWN_WALLET_ID.to_string(),
            name: "Unknown".to_string(),
            r#type: "unknown".to_string(),
            balance: Decimal::ZERO,
            icon: Some("mdi:help-circle-outline".to_string()),
            is_persistent: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Amount,
    pub r#type: TxType,
    #[serde(default)]
    pub category_id: String,
    // Records written before wallets existed have no walletId at all.
    #[serde(default)]
    pub wallet_id: String,
    #[serde(with = "day")]
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.r#type.signed(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub limit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecimalFormat {
    pub decimal_places: u32,
    pub decimal_separator: String,
    pub thousands_separator: String,
    pub show_decimals: bool,
}

impl Default for DecimalFormat {
    fn default() -> Self {
        DecimalFormat {
            decimal_places: 2,
            decimal_separator: ".".to_string(),
            thousands_separator: ",".to_string(),
            show_decimals: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow::anyhow!(
                "Invalid theme '{}', expected light|dark",
                other
            )),
        }
    }
}

/// The two collections whose consistency the ledger maintains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
}

impl LedgerState {
    pub fn wallet(&self, id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    pub fn has_wallet(&self, id: &str) -> bool {
        self.wallet(id).is_some()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Signed sum of every transaction routed to `wallet_id`.
    pub fn signed_sum(&self, wallet_id: &str) -> LedgerResult<Decimal> {
        self.transactions
            .iter()
            .filter(|t| t.wallet_id == wallet_id)
            .try_fold(Decimal::ZERO, |acc, t| {
                acc.checked_add(t.signed_amount())
                    .ok_or_else(|| LedgerError::Overflow(wallet_id.to_string()))
            })
    }

    /// Shift a wallet balance by `delta`. A missing wallet is left alone
    /// and reported as `Ok(false)`.
    pub fn adjust_balance(&mut self, wallet_id: &str, delta: Decimal) -> LedgerResult<bool> {
        let Some(w) = self.wallets.iter_mut().find(|w| w.id == wallet_id) else {
            return Ok(false);
        };
        w.balance = w
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::Overflow(wallet_id.to_string()))?;
        Ok(true)
    }
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Amount,
    pub r#type: TxType,
    pub category_id: String,
    pub wallet_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl NewTransaction {
    /// A transaction on the fallback wallet, dated today.
    pub fn new(amount: Amount, r#type: TxType, category_id: impl Into<String>) -> Self {
        NewTransaction {
            amount,
            r#type,
            category_id: category_id.into(),
            wallet_id: None,
            date: None,
            note: None,
        }
    }
}

/// Partial replacement of a transaction's fields.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Amount>,
    pub r#type: Option<TxType>,
    pub category_id: Option<String>,
    pub wallet_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.r#type.is_none()
            && self.category_id.is_none()
            && self.wallet_id.is_none()
            && self.date.is_none()
            && self.note.is_none()
    }

    pub fn apply(&self, tx: &mut Transaction) {
        if let Some(a) = self.amount {
            tx.amount = a;
        }
        if let Some(t) = self.r#type {
            tx.r#type = t;
        }
        if let Some(c) = &self.category_id {
            tx.category_id = c.clone();
        }
        if let Some(w) = &self.wallet_id {
            tx.wallet_id = w.clone();
        }
        if let Some(d) = self.date {
            tx.date = d;
        }
        if let Some(n) = &self.note {
            tx.note = n.clone();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WalletPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub limit: Option<Decimal>,
    pub icon: Option<String>,
}

/// Calendar dates are stored as `YYYY-MM-DD`. Older records carry a full
/// RFC 3339 timestamp; those are read back as their UTC date.
mod day {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc).date_naive());
        }
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, FORMAT).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_rejects_negative_and_garbage() {
        assert!(Amount::parse("-1").is_err());
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("").is_err());
        assert_eq!(Amount::parse(" 12.50 ").unwrap().to_string(), "12.5");
        assert_eq!(Amount::parse("1e3").unwrap().value(), Decimal::from(1000));
    }

    #[test]
    fn amount_is_capped() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000i64));
        assert!(Amount::parse("1000000000000000").is_ok());
        assert!(matches!(
            Amount::parse("1000000000000000.01"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(Amount::parse("79228162514264337593543950335").is_err());
        assert!(serde_json::from_str::<Amount>(r#""100000000000000000000""#).is_err());
    }

    #[test]
    fn balance_overflow_is_an_error() {
        let mut state = LedgerState {
            wallets: vec![Wallet {
                balance: Decimal::MAX,
                ..Wallet::unknown()
            }],
            transactions: vec![],
        };
        assert!(matches!(
            state.adjust_balance(UNKNOWN_WALLET_ID, Decimal::ONE),
            Err(LedgerError::Overflow(_))
        ));
        assert_eq!(state.wallets[0].balance, Decimal::MAX);
        assert_eq!(state.adjust_balance("gone", Decimal::ONE).unwrap(), false);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }

    #[test]
    fn legacy_transaction_without_wallet_reads_back() {
        let raw = r#"{"id":"t1","amount":12.5,"type":"expense","categoryId":"1","date":"2025-03-04T23:30:00.000Z"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.wallet_id, "");
        assert_eq!(tx.note, "");
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(tx.signed_amount(), Decimal::new(-125, 1));
    }

    #[test]
    fn timestamp_with_offset_normalizes_to_utc_day() {
        assert_eq!(
            day::parse("2025-03-05T01:00:00+02:00"),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
        assert_eq!(day::parse("nope"), None);
    }

    #[test]
    fn wallet_roundtrips_with_camel_case_keys() {
        let json = serde_json::to_value(Wallet::unknown()).unwrap();
        assert_eq!(json["id"], "unknown");
        assert_eq!(json["type"], "unknown");
        assert_eq!(json["isPersistent"], true);
    }
}
