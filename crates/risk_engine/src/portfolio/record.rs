//! Trade record type.

use risk_core::types::{Date, TradeAction, TradeStatus};

use super::column::Column;
use super::ids::TradeId;

/// One trade line.
///
/// Input attributes are set at construction through the `with_*` builders.
/// Derived attributes (`mtm`, `realized_pnl`, `unrealized_pnl`,
/// `shocked_mtm`) are written only by the valuation and scenario functions,
/// which always return a new table.
///
/// # Examples
///
/// ```
/// use risk_core::types::TradeAction;
/// use risk_engine::portfolio::TradeRecord;
///
/// let record = TradeRecord::new("T1", 100.0, 50.0, 55.0)
///     .with_commodity("Gold")
///     .with_action(TradeAction::Buy);
///
/// assert_eq!(record.trade_id().as_str(), "T1");
/// assert_eq!(record.notional(), 5_000.0);
/// assert_eq!(record.mtm(), 0.0); // not yet valued
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeRecord {
    trade_id: TradeId,
    trade_date: Option<Date>,
    commodity: Option<String>,
    instrument_type: Option<String>,
    action: Option<TradeAction>,
    status: Option<TradeStatus>,
    quantity: f64,
    book_price: f64,
    market_price: f64,
    premium: Option<f64>,
    uom: Option<String>,
    counterparty: Option<String>,
    mtm: f64,
    realized_pnl: f64,
    unrealized_pnl: f64,
    shocked_mtm: Option<f64>,
}

impl TradeRecord {
    /// Creates a record with the three pricing inputs every valuation needs.
    pub fn new(
        trade_id: impl Into<TradeId>,
        quantity: f64,
        book_price: f64,
        market_price: f64,
    ) -> Self {
        Self {
            trade_id: trade_id.into(),
            trade_date: None,
            commodity: None,
            instrument_type: None,
            action: None,
            status: None,
            quantity,
            book_price,
            market_price,
            premium: None,
            uom: None,
            counterparty: None,
            mtm: 0.0,
            realized_pnl: 0.0,
            unrealized_pnl: 0.0,
            shocked_mtm: None,
        }
    }

    /// Sets the trade date.
    pub fn with_trade_date(mut self, date: Date) -> Self {
        self.trade_date = Some(date);
        self
    }

    /// Sets the commodity.
    pub fn with_commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = Some(commodity.into());
        self
    }

    /// Sets the instrument type.
    pub fn with_instrument_type(mut self, instrument_type: impl Into<String>) -> Self {
        self.instrument_type = Some(instrument_type.into());
        self
    }

    /// Sets the trade action.
    pub fn with_action(mut self, action: TradeAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the trade status.
    pub fn with_status(mut self, status: TradeStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the option premium per unit.
    pub fn with_premium(mut self, premium: f64) -> Self {
        self.premium = Some(premium);
        self
    }

    /// Sets the unit of measure.
    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom = Some(uom.into());
        self
    }

    /// Sets the counterparty.
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    /// Seeds realised and unrealised PnL from an upload.
    ///
    /// These are display values only; [`compute_pnl`](crate::valuation::compute_pnl)
    /// replaces them with the split of the computed MTM.
    pub fn with_reported_pnl(mut self, realized: f64, unrealized: f64) -> Self {
        self.realized_pnl = realized;
        self.unrealized_pnl = unrealized;
        self
    }

    /// Trade identifier.
    pub fn trade_id(&self) -> &TradeId {
        &self.trade_id
    }

    /// Trade date, if known.
    pub fn trade_date(&self) -> Option<Date> {
        self.trade_date
    }

    /// Commodity, if known.
    pub fn commodity(&self) -> Option<&str> {
        self.commodity.as_deref()
    }

    /// Instrument type, if known.
    pub fn instrument_type(&self) -> Option<&str> {
        self.instrument_type.as_deref()
    }

    /// Trade action, if known.
    pub fn action(&self) -> Option<TradeAction> {
        self.action
    }

    /// Trade status, if known.
    pub fn status(&self) -> Option<TradeStatus> {
        self.status
    }

    /// Lot-adjusted quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Book price (strike for options).
    pub fn book_price(&self) -> f64 {
        self.book_price
    }

    /// Market price.
    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Option premium per unit, if any.
    pub fn premium(&self) -> Option<f64> {
        self.premium
    }

    /// Unit of measure, if known.
    pub fn uom(&self) -> Option<&str> {
        self.uom.as_deref()
    }

    /// Counterparty, if known.
    pub fn counterparty(&self) -> Option<&str> {
        self.counterparty.as_deref()
    }

    /// Mark-to-market value (0 until valued).
    pub fn mtm(&self) -> f64 {
        self.mtm
    }

    /// Realised PnL.
    pub fn realized_pnl(&self) -> f64 {
        self.realized_pnl
    }

    /// Unrealised PnL.
    pub fn unrealized_pnl(&self) -> f64 {
        self.unrealized_pnl
    }

    /// MTM under the last applied shock, if any.
    pub fn shocked_mtm(&self) -> Option<f64> {
        self.shocked_mtm
    }

    /// Returns true for option instruments, valued on premium.
    pub fn is_option(&self) -> bool {
        self.instrument_type
            .as_deref()
            .map(|t| {
                let t = t.trim();
                t.eq_ignore_ascii_case("options") || t.eq_ignore_ascii_case("option")
            })
            .unwrap_or(false)
    }

    /// Exposure: `quantity × book_price`.
    pub fn notional(&self) -> f64 {
        self.quantity * self.book_price
    }

    /// Text value of a groupable or text column, using canonical casing for
    /// trade action and status.
    pub fn text_value(&self, column: Column) -> Option<String> {
        match column {
            Column::TradeId => Some(self.trade_id.as_str().to_string()),
            Column::Commodity => self.commodity.clone(),
            Column::InstrumentType => self.instrument_type.clone(),
            Column::TradeAction => self.action.map(|a| a.name().to_string()),
            Column::TradeStatus => self.status.map(|s| s.name().to_string()),
            Column::Uom => self.uom.clone(),
            Column::Counterparty => self.counterparty.clone(),
            Column::TradeDate => self.trade_date.map(|d| d.to_string()),
            _ => self.numeric_value(column).map(|v| v.to_string()),
        }
    }

    /// Numeric value of a numeric column.
    ///
    /// Lot Size and Lots are folded into quantity at ingestion and are not
    /// retained per record.
    pub fn numeric_value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Quantity => Some(self.quantity),
            Column::BookPrice => Some(self.book_price),
            Column::MarketPrice => Some(self.market_price),
            Column::Premium => self.premium,
            Column::RealizedPnl => Some(self.realized_pnl),
            Column::UnrealizedPnl => Some(self.unrealized_pnl),
            _ => None,
        }
    }

    pub(crate) fn set_mtm(&mut self, mtm: f64) {
        self.mtm = mtm;
    }

    pub(crate) fn set_pnl(&mut self, realized: f64, unrealized: f64) {
        self.realized_pnl = realized;
        self.unrealized_pnl = unrealized;
    }

    pub(crate) fn set_shocked_mtm(&mut self, shocked: f64) {
        self.shocked_mtm = Some(shocked);
    }
}
