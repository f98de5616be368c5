//! Typed request builders, one per remote command.
//!
//! Each builder turns its fields into [`Params`] for the dispatcher. Optional
//! fields left as `None` are omitted from the mapping entirely, so the remote
//! service applies its own defaults.

use rust_decimal::Decimal;

use crate::command::Command;
use crate::params::Params;

/// A typed call to one remote command.
pub trait ApiRequest {
    /// The command this request issues.
    fn command(&self) -> Command;

    /// Converts the request into command-specific parameters.
    fn into_params(self) -> Params;
}

/// `balances`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    /// Include coins with a zero balance.
    pub all: Option<bool>,
}

impl ApiRequest for Balances {
    fn command(&self) -> Command {
        Command::Balances
    }

    fn into_params(self) -> Params {
        let mut params = Params::new();
        params.insert_opt("all", self.all);
        params
    }
}

/// `rates`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rates {
    /// Omit full coin names and confirmation counts.
    pub short: Option<bool>,
    /// Report whether each coin is enabled for acceptance.
    pub accepted: Option<bool>,
}

impl ApiRequest for Rates {
    fn command(&self) -> Command {
        Command::Rates
    }

    fn into_params(self) -> Params {
        let mut params = Params::new();
        params.insert_opt("short", self.short);
        params.insert_opt("accepted", self.accepted);
        params
    }
}

/// `get_tx_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInfo {
    /// Transaction to query.
    pub txid: String,
    /// Also return raw checkout and shipping data.
    pub full: Option<bool>,
}

impl TxInfo {
    /// Queries `txid`.
    #[must_use]
    pub fn new(txid: impl Into<String>) -> Self {
        Self {
            txid: txid.into(),
            full: None,
        }
    }
}

impl ApiRequest for TxInfo {
    fn command(&self) -> Command {
        Command::GetTxInfo
    }

    fn into_params(self) -> Params {
        let mut params = Params::new().with("txid", self.txid);
        params.insert_opt("full", self.full);
        params
    }
}

/// `get_callback_address`, or `get_deposit_address` when no IPN URL is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAddress {
    /// Currency the buyer will send.
    pub currency: String,
    /// IPN callback URL.
    pub ipn_url: Option<String>,
}

impl ApiRequest for CallbackAddress {
    fn command(&self) -> Command {
        if self.ipn_url.is_some() {
            Command::GetCallbackAddress
        } else {
            Command::GetDepositAddress
        }
    }

    fn into_params(self) -> Params {
        let mut params = Params::new().with("currency", self.currency);
        params.insert_opt("ipn_url", self.ipn_url);
        params
    }
}

/// `create_transaction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransaction {
    /// Amount in `currency1`.
    pub amount: Decimal,
    /// Original currency of the transaction.
    pub currency1: String,
    /// Currency the buyer will send.
    pub currency2: String,
    /// Payout address on `currency2`'s network.
    pub address: Option<String>,
    /// Buyer's email, used for underpayment and refund notices.
    pub buyer_email: Option<String>,
    /// Buyer's name.
    pub buyer_name: Option<String>,
    /// Item name shown on the payment page and IPNs.
    pub item_name: Option<String>,
    /// Item number shown on the payment page and IPNs.
    pub item_number: Option<String>,
    /// Free-form invoice field.
    pub invoice: Option<String>,
    /// Free-form custom field.
    pub custom: Option<String>,
    /// IPN callback URL.
    pub ipn_url: Option<String>,
}

impl CreateTransaction {
    /// Charges `amount` of `currency1`, paid in `currency2`.
    #[must_use]
    pub fn new(amount: Decimal, currency1: impl Into<String>, currency2: impl Into<String>) -> Self {
        Self {
            amount,
            currency1: currency1.into(),
            currency2: currency2.into(),
            address: None,
            buyer_email: None,
            buyer_name: None,
            item_name: None,
            item_number: None,
            invoice: None,
            custom: None,
            ipn_url: None,
        }
    }
}

impl ApiRequest for CreateTransaction {
    fn command(&self) -> Command {
        Command::CreateTransaction
    }

    fn into_params(self) -> Params {
        let mut params = Params::with_capacity(11)
            .with("amount", self.amount)
            .with("currency1", self.currency1)
            .with("currency2", self.currency2);
        params.insert_opt("address", self.address);
        params.insert_opt("buyer_email", self.buyer_email);
        params.insert_opt("buyer_name", self.buyer_name);
        params.insert_opt("item_name", self.item_name);
        params.insert_opt("item_number", self.item_number);
        params.insert_opt("invoice", self.invoice);
        params.insert_opt("custom", self.custom);
        params.insert_opt("ipn_url", self.ipn_url);
        params
    }
}

/// `create_withdrawal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWithdrawal {
    /// Amount in `currency` (or in `currency2` when set).
    pub amount: Decimal,
    /// Coin to withdraw.
    pub currency: String,
    /// Destination address on `currency`'s network.
    pub address: String,
    /// Currency `amount` is denominated in, for rate calculation only.
    pub currency2: Option<String>,
    /// `$PayByName` destination, overrides any destination tag.
    pub pbntag: Option<String>,
    /// Destination tag (Ripple).
    pub dest_tag: Option<String>,
    /// Skip email confirmation.
    pub auto_confirm: Option<bool>,
    /// IPN callback URL.
    pub ipn_url: Option<String>,
    /// Note attached to the withdrawal.
    pub note: Option<String>,
}

impl CreateWithdrawal {
    /// Withdraws `amount` of `currency` to `address`.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            address: address.into(),
            currency2: None,
            pbntag: None,
            dest_tag: None,
            auto_confirm: None,
            ipn_url: None,
            note: None,
        }
    }
}

impl ApiRequest for CreateWithdrawal {
    fn command(&self) -> Command {
        Command::CreateWithdrawal
    }

    fn into_params(self) -> Params {
        let mut params = Params::with_capacity(9)
            .with("amount", self.amount)
            .with("currency", self.currency)
            .with("address", self.address);
        params.insert_opt("currency2", self.currency2);
        params.insert_opt("pbntag", self.pbntag);
        params.insert_opt("dest_tag", self.dest_tag);
        params.insert_opt("auto_confirm", self.auto_confirm);
        params.insert_opt("ipn_url", self.ipn_url);
        params.insert_opt("note", self.note);
        params
    }
}

/// One entry of a mass withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassWithdrawal {
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Destination address.
    pub address: String,
    /// Coin to withdraw.
    pub currency: String,
}

impl MassWithdrawal {
    /// Withdraws `amount` of `currency` to `address`.
    #[must_use]
    pub fn new(amount: Decimal, address: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount,
            address: address.into(),
            currency: currency.into(),
        }
    }
}

/// `create_mass_withdrawal`
///
/// Entry `i` is sent as `wd[wd{i}][amount]`, `wd[wd{i}][address]` and
/// `wd[wd{i}][currency]`; the service keys its per-entry results by `wd{i}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMassWithdrawal {
    /// Withdrawals in submission order.
    pub withdrawals: Vec<MassWithdrawal>,
}

impl ApiRequest for CreateMassWithdrawal {
    fn command(&self) -> Command {
        Command::CreateMassWithdrawal
    }

    fn into_params(self) -> Params {
        let mut params = Params::with_capacity(self.withdrawals.len() * 3);
        for (i, wd) in self.withdrawals.into_iter().enumerate() {
            params.insert(format!("wd[wd{i}][amount]"), wd.amount);
            params.insert(format!("wd[wd{i}][address]"), wd.address);
            params.insert(format!("wd[wd{i}][currency]"), wd.currency);
        }
        params
    }
}

/// `get_withdrawal_history`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithdrawalHistory {
    /// Maximum entries to return, 1-100.
    pub limit: Option<u32>,
    /// Offset for pagination, newest first.
    pub start: Option<u32>,
    /// Only withdrawals at or after this Unix timestamp.
    pub newer: Option<u64>,
}

impl ApiRequest for WithdrawalHistory {
    fn command(&self) -> Command {
        Command::GetWithdrawalHistory
    }

    fn into_params(self) -> Params {
        let mut params = Params::new();
        params.insert_opt("limit", self.limit);
        params.insert_opt("start", self.start);
        params.insert_opt("newer", self.newer);
        params
    }
}

/// `get_tx_info_multi`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxInfoMulti {
    /// Transactions to query; sent as one `|`-separated value.
    pub txids: Vec<String>,
}

impl ApiRequest for TxInfoMulti {
    fn command(&self) -> Command {
        Command::GetTxInfoMulti
    }

    fn into_params(self) -> Params {
        Params::new().with("txid", self.txids.join("|"))
    }
}

/// `get_tx_ids`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxIds {
    /// Maximum ids to return, 1-100.
    pub limit: Option<u32>,
    /// Offset for pagination, newest first.
    pub start: Option<u32>,
    /// Only transactions at or after this Unix timestamp.
    pub newer: Option<u64>,
    /// Include transactions where the merchant is the buyer.
    pub all: Option<bool>,
}

impl ApiRequest for TxIds {
    fn command(&self) -> Command {
        Command::GetTxIds
    }

    fn into_params(self) -> Params {
        let mut params = Params::new();
        params.insert_opt("limit", self.limit);
        params.insert_opt("start", self.start);
        params.insert_opt("newer", self.newer);
        params.insert_opt("all", self.all);
        params
    }
}

/// `create_transfer`
///
/// At least one of `merchant` and `pbntag` must be set for the call to pass
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransfer {
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Coin to transfer.
    pub currency: String,
    /// Recipient merchant ID.
    pub merchant: Option<String>,
    /// Recipient `$PayByName` tag.
    pub pbntag: Option<String>,
    /// Skip email confirmation. Defaults to `true`.
    pub auto_confirm: bool,
}

impl CreateTransfer {
    /// Transfers `amount` of `currency` to a merchant ID.
    #[must_use]
    pub fn to_merchant(
        amount: Decimal,
        currency: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            merchant: Some(merchant.into()),
            ..Self::unaddressed(amount, currency)
        }
    }

    /// Transfers `amount` of `currency` to a `$PayByName` tag.
    #[must_use]
    pub fn to_pbntag(
        amount: Decimal,
        currency: impl Into<String>,
        pbntag: impl Into<String>,
    ) -> Self {
        Self {
            pbntag: Some(pbntag.into()),
            ..Self::unaddressed(amount, currency)
        }
    }

    fn unaddressed(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            merchant: None,
            pbntag: None,
            auto_confirm: true,
        }
    }
}

impl ApiRequest for CreateTransfer {
    fn command(&self) -> Command {
        Command::CreateTransfer
    }

    fn into_params(self) -> Params {
        let mut params = Params::with_capacity(5)
            .with("auto_confirm", self.auto_confirm)
            .with("amount", self.amount)
            .with("currency", self.currency);
        params.insert_opt("merchant", self.merchant);
        params.insert_opt("pbntag", self.pbntag);
        params
    }
}

/// `convert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertCoins {
    /// Amount in `from`.
    pub amount: Decimal,
    /// Coin to convert from.
    pub from: String,
    /// Coin to convert to.
    pub to: String,
    /// External address for the converted coins; the wallet when unset.
    pub address: Option<String>,
    /// Destination tag (Ripple), only meaningful with `address`.
    pub dest_tag: Option<String>,
}

impl ConvertCoins {
    /// Converts `amount` of `from` into `to`.
    #[must_use]
    pub fn new(amount: Decimal, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
            address: None,
            dest_tag: None,
        }
    }
}

impl ApiRequest for ConvertCoins {
    fn command(&self) -> Command {
        Command::Convert
    }

    fn into_params(self) -> Params {
        let mut params = Params::with_capacity(5)
            .with("amount", self.amount)
            .with("from", self.from)
            .with("to", self.to);
        params.insert_opt("address", self.address);
        params.insert_opt("dest_tag", self.dest_tag);
        params
    }
}

/// `update_pbn_tag`
///
/// Fields left as `None` keep their current value on the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePbnTag {
    /// Tag ID from `get_pbn_list`.
    pub tagid: String,
    /// Profile name.
    pub name: Option<String>,
    /// Profile email.
    pub email: Option<String>,
    /// Profile website.
    pub url: Option<String>,
    /// JPG or PNG image, 250KB or smaller.
    pub image: Option<Vec<u8>>,
}

impl UpdatePbnTag {
    /// Updates the profile of `tagid`.
    #[must_use]
    pub fn new(tagid: impl Into<String>) -> Self {
        Self {
            tagid: tagid.into(),
            name: None,
            email: None,
            url: None,
            image: None,
        }
    }
}

impl ApiRequest for UpdatePbnTag {
    fn command(&self) -> Command {
        Command::UpdatePbnTag
    }

    fn into_params(self) -> Params {
        let mut params = Params::with_capacity(5).with("tagid", self.tagid);
        params.insert_opt("name", self.name);
        params.insert_opt("email", self.email);
        params.insert_opt("url", self.url);
        params.insert_opt("image", self.image);
        params
    }
}

/// `claim_pbn_tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPbnTag {
    /// Tag ID from `get_pbn_list`.
    pub tagid: String,
    /// Display name of the tag, case preserved.
    pub name: String,
}

impl ApiRequest for ClaimPbnTag {
    fn command(&self) -> Command {
        Command::ClaimPbnTag
    }

    fn into_params(self) -> Params {
        Params::new()
            .with("tagid", self.tagid)
            .with("name", self.name)
    }
}

/// A request that needs only a command and at most one identifying field:
/// `get_basic_info`, `get_deposit_address`, `get_withdrawal_info`,
/// `get_conversion_info`, `get_pbn_info`, `get_pbn_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simple {
    command: Command,
    params: Params,
}

impl Simple {
    /// `get_basic_info`
    #[must_use]
    pub const fn basic_info() -> Self {
        Self::bare(Command::GetBasicInfo)
    }

    /// `get_pbn_list`
    #[must_use]
    pub const fn pbn_list() -> Self {
        Self::bare(Command::GetPbnList)
    }

    /// `get_deposit_address`
    #[must_use]
    pub fn deposit_address(currency: impl Into<String>) -> Self {
        Self::keyed(Command::GetDepositAddress, "currency", currency.into())
    }

    /// `get_withdrawal_info`
    #[must_use]
    pub fn withdrawal_info(id: impl Into<String>) -> Self {
        Self::keyed(Command::GetWithdrawalInfo, "id", id.into())
    }

    /// `get_conversion_info`
    #[must_use]
    pub fn conversion_info(id: impl Into<String>) -> Self {
        Self::keyed(Command::GetConversionInfo, "id", id.into())
    }

    /// `get_pbn_info`; the tag may be given with or without its leading `$`.
    #[must_use]
    pub fn pbn_info(pbntag: impl Into<String>) -> Self {
        Self::keyed(Command::GetPbnInfo, "pbntag", pbntag.into())
    }

    const fn bare(command: Command) -> Self {
        Self {
            command,
            params: Params::new(),
        }
    }

    fn keyed(command: Command, key: &'static str, value: String) -> Self {
        Self {
            command,
            params: Params::new().with(key, value),
        }
    }
}

impl ApiRequest for Simple {
    fn command(&self) -> Command {
        self.command
    }

    fn into_params(self) -> Params {
        self.params
    }
}
