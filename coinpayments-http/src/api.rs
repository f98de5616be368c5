//! One method per remote command.
//!
//! Each method builds the matching [`coinpayments::requests`] value and hands
//! it to [`CoinPaymentsClient::send`]. Results are the envelope's opaque
//! `result` payload.

use coinpayments::ApiRequest;
use coinpayments::requests::{
    Balances, CallbackAddress, ClaimPbnTag, ConvertCoins, CreateMassWithdrawal, CreateTransaction,
    CreateTransfer, CreateWithdrawal, MassWithdrawal, Rates, Simple, TxIds, TxInfo, TxInfoMulti,
    UpdatePbnTag, WithdrawalHistory,
};
use serde_json::Value;

use crate::client::CoinPaymentsClient;
use crate::error::ClientError;

/// Result of a convenience call.
pub type ApiResult = Result<Option<Value>, ClientError>;

impl CoinPaymentsClient {
    /// Sends any typed request.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn send<R: ApiRequest>(&self, request: R) -> ApiResult {
        let command = request.command();
        self.call(command, request.into_params()).await
    }

    /// Coin balances. `all` includes coins with a zero balance.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn balances(&self, all: Option<bool>) -> ApiResult {
        self.send(Balances { all }).await
    }

    /// Exchange rates and coin list.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn rates(&self, query: Rates) -> ApiResult {
        self.send(query).await
    }

    /// Information about one transaction.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn tx_info(&self, txid: impl Into<String>, full: Option<bool>) -> ApiResult {
        self.send(TxInfo {
            full,
            ..TxInfo::new(txid)
        })
        .await
    }

    /// Basic account information.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn basic_info(&self) -> ApiResult {
        self.send(Simple::basic_info()).await
    }

    /// Callback address for `currency` with IPNs sent to `ipn_url`.
    ///
    /// Without an IPN URL this is a plain deposit address request.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn callback_address(
        &self,
        currency: impl Into<String>,
        ipn_url: Option<String>,
    ) -> ApiResult {
        self.send(CallbackAddress {
            currency: currency.into(),
            ipn_url,
        })
        .await
    }

    /// Deposit address for `currency`.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn deposit_address(&self, currency: impl Into<String>) -> ApiResult {
        self.send(Simple::deposit_address(currency)).await
    }

    /// Starts a buyer transaction.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn create_transaction(&self, request: CreateTransaction) -> ApiResult {
        self.send(request).await
    }

    /// Withdraws to an address.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn create_withdrawal(&self, request: CreateWithdrawal) -> ApiResult {
        self.send(request).await
    }

    /// Submits several withdrawals at once. Results are keyed `wd0`, `wd1`, …
    /// in the order given.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn create_mass_withdrawal(&self, withdrawals: Vec<MassWithdrawal>) -> ApiResult {
        self.send(CreateMassWithdrawal { withdrawals }).await
    }

    /// Information about one withdrawal.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn withdrawal_info(&self, id: impl Into<String>) -> ApiResult {
        self.send(Simple::withdrawal_info(id)).await
    }

    /// Withdrawal history page.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn withdrawal_history(&self, query: WithdrawalHistory) -> ApiResult {
        self.send(query).await
    }

    /// Information about several transactions.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn tx_info_multi<I, S>(&self, txids: I) -> ApiResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send(TxInfoMulti {
            txids: txids.into_iter().map(Into::into).collect(),
        })
        .await
    }

    /// Transaction id page.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn tx_ids(&self, query: TxIds) -> ApiResult {
        self.send(query).await
    }

    /// Transfers coins to a merchant ID or `$PayByName` tag.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`]. Fails with
    /// [`ClientError::MissingParameter`] if neither recipient is set.
    pub async fn create_transfer(&self, request: CreateTransfer) -> ApiResult {
        self.send(request).await
    }

    /// Converts coins.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn convert(&self, request: ConvertCoins) -> ApiResult {
        self.send(request).await
    }

    /// Information about one conversion.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn conversion_info(&self, id: impl Into<String>) -> ApiResult {
        self.send(Simple::conversion_info(id)).await
    }

    /// `$PayByName` profile for `pbntag`.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn pbn_info(&self, pbntag: impl Into<String>) -> ApiResult {
        self.send(Simple::pbn_info(pbntag)).await
    }

    /// `$PayByName` tags owned by the account.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn pbn_list(&self) -> ApiResult {
        self.send(Simple::pbn_list()).await
    }

    /// Updates a `$PayByName` profile.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn update_pbn_tag(&self, request: UpdatePbnTag) -> ApiResult {
        self.send(request).await
    }

    /// Claims a `$PayByName` tag under `name`.
    ///
    /// # Errors
    ///
    /// See [`CoinPaymentsClient::execute`].
    pub async fn claim_pbn_tag(
        &self,
        tagid: impl Into<String>,
        name: impl Into<String>,
    ) -> ApiResult {
        self.send(ClaimPbnTag {
            tagid: tagid.into(),
            name: name.into(),
        })
        .await
    }
}
