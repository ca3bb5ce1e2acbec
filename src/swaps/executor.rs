/// Transaction signing, submission and confirmation polling
use super::types::{TransactionOutcome, TransactionStatus};
use crate::arguments::is_debug_transactions_enabled;
use crate::errors::{SwapError, SwapResult};
use crate::logger::{self, LogTag};
use crate::rpc::LedgerRpc;
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    signature::{Signature, Signer},
    transaction::Transaction,
};
use std::time::Duration;
use tokio::time::Instant;

pub struct TransactionExecutor<'a, R: LedgerRpc> {
    rpc: &'a R,
    poll_interval: Duration,
    confirm_timeout: Duration,
}

impl<'a, R: LedgerRpc> TransactionExecutor<'a, R> {
    pub fn new(rpc: &'a R, poll_interval: Duration, confirm_timeout: Duration) -> Self {
        Self {
            rpc,
            poll_interval,
            confirm_timeout,
        }
    }

    /// Sign with every signer (the first one pays), send, then wait for a terminal status.
    ///
    /// Ledger failures and deadline expiry are outcomes, not errors.
    pub async fn submit(
        &self,
        signers: &[&dyn Signer],
        instructions: &[Instruction],
    ) -> SwapResult<TransactionOutcome> {
        let payer = signers
            .first()
            .ok_or_else(|| SwapError::Signing("No signers provided".to_string()))?
            .pubkey();

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let message = Message::new_with_blockhash(instructions, Some(&payer), &blockhash);
        let mut transaction = Transaction::new_unsigned(message);

        let signer_list: Vec<&dyn Signer> = signers.to_vec();
        transaction
            .try_sign(&signer_list, blockhash)
            .map_err(|e| SwapError::Signing(format!("Failed to sign transaction: {}", e)))?;

        if is_debug_transactions_enabled() {
            logger::debug(
                LogTag::Transactions,
                &format!(
                    "Sending transaction with {} instruction(s), {} signer(s), blockhash {}",
                    instructions.len(),
                    signers.len(),
                    blockhash
                ),
            );
        }

        let signature = self.rpc.send_transaction(&transaction).await?;
        logger::info(
            LogTag::Transactions,
            &format!("Transaction sent: {}", signature),
        );

        let status = self.wait_for_status(&signature).await;
        Ok(TransactionOutcome { signature, status })
    }

    async fn wait_for_status(&self, signature: &Signature) -> TransactionStatus {
        let deadline = Instant::now() + self.confirm_timeout;

        loop {
            let poll = async {
                tokio::time::sleep(self.poll_interval).await;
                self.rpc.get_signature_status(signature).await
            };
            // The deadline bounds the sleep and a slow status request together
            let Ok(polled) = tokio::time::timeout_at(deadline, poll).await else {
                return self.timed_out(signature);
            };

            match polled {
                Ok(Some(status)) if status.is_terminal() => {
                    return match status.err {
                        Some(err) => {
                            logger::warning(
                                LogTag::Transactions,
                                &format!("Transaction {} failed: {}", signature, err),
                            );
                            TransactionStatus::Failed(err)
                        }
                        None => {
                            logger::info(
                                LogTag::Transactions,
                                &format!(
                                    "Transaction {} reached {:?} in slot {}",
                                    signature, status.confirmation_status, status.slot
                                ),
                            );
                            TransactionStatus::Confirmed
                        }
                    };
                }
                Ok(status) => {
                    if is_debug_transactions_enabled() {
                        logger::debug(
                            LogTag::Transactions,
                            &format!("Status for {}: {:?}", signature, status),
                        );
                    }
                }
                Err(e) => {
                    logger::warning(
                        LogTag::Transactions,
                        &format!("Status poll for {} failed: {}", signature, e),
                    );
                }
            }

            if Instant::now() >= deadline {
                return self.timed_out(signature);
            }
        }
    }

    fn timed_out(&self, signature: &Signature) -> TransactionStatus {
        logger::warning(
            LogTag::Transactions,
            &format!(
                "Transaction {} not confirmed within {}s",
                signature,
                self.confirm_timeout.as_secs()
            ),
        );
        TransactionStatus::TimedOut
    }
}
