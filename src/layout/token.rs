/// SPL token account decoding; only the balance is needed.
use super::reader::AccountReader;
use crate::constants::{TOKEN_ACCOUNT_AMOUNT_OFFSET, TOKEN_ACCOUNT_SIZE};
use crate::errors::SwapResult;
use solana_sdk::pubkey::Pubkey;

/// Read `amount` from a token account (mint, owner, amount, ...)
pub fn read_token_account_amount(data: &[u8], account: &Pubkey) -> SwapResult<u64> {
    let label = account.to_string();
    let mut r = AccountReader::new(data, &label);
    r.require_len(TOKEN_ACCOUNT_SIZE)?;
    r.skip(TOKEN_ACCOUNT_AMOUNT_OFFSET)?;
    r.read_u64()
}
